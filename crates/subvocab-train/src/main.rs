//! Train subword vocabularies from a configuration file
//!
//! # Usage
//!
//! ```bash
//! subvocab-train --config-dir ./config --config-name vocab_baseline.json
//! ```
//!
//! The configuration file selects the corpus (shared, or split src/tgt),
//! the vocabulary type(s) and size(s), and the output directory. When the
//! vocabulary type is `morpheme_aware_BPE`, the corpus is first piped
//! through an external morphological analyzer and BPE training runs on the
//! pre-segmented text.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use subvocab_train::config::TrainerConfigFile;
use subvocab_train::morpheme::{build_morpheme_corpus, CommandAnalyzer};
use subvocab_train::train;
use subvocab_train::trainer::TokenizersTrainer;

/// Train subword vocabularies from a configuration file
#[derive(Parser, Debug)]
#[command(name = "subvocab-train")]
#[command(about = "Train subword vocabularies from a configuration file", long_about = None)]
struct Args {
    /// Configuration file name inside the configuration directory
    #[arg(long, short = 'c', default_value = "vocab_baseline.json")]
    config_name: String,

    /// Directory containing configuration files
    #[arg(long, default_value = "./config", value_name = "PATH")]
    config_dir: PathBuf,

    /// Morphological analyzer command for morpheme-aware training
    #[arg(long, default_value = "mecab", value_name = "CMD")]
    analyzer: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config_dir.join(&args.config_name);
    println!("Your config file: {:?}", config_path);

    let config_file =
        TrainerConfigFile::from_file(&config_path).context("Failed to load config file")?;
    let mut config = config_file
        .resolve()
        .context("Failed to check the configuration")?;

    if config.morpheme_aware {
        let analyzer = if args.analyzer == "mecab" {
            CommandAnalyzer::mecab()
        } else {
            CommandAnalyzer::new(args.analyzer.as_str(), ["-O", "wakati"])
        };
        let corpus = config.spec.corpus_paths()[0].to_path_buf();
        let segmented = build_morpheme_corpus(&corpus, &analyzer)
            .context("Failed to build the morpheme-based corpus")?;
        config.spec = config.spec.map_corpora(|_| segmented.clone());
    }

    train::run(&config, &TokenizersTrainer)
}
