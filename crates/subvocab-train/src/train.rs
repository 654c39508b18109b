//! Sequential training runner
//!
//! Jobs run strictly one after another; the first failure aborts the rest
//! of the sequence, leaving earlier artifacts on disk.

use anyhow::{Context, Result};

use subvocab_plan::expand;

use crate::config::ResolvedConfig;
use crate::corpus;
use crate::trainer::{SpecialPieces, SubwordTrainer, TrainOptions};

/// Check resources, expand the specification, and train every job
pub fn run(config: &ResolvedConfig, trainer: &dyn SubwordTrainer) -> Result<()> {
    corpus::verify_data_dir(&config.data_dir)?;
    let spec = corpus::resolve_corpora(config.spec.clone())?;
    corpus::enter_output_dir(&config.output_dir)?;

    // The trainer sizes its thread pool from the rayon environment; set
    // it once before the first job.
    std::env::set_var("RAYON_NUM_THREADS", config.num_threads.to_string());
    tokenizers::utils::parallelism::set_parallelism(config.num_threads > 1);

    let params = expand(&spec).context("Failed to expand the vocabulary specification")?;
    println!("Planned {} training job(s):", params.len());
    let jobs = params.into_jobs();
    for job in &jobs {
        println!(
            "  {}: type={}, vocab_size={}, corpus={:?}",
            job.prefix, job.vocab_type, job.vocab_size, job.corpus
        );
    }

    let opts = TrainOptions {
        num_threads: config.num_threads,
        max_sentence_length: config.max_sentence_length,
        special: SpecialPieces::default(),
    };

    for job in &jobs {
        trainer
            .train(job, &opts)
            .with_context(|| format!("Training aborted at {}", job.prefix))?;
        println!("Training {} tokenizer succeeded", job.prefix);
    }

    println!("Trained {} tokenizer(s)", jobs.len());
    Ok(())
}
