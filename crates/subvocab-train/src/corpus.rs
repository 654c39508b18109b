//! Corpus path checks and output-directory preparation
//!
//! All missing-resource errors surface here, before any training starts.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use subvocab_plan::VocabSpec;

/// Check that the data directory exists
pub fn verify_data_dir(data_dir: &Path) -> Result<()> {
    if !data_dir.is_dir() {
        bail!("'{}' directory does not exist", data_dir.display());
    }
    Ok(())
}

/// Check that every corpus file exists and rewrite its path to absolute
///
/// Absolute paths keep working after the runner moves into the output
/// directory.
pub fn resolve_corpora(spec: VocabSpec) -> Result<VocabSpec> {
    match spec {
        VocabSpec::UniformSingle { .. } | VocabSpec::UniformMulti { .. } => {
            let corpus = absolutize(spec.corpus_paths()[0])?;
            println!("vocab training corpus file: {:?}", corpus);
            Ok(spec.map_corpora(|_| corpus.clone()))
        }
        VocabSpec::Split {
            mut src,
            mut tgt,
            size_pairs,
        } => {
            src.corpus = absolutize(&src.corpus)?;
            tgt.corpus = absolutize(&tgt.corpus)?;
            println!("vocab training corpus files; 1) src: {:?}", src.corpus);
            println!("vocab training corpus files; 2) tgt: {:?}", tgt.corpus);
            Ok(VocabSpec::Split {
                src,
                tgt,
                size_pairs,
            })
        }
    }
}

/// Create the output directory and make it the working directory
///
/// Changed once, process-wide, before any job runs; trained artifacts are
/// written relative to it.
pub fn enter_output_dir(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;
    std::env::set_current_dir(output_dir)
        .with_context(|| format!("Failed to move into output directory: {:?}", output_dir))?;
    Ok(())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        bail!("'{}' file does not exist", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to resolve corpus path: {:?}", path))
}
