//! Morpheme pre-segmentation for morpheme-aware BPE
//!
//! Literal spaces are first rewritten to a sentinel character so word
//! boundaries survive re-segmentation, then every line is split into
//! whitespace-delimited morphemes by an external analyzer. The resulting
//! corpus is trained on as ordinary text.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Stand-in for literal spaces while the analyzer re-segments a line
pub const SPACE_SENTINEL: &str = "★";

/// Seam to the external morphological analyzer
pub trait MorphemeAnalyzer {
    /// Segment each input line into a whitespace-delimited morpheme sequence
    fn segment_lines(&self, lines: &[String]) -> Result<Vec<String>>;
}

/// Analyzer backed by an external command reading stdin line-by-line
///
/// The default configuration pipes the corpus through `mecab -O wakati`.
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// MeCab in word-split (wakati) output mode
    pub fn mecab() -> Self {
        Self::new("mecab", ["-O", "wakati"])
    }
}

impl MorphemeAnalyzer for CommandAnalyzer {
    fn segment_lines(&self, lines: &[String]) -> Result<Vec<String>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start morphological analyzer '{}'", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .context("Failed to open analyzer stdin")?;
        let mut input = lines.join("\n");
        input.push('\n');
        // The analyzer may block on output before consuming all input, so
        // feed it from a separate thread.
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .context("Failed to read analyzer output")?;
        writer
            .join()
            .map_err(|_| anyhow::anyhow!("Analyzer input writer panicked"))?
            .context("Failed to write corpus to the analyzer")?;

        if !output.status.success() {
            bail!(
                "morphological analyzer '{}' exited with {}",
                self.program,
                output.status
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("Analyzer output is not valid UTF-8")?;
        let segmented: Vec<String> = stdout
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();
        if segmented.len() != lines.len() {
            bail!(
                "analyzer returned {} lines for {} input lines",
                segmented.len(),
                lines.len()
            );
        }
        Ok(segmented)
    }
}

/// Replace literal spaces with the sentinel, dropping trailing whitespace
pub fn replace_whitespace(line: &str) -> String {
    line.trim_end().replace(' ', SPACE_SENTINEL)
}

/// Where the pre-segmented companion of `corpus` lives
pub fn morpheme_corpus_path(corpus: &Path) -> PathBuf {
    let stem = corpus
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("corpus");
    corpus.with_file_name(format!("{stem}_morphs.txt"))
}

/// Build (or reuse) the morpheme-segmented companion of a corpus
///
/// Returns the path of the pre-segmented file. An existing file is reused
/// rather than rebuilt.
pub fn build_morpheme_corpus(
    corpus: &Path,
    analyzer: &dyn MorphemeAnalyzer,
) -> Result<PathBuf> {
    let output = morpheme_corpus_path(corpus);
    if output.is_file() {
        println!("Reusing morpheme-based corpus: {:?}", output);
        return Ok(output);
    }

    let file = File::open(corpus)
        .with_context(|| format!("Failed to open corpus file: {:?}", corpus))?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to read corpus file: {:?}", corpus))?;

    println!("Converting whitespace in the corpus...");
    let masked: Vec<String> = lines.iter().map(|line| replace_whitespace(line)).collect();

    println!("Converting to a morpheme-based corpus...");
    let segmented = analyzer.segment_lines(&masked)?;

    let mut content = segmented.join("\n");
    content.push('\n');
    std::fs::write(&output, content)
        .with_context(|| format!("Failed to write morpheme corpus: {:?}", output))?;

    Ok(output)
}
