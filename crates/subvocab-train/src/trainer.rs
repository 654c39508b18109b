//! Subword-trainer invocation
//!
//! [`SubwordTrainer`] is the seam between the job runner and the actual
//! training backend; [`TokenizersTrainer`] drives the `tokenizers` crate.
//! Each job produces a `{prefix}.json` model file and a `{prefix}.vocab`
//! token table.

use anyhow::{anyhow, bail, Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use subvocab_plan::{TrainJob, VocabType};
use tokenizers::models::bpe::{BpeTrainer, BPE};
use tokenizers::models::unigram::{Unigram, UnigramTrainer};
use tokenizers::models::wordlevel::{WordLevel, WordLevelTrainer};
use tokenizers::models::{ModelWrapper, TrainerWrapper};
use tokenizers::pre_tokenizers::whitespace::WhitespaceSplit;
use tokenizers::{AddedToken, Tokenizer};

/// Fixed special pieces, registered before any learned piece
///
/// Registration order pins the IDs: pad=0, unk=1, bos=2, eos=3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialPieces {
    pad: String,
    unk: String,
    bos: String,
    eos: String,
}

impl SpecialPieces {
    pub const PAD_ID: u32 = 0;
    pub const UNK_ID: u32 = 1;
    pub const BOS_ID: u32 = 2;
    pub const EOS_ID: u32 = 3;

    pub fn pad(&self) -> &str {
        &self.pad
    }

    pub fn unk(&self) -> &str {
        &self.unk
    }

    pub fn bos(&self) -> &str {
        &self.bos
    }

    pub fn eos(&self) -> &str {
        &self.eos
    }

    /// The pieces as trainer special tokens, in ID order
    pub fn added_tokens(&self) -> Vec<AddedToken> {
        vec![
            AddedToken::from(self.pad.clone(), true),
            AddedToken::from(self.unk.clone(), true),
            AddedToken::from(self.bos.clone(), true),
            AddedToken::from(self.eos.clone(), true),
        ]
    }
}

impl Default for SpecialPieces {
    fn default() -> Self {
        Self {
            pad: "[PAD]".to_string(),
            unk: "[UNK]".to_string(),
            bos: "[BOS]".to_string(),
            eos: "[EOS]".to_string(),
        }
    }
}

/// Per-run trainer options shared by every job
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub num_threads: usize,
    /// Sentences longer than this many bytes are skipped
    pub max_sentence_length: usize,
    pub special: SpecialPieces,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            num_threads: 4,
            max_sentence_length: 99999,
            special: SpecialPieces::default(),
        }
    }
}

/// Seam between the job runner and the training backend
pub trait SubwordTrainer {
    /// Train one vocabulary and write its model/vocab pair
    fn train(&self, job: &TrainJob, opts: &TrainOptions) -> Result<()>;
}

/// Training backend built on the `tokenizers` crate
///
/// Model mapping: `unigram` and `bpe` use their namesake trainers, `word`
/// uses word-level training over whitespace-split tokens, and `char` is a
/// unigram trainer restricted to single-character pieces.
pub struct TokenizersTrainer;

impl TokenizersTrainer {
    fn read_sentences(corpus: &Path, max_sentence_length: usize) -> Result<Vec<String>> {
        let file = File::open(corpus)
            .with_context(|| format!("Failed to open corpus file: {:?}", corpus))?;

        let mut sentences = Vec::new();
        let mut skipped = 0usize;
        for line in BufReader::new(file).lines() {
            let line = line
                .with_context(|| format!("Failed to read corpus file: {:?}", corpus))?;
            if line.len() > max_sentence_length {
                skipped += 1;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            sentences.push(line);
        }

        if skipped > 0 {
            eprintln!(
                "Skipped {} sentence(s) longer than {} bytes in {:?}",
                skipped, max_sentence_length, corpus
            );
        }
        if sentences.is_empty() {
            bail!("corpus {:?} contains no trainable sentences", corpus);
        }
        Ok(sentences)
    }

    fn model_for(vocab_type: VocabType, unk: &str) -> Result<ModelWrapper> {
        match vocab_type {
            VocabType::Bpe => BPE::builder()
                .unk_token(unk.to_string())
                .build()
                .map(ModelWrapper::from)
                .map_err(|e| anyhow!("Failed to build BPE model: {e}")),
            VocabType::Unigram | VocabType::Char => Ok(ModelWrapper::from(Unigram::default())),
            VocabType::Word => WordLevel::builder()
                .unk_token(unk.to_string())
                .build()
                .map(ModelWrapper::from)
                .map_err(|e| anyhow!("Failed to build word-level model: {e}")),
        }
    }

    fn trainer_for(
        vocab_type: VocabType,
        vocab_size: u32,
        special: &SpecialPieces,
    ) -> Result<TrainerWrapper> {
        let special_tokens = special.added_tokens();
        match vocab_type {
            VocabType::Bpe => Ok(BpeTrainer::builder()
                .vocab_size(vocab_size as usize)
                .special_tokens(special_tokens)
                .show_progress(false)
                .build()
                .into()),
            VocabType::Unigram => UnigramTrainer::builder()
                .vocab_size(vocab_size)
                .special_tokens(special_tokens)
                .unk_token(Some(special.unk().to_string()))
                .show_progress(false)
                .build()
                .map(Into::into)
                .map_err(|e| anyhow!("Failed to configure unigram trainer: {e}")),
            VocabType::Char => UnigramTrainer::builder()
                .vocab_size(vocab_size)
                .special_tokens(special_tokens)
                .unk_token(Some(special.unk().to_string()))
                .max_piece_length(1)
                .show_progress(false)
                .build()
                .map(Into::into)
                .map_err(|e| anyhow!("Failed to configure char trainer: {e}")),
            VocabType::Word => WordLevelTrainer::builder()
                .vocab_size(vocab_size as usize)
                .special_tokens(special_tokens)
                .show_progress(false)
                .build()
                .map(Into::into)
                .map_err(|e| anyhow!("Failed to configure word-level trainer: {e}")),
        }
    }

    fn write_vocab_file(tokenizer: &Tokenizer, path: &str) -> Result<()> {
        let mut entries: Vec<(String, u32)> = tokenizer.get_vocab(true).into_iter().collect();
        entries.sort_by_key(|entry| entry.1);

        let mut content = String::new();
        for (token, id) in entries {
            writeln!(content, "{token}\t{id}").expect("writing to a String cannot fail");
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write vocab file: {path}"))
    }
}

impl SubwordTrainer for TokenizersTrainer {
    fn train(&self, job: &TrainJob, opts: &TrainOptions) -> Result<()> {
        let sentences = Self::read_sentences(&job.corpus, opts.max_sentence_length)?;

        let model = Self::model_for(job.vocab_type, opts.special.unk())?;
        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(Some(WhitespaceSplit));

        let mut trainer = Self::trainer_for(job.vocab_type, job.vocab_size, &opts.special)?;
        tokenizer
            .train(&mut trainer, sentences.into_iter())
            .map_err(anyhow::Error::from_boxed)
            .with_context(|| format!("Training failed for {}", job.prefix))?;

        let model_path = format!("{}.json", job.prefix);
        tokenizer
            .save(&model_path, false)
            .map_err(anyhow::Error::from_boxed)
            .with_context(|| format!("Failed to save model file: {model_path}"))?;
        Self::write_vocab_file(&tokenizer, &format!("{}.vocab", job.prefix))?;

        Ok(())
    }
}
