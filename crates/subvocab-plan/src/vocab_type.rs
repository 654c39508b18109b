//! Vocabulary type enumeration and alias resolution

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Alias for the two-stage mode that pre-segments a corpus into morphemes
/// before ordinary BPE training.
pub const MORPHEME_AWARE_BPE: &str = "morpheme_aware_BPE";

/// Names accepted for [`VocabType`], in canonical order.
pub const AVAILABLE_VOCAB_TYPES: [&str; 4] = ["unigram", "bpe", "word", "char"];

/// Errors raised when a vocabulary type name is outside the supported set
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabTypeError {
    #[error("'{0}' is not in {AVAILABLE_VOCAB_TYPES:?}")]
    Unsupported(String),
}

/// The subword-segmentation algorithm family used to train a vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabType {
    Unigram,
    Bpe,
    Word,
    Char,
}

impl VocabType {
    /// Canonical lowercase name, as used in prefixes and trainer options
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabType::Unigram => "unigram",
            VocabType::Bpe => "bpe",
            VocabType::Word => "word",
            VocabType::Char => "char",
        }
    }
}

impl fmt::Display for VocabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabType {
    type Err = VocabTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unigram" => Ok(VocabType::Unigram),
            "bpe" => Ok(VocabType::Bpe),
            "word" => Ok(VocabType::Word),
            "char" => Ok(VocabType::Char),
            other => Err(VocabTypeError::Unsupported(other.to_string())),
        }
    }
}

/// A vocabulary type name resolved from configuration
///
/// `morpheme_aware` records whether the raw name was the composite
/// [`MORPHEME_AWARE_BPE`] alias, which trains an ordinary BPE model on a
/// morpheme-pre-segmented corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVocabType {
    pub vocab_type: VocabType,
    pub morpheme_aware: bool,
}

/// Resolve a raw vocabulary type name from configuration
///
/// The `morpheme_aware_BPE` alias is rewritten to `bpe` before the
/// unsupported-option check runs.
pub fn resolve_vocab_type(raw: &str) -> Result<ResolvedVocabType, VocabTypeError> {
    if raw == MORPHEME_AWARE_BPE {
        return Ok(ResolvedVocabType {
            vocab_type: VocabType::Bpe,
            morpheme_aware: true,
        });
    }
    Ok(ResolvedVocabType {
        vocab_type: raw.parse()?,
        morpheme_aware: false,
    })
}
