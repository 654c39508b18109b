//! Vocabulary specification variants
//!
//! The configuration surface supports three shapes; [`VocabSpec`] is the
//! closed variant type over them, so downstream code matches on a tag
//! instead of inspecting runtime types.

use std::path::{Path, PathBuf};

use crate::normalize::{normalize, NormalizedParams, ShapeError, SideValue, SizeSpec};
use crate::prefix::tokenizer_prefixes;
use crate::vocab_type::VocabType;

/// One side of a split (translation) specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideSpec {
    pub corpus: PathBuf,
    pub language: String,
    pub vocab_type: VocabType,
}

impl SideSpec {
    pub fn new(corpus: impl Into<PathBuf>, language: impl Into<String>, vocab_type: VocabType) -> Self {
        Self {
            corpus: corpus.into(),
            language: language.into(),
            vocab_type,
        }
    }
}

/// A vocabulary specification in one of the three supported shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabSpec {
    /// One corpus, one vocabulary
    UniformSingle {
        corpus: PathBuf,
        language: String,
        vocab_type: VocabType,
        vocab_size: u32,
    },
    /// One corpus trained at several vocabulary sizes
    UniformMulti {
        corpus: PathBuf,
        language: String,
        vocab_type: VocabType,
        vocab_sizes: Vec<u32>,
    },
    /// Separate src/tgt corpora with paired (src, tgt) vocabulary sizes
    Split {
        src: SideSpec,
        tgt: SideSpec,
        size_pairs: Vec<(u32, u32)>,
    },
}

impl VocabSpec {
    /// Corpus paths in job order, without duplicates
    pub fn corpus_paths(&self) -> Vec<&Path> {
        match self {
            VocabSpec::UniformSingle { corpus, .. } | VocabSpec::UniformMulti { corpus, .. } => {
                vec![corpus.as_path()]
            }
            VocabSpec::Split { src, tgt, .. } => vec![src.corpus.as_path(), tgt.corpus.as_path()],
        }
    }

    /// Rewrite every corpus path through `f` (used to absolutize paths)
    pub fn map_corpora(self, mut f: impl FnMut(PathBuf) -> PathBuf) -> Self {
        match self {
            VocabSpec::UniformSingle {
                corpus,
                language,
                vocab_type,
                vocab_size,
            } => VocabSpec::UniformSingle {
                corpus: f(corpus),
                language,
                vocab_type,
                vocab_size,
            },
            VocabSpec::UniformMulti {
                corpus,
                language,
                vocab_type,
                vocab_sizes,
            } => VocabSpec::UniformMulti {
                corpus: f(corpus),
                language,
                vocab_type,
                vocab_sizes,
            },
            VocabSpec::Split {
                mut src,
                mut tgt,
                size_pairs,
            } => {
                src.corpus = f(src.corpus);
                tgt.corpus = f(tgt.corpus);
                VocabSpec::Split {
                    src,
                    tgt,
                    size_pairs,
                }
            }
        }
    }

    fn corpora_value(&self) -> SideValue<PathBuf> {
        match self {
            VocabSpec::UniformSingle { corpus, .. } | VocabSpec::UniformMulti { corpus, .. } => {
                SideValue::One(corpus.clone())
            }
            VocabSpec::Split { src, tgt, .. } => SideValue::PerSide {
                src: src.corpus.clone(),
                tgt: tgt.corpus.clone(),
            },
        }
    }

    fn size_spec(&self) -> SizeSpec {
        match self {
            VocabSpec::UniformSingle { vocab_size, .. } => SizeSpec::One(*vocab_size),
            VocabSpec::UniformMulti { vocab_sizes, .. } => SizeSpec::Many(vocab_sizes.clone()),
            VocabSpec::Split { size_pairs, .. } => SizeSpec::Pairs(size_pairs.clone()),
        }
    }

    fn type_value(&self) -> SideValue<VocabType> {
        match self {
            VocabSpec::UniformSingle { vocab_type, .. }
            | VocabSpec::UniformMulti { vocab_type, .. } => SideValue::One(*vocab_type),
            VocabSpec::Split { src, tgt, .. } => SideValue::PerSide {
                src: src.vocab_type,
                tgt: tgt.vocab_type,
            },
        }
    }
}

/// Derive prefixes and expand a specification into per-job sequences
pub fn expand(spec: &VocabSpec) -> Result<NormalizedParams, ShapeError> {
    normalize(
        spec.corpora_value(),
        tokenizer_prefixes(spec),
        spec.size_spec(),
        spec.type_value(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_uniform_single() {
        let spec = VocabSpec::UniformSingle {
            corpus: PathBuf::from("corpus.txt"),
            language: "en".to_string(),
            vocab_type: VocabType::Unigram,
            vocab_size: 32000,
        };

        let jobs = expand(&spec).unwrap().into_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].prefix, "en_unigram_32k");
        assert_eq!(jobs[0].vocab_size, 32000);
    }

    #[test]
    fn test_expand_split_ordering() {
        let spec = VocabSpec::Split {
            src: SideSpec::new("a.txt", "en", VocabType::Unigram),
            tgt: SideSpec::new("b.txt", "ko", VocabType::Bpe),
            size_pairs: vec![(8000, 4000), (16000, 8000)],
        };

        let params = expand(&spec).unwrap();
        assert_eq!(params.vocab_sizes, vec![8000, 16000, 4000, 8000]);
        assert_eq!(
            params.prefixes,
            vec!["en_unigram_8k", "en_unigram_16k", "ko_bpe_4k", "ko_bpe_8k"]
        );
    }

    #[test]
    fn test_map_corpora_rewrites_every_side() {
        let spec = VocabSpec::Split {
            src: SideSpec::new("a.txt", "en", VocabType::Bpe),
            tgt: SideSpec::new("b.txt", "ko", VocabType::Bpe),
            size_pairs: vec![(100, 100)],
        };

        let spec = spec.map_corpora(|p| PathBuf::from("/data").join(p));
        assert_eq!(
            spec.corpus_paths(),
            vec![Path::new("/data/a.txt"), Path::new("/data/b.txt")]
        );
    }
}
