//! Parameter normalization into per-job sequences
//!
//! The trainer consumes one fully-specified job at a time, but the
//! configuration surface allows scalars, lists, and per-side `{src, tgt}`
//! mappings in several combinations. [`normalize`] reconciles those shapes
//! into four equal-length sequences where index *i* across all four
//! describes exactly one [`TrainJob`].

use std::path::PathBuf;
use thiserror::Error;

use crate::vocab_type::VocabType;

/// Errors raised when the inputs do not form one of the supported shapes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unsupported combination of scalar/sequence/per-side parameters")]
    Unsupported,
    #[error("expected {expected} prefixes for {what}, got {actual}")]
    PrefixCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("expected {expected} vocab sizes to match the prefix list, got {actual}")]
    SizeCount { expected: usize, actual: usize },
    #[error("expected {expected} vocab types to match the prefix list, got {actual}")]
    TypeCount { expected: usize, actual: usize },
}

/// A scalar value or an ordered list of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// A parameter given once, as a list, or per translation side
///
/// `PerSide` carries named fields, so src-before-tgt ordering is structural
/// and never depends on how a configuration format iterates mapping keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideValue<T> {
    One(T),
    Many(Vec<T>),
    PerSide { src: T, tgt: T },
}

/// Vocabulary sizes: a scalar, a flat list, or a list of (src, tgt) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    One(u32),
    Many(Vec<u32>),
    Pairs(Vec<(u32, u32)>),
}

/// The normalized unit of work: one trainer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainJob {
    pub corpus: PathBuf,
    pub prefix: String,
    pub vocab_size: u32,
    pub vocab_type: VocabType,
}

/// Four equal-length sequences; index *i* across all four is one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    pub corpora: Vec<PathBuf>,
    pub prefixes: Vec<String>,
    pub vocab_sizes: Vec<u32>,
    pub vocab_types: Vec<VocabType>,
}

impl NormalizedParams {
    /// Number of training jobs described
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Consume the sequences into an ordered job list
    pub fn into_jobs(self) -> Vec<TrainJob> {
        self.corpora
            .into_iter()
            .zip(self.prefixes)
            .zip(self.vocab_sizes)
            .zip(self.vocab_types)
            .map(|(((corpus, prefix), vocab_size), vocab_type)| TrainJob {
                corpus,
                prefix,
                vocab_size,
                vocab_type,
            })
            .collect()
    }
}

/// Expand (corpus, prefix, size, type) parameters into per-job sequences
///
/// Supported shapes:
/// 1. *Split*: per-side corpora with n size pairs expand to 2n jobs, all
///    src jobs first (first pair elements, original order), then all tgt
///    jobs. The vocabulary type may be per-side or a shared scalar.
/// 2. *Shared corpus*: a scalar corpus with k prefixes is replicated once
///    per prefix; sizes must be a flat list of length k.
/// 3. *Single job*: all scalars wrap into singleton sequences.
///
/// Already-expanded inputs (equal-length sequences throughout) pass through
/// unchanged, so the function is idempotent over its own output. Any other
/// combination is a [`ShapeError`].
pub fn normalize(
    corpora: SideValue<PathBuf>,
    prefixes: OneOrMany<String>,
    sizes: SizeSpec,
    types: SideValue<VocabType>,
) -> Result<NormalizedParams, ShapeError> {
    match (corpora, prefixes, sizes, types) {
        // Split src/tgt corpora: n size pairs become 2n jobs, src first.
        (SideValue::PerSide { src, tgt }, OneOrMany::Many(prefixes), SizeSpec::Pairs(pairs), types) => {
            let n = pairs.len();
            if prefixes.len() != 2 * n {
                return Err(ShapeError::PrefixCount {
                    what: "a split specification",
                    expected: 2 * n,
                    actual: prefixes.len(),
                });
            }

            let mut vocab_sizes = Vec::with_capacity(2 * n);
            vocab_sizes.extend(pairs.iter().map(|&(src_size, _)| src_size));
            vocab_sizes.extend(pairs.iter().map(|&(_, tgt_size)| tgt_size));

            let corpora = replicate_sides(src, tgt, n);
            let vocab_types = match types {
                SideValue::One(ty) => vec![ty; 2 * n],
                SideValue::PerSide { src, tgt } => replicate_sides(src, tgt, n),
                SideValue::Many(_) => return Err(ShapeError::Unsupported),
            };

            Ok(NormalizedParams {
                corpora,
                prefixes,
                vocab_sizes,
                vocab_types,
            })
        }

        // Shared corpus trained at several sizes: replicate the scalars.
        (SideValue::One(corpus), OneOrMany::Many(prefixes), SizeSpec::Many(sizes), types) => {
            let k = prefixes.len();
            if sizes.len() != k {
                return Err(ShapeError::SizeCount {
                    expected: k,
                    actual: sizes.len(),
                });
            }
            let vocab_types = match types {
                SideValue::One(ty) => vec![ty; k],
                SideValue::Many(types) if types.len() == k => types,
                SideValue::Many(types) => {
                    return Err(ShapeError::TypeCount {
                        expected: k,
                        actual: types.len(),
                    })
                }
                SideValue::PerSide { .. } => return Err(ShapeError::Unsupported),
            };

            Ok(NormalizedParams {
                corpora: vec![corpus; k],
                prefixes,
                vocab_sizes: sizes,
                vocab_types,
            })
        }

        // Single job: wrap every scalar.
        (
            SideValue::One(corpus),
            OneOrMany::One(prefix),
            SizeSpec::One(size),
            SideValue::One(ty),
        ) => Ok(NormalizedParams {
            corpora: vec![corpus],
            prefixes: vec![prefix],
            vocab_sizes: vec![size],
            vocab_types: vec![ty],
        }),

        // Already expanded: pass through untouched.
        (
            SideValue::Many(corpora),
            OneOrMany::Many(prefixes),
            SizeSpec::Many(vocab_sizes),
            SideValue::Many(vocab_types),
        ) => {
            let k = prefixes.len();
            if corpora.len() != k || vocab_sizes.len() != k || vocab_types.len() != k {
                return Err(ShapeError::Unsupported);
            }
            Ok(NormalizedParams {
                corpora,
                prefixes,
                vocab_sizes,
                vocab_types,
            })
        }

        _ => Err(ShapeError::Unsupported),
    }
}

// src value n times, then tgt value n times
fn replicate_sides<T: Clone>(src: T, tgt: T, n: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(2 * n);
    out.extend(std::iter::repeat(src).take(n));
    out.extend(std::iter::repeat(tgt).take(n));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_single_job_wraps_scalars() {
        let params = normalize(
            SideValue::One(p("corpus.txt")),
            OneOrMany::One("en_bpe_8k".to_string()),
            SizeSpec::One(8000),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap();

        assert_eq!(params.len(), 1);
        let jobs = params.into_jobs();
        assert_eq!(jobs[0].corpus, p("corpus.txt"));
        assert_eq!(jobs[0].prefix, "en_bpe_8k");
        assert_eq!(jobs[0].vocab_size, 8000);
        assert_eq!(jobs[0].vocab_type, VocabType::Bpe);
    }

    #[test]
    fn test_shared_corpus_replicates_path_and_type() {
        let params = normalize(
            SideValue::One(p("corpus.txt")),
            OneOrMany::Many(vec!["en_bpe_8k".into(), "en_bpe_16k".into(), "en_bpe_32k".into()]),
            SizeSpec::Many(vec![8000, 16000, 32000]),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap();

        assert_eq!(params.corpora, vec![p("corpus.txt"); 3]);
        assert_eq!(params.vocab_types, vec![VocabType::Bpe; 3]);
        assert_eq!(params.vocab_sizes, vec![8000, 16000, 32000]);
    }

    #[test]
    fn test_split_expands_src_then_tgt() {
        // Worked example: sizes [(8000, 4000), (16000, 8000)]
        let params = normalize(
            SideValue::PerSide {
                src: p("a.txt"),
                tgt: p("b.txt"),
            },
            OneOrMany::Many(vec![
                "en_unigram_8k".into(),
                "en_unigram_16k".into(),
                "ko_bpe_4k".into(),
                "ko_bpe_8k".into(),
            ]),
            SizeSpec::Pairs(vec![(8000, 4000), (16000, 8000)]),
            SideValue::PerSide {
                src: VocabType::Unigram,
                tgt: VocabType::Bpe,
            },
        )
        .unwrap();

        assert_eq!(params.vocab_sizes, vec![8000, 16000, 4000, 8000]);
        assert_eq!(
            params.corpora,
            vec![p("a.txt"), p("a.txt"), p("b.txt"), p("b.txt")]
        );
        assert_eq!(
            params.vocab_types,
            vec![
                VocabType::Unigram,
                VocabType::Unigram,
                VocabType::Bpe,
                VocabType::Bpe
            ]
        );
    }

    #[test]
    fn test_split_accepts_scalar_type() {
        let params = normalize(
            SideValue::PerSide {
                src: p("a.txt"),
                tgt: p("b.txt"),
            },
            OneOrMany::Many(vec![
                "en_bpe_8k".into(),
                "ko_bpe_4k".into(),
            ]),
            SizeSpec::Pairs(vec![(8000, 4000)]),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap();

        assert_eq!(params.vocab_types, vec![VocabType::Bpe; 2]);
    }

    #[test]
    fn test_expanded_input_passes_through() {
        let corpora = vec![p("a.txt"), p("b.txt")];
        let prefixes = vec!["x".to_string(), "y".to_string()];
        let sizes = vec![100, 200];
        let types = vec![VocabType::Word, VocabType::Char];

        let params = normalize(
            SideValue::Many(corpora.clone()),
            OneOrMany::Many(prefixes.clone()),
            SizeSpec::Many(sizes.clone()),
            SideValue::Many(types.clone()),
        )
        .unwrap();

        assert_eq!(params.corpora, corpora);
        assert_eq!(params.prefixes, prefixes);
        assert_eq!(params.vocab_sizes, sizes);
        assert_eq!(params.vocab_types, types);
    }

    #[test]
    fn test_split_with_flat_sizes_is_rejected() {
        let err = normalize(
            SideValue::PerSide {
                src: p("a.txt"),
                tgt: p("b.txt"),
            },
            OneOrMany::Many(vec!["x".into(), "y".into()]),
            SizeSpec::Many(vec![8000, 4000]),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap_err();
        assert_eq!(err, ShapeError::Unsupported);
    }

    #[test]
    fn test_shared_corpus_size_count_mismatch() {
        let err = normalize(
            SideValue::One(p("corpus.txt")),
            OneOrMany::Many(vec!["x".into(), "y".into()]),
            SizeSpec::Many(vec![8000]),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeError::SizeCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_split_prefix_count_mismatch() {
        let err = normalize(
            SideValue::PerSide {
                src: p("a.txt"),
                tgt: p("b.txt"),
            },
            OneOrMany::Many(vec!["only_one".into()]),
            SizeSpec::Pairs(vec![(8000, 4000)]),
            SideValue::One(VocabType::Bpe),
        )
        .unwrap_err();
        assert!(matches!(err, ShapeError::PrefixCount { expected: 2, actual: 1, .. }));
    }
}
