//! Planning layer for subword-vocabulary training
//!
//! This crate turns a vocabulary specification (one of three supported
//! configuration shapes) into a flat, ordered list of training jobs:
//! - Vocabulary type enumeration and alias resolution
//! - Vocabulary specification variants (uniform vs. split src/tgt)
//! - Output-prefix derivation
//! - Parameter normalization into per-job sequences
//!
//! Everything here is a pure transformation over its inputs; file I/O and
//! trainer invocation live in `subvocab-train`.
//!
//! # Example
//!
//! ```
//! use subvocab_plan::{expand, SideSpec, VocabSpec, VocabType};
//!
//! let spec = VocabSpec::Split {
//!     src: SideSpec::new("a.txt", "en", VocabType::Unigram),
//!     tgt: SideSpec::new("b.txt", "ko", VocabType::Bpe),
//!     size_pairs: vec![(8000, 4000), (16000, 8000)],
//! };
//!
//! let jobs = expand(&spec).unwrap().into_jobs();
//! assert_eq!(jobs.len(), 4);
//! assert_eq!(jobs[0].prefix, "en_unigram_8k");
//! assert_eq!(jobs[3].prefix, "ko_bpe_8k");
//! ```

pub mod normalize;
pub mod prefix;
pub mod spec;
pub mod vocab_type;

pub use normalize::{
    normalize, NormalizedParams, OneOrMany, ShapeError, SideValue, SizeSpec, TrainJob,
};
pub use prefix::tokenizer_prefixes;
pub use spec::{expand, SideSpec, VocabSpec};
pub use vocab_type::{resolve_vocab_type, ResolvedVocabType, VocabType, VocabTypeError};
