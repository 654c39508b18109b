//! Training configuration loaded from JSON files
//!
//! The shape-bearing fields (`corpus_name`, `vocab_type`, `vocab_size`,
//! `vocab_languages`) accept scalars, lists, or per-side `{src, tgt}`
//! mappings; [`TrainerConfigFile::resolve`] reconciles them into a
//! [`VocabSpec`] or fails with a configuration-shape error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use subvocab_plan::{resolve_vocab_type, SideSpec, VocabSpec, VocabType, VocabTypeError};

/// Errors raised while checking a parsed configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    UnsupportedVocabType(#[from] VocabTypeError),
    #[error("unsupported configuration shape: {0}")]
    Shape(&'static str),
    #[error("vocab_size list must not be empty")]
    EmptySizes,
    #[error("vocab_size entries must be positive")]
    NonPositiveSize,
}

/// A value given once or per translation side
///
/// Per-side values deserialize into named fields, so src/tgt ordering never
/// depends on key order in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrSides {
    Scalar(String),
    Sides(Sides),
}

/// A `{src, tgt}` mapping; any other key is rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sides {
    pub src: String,
    pub tgt: String,
}

/// Vocabulary sizes: a scalar, a flat list, or a list of (src, tgt) pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeField {
    One(u32),
    Many(Vec<u32>),
    Pairs(Vec<(u32, u32)>),
}

/// Corpus locations and the output directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSection {
    /// Directory holding the training corpora
    pub data_dir: PathBuf,
    /// Corpus file name, or per-side file names for split training
    pub corpus_name: StringOrSides,
    /// Directory receiving the trained model/vocabulary pairs
    pub output_dir: PathBuf,
}

/// Tokenizer-trainer options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerSection {
    /// Vocabulary type name(s); `morpheme_aware_BPE` is accepted as an
    /// alias for `bpe` with morpheme pre-segmentation
    pub vocab_type: StringOrSides,
    pub vocab_size: SizeField,
    /// Language tag(s) used in output prefixes
    pub vocab_languages: StringOrSides,
    /// Trainer thread count
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    /// Sentences longer than this many bytes are skipped
    #[serde(default = "default_max_sentence_length")]
    pub max_sentence_length: usize,
}

fn default_num_threads() -> usize {
    4
}

fn default_max_sentence_length() -> usize {
    99999
}

/// Complete training configuration as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfigFile {
    pub path: PathSection,
    pub tokenizer: TokenizerSection,
}

/// A checked configuration, ready for the runner
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub spec: VocabSpec,
    pub morpheme_aware: bool,
    pub num_threads: usize,
    pub max_sentence_length: usize,
}

impl TrainerConfigFile {
    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: TrainerConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Check the configuration and build the vocabulary specification
    ///
    /// Rewrites the `morpheme_aware_BPE` alias before the unsupported-option
    /// check, validates that the field shapes form one of the supported
    /// combinations, and joins `data_dir` onto every corpus name.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let path = &self.path;
        let tok = &self.tokenizer;

        let (spec, morpheme_aware) = match (
            &path.corpus_name,
            &tok.vocab_type,
            &tok.vocab_languages,
            &tok.vocab_size,
        ) {
            // One shared corpus: scalar type and language, scalar or flat sizes.
            (
                StringOrSides::Scalar(corpus),
                StringOrSides::Scalar(ty),
                StringOrSides::Scalar(language),
                sizes,
            ) => {
                let resolved = resolve_vocab_type(ty)?;
                let spec = match sizes {
                    SizeField::One(size) => VocabSpec::UniformSingle {
                        corpus: PathBuf::from(corpus),
                        language: language.clone(),
                        vocab_type: resolved.vocab_type,
                        vocab_size: *size,
                    },
                    SizeField::Many(sizes) => VocabSpec::UniformMulti {
                        corpus: PathBuf::from(corpus),
                        language: language.clone(),
                        vocab_type: resolved.vocab_type,
                        vocab_sizes: sizes.clone(),
                    },
                    SizeField::Pairs(_) => {
                        return Err(ConfigError::Shape(
                            "a shared corpus takes a scalar vocab_size or a flat list, not (src, tgt) pairs",
                        ))
                    }
                };
                (spec, resolved.morpheme_aware)
            }

            // Split corpora: per-side languages, paired sizes, scalar or
            // per-side types. The morpheme alias is not accepted per side.
            (
                StringOrSides::Sides(corpus),
                ty,
                StringOrSides::Sides(languages),
                SizeField::Pairs(pairs),
            ) => {
                let (src_type, tgt_type) = match ty {
                    StringOrSides::Scalar(ty) => {
                        let ty: VocabType = ty.parse()?;
                        (ty, ty)
                    }
                    StringOrSides::Sides(types) => (
                        types.src.parse::<VocabType>()?,
                        types.tgt.parse::<VocabType>()?,
                    ),
                };
                let spec = VocabSpec::Split {
                    src: SideSpec::new(corpus.src.as_str(), languages.src.as_str(), src_type),
                    tgt: SideSpec::new(corpus.tgt.as_str(), languages.tgt.as_str(), tgt_type),
                    size_pairs: pairs.clone(),
                };
                (spec, false)
            }

            (StringOrSides::Sides(_), _, StringOrSides::Scalar(_), _) => {
                return Err(ConfigError::Shape(
                    "split corpora require per-side vocab_languages",
                ))
            }
            (StringOrSides::Sides(_), _, _, _) => {
                return Err(ConfigError::Shape(
                    "split corpora require vocab_size as a list of (src, tgt) pairs",
                ))
            }
            (StringOrSides::Scalar(_), _, _, _) => {
                return Err(ConfigError::Shape(
                    "a shared corpus requires scalar vocab_type and vocab_languages",
                ))
            }
        };

        validate_sizes(&spec)?;

        Ok(ResolvedConfig {
            data_dir: path.data_dir.clone(),
            output_dir: path.output_dir.clone(),
            spec: spec.map_corpora(|name| path.data_dir.join(name)),
            morpheme_aware,
            num_threads: tok.num_threads,
            max_sentence_length: tok.max_sentence_length,
        })
    }
}

fn validate_sizes(spec: &VocabSpec) -> Result<(), ConfigError> {
    match spec {
        VocabSpec::UniformSingle { vocab_size, .. } => {
            if *vocab_size == 0 {
                return Err(ConfigError::NonPositiveSize);
            }
        }
        VocabSpec::UniformMulti { vocab_sizes, .. } => {
            if vocab_sizes.is_empty() {
                return Err(ConfigError::EmptySizes);
            }
            if vocab_sizes.iter().any(|&size| size == 0) {
                return Err(ConfigError::NonPositiveSize);
            }
        }
        VocabSpec::Split { size_pairs, .. } => {
            if size_pairs.is_empty() {
                return Err(ConfigError::EmptySizes);
            }
            if size_pairs.iter().any(|&(src, tgt)| src == 0 || tgt == 0) {
                return Err(ConfigError::NonPositiveSize);
            }
        }
    }
    Ok(())
}
