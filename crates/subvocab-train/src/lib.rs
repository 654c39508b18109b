//! Configuration-driven subword vocabulary training
//!
//! This crate loads a training configuration, expands it into a flat list
//! of training jobs via `subvocab-plan`, and runs each job through a
//! subword-tokenizer trainer:
//! - Configuration file loading and shape validation
//! - Corpus path resolution and existence checks
//! - Morpheme pre-segmentation for morpheme-aware BPE
//! - Trainer invocation and the sequential job runner

pub mod config;
pub mod corpus;
pub mod morpheme;
pub mod train;
pub mod trainer;
