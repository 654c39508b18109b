//! Output-prefix derivation
//!
//! A prefix is the base file name (without extension) shared by a trained
//! model file and its companion vocabulary file.

use crate::normalize::OneOrMany;
use crate::spec::VocabSpec;
use crate::vocab_type::VocabType;

/// Canonical prefix for one vocabulary: `{language}_{type}_{size/1000}k`
pub fn prefix(language: &str, vocab_type: VocabType, vocab_size: u32) -> String {
    format!("{}_{}_{}k", language, vocab_type, vocab_size / 1000)
}

/// Derive the output prefix(es) for a vocabulary specification
///
/// - Uniform single size: one prefix.
/// - Uniform multiple sizes: one prefix per size, in input order.
/// - Split: all src prefixes (first pair elements) in pair order, then all
///   tgt prefixes (second pair elements) in the same order.
pub fn tokenizer_prefixes(spec: &VocabSpec) -> OneOrMany<String> {
    match spec {
        VocabSpec::UniformSingle {
            language,
            vocab_type,
            vocab_size,
            ..
        } => OneOrMany::One(prefix(language, *vocab_type, *vocab_size)),

        VocabSpec::UniformMulti {
            language,
            vocab_type,
            vocab_sizes,
            ..
        } => OneOrMany::Many(
            vocab_sizes
                .iter()
                .map(|&size| prefix(language, *vocab_type, size))
                .collect(),
        ),

        VocabSpec::Split {
            src,
            tgt,
            size_pairs,
        } => {
            let mut prefixes = Vec::with_capacity(2 * size_pairs.len());
            prefixes.extend(
                size_pairs
                    .iter()
                    .map(|&(src_size, _)| prefix(&src.language, src.vocab_type, src_size)),
            );
            prefixes.extend(
                size_pairs
                    .iter()
                    .map(|&(_, tgt_size)| prefix(&tgt.language, tgt.vocab_type, tgt_size)),
            );
            OneOrMany::Many(prefixes)
        }
    }
}
