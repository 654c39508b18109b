//! Property-based tests for parameter normalization

use std::path::PathBuf;

use proptest::prelude::*;
use subvocab_plan::{normalize, OneOrMany, SideValue, SizeSpec, VocabType};

fn vocab_type_strategy() -> impl Strategy<Value = VocabType> {
    prop_oneof![
        Just(VocabType::Unigram),
        Just(VocabType::Bpe),
        Just(VocabType::Word),
        Just(VocabType::Char),
    ]
}

proptest! {
    #[test]
    fn test_split_yields_2n_jobs_with_src_first(
        pairs in prop::collection::vec((1u32..100_000, 1u32..100_000), 1..8),
        src_type in vocab_type_strategy(),
        tgt_type in vocab_type_strategy(),
    ) {
        let n = pairs.len();
        let prefixes: Vec<String> = (0..2 * n).map(|i| format!("prefix_{i}")).collect();

        let params = normalize(
            SideValue::PerSide {
                src: PathBuf::from("src.txt"),
                tgt: PathBuf::from("tgt.txt"),
            },
            OneOrMany::Many(prefixes),
            SizeSpec::Pairs(pairs.clone()),
            SideValue::PerSide { src: src_type, tgt: tgt_type },
        ).unwrap();

        prop_assert_eq!(params.len(), 2 * n);
        for i in 0..n {
            prop_assert_eq!(&params.corpora[i], &PathBuf::from("src.txt"));
            prop_assert_eq!(params.vocab_sizes[i], pairs[i].0);
            prop_assert_eq!(params.vocab_types[i], src_type);
        }
        for i in 0..n {
            prop_assert_eq!(&params.corpora[n + i], &PathBuf::from("tgt.txt"));
            prop_assert_eq!(params.vocab_sizes[n + i], pairs[i].1);
            prop_assert_eq!(params.vocab_types[n + i], tgt_type);
        }
    }

    #[test]
    fn test_shared_corpus_replicates_path_per_prefix(
        sizes in prop::collection::vec(1u32..100_000, 1..10),
        ty in vocab_type_strategy(),
    ) {
        let k = sizes.len();
        let prefixes: Vec<String> = (0..k).map(|i| format!("prefix_{i}")).collect();

        let params = normalize(
            SideValue::One(PathBuf::from("shared.txt")),
            OneOrMany::Many(prefixes),
            SizeSpec::Many(sizes.clone()),
            SideValue::One(ty),
        ).unwrap();

        prop_assert_eq!(params.len(), k);
        prop_assert!(params.corpora.iter().all(|c| c == &PathBuf::from("shared.txt")));
        prop_assert_eq!(params.vocab_sizes, sizes);
    }

    #[test]
    fn test_normalize_is_idempotent(
        entries in prop::collection::vec(
            ("[a-z]{1,12}", 1u32..100_000, vocab_type_strategy()),
            1..10,
        ),
    ) {
        let corpora: Vec<PathBuf> =
            entries.iter().map(|(name, _, _)| PathBuf::from(format!("{name}.txt"))).collect();
        let prefixes: Vec<String> =
            entries.iter().enumerate().map(|(i, _)| format!("prefix_{i}")).collect();
        let sizes: Vec<u32> = entries.iter().map(|&(_, size, _)| size).collect();
        let types: Vec<VocabType> = entries.iter().map(|&(_, _, ty)| ty).collect();

        let once = normalize(
            SideValue::Many(corpora),
            OneOrMany::Many(prefixes),
            SizeSpec::Many(sizes),
            SideValue::Many(types),
        ).unwrap();

        let twice = normalize(
            SideValue::Many(once.corpora.clone()),
            OneOrMany::Many(once.prefixes.clone()),
            SizeSpec::Many(once.vocab_sizes.clone()),
            SideValue::Many(once.vocab_types.clone()),
        ).unwrap();

        prop_assert_eq!(once, twice);
    }
}

#[test]
fn test_worked_example_from_translation_setup() {
    // src "a.txt" / tgt "b.txt" with size pairs [(8000, 4000), (16000, 8000)]
    let params = normalize(
        SideValue::PerSide {
            src: PathBuf::from("a.txt"),
            tgt: PathBuf::from("b.txt"),
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
        vec![
            PathBuf::from("a.txt"),
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("b.txt"),
        ]
    );
}

#[test]
fn test_jobs_align_across_all_four_sequences() {
    let params = normalize(
        SideValue::One(PathBuf::from("corpus.txt")),
        OneOrMany::Many(vec!["en_bpe_8k".into(), "en_bpe_16k".into()]),
        SizeSpec::Many(vec![8000, 16000]),
        SideValue::One(VocabType::Bpe),
    )
    .unwrap();

    let jobs = params.into_jobs();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].prefix, "en_bpe_8k");
    assert_eq!(jobs[0].vocab_size, 8000);
    assert_eq!(jobs[1].prefix, "en_bpe_16k");
    assert_eq!(jobs[1].vocab_size, 16000);
}
