#![cfg(test)]

// Property tests for ChainHash kept inside the crate so they can check the
// structural invariants through `assert_invariants`.

use crate::chain_hash::ChainHash;
use crate::config::ChainHashConfig;
use crate::error::ChainHashError;
use crate::policy::{AppendFirst, Overwrite};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations so shrinking moves toward earlier keys and shorter
// op lists.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            1 => idx.clone().prop_map(Op::Remove),
            1 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `len` equals the model's key count; no duplicates, no stale entries.
// - `get`/`contains` parity with the model, `NotFound` for absent keys.
// - `remove` returns true exactly when the model held the key.
// - Bucket counters and chain placement stay consistent through rehashes.
// - Capacity never shrinks.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_overwrite_state_machine((pool, ops) in arb_scenario(), cap in 1usize..6) {
        let mut sut: ChainHash<String, i32, Overwrite> =
            ChainHash::with_config(ChainHashConfig::new().initial_capacity(cap));
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut last_capacity = sut.bucket_count();

        for op in ops {
            match op {
                Op::Set(i, v) => {
                    sut.set(pool[i].clone(), v);
                    model.insert(pool[i].clone(), v);
                }
                Op::Remove(i) => {
                    let expected = model.remove(&pool[i]).is_some();
                    prop_assert_eq!(sut.remove(pool[i].as_str()), expected);
                }
                Op::Get(i) => {
                    match model.get(&pool[i]) {
                        Some(v) => {
                            prop_assert_eq!(sut.get(pool[i].as_str()), Ok(v));
                        }
                        None => {
                            prop_assert_eq!(sut.get(pool[i].as_str()), Err(ChainHashError::NotFound));
                        }
                    }
                }
                Op::Contains(s) => {
                    prop_assert_eq!(sut.contains(s.as_str()), model.contains_key(&s));
                }
                Op::Iterate => {
                    let seen: BTreeSet<&String> = sut.iter().map(|(k, _)| k).collect();
                    let expected: BTreeSet<&String> = model.keys().collect();
                    prop_assert_eq!(seen, expected);
                }
            }

            sut.assert_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.bucket_count() >= last_capacity);
            last_capacity = sut.bucket_count();
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.get(k.as_str()), Ok(v));
        }
    }
}

// Property: AppendFirst builds the same inverted lists as a Vec-valued model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_append_first_matches_model(docs in proptest::collection::vec(proptest::collection::vec(0u8..20, 0..15), 1..8)) {
        let mut sut: ChainHash<u8, Vec<usize>, AppendFirst> = ChainHash::with_capacity(2);
        let mut model: HashMap<u8, Vec<usize>> = HashMap::new();

        for (doc, tokens) in docs.iter().enumerate() {
            for &t in tokens {
                sut.set(t, vec![doc]);
                model.entry(t).or_default().push(doc);
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        for (t, docs) in &model {
            prop_assert_eq!(sut.get(t), Ok(docs));
        }
    }
}
