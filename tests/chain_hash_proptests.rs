// ChainHash property tests through the public API.
//
// Property 1: growth never loses or alters entries.
//  - Model: std HashMap updated alongside the table.
//  - Invariant: whenever bucket_count() changes during a set, every key the
//    model held before that set is still present with its value, and len()
//    is unchanged apart from the key just set.
//
// Property 2: bucket sizes always add up to len().
use chain_hash::ChainHash;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn prop_rehash_preserves_entries(keys in proptest::collection::vec(any::<u16>(), 1..300), cap in 1usize..8) {
        let mut m: ChainHash<u16, u32> = ChainHash::with_capacity(cap);
        let mut model: HashMap<u16, u32> = HashMap::new();

        for (i, k) in keys.into_iter().enumerate() {
            let before = m.bucket_count();
            let was_new = !model.contains_key(&k);
            let len_before = m.len();
            m.set(k, i as u32);
            model.insert(k, i as u32);

            prop_assert!(m.bucket_count() == before || m.bucket_count() == before * 2);
            prop_assert_eq!(m.len(), len_before + usize::from(was_new));
            if m.bucket_count() != before {
                for (mk, mv) in &model {
                    prop_assert_eq!(m.get(mk), Ok(mv));
                }
            }
        }
        prop_assert_eq!(m.len(), model.len());
    }

    #[test]
    fn prop_bucket_sizes_sum_to_len(ops in proptest::collection::vec((any::<bool>(), 0u8..40), 1..200)) {
        let mut m: ChainHash<u8, ()> = ChainHash::with_capacity(3);
        for (insert, k) in ops {
            if insert {
                m.set(k, ());
            } else {
                let _ = m.remove(&k);
            }
            let total: usize = (0..m.bucket_count()).map(|i| m.bucket_size(i).unwrap()).sum();
            prop_assert_eq!(total, m.len());
        }
    }
}
