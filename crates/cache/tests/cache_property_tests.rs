//! Property-based tests comparing the cache against a simple LRU model

use proptest::prelude::*;
use rampart_cache::{Cache, CacheConfig};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u32),
    Get(u8),
    Has(u8),
    Remove(u8),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12, any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => (0u8..12).prop_map(Op::Get),
        1 => (0u8..12).prop_map(Op::Has),
        1 => (0u8..12).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

/// Reference model: front is least recently used
#[derive(Default)]
struct Model {
    entries: VecDeque<(String, u32)>,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn set(&mut self, key: String, value: u32, capacity: usize) {
        if let Some(i) = self.position(&key) {
            self.entries.remove(i);
        } else if self.entries.len() >= capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, value));
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let i = self.position(key)?;
        let entry = self.entries.remove(i)?;
        let value = entry.1;
        self.entries.push_back(entry);
        Some(value)
    }
}

proptest! {
    #[test]
    fn prop_cache_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(arb_op(), 1..80),
    ) {
        let cache: Cache<u32> = Cache::create_memory(CacheConfig::with_max_size(capacity)).unwrap();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let key = k.to_string();
                    cache.set(key.clone(), v, None).unwrap();
                    model.set(key, v, capacity);
                }
                Op::Get(k) => {
                    let key = k.to_string();
                    prop_assert_eq!(cache.get(&key).ok(), model.get(&key));
                }
                Op::Has(k) => {
                    let key = k.to_string();
                    prop_assert_eq!(cache.has(&key), model.position(&key).is_some());
                }
                Op::Remove(k) => {
                    let key = k.to_string();
                    let expected = model.position(&key).map(|i| model.entries.remove(i));
                    prop_assert_eq!(cache.remove(&key), expected.is_some());
                }
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }

            prop_assert!(cache.size() <= capacity);
            let expected_keys: Vec<String> = model.entries.iter().map(|(k, _)| k.clone()).collect();
            prop_assert_eq!(cache.keys(), expected_keys);
        }
    }
}
