#![cfg(test)]

// Property tests for OrderedTree kept inside the crate so they can reach
// the structural checks and the diagram renderer.

use crate::ordered_tree::OrderedTree;
use crate::tree_diagram;
use crate::Entry;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Add(i32, i32),
    Delete(i32),
    Find(i32),
    Extremes,
}

// Keys come from a small range so duplicates and hits are common.
fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = -20i32..20;
    let op = prop_oneof![
        3 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Add(k, v)),
        2 => key.clone().prop_map(Op::Delete),
        1 => key.prop_map(Op::Find),
        1 => Just(Op::Extremes),
    ];
    proptest::collection::vec(op, 1..120)
}

fn model_keys(model: &BTreeMap<i32, usize>) -> Vec<i32> {
    model
        .iter()
        .flat_map(|(&k, &n)| std::iter::repeat(k).take(n))
        .collect()
}

// Property: state-machine equivalence against a key-count multiset.
// Invariants exercised across random operation sequences:
// - Ordering and parent links hold after every mutation, including all
//   four deletion cases.
// - `find` hits exactly when the model holds the key, and returns that key.
// - `delete` succeeds exactly when the model holds the key.
// - In-order iteration yields the model's keys, sorted, with multiplicity.
// - Read-only operations leave the structural fingerprint unchanged.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_tree_matches_multiset(ops in arb_ops()) {
        let mut sut = OrderedTree::new();
        let mut model: BTreeMap<i32, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    sut.add(k, v);
                    *model.entry(k).or_default() += 1;
                }
                Op::Delete(k) => {
                    let present = model.get(&k).copied().unwrap_or(0) > 0;
                    match sut.delete(k) {
                        Ok(entry) => {
                            prop_assert!(present);
                            prop_assert_eq!(entry.key, k);
                            let n = model.get_mut(&k).unwrap();
                            *n -= 1;
                            if *n == 0 {
                                model.remove(&k);
                            }
                        }
                        Err(_) => prop_assert!(!present),
                    }
                }
                Op::Find(k) => {
                    let before = sut.render_simple();
                    let hit = sut.find(k);
                    prop_assert_eq!(hit.is_some(), model.contains_key(&k));
                    if let Some(Entry { key, .. }) = hit {
                        prop_assert_eq!(key, k);
                    }
                    prop_assert_eq!(sut.render_simple(), before);
                }
                Op::Extremes => {
                    let before = sut.render_simple();
                    prop_assert_eq!(sut.get_min().map(|e| e.key), model.keys().next().copied());
                    prop_assert_eq!(sut.get_max().map(|e| e.key), model.keys().next_back().copied());
                    let _ = tree_diagram::render(&sut);
                    prop_assert_eq!(sut.render_simple(), before);
                }
            }
            prop_assert!(sut.is_well_formed());
            prop_assert_eq!(sut.len(), model.values().sum::<usize>());
        }

        let keys: Vec<i32> = sut.iter().map(|e| e.key).collect();
        prop_assert_eq!(keys, model_keys(&model));
    }
}

// Property: values of equal keys come out of in-order iteration in the
// order they were added, as long as nothing was deleted.
proptest! {
    #[test]
    fn prop_duplicates_iterate_in_insertion_order(keys in proptest::collection::vec(0i32..5, 1..60)) {
        let mut sut = OrderedTree::new();
        for (i, &k) in keys.iter().enumerate() {
            sut.add(k, i as i32);
        }
        let mut last_seen: BTreeMap<i32, i32> = BTreeMap::new();
        for e in sut.iter() {
            if let Some(&prev) = last_seen.get(&e.key) {
                prop_assert!(prev < e.value);
            }
            last_seen.insert(e.key, e.value);
        }
    }
}
