#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn cstr(s: &str) -> TofuValue {
    TofuValue::from_cstr(s)
}

fn seeded(seed: u64) -> SkipList {
    SkipList::with_config(SkipListConfig::with_kind(Kind::Cstr).seed(seed)).unwrap()
}

fn payloads(list: &SkipList) -> Vec<&str> {
    list.iter().map(TofuValue::value).collect()
}

/// Every level chain is strictly ascending, every linked node keeps the
/// level it was drawn with, and `level` matches the tallest node.
fn assert_well_formed(list: &SkipList) {
    let mut tallest = 0;
    for lvl in 0..list.max_level() {
        let mut at = list.forward(NodeId::HEAD, lvl);
        let mut prev: Option<&TofuValue> = None;
        let mut count = 0;
        while !at.is_nil() {
            let node = &list.nodes[at.index()];
            assert!(node.forward.len() > lvl, "node linked above its level");
            if let Some(prev) = prev {
                assert_eq!(prev.compare(&node.data), Ordering::Less);
            }
            prev = Some(&node.data);
            at = node.forward[lvl];
            count += 1;
        }
        if lvl == 0 {
            assert_eq!(count, list.len());
        }
        if count > 0 {
            tallest = lvl + 1;
        }
    }
    assert_eq!(list.level(), tallest);
}

#[test]
fn test_front_and_back() {
    let mut list = seeded(1);
    list.insert(cstr("3")).unwrap();
    list.insert(cstr("1")).unwrap();
    list.insert(cstr("2")).unwrap();
    assert_eq!(list.get_front().unwrap().value(), "1");
    assert_eq!(list.get_back().unwrap().value(), "3");
    assert_eq!(payloads(&list), vec!["1", "2", "3"]);
    assert_well_formed(&list);
}

#[test]
fn test_empty_list() {
    let list = SkipList::new();
    assert!(list.is_empty());
    assert_eq!(list.level(), 0);
    assert_eq!(list.get_front(), None);
    assert_eq!(list.get_back(), None);
    assert_eq!(list.search(&cstr("x")), None);
    assert_eq!(list.iter().count(), 0);
}

#[test]
fn test_duplicate_rejected() {
    let mut list = seeded(2);
    list.insert(cstr("a")).unwrap();
    assert_eq!(list.insert(cstr("a")), Err(TofuError::Duplicate));
    assert_eq!(list.len(), 1);
    assert_well_formed(&list);
}

#[test]
fn test_kind_checked() {
    let mut list = seeded(3);
    assert_eq!(
        list.insert(TofuValue::from_i32(5)),
        Err(TofuError::TypeMismatch {
            expected: Kind::Cstr,
            found: Kind::I32,
        })
    );
    assert!(list.is_empty());

    let mut any = SkipList::new();
    any.insert(TofuValue::from_i32(5)).unwrap();
    any.insert(cstr("5")).unwrap();
    assert_eq!(any.len(), 2);
    // Kinds order before payloads.
    assert_eq!(any.get_front().unwrap().kind(), Kind::I32);
}

#[test]
fn test_ordering_is_lexicographic() {
    let mut list = seeded(4);
    for s in ["10", "9", "100", "1"] {
        list.insert(cstr(s)).unwrap();
    }
    assert_eq!(payloads(&list), vec!["1", "10", "100", "9"]);
}

#[test]
fn test_remove() {
    let mut list = seeded(5);
    for s in ["d", "b", "a", "c"] {
        list.insert(cstr(s)).unwrap();
    }
    let removed = list.remove(&cstr("b")).unwrap();
    assert_eq!(removed.value(), "b");
    assert_eq!(payloads(&list), vec!["a", "c", "d"]);
    assert!(!list.contains(&cstr("b")));
    assert_eq!(list.remove(&cstr("b")), Err(TofuError::NotFound));
    assert_well_formed(&list);

    for s in ["a", "c", "d"] {
        list.remove(&cstr(s)).unwrap();
    }
    assert!(list.is_empty());
    assert_eq!(list.level(), 0);
}

#[test]
fn test_search_returns_stored_value() {
    let mut list = seeded(6);
    let mut stored = cstr("key");
    stored.set_required(true);
    list.insert(stored).unwrap();
    let found = list.search(&cstr("key")).unwrap();
    assert!(found.attribute().required);
    assert_eq!(list.search(&cstr("ke")), None);
    assert_eq!(list.search(&cstr("kez")), None);
}

#[test]
fn test_freed_slots_are_reused() {
    let mut list = seeded(7);
    list.insert(cstr("a")).unwrap();
    list.insert(cstr("b")).unwrap();
    list.remove(&cstr("a")).unwrap();
    list.insert(cstr("c")).unwrap();
    assert_eq!(list.nodes.len(), 3);
    assert_eq!(payloads(&list), vec!["b", "c"]);
    assert_well_formed(&list);
}

#[test]
fn test_levels_respect_max_level() {
    let config = SkipListConfig::with_kind(Kind::Cstr)
        .max_level(2)
        .probability(0.9)
        .seed(8);
    let mut list = SkipList::with_config(config).unwrap();
    for i in 0..100 {
        list.insert(cstr(&format!("{i:03}"))).unwrap();
    }
    assert!(list.level() <= 2);
    assert!(list.nodes.iter().all(|node| node.forward.len() <= 2));
    assert_well_formed(&list);
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let build = || {
        let mut list = seeded(42);
        for i in 0..50 {
            list.insert(cstr(&i.to_string())).unwrap();
        }
        list.nodes.iter().map(|n| n.forward.len()).collect::<Vec<_>>()
    };
    assert_eq!(build(), build());
}

#[test]
fn test_config_validation() {
    for max_level in [0, 65] {
        let config = SkipListConfig::default().max_level(max_level);
        assert!(matches!(
            SkipList::with_config(config),
            Err(TofuError::InvalidArgument { .. })
        ));
    }
    for probability in [0.0, 1.0, -1.0, f64::NAN] {
        let config = SkipListConfig::default().probability(probability);
        assert!(matches!(
            SkipList::with_config(config),
            Err(TofuError::InvalidArgument { .. })
        ));
    }
    let list = SkipList::with_config(SkipListConfig::default().max_level(64)).unwrap();
    assert_eq!(list.max_level(), 64);
    assert_eq!(list.probability(), 0.5);
}

#[test]
fn test_clone_is_deep() {
    let mut original = seeded(9);
    original.insert(cstr("a")).unwrap();
    let copy = original.clone();
    original.insert(cstr("b")).unwrap();
    original.remove(&cstr("a")).unwrap();
    assert_eq!(payloads(&copy), vec!["a"]);
    assert_eq!(payloads(&original), vec!["b"]);
}

#[test]
fn test_clear_and_take() {
    let mut list = seeded(10);
    for s in ["x", "y", "z"] {
        list.insert(cstr(s)).unwrap();
    }
    let moved = list.take();
    assert_eq!(moved.len(), 3);
    assert!(list.is_empty());
    assert_eq!(list.kind(), Kind::Cstr);

    let mut moved = moved;
    moved.clear();
    assert!(moved.is_empty());
    assert_eq!(moved.level(), 0);
    assert_eq!(moved.get_front(), None);
    moved.insert(cstr("again")).unwrap();
    assert_well_formed(&moved);
}

#[test]
fn test_iter_is_exact_size() {
    let mut list = seeded(11);
    for s in ["a", "b", "c"] {
        list.insert(cstr(s)).unwrap();
    }
    let mut iter = list.iter();
    assert_eq!(iter.len(), 3);
    iter.next();
    assert_eq!(iter.len(), 2);
    assert_eq!((&list).into_iter().count(), 3);
}

proptest! {
    #[test]
    fn every_level_stays_sorted(
        seed in any::<u64>(),
        ops in prop::collection::vec((any::<bool>(), "[a-f]{1,3}"), 0..120),
    ) {
        let mut list = seeded(seed);
        let mut model = std::collections::BTreeSet::new();
        for (insert, key) in ops {
            if insert {
                let fresh = model.insert(key.clone());
                prop_assert_eq!(list.insert(cstr(&key)).is_ok(), fresh);
            } else {
                let present = model.remove(&key);
                prop_assert_eq!(list.remove(&cstr(&key)).is_ok(), present);
            }
            assert_well_formed(&list);
        }
        let expected: Vec<&str> = model.iter().map(String::as_str).collect();
        prop_assert_eq!(payloads(&list), expected);
        prop_assert_eq!(list.get_back().map(TofuValue::value), model.iter().next_back().map(String::as_str));
    }
}
