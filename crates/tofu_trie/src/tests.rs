#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}

#[test]
fn test_prefix_query() {
    let mut trie = Trie::new();
    trie.insert("cat", "meow");
    trie.insert("car", "vroom");
    assert_eq!(sorted(trie.keys_with_prefix("ca")), vec!["car", "cat"]);
}

#[test]
fn test_remove_only_key() {
    let mut trie = Trie::new();
    trie.insert("cat", "meow");
    let removed = trie.remove("cat").unwrap();
    assert_eq!(removed.value(), "meow");
    assert!(!trie.contains("cat"));
    assert_eq!(trie.len(), 0);
    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 0);
}

#[test]
fn test_get_and_overwrite() {
    let mut trie = Trie::with_kind(Kind::Cstr);
    assert_eq!(trie.insert("dog", "woof"), None);
    let previous = trie.insert("dog", "bark").unwrap();
    assert_eq!(previous.value(), "woof");
    assert_eq!(trie.len(), 1);

    let got = trie.get("dog").unwrap();
    assert_eq!(got.value(), "bark");
    assert_eq!(got.kind(), Kind::Cstr);
}

#[test]
fn test_inner_nodes_are_not_keys() {
    let mut trie = Trie::new();
    trie.insert("house", "1");
    assert_eq!(trie.get("hou"), None);
    assert!(!trie.contains("hou"));
    assert!(!trie.contains("houses"));
    assert!(matches!(trie.remove("hou"), Err(TofuError::NotFound)));
    assert!(matches!(trie.remove("zebra"), Err(TofuError::NotFound)));
    assert_eq!(trie.len(), 1);
}

#[test]
fn test_empty_value_is_contained() {
    let mut trie = Trie::new();
    trie.insert("blank", "");
    assert!(trie.contains("blank"));
    assert_eq!(trie.get("blank").unwrap().value(), "");
}

#[test]
fn test_empty_key_lives_on_root() {
    let mut trie = Trie::new();
    trie.insert("", "root");
    trie.insert("a", "leaf");
    assert_eq!(trie.get("").unwrap().value(), "root");
    assert_eq!(sorted(trie.keys()), vec!["", "a"]);

    trie.remove("").unwrap();
    assert!(!trie.contains(""));
    assert_eq!(trie.keys(), vec!["a"]);
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_remove_prunes_only_dead_branch() {
    let mut trie = Trie::new();
    trie.insert("tea", "1");
    trie.insert("ten", "2");
    trie.insert("te", "3");
    // t, e, a, n
    assert_eq!(trie.node_count(), 4);

    trie.remove("tea").unwrap();
    assert_eq!(trie.node_count(), 3);
    assert!(trie.contains("te"));
    assert!(trie.contains("ten"));

    trie.remove("te").unwrap();
    // `e` still leads to `ten`
    assert_eq!(trie.node_count(), 3);

    trie.remove("ten").unwrap();
    assert_eq!(trie.node_count(), 0);
}

#[test]
fn test_remove_keeps_terminal_ancestor() {
    let mut trie = Trie::new();
    trie.insert("in", "1");
    trie.insert("inn", "2");
    trie.remove("inn").unwrap();
    assert_eq!(trie.node_count(), 2);
    assert_eq!(trie.get("in").unwrap().value(), "1");
}

#[test]
fn test_freed_slots_are_reused() {
    let mut trie = Trie::new();
    trie.insert("abc", "1");
    trie.remove("abc").unwrap();
    trie.insert("xyz", "2");
    assert_eq!(trie.nodes.len(), 4);
    assert_eq!(trie.get("xyz").unwrap().value(), "2");
}

#[test]
fn test_sibling_order_survives_removal() {
    let mut trie = Trie::new();
    for key in ["b", "a", "c", "d"] {
        trie.insert(key, key);
    }
    trie.remove("a").unwrap();
    assert_eq!(trie.keys(), vec!["b", "c", "d"]);
}

#[test]
fn test_prefix_misses() {
    let mut trie = Trie::new();
    trie.insert("apple", "1");
    assert!(trie.keys_with_prefix("b").is_empty());
    assert!(trie.keys_with_prefix("apples").is_empty());
    assert_eq!(trie.keys_with_prefix("apple"), vec!["apple"]);
}

#[test]
fn test_unicode_keys() {
    let mut trie = Trie::new();
    trie.insert("naïve", "1");
    trie.insert("naïf", "2");
    trie.insert("日本", "3");
    assert_eq!(sorted(trie.keys_with_prefix("naï")), vec!["naïf", "naïve"]);
    assert_eq!(trie.get("日本").unwrap().value(), "3");
    trie.remove("日本").unwrap();
    assert_eq!(trie.keys_with_prefix("日"), Vec::<String>::new());
}

#[test]
fn test_insert_value_checks_kind() {
    let mut trie = Trie::with_kind(Kind::I32);
    assert_eq!(
        trie.insert_value("n", TofuValue::from_bool(true)),
        Err(TofuError::TypeMismatch {
            expected: Kind::I32,
            found: Kind::Bool,
        })
    );
    trie.insert_value("n", TofuValue::from_i32(7)).unwrap();
    assert_eq!(trie.get("n").unwrap().as_i32(), Ok(7));

    let mut any = Trie::new();
    any.insert_value("b", TofuValue::from_bool(false)).unwrap();
    any.insert_value("c", TofuValue::from_char('x')).unwrap();
    assert_eq!(any.len(), 2);
}

#[test]
fn test_clone_is_deep() {
    let mut original = Trie::new();
    original.insert("key", "one");
    let copy = original.clone();
    original.insert("key", "two");
    original.insert("other", "x");
    assert_eq!(copy.get("key").unwrap().value(), "one");
    assert_eq!(copy.len(), 1);
}

#[test]
fn test_clear_and_take() {
    let mut trie = Trie::with_kind(Kind::Cstr);
    trie.insert("a", "1");
    trie.insert("b", "2");

    let moved = trie.take();
    assert_eq!(moved.len(), 2);
    assert!(trie.is_empty());
    assert_eq!(trie.kind(), Kind::Cstr);
    assert_eq!(trie.node_count(), 0);

    let mut moved = moved;
    moved.clear();
    assert!(moved.is_empty());
    assert_eq!(moved.node_count(), 0);
    assert!(!moved.contains("a"));
}

#[test]
fn test_dump() {
    let mut trie = Trie::new();
    trie.insert("to", "1");
    trie.insert("tea", "2");
    trie.insert("a", "3");
    assert_eq!(
        trie.dump(),
        "*\n  t\n    o (end)\n    e\n      a (end)\n  a (end)\n"
    );
}

#[test]
fn test_dump_marks_root_key_and_deep_nodes() {
    let mut trie = Trie::new();
    assert_eq!(trie.dump(), "*\n");
    trie.insert("", "root");
    trie.insert("abc", "deep");
    assert_eq!(trie.dump(), "* (end)\n  a\n    b\n      c (end)\n");
}
