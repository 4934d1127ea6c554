//! Dictionary merge tests

use doctree::{Doc, NodeId};

fn uint_dict(doc: &mut Doc, entries: &[(&str, u64)]) -> NodeId {
    let dict = doc.new_dict();
    for &(key, value) in entries {
        let item = doc.new_uint(value);
        doc.dict_set(dict, key, item);
    }
    dict
}

fn pairs(doc: &Doc, dict: NodeId) -> Vec<(String, u64)> {
    doc.dict_pairs(dict)
        .map(|(key, value)| (key.to_string(), doc.uint_val(value).expect("uint value")))
        .collect()
}

#[test]
fn test_merge_relocates_overlapping_keys_to_the_end() {
    let mut doc = Doc::new();
    let target = uint_dict(&mut doc, &[("a", 0), ("c", 3)]);
    let source = uint_dict(&mut doc, &[("a", 1), ("b", 2)]);

    doc.dict_merge(target, source);

    // "a" existed in both, so its old pair was removed before the re-set
    // appended the copy — it moved to position 1, after "c".
    assert_eq!(doc.dict_len(target), 3);
    assert_eq!(
        pairs(&doc, target),
        vec![
            ("c".to_string(), 3),
            ("a".to_string(), 1),
            ("b".to_string(), 2)
        ]
    );

    // The source is untouched.
    assert_eq!(
        pairs(&doc, source),
        vec![("a".to_string(), 1), ("b".to_string(), 2)]
    );
}

#[test]
fn test_merge_copies_are_independent_of_the_source() {
    let mut doc = Doc::new();
    let target = doc.new_dict();
    let source = doc.new_dict();
    let original = doc.new_text("default");
    doc.dict_set(source, "mode", original);

    doc.dict_merge(target, source);

    // Mutating the source value afterwards must not leak into the target.
    doc.set_text(original, "changed");
    let merged = doc.dict_get(target, "mode").unwrap();
    assert_ne!(merged, original);
    assert_eq!(doc.text_val(merged), Some("default"));
}

#[test]
fn test_merge_copies_nested_containers() {
    let mut doc = Doc::new();
    let target = doc.new_dict();
    let source = doc.new_dict();
    let inner = doc.new_array();
    doc.dict_set(source, "list", inner);
    let item = doc.new_uint(5);
    doc.array_push(inner, item);

    doc.dict_merge(target, source);

    let copied = doc.dict_get(target, "list").unwrap();
    assert_ne!(copied, inner);
    assert_eq!(doc.array_len(copied), 1);
    assert_eq!(doc.uint_val(doc.array_get(copied, 0).unwrap()), Some(5));
    // Containers compare by identity, so source and copy are not equal
    // even though their contents match.
    assert!(!doc.compare(copied, inner));
}

#[test]
fn test_merge_preserves_source_order_for_new_keys() {
    let mut doc = Doc::new();
    let target = doc.new_dict();
    let source = uint_dict(&mut doc, &[("x", 1), ("y", 2), ("z", 3)]);

    doc.dict_merge(target, source);

    assert_eq!(
        pairs(&doc, target),
        vec![
            ("x".to_string(), 1),
            ("y".to_string(), 2),
            ("z".to_string(), 3)
        ]
    );
}

#[test]
fn test_merge_requires_two_distinct_dicts() {
    let mut doc = Doc::new();
    let dict = uint_dict(&mut doc, &[("a", 1)]);
    let arr = doc.new_array();

    doc.dict_merge(dict, dict);
    doc.dict_merge(dict, arr);
    doc.dict_merge(arr, dict);

    assert_eq!(pairs(&doc, dict), vec![("a".to_string(), 1)]);
    assert_eq!(doc.array_len(arr), 0);
}

#[test]
fn test_merge_does_not_leak_nodes() {
    let mut doc = Doc::new();
    let target = uint_dict(&mut doc, &[("a", 0)]);
    let source = uint_dict(&mut doc, &[("a", 1)]);
    let before = doc.node_count();

    // Replacing "a" releases the old pair and copies in a new one; the
    // arena population must stay flat.
    doc.dict_merge(target, source);
    assert_eq!(doc.node_count(), before);

    // Releasing both roots reclaims everything.
    doc.free(target);
    doc.free(source);
    assert_eq!(doc.node_count(), 0);
}
