//! Deep copy and comparison semantics

use doctree::{Doc, NodeId, path};

/// Builds a small mixed tree:
/// `{greeting: "hi", blob: [1,2], flags: {on: true}, list: [10, 20]}`
fn mixed_fixture(doc: &mut Doc) -> NodeId {
    let root = doc.new_dict();
    let greeting = doc.new_text("hi");
    doc.dict_set(root, "greeting", greeting);
    let blob = doc.new_bytes(vec![1, 2]);
    doc.dict_set(root, "blob", blob);
    let flags = doc.new_dict();
    doc.dict_set(root, "flags", flags);
    let on = doc.new_bool(true);
    doc.dict_set(flags, "on", on);
    let list = doc.new_array();
    doc.dict_set(root, "list", list);
    for v in [10u64, 20] {
        let item = doc.new_uint(v);
        doc.array_push(list, item);
    }
    root
}

#[test]
fn test_deep_copy_is_value_equal_at_every_leaf() {
    let mut doc = Doc::new();
    let root = mixed_fixture(&mut doc);
    let copy = doc.deep_copy(root).unwrap();

    for steps in [path!["greeting"], path!["blob"]] {
        let original = doc.access_path(root, &steps).unwrap();
        let copied = doc.access_path(copy, &steps).unwrap();
        assert!(doc.compare(original, copied));
        assert_ne!(original, copied);
    }
    let original = doc.access_path(root, &path!["flags", "on"]).unwrap();
    let copied = doc.access_path(copy, &path!["flags", "on"]).unwrap();
    assert!(doc.compare(original, copied));

    // Order is preserved.
    let keys: Vec<_> = doc.dict_pairs(copy).map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, vec!["greeting", "blob", "flags", "list"]);
    let copied_list = doc.access_path(copy, &path!["list"]).unwrap();
    let values: Vec<_> = doc
        .array_items(copied_list)
        .map(|n| doc.uint_val(n).unwrap())
        .collect();
    assert_eq!(values, vec![10, 20]);
}

#[test]
fn test_deep_copy_shares_no_buffers() {
    let mut doc = Doc::new();
    let root = mixed_fixture(&mut doc);
    let copy = doc.deep_copy(root).unwrap();

    // Mutating a leaf of the copy leaves the original alone...
    let copied_greeting = doc.access_path(copy, &path!["greeting"]).unwrap();
    doc.set_text(copied_greeting, "rewritten");
    let original_greeting = doc.access_path(root, &path!["greeting"]).unwrap();
    assert_eq!(doc.text_val(original_greeting), Some("hi"));

    // ...and vice versa.
    let original_blob = doc.access_path(root, &path!["blob"]).unwrap();
    doc.set_bytes(original_blob, vec![9, 9, 9]);
    let copied_blob = doc.access_path(copy, &path!["blob"]).unwrap();
    assert_eq!(doc.bytes_val(copied_blob), Some(&[1u8, 2][..]));
}

#[test]
fn test_containers_compare_by_identity() {
    let mut doc = Doc::new();
    let root = mixed_fixture(&mut doc);
    let copy = doc.deep_copy(root).unwrap();

    // A container equals itself and nothing else — not even its own
    // deep copy with identical contents.
    assert!(doc.compare(root, root));
    assert!(!doc.compare(root, copy));

    let list = doc.access_path(root, &path!["list"]).unwrap();
    let copied_list = doc.access_path(copy, &path!["list"]).unwrap();
    assert!(!doc.compare(list, copied_list));
}

#[test]
fn test_scalars_compare_by_value() {
    let mut doc = Doc::new();

    let a = doc.new_uint(5);
    let b = doc.new_uint(5);
    let c = doc.new_uint(6);
    assert!(doc.compare(a, b));
    assert!(!doc.compare(a, c));

    let s1 = doc.new_text("same");
    let s2 = doc.new_text("same");
    assert!(doc.compare(s1, s2));

    let d1 = doc.new_date(1, 2);
    let d2 = doc.new_date(1, 2);
    let d3 = doc.new_date(1, 3);
    assert!(doc.compare(d1, d2));
    assert!(!doc.compare(d1, d3));

    // Kinds must match: a UID never equals an unsigned integer.
    let uid = doc.new_uid(5);
    assert!(!doc.compare(a, uid));
    let bytes = doc.new_bytes(b"same".to_vec());
    assert!(!doc.compare(s1, bytes));
}

#[test]
fn test_reals_compare_bit_for_bit() {
    let mut doc = Doc::new();

    let nan1 = doc.new_real(f64::NAN);
    let nan2 = doc.new_real(f64::NAN);
    assert!(doc.compare(nan1, nan2));

    let pos = doc.new_real(0.0);
    let neg = doc.new_real(-0.0);
    assert!(!doc.compare(pos, neg));
}

#[test]
fn test_compare_with_absent_nodes_is_false() {
    let mut doc = Doc::new();
    let a = doc.new_uint(1);
    let b = doc.new_uint(1);
    doc.free(b);

    assert!(!doc.compare(a, b));
    assert!(!doc.compare(b, b));
}

#[test]
fn test_deep_copy_accounting() {
    let mut doc = Doc::new();
    let root = mixed_fixture(&mut doc);
    let before = doc.node_count();

    let copy = doc.deep_copy(root).unwrap();
    // The copy allocates exactly as many nodes (keys included) as the
    // original holds.
    assert_eq!(doc.node_count(), before * 2);

    doc.free(copy);
    assert_eq!(doc.node_count(), before);
    assert!(doc.contains(root));
}

#[test]
fn test_deep_copy_of_a_scalar() {
    let mut doc = Doc::new();
    let text = doc.new_text("alone");
    let copy = doc.deep_copy(text).unwrap();

    assert_ne!(copy, text);
    assert!(doc.compare(text, copy));
    assert_eq!(doc.parent(copy), None);
    assert!(doc.deep_copy(copy).is_some());

    let stale = doc.new_uint(1);
    doc.free(stale);
    assert!(doc.deep_copy(stale).is_none());
}
