//! Path access tests

use doctree::{Doc, NodeId, doc::Step, path};

/// Builds `{users: [{"name":"Al"}, {"name":"Bo"}]}` and returns the root.
fn user_fixture(doc: &mut Doc) -> NodeId {
    let root = doc.new_dict();
    let users = doc.new_array();
    doc.dict_set(root, "users", users);
    for name in ["Al", "Bo"] {
        let user = doc.new_dict();
        doc.array_push(users, user);
        let value = doc.new_text(name);
        doc.dict_set(user, "name", value);
    }
    root
}

#[test]
fn test_walks_alternating_key_and_index_steps() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    let name = doc.access_path(root, &path!["users", 1, "name"]).unwrap();
    assert_eq!(doc.text_val(name), Some("Bo"));
}

#[test]
fn test_absent_on_out_of_range_index() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    assert!(doc.access_path(root, &path!["users", 5]).is_none());
}

#[test]
fn test_absent_on_missing_key() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    assert!(doc.access_path(root, &path!["groups", 0]).is_none());
}

#[test]
fn test_absent_on_step_kind_mismatch() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    // An index step at a dict, or a key step at an array, resolves nothing.
    assert!(doc.access_path(root, &path![0]).is_none());
    assert!(doc.access_path(root, &path!["users", "name"]).is_none());
}

#[test]
fn test_absent_when_steps_remain_at_a_scalar() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    // "name" resolves to a text node; the walk must stop there.
    assert!(
        doc.access_path(root, &path!["users", 0, "name", "first"])
            .is_none()
    );
    assert!(
        doc.access_path(root, &path!["users", 0, "name", 0])
            .is_none()
    );
}

#[test]
fn test_empty_path_returns_the_root() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    assert_eq!(doc.access_path(root, &path![]), Some(root));
    let scalar = doc.new_uint(1);
    assert_eq!(doc.access_path(scalar, &path![]), Some(scalar));
}

#[test]
fn test_steps_from_runtime_values() {
    let mut doc = Doc::new();
    let root = user_fixture(&mut doc);

    let key = String::from("users");
    let index: usize = 0;
    let steps = [Step::from(&key), Step::from(index), Step::from("name")];
    let name = doc.access_path(root, &steps).unwrap();
    assert_eq!(doc.text_val(name), Some("Al"));
}
