//! Typed document model.
//!
//! This module provides the main public interface of the crate. A [`Doc`]
//! owns an arena of typed nodes and hands out [`NodeId`] handles; callers
//! build structure with the typed constructors and the array/dictionary
//! mutators, and read it back with the typed getters, the pair cursor, and
//! path access. The underlying tree engine is never exposed — every
//! operation goes through `Doc`.
//!
//! The error contract is deliberately forgiving: passing the wrong node
//! kind, a missing key, an out-of-range index, or a stale handle yields an
//! absent result or a silent no-op. Only internal invariant violations
//! (a malformed dictionary pair sequence) abort.
//!
//! # Usage
//!
//! ```
//! use doctree::Doc;
//!
//! let mut doc = Doc::new();
//! let root = doc.new_dict();
//!
//! let port = doc.new_uint(62078);
//! doc.dict_set(root, "Port", port);
//! let host = doc.new_text("localhost");
//! doc.dict_set(root, "Host", host);
//!
//! assert_eq!(doc.dict_len(root), 2);
//! assert_eq!(doc.uint_val(doc.dict_get(root, "Port").unwrap()), Some(62078));
//! ```

use serde::{Serialize, de::DeserializeOwned};

use crate::tree::{Cursor, Tree};

// Submodules
pub mod errors;
pub mod path;
pub mod value;

// Convenience re-exports for the core document types
pub use errors::DocError;
pub use path::Step;
pub use value::{Date, Kind, Value};

pub use crate::tree::NodeId;

// Re-export the macro from crate root
pub use crate::path;

use value::Payload;

/// A mutable, hierarchical, typed document.
///
/// `Doc` is an arena: nodes are created detached, wired into containers
/// with the array/dict mutators, and released with [`Doc::free`] (or
/// transitively, when an ancestor is released). Several disjoint subtrees
/// may coexist while a document is being assembled; handles stay valid
/// until the node they address is freed.
///
/// # Core Operations
///
/// - **Constructors**: one per scalar kind, plus [`Doc::new_array`] and
///   [`Doc::new_dict`]
/// - **Array access**: `array_len`, `array_get`, `array_push`,
///   `array_insert`, `array_set`, `array_remove`, `array_index_of`
/// - **Dictionary access**: `dict_len`, `dict_get`, `dict_set`,
///   `dict_remove`, `dict_merge`, the [`DictCursor`] pair cursor
/// - **Cross-cutting**: [`Doc::deep_copy`], [`Doc::compare`],
///   [`Doc::access_path`], [`Doc::set_kind`], per-kind getters/setters
///
/// # Examples
///
/// ```
/// use doctree::{Doc, path};
///
/// let mut doc = Doc::new();
/// let root = doc.new_dict();
/// let devices = doc.new_array();
/// doc.dict_set(root, "Devices", devices);
/// let first = doc.new_text("iPhone");
/// doc.array_push(devices, first);
///
/// let found = doc.access_path(root, &path!["Devices", 0]).unwrap();
/// assert_eq!(doc.text_val(found), Some("iPhone"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Doc {
    tree: Tree<Payload>,
}

impl Doc {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Number of live nodes in the document, across all subtrees.
    ///
    /// Counts internal key nodes too; useful for asserting that release
    /// paths reclaim everything they should.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if `node` addresses a live node of this document.
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.contains(node)
    }

    // === Constructors ===

    fn create(&mut self, payload: Payload) -> NodeId {
        self.tree.create(payload)
    }

    /// Creates a detached boolean node.
    pub fn new_bool(&mut self, val: bool) -> NodeId {
        self.create(Payload::Bool(val))
    }

    /// Creates a detached unsigned integer node.
    pub fn new_uint(&mut self, val: u64) -> NodeId {
        self.create(Payload::UInt(val))
    }

    /// Creates a detached UID node.
    pub fn new_uid(&mut self, val: u64) -> NodeId {
        self.create(Payload::Uid(val))
    }

    /// Creates a detached float node.
    pub fn new_real(&mut self, val: f64) -> NodeId {
        self.create(Payload::Real(val))
    }

    /// Creates a detached text node.
    pub fn new_text(&mut self, val: impl Into<String>) -> NodeId {
        self.create(Payload::Text(val.into()))
    }

    /// Creates a detached byte-buffer node.
    pub fn new_bytes(&mut self, val: impl Into<Vec<u8>>) -> NodeId {
        self.create(Payload::Bytes(val.into()))
    }

    /// Creates a detached date node from second/microsecond fields.
    pub fn new_date(&mut self, sec: i32, usec: i32) -> NodeId {
        self.create(Payload::Date(Date::new(sec, usec)))
    }

    /// Creates a detached, empty array node.
    pub fn new_array(&mut self) -> NodeId {
        self.create(Payload::Array)
    }

    /// Creates a detached, empty dictionary node.
    pub fn new_dict(&mut self) -> NodeId {
        self.create(Payload::Dict)
    }

    /// Creates a detached scalar node from anything convertible to [`Value`].
    ///
    /// ```
    /// # use doctree::{Doc, doc::Kind};
    /// let mut doc = Doc::new();
    /// let n = doc.new_value("hello");
    /// assert_eq!(doc.kind(n), Kind::Text);
    /// ```
    pub fn new_value(&mut self, val: impl Into<Value>) -> NodeId {
        self.create(Payload::from(val.into()))
    }

    // === Node-level accessors ===

    /// The kind tag of `node`; [`Kind::None`] for stale or absent handles.
    pub fn kind(&self, node: NodeId) -> Kind {
        self.tree.payload(node).map_or(Kind::None, Payload::kind)
    }

    /// Returns `true` if `node` is a live array node.
    pub fn is_array(&self, node: NodeId) -> bool {
        matches!(self.tree.payload(node), Some(Payload::Array))
    }

    /// Returns `true` if `node` is a live dictionary node.
    pub fn is_dict(&self, node: NodeId) -> bool {
        matches!(self.tree.payload(node), Some(Payload::Dict))
    }

    /// The parent of `node`, or `None` for roots and stale handles.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    /// Detaches `node` and releases it together with all descendants.
    ///
    /// Owned text and byte buffers are dropped with their nodes. Every
    /// handle into the released subtree becomes stale; stale handles are
    /// inert and read as absent everywhere.
    pub fn free(&mut self, node: NodeId) {
        self.tree.remove(node);
    }

    /// Snapshot of a scalar node's value.
    ///
    /// Returns `None` for containers, kindless nodes, and stale handles.
    pub fn value(&self, node: NodeId) -> Option<Value> {
        self.tree.payload(node)?.to_value()
    }

    // === Typed getters ===

    /// Reads a boolean node; `None` on kind mismatch.
    pub fn bool_val(&self, node: NodeId) -> Option<bool> {
        match self.tree.payload(node)? {
            Payload::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads an unsigned integer node; `None` on kind mismatch.
    pub fn uint_val(&self, node: NodeId) -> Option<u64> {
        match self.tree.payload(node)? {
            Payload::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Reads a UID node; `None` on kind mismatch.
    pub fn uid_val(&self, node: NodeId) -> Option<u64> {
        match self.tree.payload(node)? {
            Payload::Uid(n) => Some(*n),
            _ => None,
        }
    }

    /// Reads a float node; `None` on kind mismatch.
    pub fn real_val(&self, node: NodeId) -> Option<f64> {
        match self.tree.payload(node)? {
            Payload::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Reads a text node; `None` on kind mismatch.
    pub fn text_val(&self, node: NodeId) -> Option<&str> {
        match self.tree.payload(node)? {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Reads a byte-buffer node; `None` on kind mismatch.
    pub fn bytes_val(&self, node: NodeId) -> Option<&[u8]> {
        match self.tree.payload(node)? {
            Payload::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Reads a date node; `None` on kind mismatch.
    pub fn date_val(&self, node: NodeId) -> Option<Date> {
        match self.tree.payload(node)? {
            Payload::Date(d) => Some(*d),
            _ => None,
        }
    }

    // === Typed setters ===

    fn set_scalar(&mut self, node: NodeId, payload: Payload) {
        // Retyping a container that still has children would strand them;
        // a populated container is not writable as a scalar.
        if self.tree.child_count(node) != 0 {
            return;
        }
        if let Some(slot) = self.tree.payload_mut(node) {
            *slot = payload;
        }
    }

    /// Overwrites `node` with a boolean payload.
    ///
    /// Setters replace the payload outright — the node takes the new kind
    /// and any previously owned buffer is released. A node that still has
    /// children is left untouched.
    pub fn set_bool(&mut self, node: NodeId, val: bool) {
        self.set_scalar(node, Payload::Bool(val));
    }

    /// Overwrites `node` with an unsigned integer payload.
    pub fn set_uint(&mut self, node: NodeId, val: u64) {
        self.set_scalar(node, Payload::UInt(val));
    }

    /// Overwrites `node` with a UID payload.
    pub fn set_uid(&mut self, node: NodeId, val: u64) {
        self.set_scalar(node, Payload::Uid(val));
    }

    /// Overwrites `node` with a float payload.
    pub fn set_real(&mut self, node: NodeId, val: f64) {
        self.set_scalar(node, Payload::Real(val));
    }

    /// Overwrites `node` with a text payload.
    pub fn set_text(&mut self, node: NodeId, val: impl Into<String>) {
        self.set_scalar(node, Payload::Text(val.into()));
    }

    /// Overwrites `node` with a byte-buffer payload.
    pub fn set_bytes(&mut self, node: NodeId, val: impl Into<Vec<u8>>) {
        self.set_scalar(node, Payload::Bytes(val.into()));
    }

    /// Overwrites `node` with a date payload.
    pub fn set_date(&mut self, node: NodeId, sec: i32, usec: i32) {
        self.set_scalar(node, Payload::Date(Date::new(sec, usec)));
    }

    /// Resets `node` to the zero payload of `kind`.
    ///
    /// Only legal on a node with no children; a populated container is
    /// left untouched. The new payload is the kind's zero value (empty
    /// text/buffer, zero numerics, empty container).
    pub fn set_kind(&mut self, node: NodeId, kind: Kind) {
        if self.tree.child_count(node) != 0 {
            return;
        }
        if let Some(slot) = self.tree.payload_mut(node) {
            *slot = Payload::zeroed(kind);
        }
    }

    // === Array operations ===
    //
    // Every array operation is a no-op (or yields a neutral result) when
    // the target is not a live array node.

    /// Number of items in an array; 0 if `node` is not an array.
    pub fn array_len(&self, node: NodeId) -> usize {
        if self.is_array(node) {
            self.tree.child_count(node)
        } else {
            0
        }
    }

    /// The item at `n`, or `None` when out of range.
    pub fn array_get(&self, node: NodeId, n: usize) -> Option<NodeId> {
        if self.is_array(node) {
            self.tree.nth_child(node, n)
        } else {
            None
        }
    }

    /// Appends `item` at the end of the array.
    pub fn array_push(&mut self, node: NodeId, item: NodeId) {
        if self.is_array(node) {
            self.tree.attach(node, item);
        }
    }

    /// Inserts `item` at position `n`; an index past the end appends.
    pub fn array_insert(&mut self, node: NodeId, n: usize, item: NodeId) {
        if self.is_array(node) {
            self.tree.insert(node, n, item);
        }
    }

    /// Replaces the item at `n` with `item`.
    ///
    /// The old item is released first and `item` takes its exact position,
    /// so the array's length and the order of its other items are
    /// unchanged. Out-of-range indices leave the array untouched (and
    /// `item` detached).
    pub fn array_set(&mut self, node: NodeId, n: usize, item: NodeId) {
        if !self.is_array(node) || !self.tree.contains(item) {
            return;
        }
        // Refuse self/ancestor items up front; a replace must not release
        // the old item and then fail to insert the new one.
        if self.tree.is_self_or_descendant(node, item) {
            return;
        }
        let Some(old) = self.array_get(node, n) else {
            return;
        };
        if old == item {
            return;
        }
        // The replacement may live inside the subtree being released.
        self.tree.detach(item);
        match self.tree.remove(old) {
            Some(index) => self.tree.insert(node, index, item),
            None => self.tree.attach(node, item),
        }
    }

    /// Releases the item at `n`; no-op when out of range.
    pub fn array_remove(&mut self, node: NodeId, n: usize) {
        if !self.is_array(node) {
            return;
        }
        if let Some(old) = self.array_get(node, n) {
            self.tree.remove(old);
        }
    }

    /// Position of `item` among its array parent's children.
    ///
    /// Returns 0 when the parent is not an array — callers that need to
    /// distinguish "first item" from "not in an array" should check
    /// [`Doc::parent`] first.
    pub fn array_index_of(&self, item: NodeId) -> usize {
        match self.tree.parent(item) {
            Some(parent) if self.is_array(parent) => self.tree.position(item).unwrap_or(0),
            _ => 0,
        }
    }

    /// Iterates over the items of an array in order.
    pub fn array_items(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let live = self.is_array(node);
        self.tree
            .children(node)
            .filter(move |_| live)
    }

    // === Dictionary operations ===
    //
    // A dictionary's children alternate internal key nodes and value
    // nodes; pairs keep insertion order. Every operation is a no-op (or
    // yields a neutral result) when the target is not a live dictionary.

    /// Number of key/value pairs; 0 if `node` is not a dictionary.
    pub fn dict_len(&self, node: NodeId) -> usize {
        if self.is_dict(node) {
            self.tree.child_count(node) / 2
        } else {
            0
        }
    }

    /// Looks up the value paired with `key`.
    ///
    /// A linear scan over the pair sequence, first match wins.
    pub fn dict_get(&self, node: NodeId, key: &str) -> Option<NodeId> {
        if !self.is_dict(node) {
            return None;
        }
        let count = self.tree.child_count(node);
        let mut offset = 0;
        while offset < count {
            let key_node = self.tree.nth_child(node, offset)?;
            let Some(Payload::Key(text)) = self.tree.payload(key_node) else {
                panic!("dictionary child at even position {offset} is not a key");
            };
            if text == key {
                return self.tree.nth_child(node, offset + 1);
            }
            offset += 2;
        }
        None
    }

    /// Associates `key` with `item`.
    ///
    /// When the key already exists its old value is released and `item`
    /// takes the exact position of the old value, so the pair keeps its
    /// place in iteration order. A new key appends a fresh pair at the
    /// end.
    pub fn dict_set(&mut self, node: NodeId, key: &str, item: NodeId) {
        if !self.is_dict(node) || !self.tree.contains(item) {
            return;
        }
        // Attaching the dict itself (or an ancestor) would be refused by
        // the tree engine after the key slot was already appended, leaving
        // the pair sequence malformed. Refuse up front instead.
        if self.tree.is_self_or_descendant(node, item) {
            return;
        }
        match self.dict_get(node, key) {
            Some(old) => {
                if old == item {
                    return;
                }
                // The replacement may live inside the subtree being
                // released.
                self.tree.detach(item);
                match self.tree.remove(old) {
                    Some(index) => self.tree.insert(node, index, item),
                    None => self.tree.attach(node, item),
                }
            }
            None => {
                let key_node = self.create(Payload::Key(key.to_string()));
                self.tree.attach(node, key_node);
                self.tree.attach(node, item);
            }
        }
    }

    /// Equivalent to [`Doc::dict_set`]: inserting over an existing key
    /// replaces its value in place.
    pub fn dict_insert(&mut self, node: NodeId, key: &str, item: NodeId) {
        self.dict_set(node, key, item);
    }

    /// Releases the pair stored under `key`; no-op for missing keys.
    ///
    /// Both halves of the pair — the internal key node and the value
    /// subtree — are released.
    pub fn dict_remove(&mut self, node: NodeId, key: &str) {
        if !self.is_dict(node) {
            return;
        }
        if let Some(old) = self.dict_get(node, key) {
            if let Some(key_node) = self.tree.prev_sibling(old) {
                self.tree.remove(key_node);
            }
            self.tree.remove(old);
        }
    }

    /// The key text `node` is stored under, when its parent is a
    /// dictionary.
    pub fn dict_key_of(&self, node: NodeId) -> Option<&str> {
        let parent = self.tree.parent(node)?;
        if !self.is_dict(parent) {
            return None;
        }
        match self.tree.payload(self.tree.prev_sibling(node)?)? {
            Payload::Key(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Yields the pair at the cursor's offset and advances it.
    ///
    /// Pairs come back in insertion order; `None` once the cursor has
    /// passed the last pair. The cursor is a plain offset, so mutating the
    /// dictionary mid-iteration shifts subsequent results instead of
    /// failing; a cursor left misaligned by such a mutation reads as
    /// exhausted.
    ///
    /// ```
    /// use doctree::{Doc, doc::DictCursor};
    ///
    /// let mut doc = Doc::new();
    /// let dict = doc.new_dict();
    /// let a = doc.new_uint(1);
    /// doc.dict_set(dict, "a", a);
    ///
    /// let mut cursor = DictCursor::new();
    /// let (key, value) = doc.dict_next(dict, &mut cursor).unwrap();
    /// assert_eq!(key, "a");
    /// assert_eq!(value, a);
    /// assert!(doc.dict_next(dict, &mut cursor).is_none());
    /// ```
    pub fn dict_next<'a>(
        &'a self,
        node: NodeId,
        cursor: &mut DictCursor,
    ) -> Option<(&'a str, NodeId)> {
        if !self.is_dict(node) {
            return None;
        }
        let key_node = self.tree.nth_child(node, cursor.offset)?;
        let value = self.tree.nth_child(node, cursor.offset + 1)?;
        let Payload::Key(text) = self.tree.payload(key_node)? else {
            return None;
        };
        cursor.offset += 2;
        Some((text.as_str(), value))
    }

    /// Returns an iterator over the dictionary's pairs in insertion order.
    pub fn dict_pairs(&self, node: NodeId) -> Pairs<'_> {
        Pairs {
            doc: self,
            node,
            cursor: DictCursor::new(),
        }
    }

    /// Folds every pair of `source` into `target`.
    ///
    /// For each source pair, an existing target pair under the same key is
    /// removed first, then a deep copy of the source value is set — so
    /// every overlapping key relocates to the end of `target`'s pair
    /// sequence. This reordering is part of the contract; consumers
    /// layering defaults and overrides rely on the values, not the
    /// positions. `source` is never modified and shares no nodes with the
    /// copies inserted into `target`.
    ///
    /// No-op unless `target` and `source` are two distinct live
    /// dictionaries.
    pub fn dict_merge(&mut self, target: NodeId, source: NodeId) {
        if target == source || !self.is_dict(target) || !self.is_dict(source) {
            return;
        }
        let mut cursor = DictCursor::new();
        loop {
            let (key, value) = match self.dict_next(source, &mut cursor) {
                Some((key, value)) => (key.to_string(), value),
                None => break,
            };
            if self.dict_get(target, &key).is_some() {
                self.dict_remove(target, &key);
            }
            if let Some(copy) = self.deep_copy(value) {
                self.dict_set(target, &key, copy);
            }
            tracing::trace!(key = %key, "merged dictionary pair");
        }
    }

    /// Stores any serializable value under `key` as an embedded JSON text
    /// node, returning the node that now holds it.
    pub fn dict_set_json<T>(&mut self, node: NodeId, key: &str, value: &T) -> crate::Result<NodeId>
    where
        T: Serialize + ?Sized,
    {
        if !self.is_dict(node) {
            return Err(DocError::TypeMismatch {
                expected: "dict".to_string(),
                actual: self.kind(node).to_string(),
            }
            .into());
        }
        let json = serde_json::to_string(value).map_err(|e| DocError::SerializationFailed {
            reason: e.to_string(),
        })?;
        let item = self.new_text(json);
        self.dict_set(node, key, item);
        Ok(item)
    }

    /// Reads the embedded JSON text stored under `key` back into `T`.
    pub fn dict_get_json<T>(&self, node: NodeId, key: &str) -> crate::Result<T>
    where
        T: DeserializeOwned,
    {
        let item = self
            .dict_get(node, key)
            .ok_or_else(|| DocError::ElementNotFound {
                key: key.to_string(),
            })?;
        let text = self.text_val(item).ok_or_else(|| DocError::TypeMismatch {
            expected: "text (JSON string)".to_string(),
            actual: self.kind(item).to_string(),
        })?;
        serde_json::from_str(text).map_err(|e| {
            DocError::DeserializationFailed {
                reason: format!("key '{key}': {e}"),
            }
            .into()
        })
    }

    // === Cross-cutting operations ===

    /// Produces a fully disjoint copy of the subtree rooted at `node`.
    ///
    /// Scalars are copied by value, text and byte buffers are freshly
    /// allocated, containers are copied recursively with child order
    /// preserved. The copy is detached; it shares nothing with the
    /// original.
    pub fn deep_copy(&mut self, node: NodeId) -> Option<NodeId> {
        let payload = self.tree.payload(node)?.clone();
        let copy = self.create(payload);
        let mut cursor = Cursor::new();
        while let Some(child) = cursor.next(&self.tree, node) {
            if let Some(child_copy) = self.deep_copy(child) {
                self.tree.attach(copy, child_copy);
            }
        }
        Some(copy)
    }

    /// Compares two nodes.
    ///
    /// Scalars compare by value: numerics bit-for-bit, text and byte
    /// buffers byte-for-byte, dates field-for-field. Containers compare by
    /// **identity** — two arrays or dictionaries are equal only when they
    /// are the same node, never structurally. In particular,
    /// `compare(root, deep_copy(root))` is `false` for containers.
    /// Absent or stale handles never compare equal to anything.
    pub fn compare(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(pa), Some(pb)) = (self.tree.payload(a), self.tree.payload(b)) else {
            return false;
        };
        match (pa, pb) {
            (Payload::None, Payload::None) => true,
            (Payload::Bool(x), Payload::Bool(y)) => x == y,
            (Payload::UInt(x), Payload::UInt(y)) | (Payload::Uid(x), Payload::Uid(y)) => x == y,
            (Payload::Real(x), Payload::Real(y)) => x.to_bits() == y.to_bits(),
            (Payload::Date(x), Payload::Date(y)) => x == y,
            (Payload::Text(x), Payload::Text(y)) | (Payload::Key(x), Payload::Key(y)) => x == y,
            (Payload::Bytes(x), Payload::Bytes(y)) => x == y,
            (Payload::Array, Payload::Array) | (Payload::Dict, Payload::Dict) => a == b,
            _ => false,
        }
    }

    /// Walks `steps` from `root`, one container level per step.
    ///
    /// An [`Step::Index`] step resolves at an array node, a [`Step::Key`]
    /// step at a dictionary node. The walk yields `None` the moment a step
    /// fails to resolve, a step's type does not match the current
    /// container, or a non-container is reached with steps remaining.
    pub fn access_path(&self, root: NodeId, steps: &[Step<'_>]) -> Option<NodeId> {
        let mut current = root;
        for step in steps {
            current = match (self.tree.payload(current)?, step) {
                (Payload::Array, Step::Index(n)) => self.array_get(current, *n)?,
                (Payload::Dict, Step::Key(key)) => self.dict_get(current, key)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Renders the subtree rooted at `node` as display-oriented JSON.
    ///
    /// Intended for debugging and logs, not for interchange: text is
    /// escaped minimally, byte buffers render as number arrays, dates as
    /// `{"sec":..,"usec":..}` objects.
    pub fn to_json_string(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_json(node, &mut out);
        out
    }

    fn write_json(&self, node: NodeId, out: &mut String) {
        use std::fmt::Write;

        let Some(payload) = self.tree.payload(node) else {
            out.push_str("null");
            return;
        };
        match payload {
            Payload::None => out.push_str("null"),
            Payload::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Payload::UInt(n) | Payload::Uid(n) => {
                let _ = write!(out, "{n}");
            }
            Payload::Real(r) => {
                let _ = write!(out, "{r}");
            }
            Payload::Date(d) => {
                let _ = write!(out, "{{\"sec\":{},\"usec\":{}}}", d.sec, d.usec);
            }
            Payload::Text(s) | Payload::Key(s) => {
                let _ = write!(out, "\"{}\"", s.replace('"', "\\\""));
            }
            Payload::Bytes(bytes) => {
                out.push('[');
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    let _ = write!(out, "{byte}");
                }
                out.push(']');
            }
            Payload::Array => {
                out.push('[');
                for (i, child) in self.tree.children(node).enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_json(child, out);
                }
                out.push(']');
            }
            Payload::Dict => {
                out.push('{');
                let mut cursor = DictCursor::new();
                let mut first = true;
                while let Some((key, value)) = self.dict_next(node, &mut cursor) {
                    if !first {
                        out.push(',');
                    }
                    let _ = write!(out, "\"{}\":", key.replace('"', "\\\""));
                    self.write_json(value, out);
                    first = false;
                }
                out.push('}');
            }
        }
    }
}

/// Caller-owned cursor over a dictionary's pairs.
///
/// The cursor tracks a running child offset only — it holds no reference
/// into the document, so it can outlive arbitrary mutation (with the
/// offset-shift effects documented on [`Doc::dict_next`]). Dropping a
/// cursor releases it; there is nothing further to clean up.
#[derive(Debug, Clone, Default)]
pub struct DictCursor {
    offset: usize,
}

impl DictCursor {
    /// Creates a cursor positioned at the first pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds the cursor to the first pair.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Iterator over a dictionary's pairs, in insertion order.
///
/// Created by [`Doc::dict_pairs`]. A thin wrapper around [`DictCursor`]
/// for the common borrow-only iteration case.
pub struct Pairs<'a> {
    doc: &'a Doc,
    node: NodeId,
    cursor: DictCursor,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        self.doc.dict_next(self.node, &mut self.cursor)
    }
}
