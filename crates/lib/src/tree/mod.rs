//! Ordered tree engine.
//!
//! This module provides the generic n-ary tree the document model is built
//! on. Nodes live in an arena and are addressed by [`NodeId`] handles; each
//! node owns one payload, an ordered sequence of children, and an optional
//! back-reference to its parent. The engine knows nothing about payload
//! semantics — the typed layer in [`crate::doc`] supplies those.
//!
//! Handles are generation-tagged: once a node is removed, every outstanding
//! handle to it (and to its descendants) becomes inert and all accessors
//! treat it as absent. Out-of-range and stale requests return `None`; no
//! operation on this surface panics.


/// Handle addressing a node inside a [`Tree`].
///
/// Handles are `Copy` and compare by identity: two handles are equal exactly
/// when they address the same node allocation. A handle is only meaningful
/// for the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    payload: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Arena-backed ordered tree.
///
/// A `Tree` may hold several disjoint subtrees at once: freshly created
/// nodes are roots until attached somewhere. Child order is explicit and
/// preserved by every operation.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of live nodes in the arena, across all subtrees.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the arena holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns `true` if `id` addresses a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    /// Allocates a new parentless node owning `payload`.
    pub fn create(&mut self, payload: T) -> NodeId {
        self.live += 1;
        let entry = Entry {
            payload,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn entry(&self, id: NodeId) -> Option<&Entry<T>> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry<T>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Borrows the payload of `id`.
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.entry(id).map(|e| &e.payload)
    }

    /// Mutably borrows the payload of `id`.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.entry_mut(id).map(|e| &mut e.payload)
    }

    /// The parent of `id`, or `None` for roots and stale handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id).and_then(|e| e.parent)
    }

    /// Number of direct children of `id` (0 for stale handles).
    pub fn child_count(&self, id: NodeId) -> usize {
        self.entry(id).map_or(0, |e| e.children.len())
    }

    /// The `n`th child of `id`, or `None` when out of range.
    pub fn nth_child(&self, id: NodeId, n: usize) -> Option<NodeId> {
        self.entry(id)?.children.get(n).copied()
    }

    /// The first child of `id`.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nth_child(id, 0)
    }

    /// The sibling directly after `id` under the same parent.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let pos = self.position(id)?;
        self.nth_child(parent, pos + 1)
    }

    /// The sibling directly before `id` under the same parent.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let pos = self.position(id)?;
        pos.checked_sub(1).and_then(|p| self.nth_child(parent, p))
    }

    /// 0-based position of `id` among its siblings, or `None` for roots.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.entry(parent)?.children.iter().position(|&c| c == id)
    }

    /// Iterates over the direct children of `id` in order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.entry(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Returns `true` if `node` is `other` or one of its descendants.
    pub(crate) fn is_self_or_descendant(&self, node: NodeId, other: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == other {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Appends `child` at the end of `parent`'s children.
    ///
    /// A child already attached elsewhere is detached first; a node can
    /// belong to at most one parent at a time. Attaching a node to itself
    /// or to one of its own descendants is a no-op.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let index = self.child_count(parent);
        self.insert(parent, index, child);
    }

    /// Inserts `child` at `index` among `parent`'s children.
    ///
    /// An index past the current end appends. The same aliasing rules as
    /// [`Tree::attach`] apply.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_self_or_descendant(parent, child) {
            return;
        }
        self.detach(child);
        let entry = self
            .entry_mut(parent)
            .expect("parent checked live above");
        if index >= entry.children.len() {
            entry.children.push(child);
        } else {
            entry.children.insert(index, child);
        }
        self.entry_mut(child)
            .expect("child checked live above")
            .parent = Some(parent);
    }

    /// Unlinks `id` from its parent, reporting the position it held.
    ///
    /// Returns `None` when the node had no parent (or the handle is stale);
    /// the node itself stays live as a root.
    pub fn detach(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let pos = self.position(id)?;
        self.entry_mut(parent)?.children.remove(pos);
        self.entry_mut(id)?.parent = None;
        Some(pos)
    }

    /// Detaches `id` and releases it together with all of its descendants.
    ///
    /// Returns the position the node held among its former siblings, or
    /// `None` if it was a root. Every handle into the released subtree
    /// becomes stale.
    pub fn remove(&mut self, id: NodeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let index = self.detach(id);
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(entry) = slot.entry.take() {
                pending.extend(entry.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.live -= 1;
            }
        }
        index
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resettable child cursor.
///
/// The cursor tracks a plain running offset into the parent's child
/// sequence, not a pointer into storage. Structural mutation while a
/// cursor is live therefore shifts the results of subsequent [`Cursor::next`]
/// calls instead of invalidating the cursor — downstream pair iteration
/// relies on exactly this behavior.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the first child.
    pub fn new() -> Self {
        Self::default()
    }

    /// Yields the child at the current offset and advances by one.
    pub fn next<T>(&mut self, tree: &Tree<T>, parent: NodeId) -> Option<NodeId> {
        let child = tree.nth_child(parent, self.offset)?;
        self.offset += 1;
        Some(child)
    }

    /// Rewinds the cursor to the first child.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// The current child offset.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
