//! OrderedTree: unbalanced binary search tree stored in a slot arena.
//!
//! Nodes live in a `SlotMap` and refer to each other by `NodeId`. A node
//! owns its `left`/`right` children in the sense that removing a node
//! always clears the child slot on its parent; `parent` is a plain index
//! used for navigation only and never decides when a node is freed.
//!
//! Ordering: every key in a node's left subtree is strictly smaller than
//! the node's key, every key in its right subtree is greater or equal.
//! Equal keys are routed right on insert.

use crate::container::Container;
use crate::entry::Entry;
use crate::error::ContainerError;
use crate::tree_diagram;
use core::fmt::Write as _;
use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena index of a tree node.
    pub struct NodeId;
}

pub(crate) const STRUCT_TYPE: &str = "binary search tree";
pub(crate) const EMPTY_TREE: &str = "tree is empty";

#[derive(Debug)]
struct Node {
    entry: Entry,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn leaf(entry: Entry, parent: Option<NodeId>) -> Self {
        Self {
            entry,
            parent,
            left: None,
            right: None,
        }
    }
}

/// Where the iterative walk came from when it reached the current node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ArrivedFrom {
    Parent,
    LeftChild,
    RightChild,
}

/// One move of the pre-order walk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Step {
    Visit(NodeId),
    Left,
    Right,
    Up,
}

#[derive(Debug, Default)]
pub struct OrderedTree {
    nodes: SlotMap<NodeId, Node>,
    root: Option<NodeId>,
}

impl OrderedTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// First node on the search path whose key equals `key`.
    fn locate(&self, key: i32) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            let node = &self.nodes[current];
            if key == node.entry.key {
                return Some(current);
            }
            current = if key > node.entry.key {
                node.right?
            } else {
                node.left?
            };
        }
    }

    pub fn find(&self, key: i32) -> Option<Entry> {
        self.locate(key).map(|id| self.nodes[id].entry)
    }

    pub fn add(&mut self, key: i32, value: i32) {
        let entry = Entry::new(key, value);
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.insert(Node::leaf(entry, None)));
            return;
        };
        loop {
            let node = &self.nodes[current];
            let go_right = key >= node.entry.key;
            let next = if go_right { node.right } else { node.left };
            match next {
                Some(child) => current = child,
                None => {
                    let id = self.nodes.insert(Node::leaf(entry, Some(current)));
                    let parent = &mut self.nodes[current];
                    if go_right {
                        parent.right = Some(id);
                    } else {
                        parent.left = Some(id);
                    }
                    trace!("tree: inserted key {} under key {}", key, parent.entry.key);
                    return;
                }
            }
        }
    }

    /// Remove the first entry found with `key` and return it.
    pub fn delete(&mut self, key: i32) -> Result<Entry, ContainerError> {
        let target = self.locate(key).ok_or(ContainerError::MissingKey(key))?;
        let node = &self.nodes[target];
        let removed = node.entry;

        let excised = match (node.left, node.right) {
            (None, None) => {
                debug!("tree: delete key {} (leaf)", key);
                self.replace_in_parent(target, None);
                target
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("tree: delete key {} (single child)", key);
                self.replace_in_parent(target, Some(child));
                target
            }
            (Some(_), Some(right)) => {
                // The in-order successor has no left child; lift its entry
                // into `target` and splice its right subtree into whichever
                // slot of its parent it occupied.
                let successor = self.leftmost(right);
                let lifted = self.nodes[successor].entry;
                let orphan = self.nodes[successor].right;
                debug!(
                    "tree: delete key {} (two children, successor key {})",
                    key, lifted.key
                );
                self.replace_in_parent(successor, orphan);
                self.nodes[target].entry = lifted;
                successor
            }
        };

        self.nodes.remove(excised);
        Ok(removed)
    }

    /// Put `replacement` where `node` hangs under its parent (or at the
    /// root) and point the replacement's parent link there.
    fn replace_in_parent(&mut self, node: NodeId, replacement: Option<NodeId>) {
        let parent = self.nodes[node].parent;
        if let Some(child) = replacement {
            self.nodes[child].parent = parent;
        }
        match parent {
            None => {
                debug_assert_eq!(self.root, Some(node));
                self.root = replacement;
            }
            Some(p) => {
                let parent = &mut self.nodes[p];
                if parent.left == Some(node) {
                    parent.left = replacement;
                } else {
                    debug_assert_eq!(parent.right, Some(node), "broken parent link");
                    parent.right = replacement;
                }
            }
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// In-order successor, found through parent links when there is no
    /// right subtree.
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        while let Some(parent) = self.nodes[child].parent {
            if self.nodes[parent].left == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    pub fn get_min(&self) -> Option<Entry> {
        self.root.map(|root| self.nodes[self.leftmost(root)].entry)
    }

    pub fn get_max(&self) -> Option<Entry> {
        self.root.map(|root| self.nodes[self.rightmost(root)].entry)
    }

    /// Pre-order walk without recursion or an explicit stack: the current
    /// node plus the direction it was entered from is the whole state.
    fn walk(&self, mut visit: impl FnMut(Step)) {
        let Some(mut current) = self.root else {
            return;
        };
        let mut from = ArrivedFrom::Parent;
        loop {
            let node = &self.nodes[current];
            match from {
                ArrivedFrom::Parent => {
                    visit(Step::Visit(current));
                    match node.left {
                        Some(left) => {
                            visit(Step::Left);
                            current = left;
                        }
                        None => from = ArrivedFrom::LeftChild,
                    }
                }
                ArrivedFrom::LeftChild => match node.right {
                    Some(right) => {
                        visit(Step::Right);
                        current = right;
                        from = ArrivedFrom::Parent;
                    }
                    None => from = ArrivedFrom::RightChild,
                },
                ArrivedFrom::RightChild => {
                    let Some(parent) = node.parent else {
                        return;
                    };
                    from = if self.nodes[parent].left == Some(current) {
                        ArrivedFrom::LeftChild
                    } else {
                        ArrivedFrom::RightChild
                    };
                    visit(Step::Up);
                    current = parent;
                }
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn level_count(&self) -> usize {
        let mut deepest = 0;
        let mut level = 1;
        self.walk(|step| match step {
            Step::Visit(_) => deepest = deepest.max(level),
            Step::Left | Step::Right => level += 1,
            Step::Up => level -= 1,
        });
        deepest
    }

    /// Edges on the longest root-to-leaf path; 0 for an empty or
    /// single-node tree.
    pub fn depth(&self) -> usize {
        self.level_count().saturating_sub(1)
    }

    /// Structural fingerprint: keys in pre-order, `L`/`R` for each descent
    /// and `P` for each return to a parent.
    pub fn render_simple(&self) -> String {
        if self.is_empty() {
            return EMPTY_TREE.to_string();
        }
        let mut out = String::new();
        self.walk(|step| match step {
            Step::Visit(id) => {
                let _ = write!(out, "{}", self.nodes[id].entry.key);
            }
            Step::Left => out.push('L'),
            Step::Right => out.push('R'),
            Step::Up => out.push('P'),
        });
        out
    }

    /// Entries in key order; equal keys in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.leftmost(root)),
        }
    }

    /// Full check of the ordering and parent-link invariants.
    pub fn is_well_formed(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty();
        };
        if self.nodes[root].parent.is_some() {
            return false;
        }
        // (node, inclusive lower bound, exclusive upper bound)
        let mut pending = vec![(root, None::<i32>, None::<i32>)];
        let mut reached = 0;
        while let Some((id, low, high)) = pending.pop() {
            reached += 1;
            let node = &self.nodes[id];
            let key = node.entry.key;
            if low.is_some_and(|low| key < low) || high.is_some_and(|high| key >= high) {
                return false;
            }
            for (child, low, high) in [
                (node.left, low, Some(key)),
                (node.right, Some(key), high),
            ] {
                if let Some(child) = child {
                    if self.nodes[child].parent != Some(id) {
                        return false;
                    }
                    pending.push((child, low, high));
                }
            }
        }
        reached == self.nodes.len()
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn key_of(&self, id: NodeId) -> i32 {
        self.nodes[id].entry.key
    }

    pub(crate) fn children(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let node = &self.nodes[id];
        (node.left, node.right)
    }
}

/// In-order iterator over an `OrderedTree`.
pub struct Iter<'a> {
    tree: &'a OrderedTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.successor(current);
        Some(&self.tree.nodes[current].entry)
    }
}

impl Container for OrderedTree {
    fn get_struct_type(&self) -> &'static str {
        STRUCT_TYPE
    }

    fn len(&self) -> usize {
        OrderedTree::len(self)
    }

    fn find(&self, key: i32) -> Option<Entry> {
        OrderedTree::find(self, key)
    }

    fn add(&mut self, key: i32, value: i32) {
        OrderedTree::add(self, key, value)
    }

    fn delete(&mut self, key: i32) -> Result<Entry, ContainerError> {
        OrderedTree::delete(self, key)
    }

    fn get_min(&self) -> Result<Entry, ContainerError> {
        OrderedTree::get_min(self).ok_or(ContainerError::NotExists)
    }

    fn get_max(&self) -> Result<Entry, ContainerError> {
        OrderedTree::get_max(self).ok_or(ContainerError::NotExists)
    }

    fn get_data(&self) -> String {
        tree_diagram::render(self)
    }

    fn get_data_simple(&self) -> String {
        self.render_simple()
    }

    fn get_state(&self) -> Result<String, ContainerError> {
        Err(self.unsupported("get_state"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> OrderedTree {
        let mut t = OrderedTree::new();
        for &k in keys {
            t.add(k, k * 10);
        }
        t
    }

    /// Invariant: lookups, min and max follow the ordering after plain inserts.
    #[test]
    fn find_min_max_after_inserts() {
        let t = tree_of(&[5, 3, 8]);
        assert_eq!(t.find(3), Some(Entry::new(3, 30)));
        assert_eq!(t.find(4), None);
        assert_eq!(t.get_min(), Some(Entry::new(3, 30)));
        assert_eq!(t.get_max(), Some(Entry::new(8, 80)));
        assert_eq!(t.render_simple(), "5L3PR8P");
        assert!(t.is_well_formed());
    }

    #[test]
    fn empty_tree_reports() {
        let mut t = OrderedTree::new();
        assert_eq!(t.find(1), None);
        assert_eq!(t.get_min(), None);
        assert_eq!(t.depth(), 0);
        assert_eq!(t.level_count(), 0);
        assert_eq!(t.render_simple(), "tree is empty");
        assert_eq!(t.delete(1), Err(ContainerError::MissingKey(1)));
        assert!(t.is_well_formed());
    }

    /// Invariant: equal keys are routed to the right subtree.
    #[test]
    fn duplicates_go_right() {
        let mut t = OrderedTree::new();
        t.add(4, 1);
        t.add(4, 2);
        t.add(4, 3);
        assert_eq!(t.render_simple(), "4R4R4PP");
        assert_eq!(t.find(4), Some(Entry::new(4, 1)));
        let values: Vec<i32> = t.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(t.is_well_formed());
    }

    #[test]
    fn delete_leaf() {
        let mut t = tree_of(&[5, 3, 8]);
        assert_eq!(t.delete(3), Ok(Entry::new(3, 30)));
        assert_eq!(t.render_simple(), "5R8P");
        assert_eq!(t.len(), 2);
        assert!(t.is_well_formed());
    }

    #[test]
    fn delete_only_node_clears_root() {
        let mut t = tree_of(&[1]);
        t.delete(1).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.render_simple(), "tree is empty");
        assert!(t.is_well_formed());
    }

    /// Invariant: splicing a single child re-parents it, including at the root.
    #[test]
    fn delete_single_child_splices() {
        let mut t = tree_of(&[5, 3, 1]);
        t.delete(5).unwrap();
        assert_eq!(t.render_simple(), "3L1P");
        assert!(t.is_well_formed());

        let mut t = tree_of(&[5, 8, 3, 4]);
        t.delete(3).unwrap();
        assert_eq!(t.render_simple(), "5L4PR8P");
        assert!(t.is_well_formed());

        let mut t = tree_of(&[5, 8, 9]);
        t.delete(8).unwrap();
        assert_eq!(t.render_simple(), "5R9P");
        assert!(t.is_well_formed());
    }

    /// Invariant: a successor that is the immediate right child is spliced
    /// out of its parent's right slot.
    #[test]
    fn delete_two_children_successor_is_right_child() {
        let mut t = tree_of(&[5, 3, 8, 9]);
        assert_eq!(t.delete(5), Ok(Entry::new(5, 50)));
        assert_eq!(t.render_simple(), "8L3PR9P");
        assert_eq!(t.find(8), Some(Entry::new(8, 80)));
        assert!(t.is_well_formed());
    }

    /// Invariant: a successor reached through left descents is spliced out
    /// of its parent's left slot; no key appears twice afterwards.
    #[test]
    fn delete_two_children_successor_after_left_descents() {
        let mut t = tree_of(&[5, 3, 8, 7, 9, 6]);
        t.delete(5).unwrap();
        assert_eq!(t.render_simple(), "6L3PR8L7PR9PP");
        let keys: Vec<i32> = t.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![3, 6, 7, 8, 9]);
        assert!(t.is_well_formed());
    }

    #[test]
    fn delete_successor_with_right_subtree() {
        let mut t = tree_of(&[10, 5, 20, 15, 17, 16]);
        t.delete(10).unwrap();
        assert_eq!(t.find(15), Some(Entry::new(15, 150)));
        let keys: Vec<i32> = t.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![5, 15, 16, 17, 20]);
        assert!(t.is_well_formed());
    }

    #[test]
    fn depth_counts_edges() {
        assert_eq!(tree_of(&[1]).depth(), 0);
        assert_eq!(tree_of(&[5, 3, 8]).depth(), 1);
        let t = tree_of(&[1, 2, 3, 4, 5]);
        assert_eq!(t.depth(), 4);
        assert_eq!(t.level_count(), 5);
    }

    /// Invariant: a degenerate chain does not recurse; walking it is iterative.
    #[test]
    fn deep_chain_walks_without_recursion() {
        let n = 4_000;
        let mut t = OrderedTree::new();
        for k in 0..n {
            t.add(k, k);
        }
        assert_eq!(t.depth(), (n - 1) as usize);
        assert_eq!(t.iter().count(), n as usize);
        assert_eq!(t.get_max(), Some(Entry::new(n - 1, n - 1)));
    }

    #[test]
    fn state_and_get_at_are_unsupported() {
        let t = tree_of(&[1]);
        assert!(matches!(
            t.get_state(),
            Err(ContainerError::Unsupported { operation: "get_state", .. })
        ));
        assert!(matches!(
            t.get_at(0),
            Err(ContainerError::Unsupported { operation: "get_at", .. })
        ));
        assert_eq!(
            Container::print(&t),
            "STRUCTURE TYPE:\nbinary search tree\nDATA:\n1"
        );
    }
}
