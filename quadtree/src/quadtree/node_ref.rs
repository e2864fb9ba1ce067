use super::types::{QuadNode, ROOT};
use super::{NodeId, ObjectRecord, QuadTree, Quadrant};
use common::shapes::Rectangle;
use fxhash::FxHashSet;
use std::fmt;
use std::hash::Hash;

/// Read-only view of one node of a [`QuadTree`].
///
/// Queries issued through a `NodeRef` only look at the subtree below it.
pub struct NodeRef<'a, T> {
    tree: &'a QuadTree<T>,
    index: u32,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.quad_node();
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("depth", &node.depth)
            .field("bounds", &node.bounds)
            .field("leaf", &node.is_leaf())
            .field("objects", &node.objects.len())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a QuadTree<T>, index: u32) -> Self {
        Self { tree, index }
    }

    fn quad_node(&self) -> &'a QuadNode {
        self.tree.quad_node(self.index)
    }

    fn at(&self, index: u32) -> NodeRef<'a, T> {
        NodeRef::new(self.tree, index)
    }

    pub fn id(&self) -> NodeId {
        self.tree.node_id(self.index)
    }

    pub fn bounds(&self) -> Rectangle {
        self.quad_node().bounds
    }

    pub fn depth(&self) -> usize {
        self.quad_node().depth
    }

    pub fn is_leaf(&self) -> bool {
        self.quad_node().is_leaf()
    }

    /// Children in [`Quadrant::ALL`] order, if the node has been split.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.quad_node()
            .children
            .map(|children| children.map(|child| self.tree.node_id(child)))
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeRef<'a, T>> {
        let children = self.quad_node().children?;
        Some(self.at(children[quadrant.index()]))
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.quad_node().parent.map(|parent| self.at(parent))
    }

    pub fn root(&self) -> NodeRef<'a, T> {
        self.at(ROOT)
    }

    /// Records stored directly in this node; empty for internal nodes.
    pub fn objects(&self) -> impl Iterator<Item = &'a ObjectRecord<T>> + 'a {
        let tree = self.tree;
        self.quad_node()
            .objects
            .iter()
            .filter_map(move |&record_id| tree.record(record_id))
    }

    /// Leaves below this node whose bounds overlap `rect`.
    pub fn leaf_nodes(&self, rect: Rectangle) -> Vec<NodeId> {
        self.tree
            .leaf_indices(self.index, &rect.normalized())
            .into_iter()
            .map(|index| self.tree.node_id(index))
            .collect()
    }

    /// Children overlapping `rect`, or this node when it is a leaf.
    pub fn child_nodes(&self, rect: Rectangle) -> Vec<NodeId> {
        self.tree
            .child_indices(self.index, &rect.normalized())
            .into_iter()
            .map(|index| self.tree.node_id(index))
            .collect()
    }

    /// Same-depth nodes sharing an edge with this one.
    pub fn adjacent_nodes(&self) -> Vec<NodeId> {
        self.tree
            .adjacent_indices(self.index)
            .into_iter()
            .map(|index| self.tree.node_id(index))
            .collect()
    }
}

impl<'a, T: Eq + Hash + Clone> NodeRef<'a, T> {
    pub fn get_objects(&self, rect: Rectangle) -> FxHashSet<T> {
        self.tree.objects_from(self.index, rect, |_, _| true)
    }

    pub fn get_objects_with<F>(&self, rect: Rectangle, collision_test: F) -> FxHashSet<T>
    where
        F: FnMut(&ObjectRecord<T>, &Rectangle) -> bool,
    {
        self.tree.objects_from(self.index, rect, collision_test)
    }

    /// Every value held in this subtree, each once.
    pub fn all(&self) -> Vec<T> {
        self.tree
            .subtree_records(self.index)
            .into_iter()
            .map(|record| record.value.clone())
            .collect()
    }
}
