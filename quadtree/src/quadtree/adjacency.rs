use super::types::{NodeStack, ROOT};
use super::{NodeId, QuadTree};
use crate::error::QuadtreeResult;
use smallvec::smallvec;
use std::hash::Hash;

// Search padding relative to the node size, so rounding in subdivided bounds does not
// prune a neighbour's ancestors.
const SEARCH_PADDING: f32 = 1e-4;

impl<T> QuadTree<T> {
    // Nodes at the same depth as `index` that share an edge with it. Corner-only
    // contact does not count. Subtrees that stop above that depth have no match.
    pub(crate) fn adjacent_indices(&self, index: u32) -> Vec<u32> {
        let target = &self.nodes[index as usize];
        let depth = target.depth;
        let bounds = target.bounds;
        let search = bounds.inflate(bounds.width.max(bounds.height) * SEARCH_PADDING);

        let mut adjacent = Vec::new();
        let mut stack: NodeStack = smallvec![ROOT];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current as usize];
            if node.depth == depth {
                if current != index && node.bounds.touches(&bounds) {
                    adjacent.push(current);
                }
                continue;
            }
            if let Some(children) = node.children {
                for &child in children.iter().rev() {
                    if self.nodes[child as usize].bounds.intersects(&search) {
                        stack.push(child);
                    }
                }
            }
        }
        adjacent
    }
}

impl<T: Eq + Hash + Clone> QuadTree<T> {
    /// Same-depth nodes sharing an edge with `node`.
    pub fn adjacent_nodes(&self, node: NodeId) -> QuadtreeResult<Vec<NodeId>> {
        Ok(self.node(node)?.adjacent_nodes())
    }
}
