use super::storage::next_generation;
use super::types::{NodeStack, QuadNode, RecordId, ROOT};
use super::{Config, NodeId, NodeRef, QuadTree, Quadrant};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use fxhash::FxHashMap;
use smallvec::smallvec;
use std::hash::Hash;
use tracing::{debug, trace};

const EDGE_SLACK: f32 = 1e-5;

impl<T: Eq + Hash + Clone> QuadTree<T> {
    pub fn new(bounding_box: Rectangle) -> Self {
        Self::new_with_config(bounding_box, Config::default())
    }

    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> Self {
        QuadTree {
            nodes: vec![QuadNode::leaf(bounding_box.normalized(), 0, None)],
            records: Vec::new(),
            free_records: Vec::new(),
            owner_map: FxHashMap::default(),
            config: config.normalized(),
            generation: next_generation(),
        }
    }

    /// Indexes `value` under `rect` and returns the leaves it was stored in.
    ///
    /// A value that is already indexed is moved, as with [`QuadTree::update`]. A
    /// rectangle that misses the root bounds entirely is not stored and yields an
    /// empty list.
    pub fn insert(&mut self, value: T, rect: Rectangle) -> Vec<NodeId> {
        let rect = rect.normalized();
        self.remove(&value);

        if !self.bounds().intersects(&rect) {
            trace!(
                x = rect.x,
                y = rect.y,
                width = rect.width,
                height = rect.height,
                "rectangle outside quadtree bounds, not indexed"
            );
            return Vec::new();
        }

        let record_id = self.alloc_record(value.clone(), rect);
        self.owner_map.insert(value, record_id);
        self.insert_into(ROOT, record_id);
        self.membership(record_id)
    }

    // Descends from `node_index` into every overlapping child and stores the record in
    // each leaf reached, splitting leaves that overflow.
    pub(crate) fn insert_into(&mut self, node_index: u32, record_id: RecordId) {
        let Some(rect) = self.record(record_id).map(|record| record.rect) else {
            return;
        };

        let mut stack: NodeStack = smallvec![node_index];
        while let Some(index) = stack.pop() {
            let children = self.nodes[index as usize].children;
            match children {
                Some(children) => {
                    let pushed = stack.len();
                    for &child in children.iter().rev() {
                        if self.nodes[child as usize].bounds.intersects(&rect) {
                            stack.push(child);
                        }
                    }
                    if stack.len() == pushed {
                        // Rounded quadrant edges can leave a rect grazing the parent's
                        // edge outside every child.
                        if let Some(child) = self.nearest_child(index, &rect) {
                            stack.push(child);
                        }
                    }
                }
                None => {
                    self.nodes[index as usize].objects.push(record_id);
                    if let Some(record) = self.record_mut(record_id) {
                        record.nodes.push(index);
                    }
                    if self.needs_split(index) {
                        self.split_leaf(index);
                    }
                }
            }
        }
    }

    fn nearest_child(&self, index: u32, rect: &Rectangle) -> Option<u32> {
        let node = &self.nodes[index as usize];
        let slack = node.bounds.width.max(node.bounds.height) * EDGE_SLACK;
        node.children?
            .into_iter()
            .find(|&child| self.nodes[child as usize].bounds.inflate(slack).intersects(rect))
    }

    #[inline(always)]
    fn needs_split(&self, index: u32) -> bool {
        let node = &self.nodes[index as usize];
        node.is_leaf()
            && node.objects.len() > self.config.max_objects
            && node.depth < self.config.max_depth
    }

    /// Splits a leaf into four quadrants and moves its records into them.
    ///
    /// Fails for internal nodes and for leaves already at the maximum depth.
    pub fn split(&mut self, node: NodeId) -> QuadtreeResult<[NodeId; 4]> {
        let index = self.resolve(node)?;
        let quad_node = &self.nodes[index as usize];
        if !quad_node.is_leaf() {
            return Err(QuadtreeError::AlreadySplit {
                index: index as usize,
            });
        }
        if quad_node.depth >= self.config.max_depth {
            return Err(QuadtreeError::DepthLimit {
                index: index as usize,
                depth: quad_node.depth,
                max_depth: self.config.max_depth,
            });
        }

        debug!(node = index, depth = quad_node.depth, "explicit split");
        let children = self.split_leaf(index);
        Ok(children.map(|child| self.node_id(child)))
    }

    pub(crate) fn split_leaf(&mut self, index: u32) -> [u32; 4] {
        let (bounds, depth) = {
            let node = &self.nodes[index as usize];
            (node.bounds, node.depth)
        };

        let first = self.nodes.len() as u32;
        for quadrant in Quadrant::ALL {
            self.nodes.push(QuadNode::leaf(
                bounds.quadrant(quadrant.index()),
                depth + 1,
                Some(index),
            ));
        }
        let children = [first, first + 1, first + 2, first + 3];

        let node = &mut self.nodes[index as usize];
        node.children = Some(children);
        let held = std::mem::take(&mut node.objects);
        trace!(
            node = index,
            depth,
            redistributed = held.len(),
            "split node"
        );

        for record_id in held {
            if let Some(record) = self.record_mut(record_id) {
                record.nodes.retain(|node| *node != index);
            }
            self.insert_into(index, record_id);
        }
        children
    }

    /// Drops every node and record, leaving an empty root with the same bounds.
    ///
    /// Node ids issued before the call are rejected afterwards.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        debug!(
            nodes = self.nodes.len(),
            objects = self.owner_map.len(),
            "clearing quadtree"
        );
        self.nodes.clear();
        self.nodes.push(QuadNode::leaf(bounds, 0, None));
        self.records.clear();
        self.free_records.clear();
        self.owner_map.clear();
        self.generation = next_generation();
    }

    pub fn bounds(&self) -> Rectangle {
        self.nodes[ROOT as usize].bounds
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of indexed values.
    pub fn len(&self) -> usize {
        self.owner_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner_map.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.owner_map.contains_key(value)
    }

    pub fn rect_of(&self, value: &T) -> Option<Rectangle> {
        let record_id = *self.owner_map.get(value)?;
        self.record(record_id).map(|record| record.rect)
    }

    /// Leaves currently holding `value`; empty if it is not indexed.
    pub fn nodes_of(&self, value: &T) -> Vec<NodeId> {
        match self.owner_map.get(value) {
            Some(&record_id) => self.membership(record_id),
            None => Vec::new(),
        }
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, ROOT)
    }

    pub fn node(&self, node: NodeId) -> QuadtreeResult<NodeRef<'_, T>> {
        let index = self.resolve(node)?;
        Ok(NodeRef::new(self, index))
    }

    pub fn all_node_bounds(&self, bounding_boxes: &mut Vec<Rectangle>) {
        bounding_boxes.extend(self.nodes.iter().map(|node| node.bounds));
    }
}
