use super::types::{NodeStack, RecordId, ROOT};
use super::{NodeId, ObjectRecord, QuadTree};
use crate::collision_detection;
use crate::error::QuadtreeResult;
use common::shapes::Rectangle;
use fxhash::FxHashSet;
use smallvec::{smallvec, SmallVec};
use std::hash::Hash;

impl<T> QuadTree<T> {
    // Leaves below `start` reachable through children overlapping `rect`. A leaf
    // `start` is returned as is.
    pub(crate) fn leaf_indices(&self, start: u32, rect: &Rectangle) -> Vec<u32> {
        let mut leaves = Vec::new();
        let mut stack: NodeStack = smallvec![start];
        while let Some(index) = stack.pop() {
            match self.nodes[index as usize].children {
                Some(children) => {
                    for &child in children.iter().rev() {
                        if self.nodes[child as usize].bounds.intersects(rect) {
                            stack.push(child);
                        }
                    }
                }
                None => leaves.push(index),
            }
        }
        leaves
    }

    pub(crate) fn child_indices(&self, index: u32, rect: &Rectangle) -> SmallVec<[u32; 4]> {
        match self.nodes[index as usize].children {
            Some(children) => children
                .into_iter()
                .filter(|&child| self.nodes[child as usize].bounds.intersects(rect))
                .collect(),
            None => smallvec![index],
        }
    }

    // Visits each distinct record below `start` whose rectangle overlaps `rect`.
    pub(crate) fn for_each_overlapping<F>(&self, start: u32, rect: &Rectangle, mut f: F)
    where
        F: FnMut(&ObjectRecord<T>),
    {
        let mut seen: FxHashSet<RecordId> = FxHashSet::default();
        for leaf in self.leaf_indices(start, rect) {
            for &record_id in &self.nodes[leaf as usize].objects {
                if !seen.insert(record_id) {
                    continue;
                }
                let Some(record) = self.record(record_id) else {
                    continue;
                };
                if collision_detection::rectangle_rectangle(&record.rect, rect) {
                    f(record);
                }
            }
        }
    }

    // Distinct records held anywhere below `start`.
    pub(crate) fn subtree_records(&self, start: u32) -> Vec<&ObjectRecord<T>> {
        if start == ROOT {
            return self.records.iter().flatten().collect();
        }

        let mut seen: FxHashSet<RecordId> = FxHashSet::default();
        let mut records = Vec::new();
        let mut stack: NodeStack = smallvec![start];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            match node.children {
                Some(children) => stack.extend(children.into_iter().rev()),
                None => {
                    for &record_id in &node.objects {
                        if seen.insert(record_id) {
                            records.extend(self.record(record_id));
                        }
                    }
                }
            }
        }
        records
    }
}

impl<T: Eq + Hash + Clone> QuadTree<T> {
    /// Values whose rectangles overlap `rect`, each reported once.
    pub fn get_objects(&self, rect: Rectangle) -> FxHashSet<T> {
        self.get_objects_with(rect, |_, _| true)
    }

    /// Like [`QuadTree::get_objects`], additionally requiring `collision_test` to
    /// accept each bounding-box match. The test runs at most once per value.
    pub fn get_objects_with<F>(&self, rect: Rectangle, collision_test: F) -> FxHashSet<T>
    where
        F: FnMut(&ObjectRecord<T>, &Rectangle) -> bool,
    {
        self.objects_from(ROOT, rect, collision_test)
    }

    pub(crate) fn objects_from<F>(
        &self,
        start: u32,
        rect: Rectangle,
        mut collision_test: F,
    ) -> FxHashSet<T>
    where
        F: FnMut(&ObjectRecord<T>, &Rectangle) -> bool,
    {
        let rect = rect.normalized();
        let mut objects = FxHashSet::default();
        self.for_each_overlapping(start, &rect, |record| {
            if collision_test(record, &rect) {
                objects.insert(record.value.clone());
            }
        });
        objects
    }

    /// Calls `f` once for every value whose rectangle overlaps `rect`, without
    /// collecting a result set.
    pub fn get_objects_for_each<F>(&self, rect: Rectangle, mut f: F)
    where
        F: FnMut(&T),
    {
        let rect = rect.normalized();
        self.for_each_overlapping(ROOT, &rect, |record| f(&record.value));
    }

    /// Leaves whose bounds overlap `rect`.
    pub fn leaf_nodes(&self, rect: Rectangle) -> Vec<NodeId> {
        self.leaf_indices(ROOT, &rect.normalized())
            .into_iter()
            .map(|index| self.node_id(index))
            .collect()
    }

    /// Children of `node` overlapping `rect`, or `node` itself when it is a leaf.
    pub fn child_nodes(&self, node: NodeId, rect: Rectangle) -> QuadtreeResult<Vec<NodeId>> {
        Ok(self.node(node)?.child_nodes(rect))
    }

    /// Every indexed value.
    pub fn all(&self) -> Vec<T> {
        self.subtree_records(ROOT)
            .into_iter()
            .map(|record| record.value.clone())
            .collect()
    }
}
