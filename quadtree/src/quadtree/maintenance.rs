use super::{NodeId, QuadTree, UpdateRequest};
use common::shapes::{Rectangle, Shape};
use std::hash::Hash;

impl<T: Eq + Hash + Clone> QuadTree<T> {
    /// Removes `value` from every leaf holding it. Returns false if it was not indexed.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(record_id) = self.owner_map.remove(value) else {
            return false;
        };
        let Some(record) = self.free_record(record_id) else {
            return false;
        };

        for node_index in record.nodes {
            let objects = &mut self.nodes[node_index as usize].objects;
            if let Some(position) = objects.iter().position(|&id| id == record_id) {
                objects.swap_remove(position);
            }
        }
        true
    }

    /// Moves `value` to `rect`, inserting it if it was not indexed yet.
    ///
    /// Same as [`QuadTree::remove`] followed by [`QuadTree::insert`]; returns the new
    /// membership.
    pub fn update(&mut self, value: T, rect: Rectangle) -> Vec<NodeId> {
        self.remove(&value);
        self.insert(value, rect)
    }

    pub fn update_batch(&mut self, update_requests: &[UpdateRequest<T>]) {
        for request in update_requests {
            self.update(request.value.clone(), request.rect);
        }
    }

    /// Indexes `value` under the bounding box of `shape`.
    pub fn insert_shape<S: Shape + ?Sized>(&mut self, value: T, shape: &S) -> Vec<NodeId> {
        self.insert(value, shape.bounding_box())
    }

    pub fn update_shape<S: Shape + ?Sized>(&mut self, value: T, shape: &S) -> Vec<NodeId> {
        self.update(value, shape.bounding_box())
    }
}
