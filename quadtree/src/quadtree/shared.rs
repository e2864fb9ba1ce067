use super::{Config, NodeId, ObjectRecord, QuadTree, UpdateRequest};
use crate::error::QuadtreeResult;
use common::shapes::Rectangle;
use fxhash::FxHashSet;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`QuadTree`] behind one readers-writer lock, for hosts that query from several
/// threads.
///
/// Queries share the read lock. Mutations take the write lock for their whole
/// duration, so an [`update`](SharedQuadTree::update) is never observed half done.
#[derive(Debug)]
pub struct SharedQuadTree<T> {
    inner: RwLock<QuadTree<T>>,
}

impl<T: Eq + Hash + Clone> SharedQuadTree<T> {
    pub fn new(bounding_box: Rectangle) -> Self {
        QuadTree::new(bounding_box).into()
    }

    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> Self {
        QuadTree::new_with_config(bounding_box, config).into()
    }

    // Poisoned guards are recovered.
    fn read(&self) -> RwLockReadGuard<'_, QuadTree<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, QuadTree<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, value: T, rect: Rectangle) -> Vec<NodeId> {
        self.write().insert(value, rect)
    }

    pub fn remove(&self, value: &T) -> bool {
        self.write().remove(value)
    }

    pub fn update(&self, value: T, rect: Rectangle) -> Vec<NodeId> {
        self.write().update(value, rect)
    }

    pub fn update_batch(&self, update_requests: &[UpdateRequest<T>]) {
        self.write().update_batch(update_requests);
    }

    pub fn split(&self, node: NodeId) -> QuadtreeResult<[NodeId; 4]> {
        self.write().split(node)
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn get_objects(&self, rect: Rectangle) -> FxHashSet<T> {
        self.read().get_objects(rect)
    }

    pub fn get_objects_with<F>(&self, rect: Rectangle, collision_test: F) -> FxHashSet<T>
    where
        F: FnMut(&ObjectRecord<T>, &Rectangle) -> bool,
    {
        self.read().get_objects_with(rect, collision_test)
    }

    pub fn leaf_nodes(&self, rect: Rectangle) -> Vec<NodeId> {
        self.read().leaf_nodes(rect)
    }

    pub fn child_nodes(&self, node: NodeId, rect: Rectangle) -> QuadtreeResult<Vec<NodeId>> {
        self.read().child_nodes(node, rect)
    }

    pub fn adjacent_nodes(&self, node: NodeId) -> QuadtreeResult<Vec<NodeId>> {
        self.read().adjacent_nodes(node)
    }

    pub fn all(&self) -> Vec<T> {
        self.read().all()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Runs `f` under the read lock, for several queries against one consistent state.
    pub fn with_read<R>(&self, f: impl FnOnce(&QuadTree<T>) -> R) -> R {
        f(&self.read())
    }

    /// Runs `f` under the write lock, for compound mutations that must appear atomic.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut QuadTree<T>) -> R) -> R {
        f(&mut self.write())
    }

    pub fn into_inner(self) -> QuadTree<T> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> From<QuadTree<T>> for SharedQuadTree<T> {
    fn from(tree: QuadTree<T>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn readers_never_see_a_half_applied_update() {
        let shared = SharedQuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        let left = Rectangle::new(10.0, 10.0, 5.0, 5.0);
        let right = Rectangle::new(80.0, 80.0, 5.0, 5.0);
        let both = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        shared.insert(1u32, left);
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..500 {
                    let rect = if i % 2 == 0 { right } else { left };
                    shared.update(1, rect);
                }
                done.store(true, Ordering::Release);
            });
            for _ in 0..2 {
                scope.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        assert!(shared.get_objects(both).contains(&1));
                    }
                });
            }
        });

        assert_eq!(shared.len(), 1);
        assert_eq!(shared.into_inner().rect_of(&1), Some(left));
    }

    #[test]
    fn with_read_sees_one_state() {
        let shared = SharedQuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        shared.with_write(|tree| {
            tree.insert("a", Rectangle::new(1.0, 1.0, 1.0, 1.0));
            tree.insert("b", Rectangle::new(90.0, 90.0, 1.0, 1.0));
        });
        let (count, found) = shared.with_read(|tree| {
            (tree.len(), tree.get_objects(Rectangle::new(0.0, 0.0, 10.0, 10.0)))
        });
        assert_eq!(count, 2);
        assert!(found.contains("a"));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn panicking_writer_leaves_tree_usable() {
        let shared = SharedQuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        shared.insert(1u32, Rectangle::new(10.0, 10.0, 5.0, 5.0));

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            shared.with_write(|tree| {
                tree.insert(2, Rectangle::new(60.0, 60.0, 5.0, 5.0));
                panic!("writer failed after insert");
            })
        }));
        assert!(outcome.is_err());
        assert!(shared.inner.is_poisoned());

        assert_eq!(shared.len(), 2);
        let everything = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let expected: FxHashSet<u32> = [1, 2].into_iter().collect();
        assert_eq!(shared.get_objects(everything), expected);

        shared.update(2, Rectangle::new(80.0, 10.0, 5.0, 5.0));
        let moved = shared.get_objects(Rectangle::new(75.0, 5.0, 15.0, 15.0));
        assert!(moved.contains(&2));
        assert!(!shared
            .get_objects(Rectangle::new(55.0, 55.0, 15.0, 15.0))
            .contains(&2));
        assert_eq!(shared.into_inner().len(), 2);
    }
}
