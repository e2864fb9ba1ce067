use super::types::{Membership, ObjectRecord, QuadNode, RecordId};
use super::{NodeId, QuadTree};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use std::sync::atomic::{AtomicU32, Ordering};

// Shared across trees so ids from one tree are not accepted by another.
static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

pub(crate) fn next_generation() -> u32 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

impl<T> QuadTree<T> {
    #[inline(always)]
    pub(crate) fn node_id(&self, index: u32) -> NodeId {
        NodeId {
            index,
            generation: self.generation,
        }
    }

    pub(crate) fn resolve(&self, node: NodeId) -> QuadtreeResult<u32> {
        if node.generation != self.generation || node.index() >= self.nodes.len() {
            return Err(QuadtreeError::UnknownNode {
                index: node.index(),
            });
        }
        Ok(node.index)
    }

    #[inline(always)]
    pub(crate) fn quad_node(&self, index: u32) -> &QuadNode {
        &self.nodes[index as usize]
    }

    pub(crate) fn alloc_record(&mut self, value: T, rect: Rectangle) -> RecordId {
        let record = ObjectRecord {
            rect,
            value,
            nodes: Membership::new(),
        };
        match self.free_records.pop() {
            Some(record_id) => {
                self.records[record_id as usize] = Some(record);
                record_id
            }
            None => {
                self.records.push(Some(record));
                (self.records.len() - 1) as RecordId
            }
        }
    }

    pub(crate) fn free_record(&mut self, record_id: RecordId) -> Option<ObjectRecord<T>> {
        let record = self.records.get_mut(record_id as usize)?.take()?;
        self.free_records.push(record_id);
        Some(record)
    }

    #[inline(always)]
    pub(crate) fn record(&self, record_id: RecordId) -> Option<&ObjectRecord<T>> {
        self.records.get(record_id as usize)?.as_ref()
    }

    #[inline(always)]
    pub(crate) fn record_mut(&mut self, record_id: RecordId) -> Option<&mut ObjectRecord<T>> {
        self.records.get_mut(record_id as usize)?.as_mut()
    }

    pub(crate) fn membership(&self, record_id: RecordId) -> Vec<NodeId> {
        self.record(record_id)
            .map(|record| record.nodes.iter().map(|&index| self.node_id(index)).collect())
            .unwrap_or_default()
    }
}
