//! Quadtree over axis-aligned rectangles.
//!
//! Values are stored in every leaf their rectangle overlaps, so a rectangle that
//! straddles a quadrant boundary is found from either side. Each value keeps the
//! list of leaves holding it, which makes removal proportional to that list rather
//! than to the size of the tree.
//!
//! Nodes live in an arena owned by [`QuadTree`] and are addressed by [`NodeId`].
//! Leaves split into four children once they hold more than
//! [`Config::max_objects`] values, until [`Config::max_depth`] is reached. Nodes
//! are never merged back; [`QuadTree::clear`] resets the whole tree.

mod adjacency;
mod config;
mod maintenance;
mod node_ref;
mod query_rect;
mod shared;
mod storage;
mod structure;
mod types;

pub use config::{Config, UpdateRequest};
pub use node_ref::NodeRef;
pub use shared::SharedQuadTree;
pub use types::{NodeId, ObjectRecord, Quadrant};

use fxhash::FxHashMap;
use types::{QuadNode, RecordId};

pub struct QuadTree<T> {
    nodes: Vec<QuadNode>,
    records: Vec<Option<ObjectRecord<T>>>,
    free_records: Vec<RecordId>,
    owner_map: FxHashMap<T, RecordId>,
    config: Config,
    generation: u32,
}

impl<T> std::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.nodes[types::ROOT as usize].bounds)
            .field("nodes", &self.nodes.len())
            .field("objects", &self.owner_map.len())
            .field("config", &self.config)
            .finish()
    }
}
