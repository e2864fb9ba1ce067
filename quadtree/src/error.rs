use thiserror::Error;

/// Failures of node-addressed operations. Value-addressed operations never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuadtreeError {
    #[error("node {index} does not belong to this quadtree (stale or foreign node id)")]
    UnknownNode { index: usize },

    #[error("node {index} is already split")]
    AlreadySplit { index: usize },

    #[error("node {index} is at depth {depth} and cannot split past max depth {max_depth}")]
    DepthLimit {
        index: usize,
        depth: usize,
        max_depth: usize,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
