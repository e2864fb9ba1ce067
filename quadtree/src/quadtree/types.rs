use common::shapes::Rectangle;
use smallvec::SmallVec;

pub(crate) const ROOT: u32 = 0;

pub(crate) type RecordId = u32;
pub(crate) type NodeStack = SmallVec<[u32; 64]>;
pub(crate) type Membership = SmallVec<[u32; 4]>;

/// Handle to a node of a [`QuadTree`](crate::QuadTree).
///
/// Ids carry the generation of the tree that issued them, so an id kept across
/// [`QuadTree::clear`](crate::QuadTree::clear) is rejected instead of silently
/// pointing at a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Position of the node in its tree's arena. The root is always 0.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Child order of every internal node.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct QuadNode {
    pub(crate) bounds: Rectangle,
    pub(crate) depth: usize,
    pub(crate) parent: Option<u32>,
    // Children are allocated together, so internal nodes hold four consecutive indices.
    pub(crate) children: Option<[u32; 4]>,
    // Only leaves hold records.
    pub(crate) objects: Vec<RecordId>,
}

impl QuadNode {
    pub(crate) fn leaf(bounds: Rectangle, depth: usize, parent: Option<u32>) -> Self {
        Self {
            bounds,
            depth,
            parent,
            children: None,
            objects: Vec::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// An indexed value together with its rectangle and the leaves that hold it.
#[derive(Debug, Clone)]
pub struct ObjectRecord<T> {
    pub(crate) rect: Rectangle,
    pub(crate) value: T,
    pub(crate) nodes: Membership,
}

impl<T> ObjectRecord<T> {
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}
