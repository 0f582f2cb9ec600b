//! Arena nodes of the skip list.

use std::fmt;

use smallvec::SmallVec;
use tofu_value::TofuValue;

/// Index into the skip list's node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The head sentinel always occupies slot 0.
    pub(crate) const HEAD: NodeId = NodeId(0);

    /// End of a level chain.
    pub(crate) const NIL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::HEAD => write!(f, "NodeId::HEAD"),
            Self::NIL => write!(f, "NodeId::NIL"),
            NodeId(raw) => write!(f, "NodeId({raw})"),
        }
    }
}

/// A stored value and its successor at each of its levels.
///
/// `forward.len()` is the level drawn at insertion and never changes while
/// the node is linked.
#[derive(Clone, Debug)]
pub(crate) struct SkipNode {
    pub(crate) data: TofuValue,
    pub(crate) forward: SmallVec<[NodeId; 4]>,
}

impl SkipNode {
    pub(crate) fn new(data: TofuValue, level: usize) -> Self {
        SkipNode {
            data,
            forward: smallvec::smallvec![NodeId::NIL; level],
        }
    }
}
