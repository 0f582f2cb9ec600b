//! Arena nodes of the trie.

use std::fmt;

use smallvec::SmallVec;
use tofu_value::TofuValue;

/// Index into the trie's node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The root sentinel always occupies slot 0.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ROOT {
            write!(f, "NodeId::ROOT")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// One character of a key path.
///
/// Siblings carry distinct `ch` values and are kept in insertion order.
#[derive(Clone, Debug)]
pub(crate) struct TrieNode {
    pub(crate) ch: char,
    pub(crate) terminal: bool,
    pub(crate) value: TofuValue,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl TrieNode {
    /// Character stored in the root sentinel.
    pub(crate) const ROOT_CH: char = '\0';

    pub(crate) fn new(ch: char) -> Self {
        TrieNode {
            ch,
            terminal: false,
            value: TofuValue::default(),
            children: SmallVec::new(),
        }
    }

    /// Check if removing this node loses nothing.
    #[inline]
    pub(crate) fn is_prunable(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }
}
