//! Prefix tree of tofu values.
//!
//! Keys are walked one `char` at a time from a root sentinel. Each node
//! keeps its children in insertion order and finds a child by linear scan,
//! which stays cheap for the small fan-out of text keys. Nodes live in an
//! arena addressed by [`NodeId`](node::NodeId); slots freed by
//! [`Trie::remove`] are recycled by later inserts.
//!
//! Removing a key prunes every ancestor that is left without a key of its
//! own and without children, so the arena only ever holds the distinct
//! prefixes of the keys currently stored.

mod node;

use tofu_value::{Kind, TofuError, TofuResult, TofuValue};

use node::{NodeId, TrieNode};

/// String-keyed map from keys to tofu values with prefix queries.
#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    /// Released slots, reused before the arena grows.
    free: Vec<NodeId>,
    kind: Kind,
    /// Number of terminal nodes.
    size: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    /// Create a trie accepting values of any kind.
    pub fn new() -> Self {
        Trie::with_kind(Kind::Any)
    }

    /// Create a trie whose values are all of `kind`.
    ///
    /// A trie of kind [`Kind::Any`] accepts values of every kind.
    pub fn with_kind(kind: Kind) -> Self {
        Trie {
            nodes: vec![TrieNode::new(TrieNode::ROOT_CH)],
            free: Vec::new(),
            kind,
            size: 0,
        }
    }

    /// The kind of value this trie stores.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes below the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len() - 1
    }

    /// Store `value` under `key`, wrapped in a cell of this trie's kind.
    ///
    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<TofuValue> {
        self.store(key, TofuValue::new(self.kind, value))
    }

    /// Store an existing cell under `key`.
    ///
    /// Fails with [`TofuError::TypeMismatch`] when the trie has a fixed kind
    /// and `value` is of another one.
    pub fn insert_value(&mut self, key: &str, value: TofuValue) -> TofuResult<Option<TofuValue>> {
        if self.kind != Kind::Any && value.kind() != self.kind {
            return Err(TofuError::TypeMismatch {
                expected: self.kind,
                found: value.kind(),
            });
        }
        Ok(self.store(key, value))
    }

    fn store(&mut self, key: &str, value: TofuValue) -> Option<TofuValue> {
        let mut current = NodeId::ROOT;
        for ch in key.chars() {
            current = match self.child(current, ch) {
                Some(next) => next,
                None => {
                    let next = self.alloc(ch);
                    self.nodes[current.index()].children.push(next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current.index()];
        let previous = std::mem::replace(&mut node.value, value);
        if node.terminal {
            Some(previous)
        } else {
            node.terminal = true;
            self.size += 1;
            None
        }
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&TofuValue> {
        let node = &self.nodes[self.walk(key)?.index()];
        node.terminal.then_some(&node.value)
    }

    /// Check if `key` is stored, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` and return its value.
    ///
    /// Ancestors left without a key and without children are pruned,
    /// nearest first. Fails with [`TofuError::NotFound`] when `key` is not
    /// stored.
    pub fn remove(&mut self, key: &str) -> TofuResult<TofuValue> {
        let mut path = Vec::with_capacity(key.len() + 1);
        let mut current = NodeId::ROOT;
        path.push(current);
        for ch in key.chars() {
            current = self.child(current, ch).ok_or(TofuError::NotFound)?;
            path.push(current);
        }

        let node = &mut self.nodes[current.index()];
        if !node.terminal {
            return Err(TofuError::NotFound);
        }
        node.terminal = false;
        let value = node.value.take();
        self.size -= 1;

        let mut pruned = 0usize;
        while let [.., parent, child] = path[..] {
            if !self.nodes[child.index()].is_prunable() {
                break;
            }
            let siblings = &mut self.nodes[parent.index()].children;
            if let Some(at) = siblings.iter().position(|&id| id == child) {
                siblings.remove(at);
            }
            self.release(child);
            path.pop();
            pruned += 1;
        }
        tracing::trace!(pruned, remaining = self.size, "trie remove");

        Ok(value)
    }

    /// Every stored key starting with `prefix`, in depth-first order.
    ///
    /// Siblings are visited in the order they were first inserted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };

        let mut keys = Vec::new();
        let mut path = String::from(prefix);
        let mut stack = vec![(start, path.len())];
        while let Some((id, len)) = stack.pop() {
            path.truncate(len);
            let node = &self.nodes[id.index()];
            if id != start {
                path.push(node.ch);
            }
            if node.terminal {
                keys.push(path.clone());
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, path.len())));
        }
        keys
    }

    /// Every stored key.
    pub fn keys(&self) -> Vec<String> {
        self.keys_with_prefix("")
    }

    /// Remove every key, keeping the kind.
    pub fn clear(&mut self) {
        *self = Trie::with_kind(self.kind);
    }

    /// Move the whole trie out, leaving an empty trie of the same kind.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Trie::with_kind(self.kind))
    }

    /// Render the node tree, one character per line.
    ///
    /// The root prints as `*`, children are indented two spaces per level
    /// and nodes ending a key are marked ` (end)`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.index()];
            out.push_str(&"  ".repeat(depth));
            out.push(if id == NodeId::ROOT { '*' } else { node.ch });
            if node.terminal {
                out.push_str(" (end)");
            }
            out.push('\n');
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    fn child(&self, parent: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[parent.index()]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id.index()].ch == ch)
    }

    fn walk(&self, key: &str) -> Option<NodeId> {
        key.chars()
            .try_fold(NodeId::ROOT, |current, ch| self.child(current, ch))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "a trie never holds u32::MAX nodes"
    )]
    fn alloc(&mut self, ch: char) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = TrieNode::new(ch);
            id
        } else {
            let id = NodeId::new(self.nodes.len() as u32);
            self.nodes.push(TrieNode::new(ch));
            id
        }
    }

    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.index()];
        node.value.release();
        node.children.clear();
        self.free.push(id);
    }
}

#[cfg(test)]
mod tests;
