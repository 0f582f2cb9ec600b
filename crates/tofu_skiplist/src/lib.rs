//! Ordered skip list of tofu values.
//!
//! Values are kept in ascending [`TofuValue::compare`] order on every level.
//! Each inserted node draws its level from repeated coin flips with success
//! chance `probability`, capped at `max_level`, giving expected `O(log n)`
//! search, insert and remove.
//!
//! Nodes live in an arena addressed by [`NodeId`](node::NodeId). Slot 0 is
//! the head sentinel, whose forward array spans all `max_level` levels;
//! slots released by [`SkipList::remove`] are reused by later inserts.

mod config;
mod node;

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tofu_value::{Kind, TofuError, TofuResult, TofuValue};

pub use config::{SkipListConfig, MAX_LEVEL_LIMIT};
use node::{NodeId, SkipNode};

/// Per-level predecessors of a search key.
type Update = SmallVec<[NodeId; 16]>;

/// Set of distinct tofu values kept in sorted order.
#[derive(Clone, Debug)]
pub struct SkipList {
    nodes: Vec<SkipNode>,
    /// Released slots, reused before the arena grows.
    free: Vec<NodeId>,
    config: SkipListConfig,
    /// Number of levels currently holding at least one node.
    level: usize,
    len: usize,
    rng: StdRng,
}

impl Default for SkipList {
    fn default() -> Self {
        SkipList::new()
    }
}

impl SkipList {
    /// Create an empty list with the default configuration.
    pub fn new() -> Self {
        SkipList::empty(SkipListConfig::default())
    }

    /// Create an empty list for values of `kind`.
    pub fn with_kind(kind: Kind) -> Self {
        SkipList::empty(SkipListConfig::with_kind(kind))
    }

    /// Create an empty list from `config`.
    ///
    /// Fails with [`TofuError::InvalidArgument`] when `max_level` is outside
    /// `1..=64` or `probability` outside `(0, 1)`.
    pub fn with_config(config: SkipListConfig) -> TofuResult<Self> {
        config.validate()?;
        Ok(SkipList::empty(config))
    }

    fn empty(config: SkipListConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SkipList {
            nodes: vec![SkipNode::new(TofuValue::default(), config.max_level)],
            free: Vec::new(),
            config,
            level: 0,
            len: 0,
            rng,
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.config.kind
    }

    #[inline]
    pub fn max_level(&self) -> usize {
        self.config.max_level
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.config.probability
    }

    /// Number of levels currently in use; 0 for an empty list.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `data` at its sorted position.
    ///
    /// Fails with [`TofuError::Duplicate`] when an equal value is already
    /// present, and with [`TofuError::TypeMismatch`] when the list has a
    /// fixed kind and `data` is of another one. A failed insert leaves the
    /// list untouched.
    pub fn insert(&mut self, data: TofuValue) -> TofuResult<()> {
        let kind = self.config.kind;
        if kind != Kind::Any && data.kind() != kind {
            return Err(TofuError::TypeMismatch {
                expected: kind,
                found: data.kind(),
            });
        }

        let update = self.predecessors(&data);
        let next = self.forward(update[0], 0);
        if !next.is_nil() && self.nodes[next.index()].data == data {
            tracing::debug!(value = data.value(), "skip list duplicate rejected");
            return Err(TofuError::Duplicate);
        }

        let level = self.random_level();
        tracing::trace!(level, len = self.len + 1, "skip list insert");
        let id = self.alloc(data, level);
        for (lvl, &prev) in update.iter().enumerate().take(level) {
            let succ = self.forward(prev, lvl);
            self.nodes[id.index()].forward[lvl] = succ;
            self.nodes[prev.index()].forward[lvl] = id;
        }
        self.level = self.level.max(level);
        self.len += 1;
        Ok(())
    }

    /// Remove the value equal to `key` and return it.
    ///
    /// Fails with [`TofuError::NotFound`] when no such value is stored.
    pub fn remove(&mut self, key: &TofuValue) -> TofuResult<TofuValue> {
        let update = self.predecessors(key);
        let target = self.forward(update[0], 0);
        if target.is_nil() || self.nodes[target.index()].data != *key {
            return Err(TofuError::NotFound);
        }

        let forward = std::mem::take(&mut self.nodes[target.index()].forward);
        for (lvl, &prev) in update.iter().enumerate().take(forward.len()) {
            let prev_forward = &mut self.nodes[prev.index()].forward;
            if prev_forward[lvl] == target {
                prev_forward[lvl] = forward[lvl];
            }
        }
        while self.level > 0 && self.forward(NodeId::HEAD, self.level - 1).is_nil() {
            self.level -= 1;
        }

        let data = self.nodes[target.index()].data.take();
        self.free.push(target);
        self.len -= 1;
        tracing::trace!(level = self.level, len = self.len, "skip list remove");
        Ok(data)
    }

    /// The stored value equal to `key`, if any.
    pub fn search(&self, key: &TofuValue) -> Option<&TofuValue> {
        let prev = self.descend(|data| data.compare(key) == Ordering::Less);
        let next = self.forward(prev, 0);
        if next.is_nil() {
            return None;
        }
        let data = &self.nodes[next.index()].data;
        (data == key).then_some(data)
    }

    pub fn contains(&self, key: &TofuValue) -> bool {
        self.search(key).is_some()
    }

    /// The smallest value.
    pub fn get_front(&self) -> Option<&TofuValue> {
        let first = self.forward(NodeId::HEAD, 0);
        (!first.is_nil()).then(|| &self.nodes[first.index()].data)
    }

    /// The largest value, found by descending from the top level.
    pub fn get_back(&self) -> Option<&TofuValue> {
        let last = self.descend(|_| true);
        (last != NodeId::HEAD).then(|| &self.nodes[last.index()].data)
    }

    /// Iterate values in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            at: self.forward(NodeId::HEAD, 0),
            remaining: self.len,
        }
    }

    /// Remove every value, keeping the configuration.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].forward.fill(NodeId::NIL);
        self.free.clear();
        self.level = 0;
        self.len = 0;
    }

    /// Move the whole list out, leaving an empty list with the same
    /// configuration.
    pub fn take(&mut self) -> Self {
        let empty = SkipList::empty(self.config.clone());
        std::mem::replace(self, empty)
    }

    #[inline]
    fn forward(&self, id: NodeId, level: usize) -> NodeId {
        self.nodes[id.index()].forward[level]
    }

    /// Walk from the head down every used level, advancing while the next
    /// node satisfies `advance`. Returns the last node visited.
    fn descend(&self, advance: impl Fn(&TofuValue) -> bool) -> NodeId {
        let mut at = NodeId::HEAD;
        for lvl in (0..self.level).rev() {
            loop {
                let next = self.forward(at, lvl);
                if next.is_nil() || !advance(&self.nodes[next.index()].data) {
                    break;
                }
                at = next;
            }
        }
        at
    }

    /// The last node before `key` on every level. Levels above the current
    /// top point at the head.
    fn predecessors(&self, key: &TofuValue) -> Update {
        let mut update: Update = smallvec::smallvec![NodeId::HEAD; self.config.max_level];
        let mut at = NodeId::HEAD;
        for lvl in (0..self.level).rev() {
            loop {
                let next = self.forward(at, lvl);
                if next.is_nil() || self.nodes[next.index()].data.compare(key) != Ordering::Less {
                    break;
                }
                at = next;
            }
            update[lvl] = at;
        }
        update
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.config.max_level && self.rng.gen_bool(self.config.probability) {
            level += 1;
        }
        level
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "a skip list never holds u32::MAX nodes"
    )]
    fn alloc(&mut self, data: TofuValue, level: usize) -> NodeId {
        let node = SkipNode::new(data, level);
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            id
        } else {
            let id = NodeId::new(self.nodes.len() as u32);
            self.nodes.push(node);
            id
        }
    }
}

/// Ascending iterator over a [`SkipList`].
pub struct Iter<'a> {
    list: &'a SkipList,
    at: NodeId,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TofuValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at.is_nil() {
            return None;
        }
        let node = &self.list.nodes[self.at.index()];
        self.at = node.forward[0];
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SkipList {
    type Item = &'a TofuValue;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
