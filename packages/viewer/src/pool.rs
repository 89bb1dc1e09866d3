//! # Part Pool
//!
//! Parts that became obsolete wait here, keyed by the content they last
//! controlled, until that content reappears and the part is revived.
//!
//! A pooled part never has content. Its visual survives, so reviving it is
//! cheaper than building a fresh one.

use std::collections::HashMap;

use crate::content::ContentObject;
use crate::part::PartId;

#[derive(Debug, Clone)]
pub struct PartPool<C: ContentObject> {
    parts: HashMap<C, PartId>,
    /// Maximum number of pooled parts (None = unbounded)
    capacity: Option<usize>,
}

impl<C: ContentObject> PartPool<C> {
    pub fn new() -> Self {
        Self::with_capacity_limit(None)
    }

    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            parts: HashMap::new(),
            capacity,
        }
    }

    /// Pool `part` under its former content.
    ///
    /// Returns a part that no longer fits and must be discarded: the part
    /// previously pooled under the same content, or `part` itself when the
    /// pool is full.
    pub(crate) fn add(&mut self, content: C, part: PartId) -> Option<PartId> {
        if let Some(previous) = self.parts.get_mut(&content) {
            return Some(std::mem::replace(previous, part));
        }
        if self.capacity.is_some_and(|limit| self.parts.len() >= limit) {
            return Some(part);
        }
        self.parts.insert(content, part);
        None
    }

    /// Take the part pooled under `content` for revival
    pub(crate) fn remove(&mut self, content: &C) -> Option<PartId> {
        self.parts.remove(content)
    }

    pub(crate) fn drain(&mut self) -> Vec<(C, PartId)> {
        self.parts.drain().collect()
    }

    pub fn get(&self, content: &C) -> Option<PartId> {
        self.parts.get(content).copied()
    }

    pub fn contains_part(&self, part: PartId) -> bool {
        self.parts.values().any(|&pooled| pooled == part)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, PartId)> {
        self.parts.iter().map(|(content, &part)| (content, part))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<C: ContentObject> Default for PartPool<C> {
    fn default() -> Self {
        Self::new()
    }
}
