//! Registry of live content -> part bindings for one viewer.

use std::collections::HashMap;

use crate::content::ContentObject;
use crate::part::PartId;

/// At most one live part exists per content object.
#[derive(Debug, Clone)]
pub struct ContentPartMap<C: ContentObject> {
    parts: HashMap<C, PartId>,
}

impl<C: ContentObject> ContentPartMap<C> {
    pub fn new() -> Self {
        Self {
            parts: HashMap::new(),
        }
    }

    /// Bind `content` to `part`, returning the part it was bound to before
    pub(crate) fn bind(&mut self, content: C, part: PartId) -> Option<PartId> {
        self.parts.insert(content, part)
    }

    pub(crate) fn unbind(&mut self, content: &C) -> Option<PartId> {
        self.parts.remove(content)
    }

    pub fn get(&self, content: &C) -> Option<PartId> {
        self.parts.get(content).copied()
    }

    pub fn contains(&self, content: &C) -> bool {
        self.parts.contains_key(content)
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

impl<C: ContentObject> Default for ContentPartMap<C> {
    fn default() -> Self {
        Self::new()
    }
}
