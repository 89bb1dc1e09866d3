//! Parts: the stateful nodes of the viewer's tree.

use std::fmt;

use crate::behavior::{PartBehavior, PartSeed};
use crate::content::{AnchorageMap, ContentObject};

slotmap::new_key_type! {
    /// Stable handle of a part inside its viewer. The handle survives
    /// pooling and revival, so it doubles as the part's identity.
    pub struct PartId;
}

/// Capability of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// The viewer's root; children come from the content model
    Root,
    /// Controls one content object while live
    Content,
    /// Non-content child such as a handle or feedback decoration
    Structural,
}

/// One anchorage edge seen from either end
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorageEdge {
    pub part: PartId,
    pub role: String,
}

impl AnchorageEdge {
    pub fn new(part: PartId, role: impl Into<String>) -> Self {
        Self {
            part,
            role: role.into(),
        }
    }
}

/// A node of the part tree
///
/// Structure is only mutated by the viewer; callers read it through the
/// accessors below.
pub struct Part<C: ContentObject, V> {
    kind: PartKind,
    content: Option<C>,
    parent: Option<PartId>,
    children: Vec<PartId>,
    /// Edges this part owns (this part depends on `edge.part`)
    anchorages: Vec<AnchorageEdge>,
    /// Inverse of other parts' anchorages, kept in step by the viewer
    anchoreds: Vec<AnchorageEdge>,
    visual: V,
    behavior: Box<dyn PartBehavior<C>>,
}

impl<C: ContentObject, V> Part<C, V> {
    pub(crate) fn from_seed(kind: PartKind, seed: PartSeed<C, V>) -> Self {
        Self {
            kind,
            content: None,
            parent: None,
            children: Vec::new(),
            anchorages: Vec::new(),
            anchoreds: Vec::new(),
            visual: seed.visual,
            behavior: seed.behavior,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    pub fn anchorages(&self) -> &[AnchorageEdge] {
        &self.anchorages
    }

    pub fn anchoreds(&self) -> &[AnchorageEdge] {
        &self.anchoreds
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// True when nothing holds on to this part any more
    pub fn is_obsolete(&self) -> bool {
        self.parent.is_none() && self.anchoreds.is_empty()
    }

    pub(crate) fn content_children(&self, content: &C) -> Option<Vec<C>> {
        self.behavior.content_children(content)
    }

    pub(crate) fn content_anchorages(&self, content: &C) -> Option<AnchorageMap<C>> {
        self.behavior.content_anchorages(content)
    }

    pub(crate) fn set_content(&mut self, content: Option<C>) -> Option<C> {
        std::mem::replace(&mut self.content, content)
    }

    pub(crate) fn set_parent(&mut self, parent: Option<PartId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<PartId> {
        &mut self.children
    }

    pub(crate) fn anchorages_mut(&mut self) -> &mut Vec<AnchorageEdge> {
        &mut self.anchorages
    }

    pub(crate) fn anchoreds_mut(&mut self) -> &mut Vec<AnchorageEdge> {
        &mut self.anchoreds
    }
}

impl<C: ContentObject, V: fmt::Debug> fmt::Debug for Part<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("kind", &self.kind)
            .field("content", &self.content)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("anchorages", &self.anchorages)
            .field("anchoreds", &self.anchoreds)
            .field("visual", &self.visual)
            .finish_non_exhaustive()
    }
}
