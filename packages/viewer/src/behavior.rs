//! Collaborators supplied by the application: per-part behavior and the
//! factory that produces new parts.

use crate::content::{AnchorageMap, ContentObject};
use crate::part::PartId;

/// Content-derived structure of one part
///
/// A `None` answer means the behavior could not provide the collection at
/// all, which the viewer rejects before mutating anything.
pub trait PartBehavior<C: ContentObject> {
    /// Desired content children, in order
    fn content_children(&self, _content: &C) -> Option<Vec<C>> {
        Some(Vec::new())
    }

    /// Desired content anchorages
    fn content_anchorages(&self, _content: &C) -> Option<AnchorageMap<C>> {
        Some(AnchorageMap::new())
    }
}

/// Behavior of a part without content children or anchorages
#[derive(Debug, Default, Clone, Copy)]
pub struct LeafBehavior;

impl<C: ContentObject> PartBehavior<C> for LeafBehavior {}

/// Everything a factory hands over for a new part
pub struct PartSeed<C: ContentObject, V> {
    pub visual: V,
    pub behavior: Box<dyn PartBehavior<C>>,
}

impl<C: ContentObject, V> PartSeed<C, V> {
    pub fn new(visual: V, behavior: impl PartBehavior<C> + 'static) -> Self {
        Self {
            visual,
            behavior: Box::new(behavior),
        }
    }

    pub fn leaf(visual: V) -> Self {
        Self::new(visual, LeafBehavior)
    }
}

/// Relation the new part is created for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Child { index: usize },
    Anchorage { role: String },
}

/// Where a part is about to be attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationContext {
    pub host: PartId,
    pub relation: Relation,
}

/// Produces parts for content objects
pub trait PartFactory<C: ContentObject, V> {
    /// Returns `None` when no part is registered for `content`
    fn create(&mut self, content: &C, context: &CreationContext) -> Option<PartSeed<C, V>>;
}

impl<C, V, F> PartFactory<C, V> for F
where
    C: ContentObject,
    F: FnMut(&C, &CreationContext) -> Option<PartSeed<C, V>>,
{
    fn create(&mut self, content: &C, context: &CreationContext) -> Option<PartSeed<C, V>> {
        self(content, context)
    }
}
