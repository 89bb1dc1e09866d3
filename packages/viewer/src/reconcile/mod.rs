//! # Reconciliation
//!
//! Converges the part tree onto the desired content structure.
//!
//! A [`Pass`] borrows the viewer for the duration of one entry-point call.
//! It records every mutation as a [`PartPatch`] and queues parts that were
//! freshly bound to content; their own children and anchorages are
//! synchronized after the pass that bound them has completed.
//!
//! ## Part lifecycle
//!
//! ```text
//! created/revived → bound(content, attached) → detached
//!       ↑                                          ↓ parentless + anchoredless
//!       └───────────── pooled(no content) ←── obsolete
//! ```

mod anchorages;
mod children;

use std::collections::VecDeque;

use tracing::{debug, error, warn};

use crate::behavior::CreationContext;
use crate::content::ContentObject;
use crate::errors::{PreconditionError, ViewerError, ViewerResult};
use crate::part::{AnchorageEdge, Part, PartId, PartKind};
use crate::patch::PartPatch;
use crate::viewer::Viewer;

pub(crate) struct Pass<'v, C: ContentObject, V> {
    viewer: &'v mut Viewer<C, V>,
    patches: Vec<PartPatch<C>>,
    /// Parts bound during this pass whose own structure is still pending
    pending: VecDeque<PartId>,
}

impl<'v, C: ContentObject, V> Pass<'v, C, V> {
    pub(crate) fn new(viewer: &'v mut Viewer<C, V>) -> Self {
        Self {
            viewer,
            patches: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Schedule a content part for synchronization from its behavior
    pub(crate) fn enqueue(&mut self, part: PartId) {
        self.pending.push_back(part);
    }

    /// Run queued synchronizations breadth-first and hand back the patches
    pub(crate) fn finish(mut self) -> ViewerResult<Vec<PartPatch<C>>> {
        while let Some(part) = self.pending.pop_front() {
            let Some(content) = self.bound_content(part) else {
                // Pooled or discarded after it was queued
                continue;
            };
            self.synchronize_from_behavior(part, &content)?;
        }
        Ok(self.patches)
    }

    pub(crate) fn into_patches(self) -> Vec<PartPatch<C>> {
        self.patches
    }

    /// Synchronize children, then anchorages, of a content part
    pub(crate) fn synchronize_from_behavior(&mut self, part: PartId, content: &C) -> ViewerResult<()> {
        let host = self.part(part)?;
        let children = host
            .content_children(content)
            .ok_or(PreconditionError::MissingContentChildren { part })?;
        let anchorages = host
            .content_anchorages(content)
            .ok_or(PreconditionError::MissingContentAnchorages { part })?;

        self.synchronize_children(part, &children)?;
        if self.is_released(part) {
            return Ok(());
        }
        self.synchronize_anchorages(part, &anchorages)
    }

    pub(crate) fn part(&self, part: PartId) -> ViewerResult<&Part<C, V>> {
        self.viewer
            .parts
            .get(part)
            .ok_or_else(|| PreconditionError::UnknownPart(part).into())
    }

    fn bound_content(&self, part: PartId) -> Option<C> {
        self.viewer.parts.get(part).and_then(|p| p.content().cloned())
    }

    /// A content host that lost its content (or vanished) mid-pass must
    /// not be synchronized any further.
    fn is_released(&self, part: PartId) -> bool {
        match self.viewer.parts.get(part) {
            Some(p) => p.kind() == PartKind::Content && !p.has_content(),
            None => true,
        }
    }

    // ------------------------------------------------------------------
    // Identity resolution
    // ------------------------------------------------------------------

    /// Resolve `content` to a live part: the bound part, a revived pooled
    /// part, or a new part from the factory, in that order.
    fn find_or_create(&mut self, content: &C, context: CreationContext) -> ViewerResult<PartId> {
        if let Some(part) = self.viewer.content_parts.get(content) {
            return Ok(part);
        }

        if let Some(part) = self.viewer.pool.remove(content) {
            debug!(part = ?part, content = ?content, "Reviving pooled part");
            self.bind(part, content.clone());
            self.patches.push(PartPatch::Revived {
                part,
                content: content.clone(),
            });
            return Ok(part);
        }

        let Some(seed) = self.viewer.factory.create(content, &context) else {
            error!(content = ?content, host = ?context.host, "Part factory produced no part");
            return Err(ViewerError::Configuration {
                content: format!("{:?}", content),
            });
        };
        let part = self.viewer.parts.insert(Part::from_seed(PartKind::Content, seed));
        debug!(part = ?part, content = ?content, "Created part");
        self.patches.push(PartPatch::Created {
            part,
            content: content.clone(),
        });
        self.bind(part, content.clone());
        Ok(part)
    }

    fn bind(&mut self, part: PartId, content: C) {
        self.viewer.parts[part].set_content(Some(content.clone()));
        self.viewer.content_parts.bind(content, part);
        self.enqueue(part);
    }

    // ------------------------------------------------------------------
    // Obsolescence
    // ------------------------------------------------------------------

    /// Pool (or discard) `part` if it has neither a parent nor anchoreds.
    ///
    /// Before the part leaves the live tree its content binding is dropped
    /// and its own content children and anchorages are released, which may
    /// make further parts obsolete.
    fn dispose_if_obsolete(&mut self, part: PartId) {
        let Some(candidate) = self.viewer.parts.get(part) else {
            return;
        };
        if candidate.kind() != PartKind::Content || !candidate.is_obsolete() {
            return;
        }
        let Some(content) = self.viewer.parts[part].set_content(None) else {
            return;
        };
        self.viewer.content_parts.unbind(&content);
        self.release(part);

        if !self.viewer.config.pooling {
            self.discard(part);
            return;
        }

        match self.viewer.pool.add(content.clone(), part) {
            None => {
                debug!(part = ?part, content = ?content, "Pooled obsolete part");
                self.patches.push(PartPatch::Pooled { part, content });
            }
            Some(rejected) if rejected == part => {
                warn!(part = ?part, content = ?content, "Part pool is full, discarding part");
                self.discard(part);
            }
            Some(displaced) => {
                self.patches.push(PartPatch::Pooled { part, content });
                self.discard(displaced);
            }
        }
    }

    /// Drop the content children and content anchorages of an unbound part
    fn release(&mut self, part: PartId) {
        let children: Vec<PartId> = self.viewer.content_children_of(part);
        for child in children {
            self.remove_child(part, child);
            self.dispose_if_obsolete(child);
        }

        let edges: Vec<AnchorageEdge> = self.viewer.parts[part].anchorages().to_vec();
        for edge in edges {
            self.detach_anchorage(part, edge.part, &edge.role);
            self.dispose_if_obsolete(edge.part);
        }
    }

    /// Remove a part and its remaining structural subtree from the viewer.
    ///
    /// Content children met on the way are detached and go through the
    /// obsolescence check, every edge touching a discarded part is cut, and
    /// a bound part loses its map entry before its id is freed.
    pub(crate) fn discard(&mut self, part: PartId) {
        let Some(doomed) = self.viewer.parts.get_mut(part) else {
            return;
        };
        if let Some(content) = doomed.set_content(None) {
            if self.viewer.content_parts.get(&content) == Some(part) {
                self.viewer.content_parts.unbind(&content);
            }
        }
        self.release(part);

        let incoming: Vec<AnchorageEdge> = self.viewer.parts[part].anchoreds().to_vec();
        for edge in incoming {
            self.detach_anchorage(edge.part, part, &edge.role);
        }

        let Some(removed) = self.viewer.parts.remove(part) else {
            return;
        };
        debug!(part = ?part, "Discarded part");
        self.patches.push(PartPatch::Discarded { part });
        for child in removed.children().iter().copied() {
            self.discard(child);
        }
    }

    /// Discard pooled parts until the pool stays empty; discarding a pooled
    /// part can pool content parts found under its structural children.
    pub(crate) fn drain_pool(&mut self) {
        loop {
            let pooled = self.viewer.pool.drain();
            if pooled.is_empty() {
                return;
            }
            for (_, part) in pooled {
                self.discard(part);
            }
        }
    }

    // ------------------------------------------------------------------
    // Tree and graph primitives
    // ------------------------------------------------------------------

    pub(crate) fn add_child(&mut self, parent: PartId, child: PartId, index: usize) {
        let children = self.viewer.parts[parent].children_mut();
        let index = index.min(children.len());
        children.insert(index, child);
        self.viewer.parts[child].set_parent(Some(parent));
        debug!(parent = ?parent, child = ?child, index, "Added child");
        self.patches.push(PartPatch::ChildAdded { parent, child, index });
    }

    pub(crate) fn remove_child(&mut self, parent: PartId, child: PartId) {
        let children = self.viewer.parts[parent].children_mut();
        let Some(index) = children.iter().position(|&c| c == child) else {
            return;
        };
        children.remove(index);
        self.viewer.parts[child].set_parent(None);
        debug!(parent = ?parent, child = ?child, index, "Removed child");
        self.patches.push(PartPatch::ChildRemoved { parent, child, index });
    }

    fn attach_anchorage(&mut self, anchored: PartId, anchorage: PartId, role: &str) {
        self.viewer.parts[anchored]
            .anchorages_mut()
            .push(AnchorageEdge::new(anchorage, role));
        self.viewer.parts[anchorage]
            .anchoreds_mut()
            .push(AnchorageEdge::new(anchored, role));
        debug!(anchored = ?anchored, anchorage = ?anchorage, role, "Attached anchorage");
        self.patches.push(PartPatch::AnchorageAttached {
            anchored,
            anchorage,
            role: role.to_string(),
        });
    }

    fn detach_anchorage(&mut self, anchored: PartId, anchorage: PartId, role: &str) {
        self.viewer.parts[anchored]
            .anchorages_mut()
            .retain(|edge| !(edge.part == anchorage && edge.role == role));
        self.viewer.parts[anchorage]
            .anchoreds_mut()
            .retain(|edge| !(edge.part == anchored && edge.role == role));
        debug!(anchored = ?anchored, anchorage = ?anchorage, role, "Detached anchorage");
        self.patches.push(PartPatch::AnchorageDetached {
            anchored,
            anchorage,
            role: role.to_string(),
        });
    }
}
