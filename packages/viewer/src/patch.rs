//! Mutations performed by a reconciliation pass, in the order they
//! happened. Child indices are raw positions, structural children included.

use crate::content::ContentObject;
use crate::part::PartId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartPatch<C: ContentObject> {
    /// The factory built a new part for `content`
    Created { part: PartId, content: C },

    /// A pooled part was bound to `content` again
    Revived { part: PartId, content: C },

    ChildAdded {
        parent: PartId,
        child: PartId,
        index: usize,
    },

    ChildMoved {
        parent: PartId,
        child: PartId,
        from: usize,
        to: usize,
    },

    ChildRemoved {
        parent: PartId,
        child: PartId,
        index: usize,
    },

    AnchorageAttached {
        anchored: PartId,
        anchorage: PartId,
        role: String,
    },

    AnchorageDetached {
        anchored: PartId,
        anchorage: PartId,
        role: String,
    },

    /// An obsolete part entered the pool under its former content
    Pooled { part: PartId, content: C },

    /// A part left the viewer for good
    Discarded { part: PartId },
}

impl<C: ContentObject> PartPatch<C> {
    /// True for patches that change the shape of the tree or graph
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            PartPatch::ChildAdded { .. }
                | PartPatch::ChildMoved { .. }
                | PartPatch::ChildRemoved { .. }
                | PartPatch::AnchorageAttached { .. }
                | PartPatch::AnchorageDetached { .. }
        )
    }
}
