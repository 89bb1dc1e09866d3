//! Child-list reconciliation.
//!
//! Two index spaces are in play: the content slot (position among children
//! that carry content) and the raw index (position in the full child list,
//! structural children included). Desired order is expressed in slots and
//! translated with [`raw_index_for_slot`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, error};

use super::Pass;
use crate::behavior::{CreationContext, Relation};
use crate::config::StructuralPlacement;
use crate::content::ContentObject;
use crate::errors::{PreconditionError, ViewerError, ViewerResult};
use crate::part::PartId;
use crate::patch::PartPatch;

/// Raw index at which a part must sit to occupy content `slot`.
///
/// `content_positions` are the raw indices of the current content children,
/// ascending; `raw_len` is the length of the full child list.
pub(crate) fn raw_index_for_slot(
    content_positions: &[usize],
    raw_len: usize,
    slot: usize,
    placement: StructuralPlacement,
) -> usize {
    if let Some(&occupant) = content_positions.get(slot) {
        return occupant;
    }
    match placement {
        StructuralPlacement::AfterPrecedingContent => content_positions
            .last()
            .map(|&last| last + 1)
            .unwrap_or(raw_len),
        StructuralPlacement::Append => raw_len,
    }
}

impl<'v, C: ContentObject, V> Pass<'v, C, V> {
    /// Make the content children of `host` equal `desired`, in order.
    pub(crate) fn synchronize_children(&mut self, host: PartId, desired: &[C]) -> ViewerResult<()> {
        self.part(host)?;

        let mut wanted: HashSet<&C> = HashSet::with_capacity(desired.len());
        for content in desired {
            if !wanted.insert(content) {
                return Err(PreconditionError::DuplicateContent {
                    content: format!("{:?}", content),
                }
                .into());
            }
        }

        let mut index: HashMap<C, PartId> = HashMap::new();
        let mut obsolete = Vec::new();
        for child in self.viewer.content_children_of(host) {
            let Some(content) = self.viewer.parts[child].content() else {
                continue;
            };
            if wanted.contains(content) {
                index.insert(content.clone(), child);
            } else {
                obsolete.push(child);
            }
        }

        // Removals complete before any insertion
        for child in obsolete {
            self.remove_child(host, child);
            self.dispose_if_obsolete(child);
            if self.is_released(host) {
                return Ok(());
            }
        }

        for (slot, content) in desired.iter().enumerate() {
            let content_children = self.viewer.content_children_of(host);
            if let Some(&occupant) = content_children.get(slot) {
                if self.viewer.parts[occupant].content() == Some(content) {
                    continue;
                }
            }

            if let Some(&existing) = index.get(content) {
                self.move_child_to_slot(host, existing, slot);
                continue;
            }

            let context = CreationContext {
                host,
                relation: Relation::Child { index: slot },
            };
            let part = self.find_or_create(content, context)?;
            self.check_adoptable(host, part, content)?;
            self.insert_child_at_slot(host, part, slot);
            index.insert(content.clone(), part);
        }

        Ok(())
    }

    /// A part may become a child of `host` only if it has no parent and is
    /// neither `host` nor one of its ancestors.
    fn check_adoptable(&self, host: PartId, part: PartId, content: &C) -> ViewerResult<()> {
        let existing_parent = match self.viewer.parts[part].parent() {
            Some(parent) => Some(parent),
            None if self.viewer.is_ancestor_or_self(part, host) => Some(host),
            None => None,
        };
        match existing_parent {
            None => Ok(()),
            Some(existing_parent) => {
                error!(
                    content = ?content,
                    part = ?part,
                    existing_parent = ?existing_parent,
                    host = ?host,
                    "Content is already controlled by a part in another container"
                );
                Err(ViewerError::Integrity {
                    content: format!("{:?}", content),
                    part,
                    existing_parent,
                    host,
                })
            }
        }
    }

    fn insert_child_at_slot(&mut self, host: PartId, part: PartId, slot: usize) {
        let raw_index = self.raw_index(host, slot);
        self.add_child(host, part, raw_index);
    }

    fn move_child_to_slot(&mut self, host: PartId, part: PartId, slot: usize) {
        let children = self.viewer.parts[host].children_mut();
        let Some(from) = children.iter().position(|&c| c == part) else {
            return;
        };
        children.remove(from);

        let to = self.raw_index(host, slot);
        self.viewer.parts[host].children_mut().insert(to, part);
        debug!(parent = ?host, child = ?part, from, to, "Moved child");
        self.patches.push(PartPatch::ChildMoved {
            parent: host,
            child: part,
            from,
            to,
        });
    }

    fn raw_index(&self, host: PartId, slot: usize) -> usize {
        let children = self.viewer.parts[host].children();
        let content_positions: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|&(_, &child)| self.viewer.parts[child].has_content())
            .map(|(raw, _)| raw)
            .collect();
        raw_index_for_slot(
            &content_positions,
            children.len(),
            slot,
            self.viewer.config.structural_placement,
        )
    }
}
