//! Anchorage reconciliation. Edges are compared as a set of
//! (content, role) pairs; their order carries no meaning.

use super::Pass;
use crate::behavior::{CreationContext, Relation};
use crate::content::{AnchorageMap, ContentObject};
use crate::errors::ViewerResult;
use crate::part::{AnchorageEdge, PartId};

impl<'v, C: ContentObject, V> Pass<'v, C, V> {
    /// Make the content anchorages of `host` equal `desired`.
    pub(crate) fn synchronize_anchorages(
        &mut self,
        host: PartId,
        desired: &AnchorageMap<C>,
    ) -> ViewerResult<()> {
        self.part(host)?;

        let stale: Vec<AnchorageEdge> = self.viewer.parts[host]
            .anchorages()
            .iter()
            .filter(|edge| match self.viewer.parts[edge.part].content() {
                Some(content) => !desired.contains(content, &edge.role),
                None => false,
            })
            .cloned()
            .collect();

        for edge in stale {
            self.detach_anchorage(host, edge.part, &edge.role);
            self.dispose_if_obsolete(edge.part);
            if self.is_released(host) {
                return Ok(());
            }
        }

        for (content, role) in desired.iter() {
            if self.has_anchorage(host, content, role) {
                continue;
            }
            let context = CreationContext {
                host,
                relation: Relation::Anchorage {
                    role: role.to_string(),
                },
            };
            let part = self.find_or_create(content, context)?;
            self.attach_anchorage(host, part, role);
        }

        Ok(())
    }

    fn has_anchorage(&self, host: PartId, content: &C, role: &str) -> bool {
        self.viewer.parts[host].anchorages().iter().any(|edge| {
            edge.role == role && self.viewer.parts[edge.part].content() == Some(content)
        })
    }
}
