use std::fmt::Write;

use crate::content::ContentObject;
use crate::part::{PartId, PartKind};
use crate::viewer::Viewer;

/// Visitor pattern for traversing the part tree immutably
///
/// The default implementation walks every child in order, structural
/// children included. Override `visit_part` to act on each part and call
/// [`walk_part`] to continue into its children.
pub trait PartVisitor<C: ContentObject, V>: Sized {
    fn visit_part(&mut self, viewer: &Viewer<C, V>, part: PartId) {
        walk_part(self, viewer, part);
    }
}

pub fn walk_part<C, V, T>(visitor: &mut T, viewer: &Viewer<C, V>, part: PartId)
where
    C: ContentObject,
    T: PartVisitor<C, V>,
{
    for &child in viewer.children(part) {
        visitor.visit_part(viewer, child);
    }
}

/// Collects content parts in depth-first pre-order
#[derive(Debug, Default)]
pub struct ContentPartCollector {
    pub parts: Vec<PartId>,
}

impl<C: ContentObject, V> PartVisitor<C, V> for ContentPartCollector {
    fn visit_part(&mut self, viewer: &Viewer<C, V>, part: PartId) {
        if viewer.content_of(part).is_some() {
            self.parts.push(part);
        }
        walk_part(self, viewer, part);
    }
}

/// Renders the tree as an indented outline
#[derive(Debug, Default)]
pub struct TreeDumper {
    depth: usize,
    pub output: String,
}

impl<C: ContentObject, V> PartVisitor<C, V> for TreeDumper {
    fn visit_part(&mut self, viewer: &Viewer<C, V>, part: PartId) {
        let Some(node) = viewer.part(part) else {
            return;
        };
        let indent = "  ".repeat(self.depth);
        let _ = match (node.kind(), node.content()) {
            (PartKind::Root, _) => write!(self.output, "{}root", indent),
            (PartKind::Structural, _) => write!(self.output, "{}structural", indent),
            (PartKind::Content, Some(content)) => write!(self.output, "{}{:?}", indent, content),
            (PartKind::Content, None) => write!(self.output, "{}<unbound>", indent),
        };
        for edge in node.anchorages() {
            if let Some(target) = viewer.content_of(edge.part) {
                let _ = write!(self.output, " {}->{:?}", edge.role, target);
            }
        }
        self.output.push('\n');

        self.depth += 1;
        walk_part(self, viewer, part);
        self.depth -= 1;
    }
}
