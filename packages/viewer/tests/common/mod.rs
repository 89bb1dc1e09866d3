//! Shared fixture: a small diagram model in which every node names its
//! children and its anchorages.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use trellis_viewer::{
    AnchorageMap, CreationContext, PartBehavior, PartId, PartKind, PartSeed, Viewer, ViewerConfig,
};

pub type Node = &'static str;

#[derive(Debug, Default)]
pub struct Diagram {
    pub children: HashMap<Node, Vec<Node>>,
    pub anchorages: HashMap<Node, Vec<(Node, &'static str)>>,
    /// Nodes whose behavior cannot name their children
    pub broken: HashSet<Node>,
    /// Nodes whose behavior cannot name their anchorages
    pub opaque: HashSet<Node>,
}

/// Visual of a part; `serial` tells apart parts built by the factory
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub label: Node,
    pub serial: usize,
}

struct DiagramBehavior {
    diagram: Rc<RefCell<Diagram>>,
}

impl PartBehavior<Node> for DiagramBehavior {
    fn content_children(&self, content: &Node) -> Option<Vec<Node>> {
        let diagram = self.diagram.borrow();
        if diagram.broken.contains(content) {
            return None;
        }
        Some(diagram.children.get(content).cloned().unwrap_or_default())
    }

    fn content_anchorages(&self, content: &Node) -> Option<AnchorageMap<Node>> {
        let diagram = self.diagram.borrow();
        if diagram.opaque.contains(content) {
            return None;
        }
        Some(
            diagram
                .anchorages
                .get(content)
                .into_iter()
                .flatten()
                .copied()
                .collect(),
        )
    }
}

pub struct Fixture {
    pub viewer: Viewer<Node, Figure>,
    pub diagram: Rc<RefCell<Diagram>>,
    /// Number of parts the factory has built
    pub created: Rc<Cell<usize>>,
    /// Creation contexts seen by the factory, in order
    pub contexts: Rc<RefCell<Vec<CreationContext>>>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    /// Content names starting with `?` have no factory registration.
    pub fn with_config(config: ViewerConfig) -> Self {
        let diagram = Rc::new(RefCell::new(Diagram::default()));
        let created = Rc::new(Cell::new(0));
        let contexts = Rc::new(RefCell::new(Vec::new()));

        let factory = {
            let diagram = diagram.clone();
            let created = created.clone();
            let contexts = contexts.clone();
            move |content: &Node, context: &CreationContext| -> Option<PartSeed<Node, Figure>> {
                if content.starts_with('?') {
                    return None;
                }
                created.set(created.get() + 1);
                contexts.borrow_mut().push(context.clone());
                Some(PartSeed::new(
                    Figure {
                        label: *content,
                        serial: created.get(),
                    },
                    DiagramBehavior {
                        diagram: diagram.clone(),
                    },
                ))
            }
        };

        let root = Figure {
            label: "root",
            serial: 0,
        };
        Self {
            viewer: Viewer::with_config(factory, root, config),
            diagram,
            created,
            contexts,
        }
    }

    pub fn set_children(&self, node: Node, children: &[Node]) {
        self.diagram.borrow_mut().children.insert(node, children.to_vec());
    }

    pub fn set_anchorages(&self, node: Node, edges: &[(Node, &'static str)]) {
        self.diagram.borrow_mut().anchorages.insert(node, edges.to_vec());
    }

    /// The live part for `content`; panics when there is none
    pub fn part(&self, content: Node) -> PartId {
        self.viewer
            .content_part(&content)
            .unwrap_or_else(|| panic!("no live part for {content}"))
    }

    pub fn contents_under(&self, part: PartId) -> Vec<Node> {
        self.viewer
            .children(part)
            .iter()
            .filter_map(|&child| self.viewer.content_of(child).copied())
            .collect()
    }

    pub fn root_contents(&self) -> Vec<Node> {
        self.contents_under(self.viewer.root())
    }

    /// Anchorage (role, target content) pairs of `part`, sorted
    pub fn anchorage_pairs(&self, part: PartId) -> Vec<(String, Node)> {
        let mut pairs: Vec<(String, Node)> = self
            .viewer
            .anchorages(part)
            .iter()
            .filter_map(|edge| {
                self.viewer
                    .content_of(edge.part)
                    .map(|&content| (edge.role.clone(), content))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

/// Check the structural invariants every pass must leave behind
pub fn assert_invariants(viewer: &Viewer<Node, Figure>) {
    let mut seen: HashMap<Node, PartId> = HashMap::new();

    for (id, part) in viewer.iter_parts() {
        if let Some(&content) = part.content() {
            if let Some(other) = seen.insert(content, id) {
                panic!("{content} is bound to both {other:?} and {id:?}");
            }
            assert_eq!(viewer.content_part(&content), Some(id), "map out of step for {content}");
            assert!(!viewer.pool().contains_part(id), "bound part {id:?} is pooled");
        }

        if part.kind() == PartKind::Content && part.content().is_none() {
            assert!(viewer.pool().contains_part(id), "unbound part {id:?} is not pooled");
            assert!(part.parent().is_none());
            assert!(part.anchorages().is_empty());
            assert!(part.anchoreds().is_empty());
            assert!(viewer.content_children_of(id).is_empty());
        }

        for &child in part.children() {
            assert!(viewer.contains(child), "{id:?} lists discarded child {child:?}");
            assert_eq!(viewer.parent(child), Some(id), "child {child:?} disowns {id:?}");
        }
        if let Some(parent) = part.parent() {
            assert!(viewer.children(parent).contains(&id), "{parent:?} disowns child {id:?}");
        }

        for edge in part.anchorages() {
            assert!(viewer.content_of(edge.part).is_some(), "edge to unbound part {:?}", edge.part);
            assert!(viewer
                .anchoreds(edge.part)
                .iter()
                .any(|inverse| inverse.part == id && inverse.role == edge.role));
        }
        for edge in part.anchoreds() {
            assert!(viewer.contains(edge.part), "{id:?} anchored by discarded {:?}", edge.part);
            assert!(
                viewer
                    .anchorages(edge.part)
                    .iter()
                    .any(|forward| forward.part == id && forward.role == edge.role),
                "{id:?} keeps a stale anchored edge from {:?}",
                edge.part
            );
        }
    }

    assert_eq!(viewer.content_part_map().len(), seen.len());
    for (content, part) in viewer.content_part_map().iter() {
        assert!(viewer.contains(part), "{content} maps to discarded part {part:?}");
        assert_eq!(viewer.content_of(part), Some(content));
    }
    for (content, part) in viewer.pool().iter() {
        assert!(viewer.contains(part), "{content} pooled as discarded part {part:?}");
        assert!(viewer.content_of(part).is_none());
        assert!(!viewer.content_part_map().contains(content));
    }
}
