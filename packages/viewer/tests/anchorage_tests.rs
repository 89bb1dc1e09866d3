//! Anchorage reconciliation and anchorage-driven obsolescence

mod common;

use common::{assert_invariants, Fixture};
use trellis_viewer::{AnchorageMap, PartPatch, PreconditionError, Relation, ViewerError};

#[test]
fn test_anchorage_target_is_created_on_demand() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source")]);

    fx.viewer.set_contents(&["a"]).unwrap();

    let (a, x) = (fx.part("a"), fx.part("x"));
    assert_eq!(fx.anchorage_pairs(a), vec![("source".to_string(), "x")]);
    assert_eq!(fx.viewer.parent(x), None);
    assert_eq!(fx.viewer.anchoreds(x).len(), 1);

    let contexts = fx.contexts.borrow();
    let last = contexts.last().unwrap();
    assert_eq!(last.host, a);
    assert_eq!(
        last.relation,
        Relation::Anchorage {
            role: "source".to_string()
        }
    );
    drop(contexts);
    assert_invariants(&fx.viewer);
}

#[test]
fn test_anchorages_are_compared_as_a_set() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source")]);
    fx.viewer.set_contents(&["a"]).unwrap();
    let a = fx.part("a");

    fx.set_anchorages("a", &[("y", "source"), ("x", "source")]);
    let patches = fx.viewer.refresh(a).unwrap();

    let y = fx.part("y");
    assert_eq!(
        patches,
        vec![
            PartPatch::Created { part: y, content: "y" },
            PartPatch::AnchorageAttached {
                anchored: a,
                anchorage: y,
                role: "source".to_string()
            },
        ]
    );
    assert_invariants(&fx.viewer);
}

#[test]
fn test_anchored_part_survives_removal_from_parent() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source")]);
    fx.viewer.set_contents(&["a", "x"]).unwrap();
    let (a, x) = (fx.part("a"), fx.part("x"));

    fx.viewer.set_contents(&["a"]).unwrap();

    assert_eq!(fx.part("x"), x);
    assert_eq!(fx.viewer.parent(x), None);
    assert!(fx.viewer.pool().is_empty());
    assert_invariants(&fx.viewer);

    fx.set_anchorages("a", &[]);
    let patches = fx.viewer.refresh(a).unwrap();

    assert_eq!(
        patches,
        vec![
            PartPatch::AnchorageDetached {
                anchored: a,
                anchorage: x,
                role: "source".to_string()
            },
            PartPatch::Pooled { part: x, content: "x" },
        ]
    );
    assert_eq!(fx.viewer.pool().get(&"x"), Some(x));
    assert_invariants(&fx.viewer);
}

#[test]
fn test_one_target_under_several_roles() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source"), ("x", "target")]);
    fx.viewer.set_contents(&["a"]).unwrap();
    let (a, x) = (fx.part("a"), fx.part("x"));

    assert_eq!(fx.created.get(), 2);
    assert_eq!(
        fx.anchorage_pairs(a),
        vec![("source".to_string(), "x"), ("target".to_string(), "x")]
    );

    fx.set_anchorages("a", &[("x", "target")]);
    fx.viewer.refresh(a).unwrap();

    assert_eq!(fx.anchorage_pairs(a), vec![("target".to_string(), "x")]);
    assert_eq!(fx.part("x"), x);
    assert_eq!(fx.viewer.anchoreds(x).len(), 1);
    assert_invariants(&fx.viewer);
}

#[test]
fn test_mutual_anchorages_keep_each_other_alive() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("b", "peer")]);
    fx.set_anchorages("b", &[("a", "peer")]);
    fx.viewer.set_contents(&["a", "b"]).unwrap();
    let (a, b) = (fx.part("a"), fx.part("b"));

    fx.viewer.set_contents(&[]).unwrap();

    assert_eq!(fx.viewer.content_part(&"a"), Some(a));
    assert_eq!(fx.viewer.content_part(&"b"), Some(b));
    assert!(fx.viewer.pool().is_empty());
    assert_invariants(&fx.viewer);

    // Cutting one edge lets the whole cycle go
    fx.set_anchorages("a", &[]);
    let patches = fx.viewer.refresh(a).unwrap();

    assert!(fx.viewer.content_part_map().is_empty());
    assert_eq!(fx.viewer.pool().get(&"a"), Some(a));
    assert_eq!(fx.viewer.pool().get(&"b"), Some(b));
    let pooled: Vec<_> = patches
        .iter()
        .filter_map(|patch| match patch {
            PartPatch::Pooled { content, .. } => Some(*content),
            _ => None,
        })
        .collect();
    assert_eq!(pooled, vec!["a", "b"]);
    assert_invariants(&fx.viewer);
}

#[test]
fn test_pooled_anchored_part_releases_its_anchorages() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source")]);
    fx.viewer.set_contents(&["a"]).unwrap();
    let x = fx.part("x");

    fx.viewer.set_contents(&[]).unwrap();

    assert_eq!(fx.viewer.pool().len(), 2);
    assert_eq!(fx.viewer.pool().get(&"x"), Some(x));
    assert!(fx.viewer.anchoreds(x).is_empty());
    assert_invariants(&fx.viewer);
}

#[test]
fn test_refresh_all_reaches_anchor_only_parts() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source")]);
    fx.viewer.set_contents(&["a"]).unwrap();
    let x = fx.part("x");

    fx.set_children("x", &["deep"]);
    fx.viewer.refresh_all().unwrap();

    assert_eq!(fx.contents_under(x), vec!["deep"]);
    assert_invariants(&fx.viewer);
}

#[test]
fn test_refresh_all_visits_anchor_only_parts_in_creation_order() {
    let mut fx = Fixture::new();
    fx.set_anchorages("a", &[("x", "source"), ("y", "target")]);
    fx.viewer.set_contents(&["a"]).unwrap();
    let (x, y) = (fx.part("x"), fx.part("y"));

    fx.set_children("x", &["x1"]);
    fx.set_children("y", &["y1"]);
    let patches = fx.viewer.refresh_all().unwrap();

    let (x1, y1) = (fx.part("x1"), fx.part("y1"));
    assert_eq!(
        patches,
        vec![
            PartPatch::Created { part: x1, content: "x1" },
            PartPatch::ChildAdded { parent: x, child: x1, index: 0 },
            PartPatch::Created { part: y1, content: "y1" },
            PartPatch::ChildAdded { parent: y, child: y1, index: 0 },
        ]
    );
    assert_invariants(&fx.viewer);
}

#[test]
fn test_missing_content_anchorages_is_precondition_error() {
    let mut fx = Fixture::new();
    fx.diagram.borrow_mut().opaque.insert("a");

    let err = fx.viewer.set_contents(&["a"]).unwrap_err();

    let a = fx.part("a");
    assert!(matches!(
        err,
        ViewerError::Precondition(PreconditionError::MissingContentAnchorages { part }) if part == a
    ));
}

#[test]
fn test_synchronize_content_anchorages_directly() {
    let mut fx = Fixture::new();
    fx.viewer.set_contents(&["a", "x"]).unwrap();
    let (a, x) = (fx.part("a"), fx.part("x"));

    let desired: AnchorageMap<&str> = [("x", "link")].into_iter().collect();
    let patches = fx.viewer.synchronize_content_anchorages(a, &desired).unwrap();
    assert_eq!(
        patches,
        vec![PartPatch::AnchorageAttached {
            anchored: a,
            anchorage: x,
            role: "link".to_string()
        }]
    );

    let patches = fx
        .viewer
        .synchronize_content_anchorages(a, &AnchorageMap::new())
        .unwrap();
    assert_eq!(
        patches,
        vec![PartPatch::AnchorageDetached {
            anchored: a,
            anchorage: x,
            role: "link".to_string()
        }]
    );
    // Still a child of the root
    assert_eq!(fx.part("x"), x);
    assert_invariants(&fx.viewer);
}
