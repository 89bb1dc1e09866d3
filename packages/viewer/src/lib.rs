//! # Trellis Viewer
//!
//! Content-to-view reconciliation for graphical editors.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content model: ordered contents (batched)   │
//! └─────────────────────────────────────────────┘
//!                     ↓ on_contents_changed
//! ┌─────────────────────────────────────────────┐
//! │ viewer: one reconciliation pass per change  │
//! │  - child lists, in order, minimal moves     │
//! │  - anchorage edges, as (content, role) sets │
//! │  - find-or-create: map → pool → factory     │
//! │  - obsolete parts pooled for revival        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ patches: what changed, for the renderer     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Content is source of truth**: parts are derived and reused
//! 2. **One part per content object**: across the whole viewer
//! 3. **Identity survives**: reorders move parts, removals pool them
//! 4. **Registries are per viewer**: no process-wide state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_viewer::{ContentModel, CreationContext, PartSeed, Viewer};
//!
//! let factory = |content: &&str, _: &CreationContext| Some(PartSeed::leaf(content.len()));
//! let mut viewer = Viewer::new(factory, 0usize);
//! let mut model = ContentModel::new();
//!
//! model.set_contents(&mut viewer, vec!["a", "b", "c"])?;
//! model.batch(&mut viewer, |contents| contents.reverse())?;
//! ```

mod behavior;
mod config;
mod content;
mod content_part_map;
mod errors;
mod model;
mod part;
mod patch;
mod pool;
mod reconcile;
mod viewer;
mod visitor;

pub use behavior::{CreationContext, LeafBehavior, PartBehavior, PartFactory, PartSeed, Relation};
pub use config::{StructuralPlacement, ViewerConfig};
pub use content::{AnchorageMap, ContentObject};
pub use content_part_map::ContentPartMap;
pub use errors::{ErrorKind, PreconditionError, ViewerError, ViewerResult};
pub use model::{ContentModel, ContentsObserver};
pub use part::{AnchorageEdge, Part, PartId, PartKind};
pub use patch::PartPatch;
pub use pool::PartPool;
pub use viewer::Viewer;
pub use visitor::{walk_part, ContentPartCollector, PartVisitor, TreeDumper};
