//! # Content Model
//!
//! The root-level trigger of reconciliation. Edits are batched: one call to
//! [`ContentModel::set_contents`] or [`ContentModel::batch`] notifies the
//! observer at most once, with the resulting contents, no matter how many
//! elements changed.

use tracing::debug;

use crate::content::ContentObject;
use crate::errors::ViewerResult;
use crate::patch::PartPatch;
use crate::viewer::Viewer;

/// Receives the new contents after each effective edit
pub trait ContentsObserver<C: ContentObject> {
    fn on_contents_changed(&mut self, contents: &[C]) -> ViewerResult<Vec<PartPatch<C>>>;
}

impl<C: ContentObject, V> ContentsObserver<C> for Viewer<C, V> {
    fn on_contents_changed(&mut self, contents: &[C]) -> ViewerResult<Vec<PartPatch<C>>> {
        self.set_contents(contents)
    }
}

/// Ordered top-level contents of a viewer
#[derive(Debug, Clone)]
pub struct ContentModel<C: ContentObject> {
    contents: Vec<C>,
    /// Increments on every notified edit
    revision: u64,
}

impl<C: ContentObject> ContentModel<C> {
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
            revision: 0,
        }
    }

    pub fn contents(&self) -> &[C] {
        &self.contents
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the contents
    pub fn set_contents(
        &mut self,
        observer: &mut impl ContentsObserver<C>,
        contents: Vec<C>,
    ) -> ViewerResult<Vec<PartPatch<C>>> {
        self.batch(observer, |current| *current = contents)
    }

    /// Apply any number of edits, then notify once if anything changed
    pub fn batch(
        &mut self,
        observer: &mut impl ContentsObserver<C>,
        edit: impl FnOnce(&mut Vec<C>),
    ) -> ViewerResult<Vec<PartPatch<C>>> {
        let before = self.contents.clone();
        edit(&mut self.contents);
        if self.contents == before {
            return Ok(Vec::new());
        }

        self.revision += 1;
        debug!(revision = self.revision, count = self.contents.len(), "Contents changed");
        observer.on_contents_changed(&self.contents)
    }
}

impl<C: ContentObject> Default for ContentModel<C> {
    fn default() -> Self {
        Self::new()
    }
}
