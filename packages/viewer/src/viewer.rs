//! # Viewer
//!
//! Owns the part tree of one editor view together with the registries the
//! reconciliation engine maintains for it: the content-part map and the
//! part pool. Nothing outside the engine mutates either registry; callers
//! change the desired content and invoke one of the entry points below.
//!
//! ```rust,ignore
//! let mut viewer = Viewer::new(factory, RootFigure::default());
//! viewer.set_contents(&["a", "b", "c"])?;
//! viewer.set_contents(&["c", "a"])?; // b is pooled, c and a are reordered
//! ```

use slotmap::SlotMap;
use tracing::{info, instrument};

use crate::behavior::{PartFactory, PartSeed};
use crate::config::ViewerConfig;
use crate::content::{AnchorageMap, ContentObject};
use crate::content_part_map::ContentPartMap;
use crate::errors::{PreconditionError, ViewerResult};
use crate::part::{AnchorageEdge, Part, PartId, PartKind};
use crate::patch::PartPatch;
use crate::pool::PartPool;
use crate::reconcile::Pass;
use crate::visitor::{ContentPartCollector, PartVisitor, TreeDumper};

pub struct Viewer<C: ContentObject, V> {
    pub(crate) parts: SlotMap<PartId, Part<C, V>>,
    pub(crate) root: PartId,
    pub(crate) content_parts: ContentPartMap<C>,
    pub(crate) pool: PartPool<C>,
    pub(crate) factory: Box<dyn PartFactory<C, V>>,
    pub(crate) config: ViewerConfig,
}

impl<C: ContentObject, V> Viewer<C, V> {
    /// Create a viewer with default settings
    pub fn new(factory: impl PartFactory<C, V> + 'static, root_visual: V) -> Self {
        Self::with_config(factory, root_visual, ViewerConfig::default())
    }

    pub fn with_config(
        factory: impl PartFactory<C, V> + 'static,
        root_visual: V,
        config: ViewerConfig,
    ) -> Self {
        let mut parts = SlotMap::with_key();
        let root = parts.insert(Part::from_seed(PartKind::Root, PartSeed::leaf(root_visual)));
        Self {
            parts,
            root,
            content_parts: ContentPartMap::new(),
            pool: PartPool::with_capacity_limit(config.max_pool_size),
            factory: Box::new(factory),
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn root(&self) -> PartId {
        self.root
    }

    pub fn part(&self, part: PartId) -> Option<&Part<C, V>> {
        self.parts.get(part)
    }

    /// True while `part` exists in this viewer, live or pooled
    pub fn contains(&self, part: PartId) -> bool {
        self.parts.contains_key(part)
    }

    pub fn visual(&self, part: PartId) -> Option<&V> {
        self.parts.get(part).map(Part::visual)
    }

    pub fn visual_mut(&mut self, part: PartId) -> Option<&mut V> {
        self.parts.get_mut(part).map(Part::visual_mut)
    }

    pub fn content_of(&self, part: PartId) -> Option<&C> {
        self.parts.get(part).and_then(Part::content)
    }

    pub fn parent(&self, part: PartId) -> Option<PartId> {
        self.parts.get(part).and_then(Part::parent)
    }

    /// All children of `part`, structural ones included
    pub fn children(&self, part: PartId) -> &[PartId] {
        self.parts.get(part).map(Part::children).unwrap_or(&[])
    }

    /// Children of `part` that currently carry content, in order
    pub fn content_children_of(&self, part: PartId) -> Vec<PartId> {
        self.children(part)
            .iter()
            .copied()
            .filter(|&child| self.parts[child].has_content())
            .collect()
    }

    pub fn anchorages(&self, part: PartId) -> &[AnchorageEdge] {
        self.parts.get(part).map(Part::anchorages).unwrap_or(&[])
    }

    pub fn anchoreds(&self, part: PartId) -> &[AnchorageEdge] {
        self.parts.get(part).map(Part::anchoreds).unwrap_or(&[])
    }

    /// The live part controlling `content`
    pub fn content_part(&self, content: &C) -> Option<PartId> {
        self.content_parts.get(content)
    }

    pub fn content_part_map(&self) -> &ContentPartMap<C> {
        &self.content_parts
    }

    pub fn pool(&self) -> &PartPool<C> {
        &self.pool
    }

    /// Number of parts in the viewer, root and pooled parts included
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Every part in the viewer, live or pooled
    pub fn iter_parts(&self) -> impl Iterator<Item = (PartId, &Part<C, V>)> {
        self.parts.iter()
    }

    /// True when `candidate` is `part` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, candidate: PartId, part: PartId) -> bool {
        let mut current = Some(part);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // ------------------------------------------------------------------
    // Reconciliation entry points
    // ------------------------------------------------------------------

    /// Reconcile the root's children with the viewer contents
    #[instrument(skip(self, contents), fields(count = contents.len()))]
    pub fn set_contents(&mut self, contents: &[C]) -> ViewerResult<Vec<PartPatch<C>>> {
        info!("Reconciling viewer contents");
        let root = self.root;
        let mut pass = Pass::new(self);
        pass.synchronize_children(root, contents)?;
        let patches = pass.finish()?;
        info!(
            patches = patches.len(),
            live = self.content_parts.len(),
            pooled = self.pool.len(),
            "Viewer contents reconciled"
        );
        Ok(patches)
    }

    /// Reconcile the content children of `host` with `desired`
    #[instrument(skip(self, desired), fields(count = desired.len()))]
    pub fn synchronize_content_children(
        &mut self,
        host: PartId,
        desired: &[C],
    ) -> ViewerResult<Vec<PartPatch<C>>> {
        self.check_content_host(host)?;
        let mut pass = Pass::new(self);
        pass.synchronize_children(host, desired)?;
        pass.finish()
    }

    /// Reconcile the content anchorages of `host` with `desired`
    #[instrument(skip(self, desired), fields(count = desired.len()))]
    pub fn synchronize_content_anchorages(
        &mut self,
        host: PartId,
        desired: &AnchorageMap<C>,
    ) -> ViewerResult<Vec<PartPatch<C>>> {
        self.check_content_host(host)?;
        let mut pass = Pass::new(self);
        pass.synchronize_anchorages(host, desired)?;
        pass.finish()
    }

    /// A pooled part must stay free of content children and anchorages
    fn check_content_host(&self, host: PartId) -> ViewerResult<()> {
        let part = self.parts.get(host).ok_or(PreconditionError::UnknownPart(host))?;
        if part.kind() == PartKind::Content && !part.has_content() {
            return Err(PreconditionError::PooledPart(host).into());
        }
        Ok(())
    }

    /// Re-read the content children and anchorages of a content part from
    /// its behavior and reconcile them
    #[instrument(skip(self))]
    pub fn refresh(&mut self, part: PartId) -> ViewerResult<Vec<PartPatch<C>>> {
        let content = self
            .parts
            .get(part)
            .ok_or(PreconditionError::UnknownPart(part))?
            .content()
            .cloned()
            .ok_or(PreconditionError::NotContentPart(part))?;

        let mut pass = Pass::new(self);
        pass.synchronize_from_behavior(part, &content)?;
        pass.finish()
    }

    /// Refresh every live content part: the tree depth-first, then parts
    /// that are only reachable as anchorages
    #[instrument(skip(self))]
    pub fn refresh_all(&mut self) -> ViewerResult<Vec<PartPatch<C>>> {
        let mut collector = ContentPartCollector::default();
        collector.visit_part(self, self.root);
        let mut order = collector.parts;
        order.extend(
            self.parts
                .iter()
                .filter(|(_, part)| part.has_content() && part.parent().is_none())
                .map(|(id, _)| id),
        );

        let mut pass = Pass::new(self);
        for part in order {
            pass.enqueue(part);
        }
        pass.finish()
    }

    // ------------------------------------------------------------------
    // Structural children
    // ------------------------------------------------------------------

    /// Insert a non-content child at raw position `index` (clamped)
    pub fn insert_structural_child(
        &mut self,
        host: PartId,
        visual: V,
        index: usize,
    ) -> ViewerResult<(PartId, Vec<PartPatch<C>>)> {
        if !self.parts.contains_key(host) {
            return Err(PreconditionError::UnknownPart(host).into());
        }
        let part = self
            .parts
            .insert(Part::from_seed(PartKind::Structural, PartSeed::leaf(visual)));
        let mut pass = Pass::new(self);
        pass.add_child(host, part, index);
        Ok((part, pass.into_patches()))
    }

    /// Remove a non-content child and discard it
    pub fn remove_structural_child(&mut self, part: PartId) -> ViewerResult<Vec<PartPatch<C>>> {
        let structural = self.parts.get(part).ok_or(PreconditionError::UnknownPart(part))?;
        if structural.kind() != PartKind::Structural {
            return Err(PreconditionError::NotStructuralPart(part).into());
        }
        let parent = structural.parent();

        let mut pass = Pass::new(self);
        if let Some(parent) = parent {
            pass.remove_child(parent, part);
        }
        pass.discard(part);
        Ok(pass.into_patches())
    }

    // ------------------------------------------------------------------
    // Pool management
    // ------------------------------------------------------------------

    /// Discard every pooled part
    pub fn clear_pool(&mut self) -> Vec<PartPatch<C>> {
        let mut pass = Pass::new(self);
        pass.drain_pool();
        pass.into_patches()
    }

    /// Empty the viewer: remove all contents and discard the pool
    pub fn deactivate(&mut self) -> ViewerResult<Vec<PartPatch<C>>> {
        let mut patches = self.set_contents(&[])?;
        patches.extend(self.clear_pool());
        Ok(patches)
    }

    /// Indented outline of the part tree, one part per line
    pub fn dump_tree(&self) -> String {
        let mut dumper = TreeDumper::default();
        dumper.visit_part(self, self.root);
        dumper.output
    }
}

impl<C: ContentObject, V> std::fmt::Debug for Viewer<C, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("root", &self.root)
            .field("parts", &self.parts.len())
            .field("live", &self.content_parts.len())
            .field("pooled", &self.pool.len())
            .field("config", &self.config)
            .finish()
    }
}
