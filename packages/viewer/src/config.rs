//! Viewer settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_common::{read_json, CommonError, FileSystem};

use crate::errors::ViewerResult;

/// How a content slot maps onto raw child positions when structural
/// children sit among content children.
///
/// A slot that is already occupied always resolves to its occupant's raw
/// position. The variants differ for the slot one past the last content
/// child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPlacement {
    /// Directly after the last content child, or at the end when there is none
    #[default]
    AfterPrecedingContent,
    /// Always at the end of the raw child list
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Keep obsolete parts for revival instead of discarding them
    pub pooling: bool,

    /// Upper bound on pooled parts (None = unbounded)
    pub max_pool_size: Option<usize>,

    pub structural_placement: StructuralPlacement,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pooling: true,
            max_pool_size: None,
            structural_placement: StructuralPlacement::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> ViewerResult<Self> {
        serde_json::from_str(text).map_err(|e| CommonError::from(e).into())
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> ViewerResult<Self> {
        Ok(read_json(fs, path)?)
    }

    pub fn without_pooling(mut self) -> Self {
        self.pooling = false;
        self
    }

    pub fn with_max_pool_size(mut self, limit: usize) -> Self {
        self.max_pool_size = Some(limit);
        self
    }

    pub fn with_structural_placement(mut self, placement: StructuralPlacement) -> Self {
        self.structural_placement = placement;
        self
    }
}
