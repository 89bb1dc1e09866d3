//! Error types for the viewer

use crate::part::PartId;
use thiserror::Error;
use trellis_common::CommonError;

pub type ViewerResult<T> = Result<T, ViewerError>;

/// Coarse classification of a [`ViewerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Integrity,
    Precondition,
}

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("No part factory registration produced a part for content {content}")]
    Configuration { content: String },

    #[error("Content {content} is controlled by part {part:?} under parent {existing_parent:?}, cannot add it as child of {host:?}")]
    Integrity {
        content: String,
        part: PartId,
        existing_parent: PartId,
        host: PartId,
    },

    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Config error: {0}")]
    Config(#[from] CommonError),
}

impl ViewerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViewerError::Configuration { .. } | ViewerError::Config(_) => ErrorKind::Configuration,
            ViewerError::Integrity { .. } => ErrorKind::Integrity,
            ViewerError::Precondition(_) => ErrorKind::Precondition,
        }
    }
}

/// Caller misuse detected before a pass mutates anything
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Part {part:?} provided no content children")]
    MissingContentChildren { part: PartId },

    #[error("Part {part:?} provided no content anchorages")]
    MissingContentAnchorages { part: PartId },

    #[error("Content {content} appears more than once in the desired children")]
    DuplicateContent { content: String },

    #[error("Unknown part {0:?}")]
    UnknownPart(PartId),

    #[error("Part {0:?} has no content")]
    NotContentPart(PartId),

    #[error("Part {0:?} is not a structural part")]
    NotStructuralPart(PartId),

    #[error("Part {0:?} is pooled and cannot host content children or anchorages")]
    PooledPart(PartId),
}
