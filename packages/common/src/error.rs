use thiserror::Error;

/// Error type shared by every trellis crate for I/O and settings files
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CommonResult<T> = Result<T, CommonError>;
