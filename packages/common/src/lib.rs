//! Shared plumbing for the trellis crates: the common error type and a
//! file-system seam for loading settings.

mod error;
mod filesystem;

pub use error::{CommonError, CommonResult};
pub use filesystem::{read_json, FileSystem, MockFileSystem, RealFileSystem};
