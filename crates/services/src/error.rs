//! Shared error types for the services crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors emitted while reading a quiz source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to read quiz file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
