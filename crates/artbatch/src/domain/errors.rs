//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a batch export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There are no documents open!")]
    NoDocuments,
    #[error("Access is denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to export '{document}': {source}")]
    Host {
        document: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("exported '{document}' but failed to close it: {source}")]
    Close {
        document: String,
        #[source]
        source: anyhow::Error,
    },
}
