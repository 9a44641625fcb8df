//! Write-access probing for export targets.

use std::fs::OpenOptions;
use std::path::Path;

use crate::domain::errors::ExportError;

/// Check that `path` can be opened for writing.
///
/// The file is created when missing and closed straight away without writing, so a
/// zero-length file may be left behind. Existing content is never truncated. Nothing
/// stops the path from becoming unwritable between this probe and the real export.
pub fn ensure_writable(path: &Path) -> Result<(), ExportError> {
    match OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
    {
        Ok(_file) => Ok(()),
        Err(source) => {
            tracing::debug!(path = %path.display(), error = %source, "write probe failed");
            Err(ExportError::AccessDenied {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
