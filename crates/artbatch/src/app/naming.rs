//! Output file naming.

use std::path::{Path, PathBuf};

/// Replace the last extension of `doc_name` with `target_ext`, or append it when there is none.
///
/// `target_ext` includes its leading dot. Only the final extension is stripped, so
/// `"a.b.ai"` becomes `"a.b.png"`. Names made only of an extension keep nothing before it.
pub fn derive_file_name(doc_name: &str, target_ext: &str) -> String {
    let stem = match doc_name.rfind('.') {
        Some(dot) => &doc_name[..dot],
        None => doc_name,
    };
    format!("{stem}{target_ext}")
}

/// Full output path for a document inside `destination`.
pub fn target_path(destination: &Path, doc_name: &str, target_ext: &str) -> PathBuf {
    destination.join(derive_file_name(doc_name, target_ext))
}
