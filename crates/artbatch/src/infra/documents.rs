//! Opening documents from command-line inputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;

use crate::domain::model::{DocumentRef, DocumentSet};

/// Build the document set for a run.
///
/// Files are taken as given whatever their extension. A directory contributes its direct
/// children whose extension is in `extensions`, ordered by name.
pub fn open_documents(inputs: &[PathBuf], extensions: &[String]) -> Result<DocumentSet> {
    let mut documents = DocumentSet::new();
    for input in inputs {
        if input.is_dir() {
            documents.extend(scan_directory(input, extensions)?);
        } else if input.is_file() {
            documents.push(DocumentRef::from_path(input));
        } else {
            bail!("document not found: {}", input.display());
        }
    }
    tracing::debug!(count = documents.len(), "opened documents");
    Ok(documents)
}

fn scan_directory(dir: &Path, extensions: &[String]) -> Result<Vec<DocumentRef>> {
    let mut found = Vec::new();
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(true)
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to read directory {}", dir.display()))?;
        if entry.depth() == 0 || !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }
        if has_document_extension(entry.path(), extensions) {
            found.push(DocumentRef::from_path(entry.path()));
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping non-document file");
        }
    }

    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

fn has_document_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}
