//! Domain models for documents and the open-document set.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Handle to one open artwork document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub name: String,
    pub source: PathBuf,
}

impl DocumentRef {
    /// Build a reference whose display name is the file name of `source`.
    pub fn from_path(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        Self { name, source }
    }

    /// The document as it looks after a save-as to `target`: same content, new identity.
    pub fn saved_as(&self, target: &Path) -> Self {
        Self::from_path(target)
    }
}

/// Ordered set of documents a run operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: VecDeque<DocumentRef>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRef> {
        self.documents.iter()
    }

    /// Display names in set order.
    pub fn names(&self) -> Vec<&str> {
        self.documents.iter().map(|doc| doc.name.as_str()).collect()
    }

    pub fn push(&mut self, document: DocumentRef) {
        self.documents.push_back(document);
    }

    /// Put a document back at the head of the set.
    pub fn push_front(&mut self, document: DocumentRef) {
        self.documents.push_front(document);
    }

    /// Remove and return the first remaining document.
    pub fn take_first(&mut self) -> Option<DocumentRef> {
        self.documents.pop_front()
    }
}

impl FromIterator<DocumentRef> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = DocumentRef>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl Extend<DocumentRef> for DocumentSet {
    fn extend<I: IntoIterator<Item = DocumentRef>>(&mut self, iter: I) {
        self.documents.extend(iter);
    }
}

impl IntoIterator for DocumentSet {
    type Item = DocumentRef;
    type IntoIter = std::collections::vec_deque::IntoIter<DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}
