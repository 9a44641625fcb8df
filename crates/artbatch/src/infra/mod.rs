//! Infrastructure adapters for the export host, dialogs, documents, and config.

pub mod config;
pub mod dialogs;
pub mod documents;
pub mod host;
