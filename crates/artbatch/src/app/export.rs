//! Batch export driver.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::naming;
use crate::app::options::ExportOptions;
use crate::app::preflight;
use crate::domain::errors::ExportError;
use crate::domain::model::{DocumentRef, DocumentSet};
use crate::infra::host::ExportHost;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ExportFormat {
    /// 24-bit PNG raster, documents are closed after export.
    Png,
    /// SVG 1.1, documents are saved as the exported file and stay open.
    Svg,
}

impl ExportFormat {
    /// Return a stable identifier for configuration and converter arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    /// Extension appended to derived file names, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => ".png",
            ExportFormat::Svg => ".svg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Svg => "SVG",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" | "png24" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(ExportFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing an [`ExportFormat`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ExportFormatParseError {
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),
}

/// What a run (or the completed part of an aborted run) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub destination: PathBuf,
    pub format: ExportFormat,
    /// Written files in export order.
    pub targets: Vec<PathBuf>,
    /// Documents still open once the run ended.
    pub documents: DocumentSet,
}

impl ExportSummary {
    fn new(destination: &Path, format: ExportFormat) -> Self {
        Self {
            exported: 0,
            destination: destination.to_path_buf(),
            format,
            targets: Vec::new(),
            documents: DocumentSet::new(),
        }
    }

    fn record(&mut self, target: PathBuf) {
        self.exported += 1;
        self.targets.push(target);
    }
}

/// A batch stopped by its first failure. Exports that finished before it are kept.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct BatchAborted {
    #[source]
    pub error: ExportError,
    pub summary: ExportSummary,
}

/// Export every document in `documents` into `destination`.
///
/// PNG exports drain the set, closing each document once written. SVG exports walk the
/// documents present at call time and replace each with its saved-as identity. The first
/// failure stops the batch.
pub fn run_batch_export<H>(
    host: &mut H,
    documents: DocumentSet,
    destination: &Path,
    format: ExportFormat,
) -> Result<ExportSummary, BatchAborted>
where
    H: ExportHost + ?Sized,
{
    let mut summary = ExportSummary::new(destination, format);
    if documents.is_empty() {
        return Err(BatchAborted {
            error: ExportError::NoDocuments,
            summary,
        });
    }

    let options = ExportOptions::for_format(format);
    tracing::info!(
        documents = documents.len(),
        format = format.as_str(),
        destination = %destination.display(),
        "starting batch export"
    );

    let outcome = match format {
        ExportFormat::Png => export_and_close(host, documents, &options, &mut summary),
        ExportFormat::Svg => export_in_place(host, documents, &options, &mut summary),
    };
    if let Err(error) = outcome {
        tracing::info!(exported = summary.exported, error = %error, "batch export aborted");
        return Err(BatchAborted { error, summary });
    }

    tracing::info!(exported = summary.exported, "batch export finished");
    Ok(summary)
}

fn export_and_close<H>(
    host: &mut H,
    mut remaining: DocumentSet,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<(), ExportError>
where
    H: ExportHost + ?Sized,
{
    while let Some(document) = remaining.take_first() {
        let target = match export_document(host, &document, options, &summary.destination) {
            Ok(target) => target,
            Err(err) => {
                remaining.push_front(document);
                summary.documents = remaining;
                return Err(err);
            }
        };
        summary.record(target);

        if let Err(source) = host.close(&document) {
            let name = document.name.clone();
            remaining.push_front(document);
            summary.documents = remaining;
            return Err(ExportError::Close {
                document: name,
                source,
            });
        }
    }
    summary.documents = remaining;
    Ok(())
}

fn export_in_place<H>(
    host: &mut H,
    documents: DocumentSet,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<(), ExportError>
where
    H: ExportHost + ?Sized,
{
    // Snapshot taken up front; documents saved during the loop are not revisited.
    let snapshot: Vec<DocumentRef> = documents.into_iter().collect();
    let mut pending = snapshot.into_iter();

    let mut failure = None;
    for document in pending.by_ref() {
        match export_document(host, &document, options, &summary.destination) {
            Ok(target) => {
                summary.documents.push(document.saved_as(&target));
                summary.record(target);
            }
            Err(err) => {
                summary.documents.push(document);
                failure = Some(err);
                break;
            }
        }
    }

    match failure {
        Some(err) => {
            summary.documents.extend(pending);
            Err(err)
        }
        None => Ok(()),
    }
}

fn export_document<H>(
    host: &mut H,
    document: &DocumentRef,
    options: &ExportOptions,
    destination: &Path,
) -> Result<PathBuf, ExportError>
where
    H: ExportHost + ?Sized,
{
    let target = naming::target_path(destination, &document.name, options.format().extension());
    preflight::ensure_writable(&target)?;

    host.export(document, &target, options)
        .map_err(|source| ExportError::Host {
            document: document.name.clone(),
            source,
        })?;

    tracing::info!(
        document = %document.name,
        target = %target.display(),
        "exported document"
    );
    Ok(target)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::fs;

    use anyhow::anyhow;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Export { document: String, target: PathBuf },
        Close { document: String },
    }

    /// Host that records calls and optionally fails the export or close of one document.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub calls: Vec<Call>,
        pub fail_on: Option<String>,
        pub fail_close_on: Option<String>,
    }

    impl RecordingHost {
        pub(crate) fn exported_targets(&self) -> Vec<PathBuf> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Export { target, .. } => Some(target.clone()),
                    Call::Close { .. } => None,
                })
                .collect()
        }
    }

    impl ExportHost for RecordingHost {
        fn export(
            &mut self,
            document: &DocumentRef,
            target: &Path,
            _options: &ExportOptions,
        ) -> anyhow::Result<()> {
            if self.fail_on.as_deref() == Some(document.name.as_str()) {
                return Err(anyhow!("converter crashed"));
            }
            self.calls.push(Call::Export {
                document: document.name.clone(),
                target: target.to_path_buf(),
            });
            Ok(())
        }

        fn close(&mut self, document: &DocumentRef) -> anyhow::Result<()> {
            if self.fail_close_on.as_deref() == Some(document.name.as_str()) {
                return Err(anyhow!("document is locked"));
            }
            self.calls.push(Call::Close {
                document: document.name.clone(),
            });
            Ok(())
        }
    }

    pub(crate) fn documents(names: &[&str]) -> DocumentSet {
        names
            .iter()
            .map(|name| DocumentRef::from_path(Path::new("/art").join(name)))
            .collect()
    }

    #[test]
    fn png_exports_in_order_and_closes_each() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost::default();

        let summary = run_batch_export(
            &mut host,
            documents(&["Logo.ai", "Banner"]),
            dest.path(),
            ExportFormat::Png,
        )?;

        let logo = dest.path().join("Logo.png");
        let banner = dest.path().join("Banner.png");
        assert_eq!(summary.exported, 2);
        assert_eq!(summary.targets, vec![logo.clone(), banner.clone()]);
        assert_eq!(summary.destination, dest.path());
        assert!(summary.documents.is_empty());
        assert_eq!(
            host.calls,
            vec![
                Call::Export {
                    document: "Logo.ai".into(),
                    target: logo
                },
                Call::Close {
                    document: "Logo.ai".into()
                },
                Call::Export {
                    document: "Banner".into(),
                    target: banner
                },
                Call::Close {
                    document: "Banner".into()
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn svg_saves_in_place_without_closing() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost::default();

        let summary = run_batch_export(
            &mut host,
            documents(&["Logo.ai", "icons.v2.ai"]),
            dest.path(),
            ExportFormat::Svg,
        )?;

        assert_eq!(summary.exported, 2);
        assert_eq!(
            host.exported_targets(),
            vec![
                dest.path().join("Logo.svg"),
                dest.path().join("icons.v2.svg")
            ]
        );
        assert!(
            !host
                .calls
                .iter()
                .any(|call| matches!(call, Call::Close { .. }))
        );
        assert_eq!(summary.documents.names(), vec!["Logo.svg", "icons.v2.svg"]);
        assert_eq!(
            summary.documents.iter().next().map(|doc| doc.source.clone()),
            Some(dest.path().join("Logo.svg"))
        );
        Ok(())
    }

    #[test]
    fn empty_set_fails_without_writes() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost::default();

        let aborted = run_batch_export(
            &mut host,
            DocumentSet::new(),
            dest.path(),
            ExportFormat::Png,
        )
        .unwrap_err();

        assert!(matches!(aborted.error, ExportError::NoDocuments));
        assert_eq!(aborted.summary.exported, 0);
        assert!(host.calls.is_empty());
        assert_eq!(fs::read_dir(dest.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn unwritable_target_aborts_before_export() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let dest = temp.path().join("does-not-exist");
        let mut host = RecordingHost::default();

        let aborted = run_batch_export(
            &mut host,
            documents(&["Logo.ai"]),
            &dest,
            ExportFormat::Png,
        )
        .unwrap_err();

        assert!(matches!(aborted.error, ExportError::AccessDenied { .. }));
        assert_eq!(aborted.summary.exported, 0);
        assert!(host.calls.is_empty());
        assert_eq!(aborted.summary.documents.names(), vec!["Logo.ai"]);
        Ok(())
    }

    #[test]
    fn host_failure_keeps_earlier_exports() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost {
            fail_on: Some("b.ai".into()),
            ..Default::default()
        };

        let aborted = run_batch_export(
            &mut host,
            documents(&["a.ai", "b.ai", "c.ai"]),
            dest.path(),
            ExportFormat::Png,
        )
        .unwrap_err();

        assert!(matches!(
            aborted.error,
            ExportError::Host { ref document, .. } if document == "b.ai"
        ));
        assert_eq!(aborted.summary.exported, 1);
        assert_eq!(aborted.summary.targets, vec![dest.path().join("a.png")]);
        assert_eq!(aborted.summary.documents.names(), vec!["b.ai", "c.ai"]);
        assert!(!host.exported_targets().contains(&dest.path().join("c.png")));
        Ok(())
    }

    #[test]
    fn close_failure_keeps_export_and_names_close() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost {
            fail_close_on: Some("a.ai".into()),
            ..Default::default()
        };

        let aborted = run_batch_export(
            &mut host,
            documents(&["a.ai", "b.ai"]),
            dest.path(),
            ExportFormat::Png,
        )
        .unwrap_err();

        assert!(matches!(
            aborted.error,
            ExportError::Close { ref document, .. } if document == "a.ai"
        ));
        let message = aborted.error.to_string();
        assert!(message.contains("exported 'a.ai'"));
        assert!(!message.contains("failed to export"));
        assert_eq!(aborted.summary.exported, 1);
        assert_eq!(aborted.summary.documents.names(), vec!["a.ai", "b.ai"]);
        assert_eq!(host.exported_targets(), vec![dest.path().join("a.png")]);
        Ok(())
    }

    #[test]
    fn svg_failure_keeps_unvisited_documents() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost {
            fail_on: Some("b.ai".into()),
            ..Default::default()
        };

        let aborted = run_batch_export(
            &mut host,
            documents(&["a.ai", "b.ai", "c.ai"]),
            dest.path(),
            ExportFormat::Svg,
        )
        .unwrap_err();

        assert_eq!(aborted.summary.exported, 1);
        assert_eq!(
            aborted.summary.documents.names(),
            vec!["a.svg", "b.ai", "c.ai"]
        );
        Ok(())
    }

    #[test]
    fn colliding_names_overwrite_same_target() -> anyhow::Result<()> {
        let dest = tempfile::tempdir()?;
        let mut host = RecordingHost::default();

        let summary = run_batch_export(
            &mut host,
            documents(&["Logo.ai", "Logo.eps"]),
            dest.path(),
            ExportFormat::Png,
        )?;

        assert_eq!(summary.exported, 2);
        assert_eq!(summary.targets[0], summary.targets[1]);
        Ok(())
    }

    #[test]
    fn parses_format_aliases() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!(" svg ".parse::<ExportFormat>(), Ok(ExportFormat::Svg));
        assert_eq!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportFormatParseError::UnknownFormat("pdf".into()))
        );
    }
}
