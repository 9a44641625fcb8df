//! One batch run from start to report.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::export::{self, ExportFormat};
use crate::app::report::RunOutcome;
use crate::domain::errors::ExportError;
use crate::domain::model::DocumentSet;
use crate::infra::dialogs::Dialogs;
use crate::infra::host::ExportHost;

/// Ties the host, the dialogs and the default prompt folder together for a run.
pub struct BatchRun<'a, H: ?Sized, D: ?Sized> {
    host: &'a mut H,
    dialogs: &'a mut D,
    default_folder: String,
}

impl<'a, H, D> BatchRun<'a, H, D>
where
    H: ExportHost + ?Sized,
    D: Dialogs + ?Sized,
{
    pub fn new(host: &'a mut H, dialogs: &'a mut D, default_folder: impl Into<String>) -> Self {
        Self {
            host,
            dialogs,
            default_folder: default_folder.into(),
        }
    }

    /// Run the batch.
    ///
    /// With no documents the run fails before anything is asked. Without a destination the
    /// user is prompted, and dismissing the prompt ends the run quietly. Errors reading the
    /// prompt itself are returned as `Err`.
    pub fn execute(
        &mut self,
        documents: DocumentSet,
        format: ExportFormat,
        destination: Option<PathBuf>,
    ) -> Result<RunOutcome> {
        if documents.is_empty() {
            return Ok(RunOutcome::Failed {
                error: ExportError::NoDocuments,
                partial: None,
            });
        }

        let destination = match destination {
            Some(destination) => destination,
            None => {
                let prompt = folder_prompt(format);
                match self.dialogs.select_folder(&prompt, &self.default_folder)? {
                    Some(folder) => folder,
                    None => return Ok(RunOutcome::Cancelled),
                }
            }
        };

        Ok(
            match export::run_batch_export(&mut *self.host, documents, &destination, format) {
                Ok(summary) => RunOutcome::Completed(summary),
                Err(aborted) => RunOutcome::Failed {
                    error: aborted.error,
                    partial: Some(aborted.summary),
                },
            },
        )
    }
}

fn folder_prompt(format: ExportFormat) -> String {
    format!("Select folder for {} files.", format.label())
}
