//! Reporting the result of a run.

use crate::app::export::ExportSummary;
use crate::domain::errors::ExportError;
use crate::infra::dialogs::{AlertLevel, Dialogs};

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(ExportSummary),
    /// The destination prompt was dismissed before any work started.
    Cancelled,
    Failed {
        error: ExportError,
        /// What finished before the failure, when the driver got that far.
        partial: Option<ExportSummary>,
    },
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }

    /// Number of documents exported, including those before an abort.
    pub fn exported(&self) -> usize {
        match self {
            RunOutcome::Completed(summary) => summary.exported,
            RunOutcome::Failed {
                partial: Some(summary),
                ..
            } => summary.exported,
            _ => 0,
        }
    }
}

/// Alert text for an outcome. Cancelled runs have nothing to say.
pub fn report_message(outcome: &RunOutcome) -> Option<(String, AlertLevel)> {
    match outcome {
        RunOutcome::Completed(summary) => {
            let noun = if summary.exported == 1 {
                "document"
            } else {
                "documents"
            };
            Some((
                format!(
                    "{} {noun} saved as {} to\n{}",
                    summary.exported,
                    summary.format.label(),
                    summary.destination.display()
                ),
                AlertLevel::Info,
            ))
        }
        RunOutcome::Cancelled => None,
        RunOutcome::Failed { error, .. } => Some((error.to_string(), AlertLevel::Error)),
    }
}

/// Show the single closing alert for a run.
pub fn report<D>(dialogs: &mut D, outcome: &RunOutcome)
where
    D: Dialogs + ?Sized,
{
    match report_message(outcome) {
        Some((message, level)) => dialogs.alert(&message, level),
        None => tracing::info!("run cancelled, nothing to report"),
    }
}
