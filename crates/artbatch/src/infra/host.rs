//! Export host integration.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

use crate::app::options::ExportOptions;
use crate::domain::model::DocumentRef;
use crate::infra::config::Converter;

/// Environment variable carrying the run's export options as JSON.
pub const OPTIONS_ENV: &str = "ARTBATCH_EXPORT_OPTIONS";

/// Primitive operations the batch driver needs from whatever owns the documents.
pub trait ExportHost {
    /// Write `document` to `target` in the format described by `options`.
    fn export(&mut self, document: &DocumentRef, target: &Path, options: &ExportOptions)
    -> Result<()>;

    /// Close `document`, discarding unsaved changes.
    fn close(&mut self, document: &DocumentRef) -> Result<()>;
}

/// Host that converts files on disk by running an external converter per export.
#[derive(Debug, Clone)]
pub struct CommandHost {
    converter: Converter,
}

impl CommandHost {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }
}

impl ExportHost for CommandHost {
    fn export(
        &mut self,
        document: &DocumentRef,
        target: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let format = options.format();
        let template = self.converter.command(format);
        let (program, args) = template
            .split_first()
            .with_context(|| format!("no converter command configured for {format}"))?;
        let args: Vec<String> = args
            .iter()
            .map(|arg| expand_placeholders(arg, &document.source, target, format.as_str()))
            .collect();
        let payload =
            serde_json::to_string(options).context("failed to serialize export options")?;

        tracing::debug!(program = %program, args = ?args, "running converter");
        let output = Command::new(program)
            .args(&args)
            .env(OPTIONS_ENV, payload)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to spawn converter: {program}"))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                Err(anyhow!("converter failed ({})", output.status))
            } else {
                Err(anyhow!("converter failed ({}): {stderr}", output.status))
            }
        }
    }

    fn close(&mut self, document: &DocumentRef) -> Result<()> {
        // Sources are only ever read, so there is nothing to discard.
        tracing::debug!(document = %document.name, "closed document without saving");
        Ok(())
    }
}

fn expand_placeholders(arg: &str, input: &Path, output: &Path, format: &str) -> String {
    arg.replace("{input}", &input.to_string_lossy())
        .replace("{output}", &output.to_string_lossy())
        .replace("{format}", format)
}
