//! Command-line surface.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::export::ExportFormat;
use crate::app::report;
use crate::app::run::BatchRun;
use crate::infra::config::Config;
use crate::infra::dialogs::TerminalDialogs;
use crate::infra::documents;
use crate::infra::host::CommandHost;

#[derive(Debug, Parser)]
#[command(name = "artbatch", author, version, about = "Batch-export artwork documents to PNG or SVG", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export every document into one destination folder
    Export {
        /// Target format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Destination folder; prompts when omitted
        #[arg(short, long)]
        dest: Option<PathBuf>,
        /// Document files, or directories whose documents are all exported
        documents: Vec<PathBuf>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Export {
            format,
            dest,
            documents,
        } => export(format, dest, &documents),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "artbatch", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn export(
    format: Option<ExportFormat>,
    dest: Option<PathBuf>,
    inputs: &[PathBuf],
) -> Result<ExitCode> {
    let config = Config::load()?;
    let format = format.unwrap_or_else(|| config.defaults.format());
    let documents = documents::open_documents(inputs, &config.documents.extensions())?;

    let mut host = CommandHost::new(config.converter.clone());
    let mut dialogs = TerminalDialogs::new();
    let outcome = BatchRun::new(&mut host, &mut dialogs, config.defaults.folder()).execute(
        documents,
        format,
        dest,
    )?;

    report::report(&mut dialogs, &outcome);
    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
