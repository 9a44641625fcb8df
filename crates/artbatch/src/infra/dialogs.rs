//! Folder prompt and alert integration.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// User interaction the batch run needs: one folder choice and one closing message.
pub trait Dialogs {
    /// Ask for a destination folder. `Ok(None)` means the user cancelled.
    fn select_folder(&mut self, prompt: &str, default: &str) -> Result<Option<PathBuf>>;

    fn alert(&mut self, message: &str, level: AlertLevel);
}

/// Dialogs on the controlling terminal, falling back to plain stdin when not interactive.
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    pub fn new() -> Self {
        Self
    }

    fn read_interactive(&self, prompt: &str, default: &str) -> Result<Option<String>> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!("{prompt} [{default}]")),
            DefaultPromptSegment::Empty,
        );
        match editor.read_line(&prompt).context("failed to read folder")? {
            Signal::Success(buffer) => Ok(Some(buffer)),
            _ => Ok(None),
        }
    }

    fn read_piped(&self, prompt: &str, default: &str) -> Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "{prompt} [{default}] ").ok();
        stderr.flush().ok();

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read folder from stdin")?;
        if read == 0 { Ok(None) } else { Ok(Some(line)) }
    }
}

impl Dialogs for TerminalDialogs {
    fn select_folder(&mut self, prompt: &str, default: &str) -> Result<Option<PathBuf>> {
        let answer = if io::stdin().is_terminal() {
            self.read_interactive(prompt, default)?
        } else {
            self.read_piped(prompt, default)?
        };
        Ok(answer.map(|answer| resolve_folder(&answer, default)))
    }

    fn alert(&mut self, message: &str, level: AlertLevel) {
        match level {
            AlertLevel::Info => println!("{message}"),
            AlertLevel::Error => eprintln!("{message}"),
        }
    }
}

/// Turn a prompt answer into a folder: blank picks `default`, a leading `~` is the home directory.
pub fn resolve_folder(answer: &str, default: &str) -> PathBuf {
    let answer = answer.trim();
    let chosen = if answer.is_empty() { default.trim() } else { answer };
    expand_home(chosen)
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs_next::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(Path::new(rest)),
        _ => PathBuf::from(path),
    }
}
