//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::export::ExportFormat;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".artbatch/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub converter: Converter,
    #[serde(default)]
    pub documents: Documents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    folder: Option<String>,
}

impl Defaults {
    fn default_format() -> &'static str {
        "png"
    }

    fn default_folder() -> &'static str {
        "~"
    }

    /// Export format used when none is given on the command line.
    pub fn format(&self) -> ExportFormat {
        self.format
            .as_deref()
            .unwrap_or(Self::default_format())
            .parse::<ExportFormat>()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "ignoring configured export format");
                ExportFormat::Png
            })
    }

    /// Folder the destination prompt starts from.
    pub fn folder(&self) -> String {
        self.folder
            .clone()
            .unwrap_or_else(|| Self::default_folder().to_owned())
    }
}

/// Converter argument vectors per format, with `{input}`, `{output}` and `{format}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Converter {
    #[serde(default)]
    pub png: Option<Vec<String>>,
    #[serde(default)]
    pub svg: Option<Vec<String>>,
}

impl Converter {
    pub fn command(&self, format: ExportFormat) -> &[String] {
        let command = match format {
            ExportFormat::Png => &self.png,
            ExportFormat::Svg => &self.svg,
        };
        command.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Documents {
    #[serde(default)]
    extensions: Option<Vec<String>>,
}

impl Documents {
    fn default_extensions() -> Vec<String> {
        ["ai", "eps", "pdf", "svg"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Extensions picked up when a directory is given as input.
    pub fn extensions(&self) -> Vec<String> {
        self.extensions
            .clone()
            .unwrap_or_else(Self::default_extensions)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
    folder: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            format: env::var("ARTBATCH_FORMAT").ok(),
            folder: env::var("ARTBATCH_FOLDER").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(format: &str, folder: &str) -> Self {
        Self {
            format: Some(format.to_owned()),
            folder: Some(folder.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: Defaults {
                format: other.defaults.format.or(self.defaults.format),
                folder: other.defaults.folder.or(self.defaults.folder),
            },
            converter: Converter {
                png: other.converter.png.or(self.converter.png),
                svg: other.converter.svg.or(self.converter.svg),
            },
            documents: Documents {
                extensions: other.documents.extensions.or(self.documents.extensions),
            },
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("artbatch/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(format) = env.format {
        config.defaults.format = Some(format);
    }
    if let Some(folder) = env.folder {
        config.defaults.folder = Some(folder);
    }
    config
}
