//! Export configuration: defaults, optional JSON file, command-line overrides

use anyhow::{Context, Result};
use claude_history_core::Language;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Cli;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Values read from a configuration file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub projects_dir: Option<PathBuf>,
    pub lang: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Resolved settings for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub projects_dir: PathBuf,
    pub language: Language,
    pub project_filter: Option<String>,
}

impl ExportConfig {
    /// Command-line values win over the config file, which wins over defaults
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &Cli, file: FileConfig) -> Self {
        let output_dir = cli
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let projects_dir = cli
            .projects_dir
            .clone()
            .or(file.projects_dir)
            .unwrap_or_else(default_projects_dir);
        let language = cli
            .lang
            .clone()
            .or(file.lang)
            .map(|code| resolve_language(&code))
            .unwrap_or_default();

        Self {
            output_dir,
            projects_dir,
            language,
            project_filter: cli.project.clone(),
        }
    }
}

/// Default projects directory (~/.claude/projects)
pub fn default_projects_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".claude")
        .join("projects")
}

fn resolve_language(code: &str) -> Language {
    match code.parse::<Language>() {
        Ok(language) => language,
        Err(e) => {
            let fallback = Language::default();
            warn!(error = %e, fallback = %fallback, "Falling back to default language");
            fallback
        }
    }
}
