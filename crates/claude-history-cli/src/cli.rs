//! CLI argument definitions

use clap::{ArgAction, Parser};
use claude_history_core::Language;
use std::path::PathBuf;

/// Export Claude Code project history to readable text files
#[derive(Parser, Debug)]
#[command(name = "claude-history-export")]
#[command(version)]
#[command(about = "Export Claude Code project history to readable text files")]
#[command(after_help = after_help())]
pub struct Cli {
    /// Output directory [default: ./output]
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Claude projects directory [default: ~/.claude/projects]
    #[arg(value_name = "PROJECTS_DIR")]
    pub projects_dir: Option<PathBuf>,

    /// Transcript language (unknown codes fall back to zh)
    #[arg(long, short, env = "CLAUDE_HISTORY_LANG")]
    pub lang: Option<String>,

    /// JSON configuration file
    #[arg(long, short, env = "CLAUDE_HISTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only export projects whose directory name contains this text
    #[arg(long, short)]
    pub project: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Supported languages followed by usage examples
fn after_help() -> String {
    let languages: Vec<String> = Language::all()
        .iter()
        .map(|lang| format!("{} ({})", lang.code(), lang.name()))
        .collect();

    format!(
        "Supported languages:
  {}

Examples:
  claude-history-export                            # Defaults (Chinese, output to ./output)
  claude-history-export --lang en                  # English labels
  claude-history-export /path/to/output            # Custom output directory
  claude-history-export --lang ja /path/to/output  # Japanese labels and custom output directory",
        languages.join(", ")
    )
}
