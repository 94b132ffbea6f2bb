//! claude-history-export - Export Claude Code project history to text files

mod cli;
mod config;
mod discovery;
mod export;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::ExportConfig;
use output::colors;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ExportConfig::resolve(&cli)?;
    tracing::info!(
        projects_dir = %config.projects_dir.display(),
        output_dir = %config.output_dir.display(),
        language = %config.language,
        "Starting export"
    );

    let summary = export::export_all(&config)?;

    println!();
    if summary.files_failed > 0 {
        println!(
            "{}",
            colors::warning(&format!(
                "Export completed with {} failed files ({} exported)",
                summary.files_failed, summary.files_exported
            ))
        );
    } else {
        println!(
            "{}",
            colors::success(&format!(
                "Export completed! {} files from {} projects, {} messages",
                colors::format_count(summary.files_exported),
                colors::format_count(summary.projects),
                colors::format_count(summary.entries)
            ))
        );
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
