//! Export pipeline: discover projects, assemble transcripts, write text files

use anyhow::{bail, Context, Result};
use claude_history_core::TranscriptAssembler;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info_span, warn};

use crate::config::ExportConfig;
use crate::discovery::{find_conversation_files, find_projects, ProjectDir};
use crate::output::colors;

/// One written transcript file
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub entry_count: usize,
    pub skipped_lines: usize,
}

/// Totals for an export run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub projects: usize,
    pub files_exported: usize,
    pub files_failed: usize,
    pub entries: usize,
}

impl ExportSummary {
    fn absorb(&mut self, other: ExportSummary) {
        self.projects += other.projects;
        self.files_exported += other.files_exported;
        self.files_failed += other.files_failed;
        self.entries += other.entries;
    }
}

/// Export every project under the configured projects directory
pub fn export_all(config: &ExportConfig) -> Result<ExportSummary> {
    if !config.projects_dir.is_dir() {
        bail!(
            "Projects directory does not exist: {}",
            config.projects_dir.display()
        );
    }

    let assembler = TranscriptAssembler::for_language(config.language);
    let mut summary = ExportSummary::default();

    for project in find_projects(&config.projects_dir) {
        if let Some(filter) = &config.project_filter {
            if !project.name.contains(filter.as_str()) {
                continue;
            }
        }

        println!("\n{} {}", colors::label("Processing project:"), colors::project(&project.name));
        match export_project(&assembler, &project, &config.output_dir) {
            Ok(project_summary) => summary.absorb(project_summary),
            Err(e) => {
                warn!(project = %project.name, error = %e, "Project export failed");
                println!("  {}", colors::error(&format!("{:#}", e)));
            }
        }
    }

    Ok(summary)
}

/// Export all conversations of one project into its own output sub-directory.
/// A failing file is reported and does not stop the others.
pub fn export_project(
    assembler: &TranscriptAssembler,
    project: &ProjectDir,
    output_root: &Path,
) -> Result<ExportSummary> {
    let readable = project.readable_name();
    println!("  {} {}", colors::label("Readable name:"), readable);

    let output_dir = output_root.join(project.output_dir_name());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut summary = ExportSummary {
        projects: 1,
        ..Default::default()
    };

    for file in find_conversation_files(&project.path) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {} {}", colors::label("Processing file:"), name);

        match export_file(assembler, &file, &output_dir) {
            Ok(exported) => {
                let mut message = format!(
                    "Exported: {} (total {} messages)",
                    colors::path(&exported.path),
                    colors::format_count(exported.entry_count)
                );
                if exported.skipped_lines > 0 {
                    message.push_str(&format!(", {} malformed lines skipped", exported.skipped_lines));
                }
                println!("    {}", colors::success(&message));
                summary.files_exported += 1;
                summary.entries += exported.entry_count;
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Conversation export failed");
                println!("    {}", colors::error(&format!("{:#}", e)));
                summary.files_failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Assemble one conversation log and write it under `output_dir`
pub fn export_file(assembler: &TranscriptAssembler, path: &Path, output_dir: &Path) -> Result<ExportedFile> {
    let identifier = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let _span = info_span!("conversation", file = %identifier).entered();

    let file = File::open(path).with_context(|| format!("Cannot read file {}", path.display()))?;
    let export = assembler
        .process_reader(BufReader::new(file), &identifier)
        .with_context(|| format!("Cannot read file {}", path.display()))?;

    let output_path = output_dir.join(&export.filename);
    std::fs::write(&output_path, &export.text)
        .with_context(|| format!("Cannot write to file {}", output_path.display()))?;

    Ok(ExportedFile {
        path: output_path,
        entry_count: export.entry_count,
        skipped_lines: export.skipped_lines,
    })
}
