//! claude-history-core - Record-to-transcript pipeline for Claude Code session logs
//!
//! Turns the JSONL records of one conversation into a readable transcript:
//! content analysis and cleaning, same-role message merging, header/body
//! rendering, and a filename derived from the finished text. No filesystem
//! traversal or CLI concerns live here.

pub mod analyze;
pub mod assemble;
pub mod clean;
pub mod errors;
pub mod filename;
pub mod labels;
pub mod merge;
pub mod render;
pub mod types;

pub use analyze::{analyze_content, ContentAnalysis};
pub use assemble::{parse_record, TranscriptAssembler};
pub use clean::clean_content;
pub use errors::ExportError;
pub use filename::derive_filename;
pub use labels::{LabelPack, Language};
pub use merge::MergeEngine;
pub use render::{format_header, format_structure, format_timestamp, render_content, RenderedBody};
pub use types::*;
