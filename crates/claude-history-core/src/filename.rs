//! Output filename derivation from finished transcript text

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::labels::LabelPack;

/// Byte budget (UTF-8) for the content-derived part of a filename
pub const MAX_FILENAME_BYTES: usize = 60;

/// Number of meaningful lines joined into a filename
pub const MAX_MEANINGFUL_LINES: usize = 2;

/// Icons that open header, tool and result lines
const MARKER_ICONS: &[char] = &['👤', '🤖', '🔧', '✅'];

/// Label prefixes skipped regardless of the active label pack
const FIXED_LABEL_PREFIXES: &[&str] = &["参数", "Args", "Result", "结果"];

static SEPARATOR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[─=]+$").expect("Invalid regex pattern for separator line"));

static TIMESTAMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T[\d:]+").expect("Invalid regex pattern for timestamp line")
});

static LEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[#*\s-]+").expect("Invalid regex pattern for leading markers"));

/// Everything except word characters, CJK ideographs, `_` and `-`
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\x{4e00}-\x{9fa5}_-]").expect("Invalid regex pattern for filename characters")
});

/// Collect up to `max_lines` lines that read like conversation text, skipping
/// separators, headers, timestamps, tool/result framing and parameter dumps.
pub fn extract_meaningful_lines(content: &str, labels: &LabelPack, max_lines: usize) -> Vec<String> {
    let mut meaningful = Vec::new();
    if max_lines == 0 {
        return meaningful;
    }

    for line in content.split('\n') {
        if SEPARATOR_LINE.is_match(line)
            || line.starts_with(MARKER_ICONS)
            || TIMESTAMP_LINE.is_match(line)
            || is_label_line(line, labels)
            || line.trim().starts_with('{')
        {
            continue;
        }

        let stripped = line.trim();
        if stripped.chars().count() <= 3 {
            continue;
        }

        let clean = LEADING_MARKERS.replace(stripped, "");
        if !clean.is_empty() {
            meaningful.push(clean.into_owned());
            if meaningful.len() >= max_lines {
                break;
            }
        }
    }

    meaningful
}

fn is_label_line(line: &str, labels: &LabelPack) -> bool {
    line.starts_with(labels.param)
        || line.starts_with(labels.result)
        || FIXED_LABEL_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Drop every character that is unsafe in a filename
pub fn sanitize_filename_text(text: &str) -> String {
    UNSAFE_CHARS.replace_all(text, "").into_owned()
}

/// Remove trailing characters until the UTF-8 length fits `max_bytes`
pub fn truncate_to_bytes(text: &str, max_bytes: usize) -> String {
    let mut text = text.to_string();
    while text.len() > max_bytes {
        text.pop();
    }
    text
}

/// Input identifier without its extension
pub fn base_name(original_name: &str) -> String {
    Path::new(original_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| original_name.to_string())
}

/// Build `{base}_{meaningful}.txt`, or `{base}.txt` when the transcript has
/// nothing usable.
pub fn derive_filename(content: &str, original_name: &str, labels: &LabelPack) -> String {
    let base = base_name(original_name);
    let lines = extract_meaningful_lines(content, labels, MAX_MEANINGFUL_LINES);
    let text = sanitize_filename_text(&lines.join("_"));
    let text = truncate_to_bytes(&text, MAX_FILENAME_BYTES);

    if text.is_empty() {
        format!("{}.txt", base)
    } else {
        format!("{}_{}.txt", base, text)
    }
}
