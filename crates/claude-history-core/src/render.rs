//! Content rendering utilities
//!
//! Turns a message payload into transcript body text (tool framing included),
//! and renders the role/timestamp banner that opens every transcript entry.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::clean::{clean_content, is_truthy, plain_string};
use crate::labels::LabelPack;
use crate::types::{Content, ContentItem};

/// Width of the header separator lines
pub const SEPARATOR_LENGTH: usize = 80;

/// Separator glyph used in headers
pub const SEPARATOR_CHAR: char = '─';

/// Tool results longer than this (in characters) are truncated
pub const MAX_RESULT_LENGTH: usize = 5000;

/// ISO 8601 date-time core, with optional `Z` or `±HH:MM` suffix
static ISO_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T[\d:]+\.?\d*)(?:Z|([+-]\d{2}:\d{2}))?")
        .expect("Invalid regex pattern for ISO timestamp")
});

/// Rendered message body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBody {
    pub text: String,
    /// At least one item produced output
    pub has_content: bool,
}

/// Render a content payload into body text, tool framing included.
pub fn render_content(content: &Content, labels: &LabelPack) -> RenderedBody {
    match content {
        Content::PlainText(s) => {
            let cleaned = clean_content(s);
            if cleaned.trim().is_empty() {
                RenderedBody::default()
            } else {
                RenderedBody {
                    text: cleaned,
                    has_content: true,
                }
            }
        }
        Content::Items(items) => render_items(items, labels),
        Content::Unsupported => RenderedBody::default(),
    }
}

fn render_items(items: &[ContentItem], labels: &LabelPack) -> RenderedBody {
    let mut parts: Vec<String> = Vec::new();
    // A tool run right after text (or at the start) gets a blank line before it
    let mut is_first_tool = true;

    for item in items {
        match item {
            ContentItem::Thinking | ContentItem::Unknown => {}
            ContentItem::Text(text) => {
                if !text.trim().is_empty() {
                    parts.push(clean_content(text));
                    is_first_tool = true;
                }
            }
            ContentItem::ToolUse { name, input } => {
                parts.push(render_tool_use(name, input.as_ref(), is_first_tool, labels));
                is_first_tool = false;
            }
            ContentItem::ToolResult { content } => {
                parts.push(render_tool_result(content, labels));
            }
        }
    }

    RenderedBody {
        has_content: !parts.is_empty(),
        text: parts.concat(),
    }
}

fn render_tool_use(name: &str, input: Option<&Value>, is_first: bool, labels: &LabelPack) -> String {
    let newline = if is_first { "\n\n" } else { "\n" };
    let mut output = format!("{}{} {}\n", newline, labels.tool, name);

    if let Some(input) = input.filter(|v| is_truthy(v)) {
        output.push_str(&format!("{} {}\n", labels.param, format_structure(input)));
    }

    output
}

/// Truncation happens on the raw content, before line-number cleaning.
fn render_tool_result(content: &Value, labels: &LabelPack) -> String {
    let mut raw = plain_string(content);

    if let Some(prefix) = char_prefix(&raw, MAX_RESULT_LENGTH) {
        raw = format!("{}\n{}\n", prefix, labels.truncated);
    }

    format!("\n{}\n\n{}\n", labels.result, clean_content(&raw))
}

/// First `max_chars` characters of `s`, or `None` if `s` is not longer than that
fn char_prefix(s: &str, max_chars: usize) -> Option<&str> {
    s.char_indices().nth(max_chars).map(|(end, _)| &s[..end])
}

/// Render a nested value on one line for parameter display.
///
/// Mapping keys are sorted; nested mappings recurse and their entries carry
/// two spaces per nesting level. List elements use their plain form only.
pub fn format_structure(value: &Value) -> String {
    format_structure_at(value, 0)
}

fn format_structure_at(value: &Value, indent: usize) -> String {
    let Value::Object(map) = value else {
        return display_value(value);
    };

    let pad = "  ".repeat(indent);
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    let items: Vec<String> = keys
        .into_iter()
        .map(|key| {
            let value = &map[key];
            match value {
                Value::Object(_) => {
                    format!("{}{}: {}", pad, key, format_structure_at(value, indent + 1))
                }
                Value::Array(values) => {
                    let joined: Vec<String> = values.iter().map(display_value).collect();
                    format!("{}{}: [{}]", pad, key, joined.join(", "))
                }
                _ => format!("{}{}: {}", pad, key, display_value(value)),
            }
        })
        .collect();

    format!("{{{}}}", items.join(", "))
}

/// Strings unquoted, everything else in compact JSON form
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep only the `YYYY-MM-DDTHH:MM:SS[.fraction]` core of an ISO timestamp.
/// Anything else passes through unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return String::new();
    }

    match ISO_TIMESTAMP.captures(timestamp).and_then(|c| c.get(1)) {
        Some(core) => core.as_str().to_string(),
        None => timestamp.to_string(),
    }
}

/// Banner opening every transcript entry: blank line, separator,
/// `role | time`, separator.
pub fn format_header(role: &str, timestamp: &str, labels: &LabelPack) -> String {
    let separator: String = std::iter::repeat(SEPARATOR_CHAR).take(SEPARATOR_LENGTH).collect();
    format!(
        "\n{sep}\n{} | {}\n{sep}\n",
        labels.role_label(role),
        format_timestamp(timestamp),
        sep = separator
    )
}
