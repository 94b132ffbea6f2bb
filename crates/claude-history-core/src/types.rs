//! Core type definitions for session log records

use serde_json::Value;

use crate::clean::plain_string;

/// Record type discriminator (`type` field of a log line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Assistant,
    FileHistorySnapshot,
    Other,
}

impl RecordKind {
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "user" => RecordKind::User,
            "assistant" => RecordKind::Assistant,
            "file-history-snapshot" => RecordKind::FileHistorySnapshot,
            _ => RecordKind::Other,
        }
    }

    /// Only user and assistant records make it into a transcript
    pub fn is_conversation(&self) -> bool {
        matches!(self, RecordKind::User | RecordKind::Assistant)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::User => write!(f, "user"),
            RecordKind::Assistant => write!(f, "assistant"),
            RecordKind::FileHistorySnapshot => write!(f, "file-history-snapshot"),
            RecordKind::Other => write!(f, "other"),
        }
    }
}

/// One item of a list-shaped content payload
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Text(String),
    ToolUse {
        name: String,
        input: Option<Value>,
    },
    ToolResult {
        content: Value,
    },
    Thinking,
    Unknown,
}

impl ContentItem {
    /// Build an item from its JSON form. Anything that is not an object with a
    /// known `type` becomes `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return ContentItem::Unknown;
        };

        match obj.get("type").and_then(|t| t.as_str()) {
            Some("text") => ContentItem::Text(text_field(obj.get("text"))),
            Some("tool_use") => ContentItem::ToolUse {
                name: text_field(obj.get("name")),
                input: obj.get("input").filter(|v| !v.is_null()).cloned(),
            },
            Some("tool_result") => ContentItem::ToolResult {
                content: obj.get("content").cloned().unwrap_or(Value::Null),
            },
            Some("thinking") => ContentItem::Thinking,
            _ => ContentItem::Unknown,
        }
    }

    /// Tool invocations and tool results count as tool activity
    pub fn is_tool(&self) -> bool {
        matches!(self, ContentItem::ToolUse { .. } | ContentItem::ToolResult { .. })
    }
}

/// The `content` payload of a message
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    PlainText(String),
    Items(Vec<ContentItem>),
    /// Any other JSON shape; contributes nothing
    Unsupported,
}

impl Content {
    /// Returns `None` for an explicit `null` payload, which drops the record.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Content::PlainText(s.clone())),
            Value::Array(items) => Some(Content::Items(
                items.iter().map(ContentItem::from_value).collect(),
            )),
            _ => Some(Content::Unsupported),
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        match self {
            Content::Items(items) => items,
            _ => &[],
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::PlainText(String::new())
    }
}

/// One parsed log line, reduced to the fields the transcript needs
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: RecordKind,
    /// `message.role`
    pub role: String,
    /// ISO timestamp as written in the log
    pub timestamp: String,
    /// `None` when the payload was explicitly `null`
    pub content: Option<Content>,
}

impl Record {
    /// Build a record with permissive field access: missing or mistyped
    /// fields fall back to empty values instead of failing.
    pub fn from_value(value: &Value) -> Self {
        let kind = RecordKind::from_str_lossy(value.get("type").and_then(|v| v.as_str()).unwrap_or(""));
        let timestamp = str_field(value.get("timestamp"));

        let message = value.get("message").filter(|m| m.is_object());
        let role = str_field(message.and_then(|m| m.get("role")));
        let content = match message.and_then(|m| m.get("content")) {
            Some(raw) => Content::from_value(raw),
            None => Some(Content::default()),
        };

        Self {
            kind,
            role,
            timestamp,
            content,
        }
    }
}

/// A message after content analysis, ready for the merge engine
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedMessage {
    pub role: String,
    pub timestamp: String,
    /// Cleaned plain-text portion only; tool framing is rendered at flush time
    pub text: String,
    pub has_tools: bool,
    /// Original payload, kept for the tool-framed re-render
    pub content: Content,
}

/// Finished transcript for one conversation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Export {
    pub text: String,
    pub filename: String,
    /// Number of transcript entries (merged role runs) emitted
    pub entry_count: usize,
    /// Lines that could not be parsed as JSON
    pub skipped_lines: usize,
}

fn str_field(value: Option<&Value>) -> String {
    value.and_then(|v| v.as_str()).unwrap_or_default().to_string()
}

/// Display text: non-string values are stringified rather than dropped
fn text_field(value: Option<&Value>) -> String {
    value.map(plain_string).unwrap_or_default()
}
