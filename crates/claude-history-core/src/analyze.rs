//! Single-pass content analysis: plain text and tool detection

use crate::clean::clean_content;
use crate::types::{Content, ContentItem};

/// Plain-text portion of a payload and whether it carries tool activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentAnalysis {
    pub text: String,
    pub has_tools: bool,
}

/// Classify a content payload in one pass.
///
/// Text items are cleaned and joined with newlines; tool invocations and
/// results only set `has_tools`. Thinking and unknown items contribute nothing.
pub fn analyze_content(content: &Content) -> ContentAnalysis {
    match content {
        Content::PlainText(s) => ContentAnalysis {
            text: clean_content(s),
            has_tools: false,
        },
        Content::Items(items) => {
            let mut parts = Vec::new();
            let mut has_tools = false;

            for item in items {
                if item.is_tool() {
                    has_tools = true;
                }
                if let ContentItem::Text(text) = item {
                    if !text.is_empty() {
                        parts.push(clean_content(text));
                    }
                }
            }

            ContentAnalysis {
                text: parts.join("\n"),
                has_tools,
            }
        }
        Content::Unsupported => ContentAnalysis::default(),
    }
}
