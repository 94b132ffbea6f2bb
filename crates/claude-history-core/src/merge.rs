//! Merge engine: groups consecutive same-role messages into transcript entries
//!
//! The engine is an explicit two-state machine. `push` either extends the
//! pending group or flushes it when the role changes; `finish` flushes
//! whatever is left at end of input. Both go through the same render path.

use tracing::debug;

use crate::labels::LabelPack;
use crate::render::{format_header, render_content};
use crate::types::{ClassifiedMessage, Content};

#[derive(Debug, Default)]
enum MergeState {
    #[default]
    Empty,
    Accumulating {
        role: String,
        members: Vec<ClassifiedMessage>,
    },
}

/// Stateful grouping of classified messages
#[derive(Debug)]
pub struct MergeEngine {
    labels: LabelPack,
    state: MergeState,
}

impl MergeEngine {
    pub fn new(labels: LabelPack) -> Self {
        Self {
            labels,
            state: MergeState::Empty,
        }
    }

    /// Feed the next message. Returns the rendered entry of the previous
    /// group when this message starts a new role run and that group
    /// rendered to something.
    pub fn push(&mut self, message: ClassifiedMessage) -> Option<String> {
        if let MergeState::Accumulating { role, members } = &mut self.state {
            if *role == message.role {
                members.push(message);
                return None;
            }
        }

        let role = message.role.clone();
        let previous = std::mem::replace(
            &mut self.state,
            MergeState::Accumulating {
                role,
                members: vec![message],
            },
        );
        self.render_state(previous)
    }

    /// Flush the pending group at end of input
    pub fn finish(&mut self) -> Option<String> {
        let previous = std::mem::take(&mut self.state);
        self.render_state(previous)
    }

    /// Whether a group is waiting to be flushed
    pub fn is_pending(&self) -> bool {
        matches!(self.state, MergeState::Accumulating { .. })
    }

    fn render_state(&self, state: MergeState) -> Option<String> {
        match state {
            MergeState::Empty => None,
            MergeState::Accumulating { role, members } => {
                let entry = render_group(&members, &self.labels);
                if entry.is_none() {
                    debug!(role = %role, members = members.len(), "Dropping group with no visible content");
                }
                entry
            }
        }
    }
}

/// Render one group: a shared header from the first member, then every
/// member's body. Returns `None` when no member contributed anything.
pub fn render_group(members: &[ClassifiedMessage], labels: &LabelPack) -> Option<String> {
    let first = members.first()?;
    let mut output = format_header(&first.role, &first.timestamp, labels);
    let mut has_body = false;

    for (i, message) in members.iter().enumerate() {
        if message.has_tools {
            if i > 0 && !members[i - 1].has_tools {
                output.push('\n');
            }
            if let Some(body) = tool_body(&message.content, labels) {
                output.push_str(&body);
                has_body = true;
            }
        } else {
            if !message.text.trim().is_empty() {
                has_body = true;
            }
            output.push_str(&message.text);
        }
    }

    if !has_body {
        return None;
    }

    output.push_str("\n\n");
    Some(output)
}

/// Full tool-framed body of one message, without the per-message header
/// and its leading blank line (the group header replaces both).
fn tool_body(content: &Content, labels: &LabelPack) -> Option<String> {
    let rendered = render_content(content, labels);
    if !rendered.has_content {
        return None;
    }

    let body = format!("{}\n\n", rendered.text);
    // Only a blank first line is dropped; leading text stays in the transcript
    Some(match body.strip_prefix('\n') {
        Some(rest) => rest.to_string(),
        None => body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_content;
    use crate::labels::Language;
    use crate::render::SEPARATOR_LENGTH;
    use serde_json::{json, Value};

    fn message(role: &str, timestamp: &str, content: Value) -> ClassifiedMessage {
        let content = Content::from_value(&content).unwrap();
        let analysis = analyze_content(&content);
        ClassifiedMessage {
            role: role.to_string(),
            timestamp: timestamp.to_string(),
            text: analysis.text,
            has_tools: analysis.has_tools,
            content,
        }
    }

    fn header(label: &str, time: &str) -> String {
        let sep = "─".repeat(SEPARATOR_LENGTH);
        format!("\n{sep}\n{label} | {time}\n{sep}\n")
    }

    fn run(messages: Vec<ClassifiedMessage>) -> Vec<String> {
        let mut engine = MergeEngine::new(Language::En.labels());
        let mut entries: Vec<String> = messages.into_iter().filter_map(|m| engine.push(m)).collect();
        entries.extend(engine.finish());
        entries
    }

    #[test]
    fn test_same_role_text_merges() {
        let entries = run(vec![
            message("user", "2025-01-01T00:00:00Z", json!("hi")),
            message("user", "2025-01-01T00:00:05Z", json!("there")),
        ]);
        assert_eq!(entries, vec![format!("{}hithere\n\n", header("👤 User", "2025-01-01T00:00:00"))]);
    }

    #[test]
    fn test_role_change_flushes() {
        let mut engine = MergeEngine::new(Language::En.labels());
        assert!(engine.push(message("user", "", json!("question"))).is_none());
        assert!(engine.is_pending());

        let flushed = engine.push(message("assistant", "", json!("answer"))).unwrap();
        assert!(flushed.contains("👤 User"));
        assert!(flushed.ends_with("question\n\n"));

        let last = engine.finish().unwrap();
        assert!(last.contains("🤖 Assistant"));
        assert!(last.ends_with("answer\n\n"));
        assert!(!engine.is_pending());
        assert!(engine.finish().is_none());
    }

    #[test]
    fn test_entry_count_matches_role_runs() {
        let roles = ["user", "user", "assistant", "assistant", "assistant", "user", "assistant"];
        let messages = roles.iter().map(|r| message(r, "", json!("text"))).collect();
        assert_eq!(run(messages).len(), 4);
    }

    #[test]
    fn test_tool_message_after_text_gets_separator() {
        let entries = run(vec![
            message("assistant", "", json!("Let me check.")),
            message(
                "assistant",
                "",
                json!([{"type": "tool_use", "name": "Read", "input": {"path": "/a"}}]),
            ),
            message("assistant", "", json!("Done.")),
        ]);
        assert_eq!(entries.len(), 1);
        let body = entries[0].strip_prefix(&header("🤖 Assistant", "")).unwrap();
        assert_eq!(body, "Let me check.\n\n🔧 Read\nArgs: {path: /a}\n\n\nDone.\n\n");
    }

    #[test]
    fn test_text_first_tool_message_keeps_text() {
        let entries = run(vec![message(
            "assistant",
            "",
            json!([
                {"type": "text", "text": "Reading"},
                {"type": "tool_use", "name": "Read"}
            ]),
        )]);
        let body = entries[0].strip_prefix(&header("🤖 Assistant", "")).unwrap();
        assert_eq!(body, "Reading\n\n🔧 Read\n\n\n\n\n");
    }

    #[test]
    fn test_consecutive_tool_messages_have_no_extra_separator() {
        let entries = run(vec![
            message("user", "", json!([{"type": "tool_result", "content": "one"}])),
            message("user", "", json!([{"type": "tool_result", "content": "two"}])),
        ]);
        let body = entries[0].strip_prefix(&header("👤 User", "")).unwrap();
        assert_eq!(body, "✅ Result:\n\none\n\n\n✅ Result:\n\ntwo\n\n\n\n\n");
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let entries = run(vec![
            message("user", "", json!("   ")),
            message("assistant", "", json!("real")),
        ]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("real"));
    }

    #[test]
    fn test_render_group_empty_slice() {
        assert!(render_group(&[], &Language::En.labels()).is_none());
    }
}
