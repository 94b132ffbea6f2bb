//! Transcript assembly: JSONL lines in, finished transcript out

use std::io::BufRead;

use serde_json::Value;
use tracing::{debug, warn};

use crate::analyze::analyze_content;
use crate::errors::ExportError;
use crate::filename::derive_filename;
use crate::labels::{LabelPack, Language};
use crate::merge::MergeEngine;
use crate::types::{ClassifiedMessage, Export, Record};

/// Parse one JSONL line. Blank lines yield `Ok(None)`.
pub fn parse_record(raw: &str) -> Result<Option<Record>, ExportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(Record::from_value(&value)))
}

/// Builds one transcript per conversation with a fixed label pack
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptAssembler {
    labels: LabelPack,
}

impl TranscriptAssembler {
    pub fn new(labels: LabelPack) -> Self {
        Self { labels }
    }

    pub fn for_language(language: Language) -> Self {
        Self::new(language.labels())
    }

    /// Reduce a record to a merge-ready message. Records outside the
    /// conversation, with `null` content, or with nothing to show are dropped.
    pub fn classify(&self, record: Record) -> Option<ClassifiedMessage> {
        if !record.kind.is_conversation() {
            return None;
        }
        let content = record.content?;
        let analysis = analyze_content(&content);
        if analysis.text.trim().is_empty() && !analysis.has_tools {
            return None;
        }

        Some(ClassifiedMessage {
            role: record.role,
            timestamp: record.timestamp,
            text: analysis.text,
            has_tools: analysis.has_tools,
            content,
        })
    }

    /// Process an in-memory sequence of lines
    pub fn process_lines<I, S>(&self, lines: I, identifier: &str) -> Export
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assembly = Assembly::new(self);
        for (idx, line) in lines.into_iter().enumerate() {
            assembly.feed(idx + 1, line.as_ref());
        }
        assembly.finish(identifier)
    }

    /// Process a reader line by line. A read failure aborts this
    /// conversation only.
    pub fn process_reader<R: BufRead>(&self, reader: R, identifier: &str) -> Result<Export, ExportError> {
        let mut assembly = Assembly::new(self);
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            assembly.feed(idx + 1, &line);
        }
        Ok(assembly.finish(identifier))
    }
}

/// Mutable state for one pass over one conversation
struct Assembly<'a> {
    assembler: &'a TranscriptAssembler,
    engine: MergeEngine,
    text: String,
    entry_count: usize,
    skipped_lines: usize,
}

impl<'a> Assembly<'a> {
    fn new(assembler: &'a TranscriptAssembler) -> Self {
        Self {
            assembler,
            engine: MergeEngine::new(assembler.labels),
            text: String::new(),
            entry_count: 0,
            skipped_lines: 0,
        }
    }

    fn feed(&mut self, line_number: usize, raw: &str) {
        let record = match parse_record(raw) {
            Ok(Some(record)) => record,
            Ok(None) => return,
            Err(e) => {
                warn!(line = line_number, error = %e, "Failed to parse JSON line, skipping");
                self.skipped_lines += 1;
                return;
            }
        };

        let kind = record.kind;
        match self.assembler.classify(record) {
            Some(message) => {
                let entry = self.engine.push(message);
                self.emit(entry);
            }
            None => debug!(line = line_number, kind = %kind, "Record contributes nothing"),
        }
    }

    fn emit(&mut self, entry: Option<String>) {
        if let Some(entry) = entry {
            self.text.push_str(&entry);
            self.entry_count += 1;
        }
    }

    fn finish(mut self, identifier: &str) -> Export {
        let entry = self.engine.finish();
        self.emit(entry);

        let filename = derive_filename(&self.text, identifier, &self.assembler.labels);
        Export {
            text: self.text,
            filename,
            entry_count: self.entry_count,
            skipped_lines: self.skipped_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SEPARATOR_LENGTH;
    use crate::types::RecordKind;
    use serde_json::json;
    use std::io::{Cursor, Read};

    fn line(value: serde_json::Value) -> String {
        value.to_string()
    }

    fn en() -> TranscriptAssembler {
        TranscriptAssembler::for_language(Language::En)
    }

    #[test]
    fn test_parse_record() {
        assert!(parse_record("   ").unwrap().is_none());
        assert!(matches!(parse_record("{not json"), Err(ExportError::Json(_))));
        let record = parse_record(r#"{"type":"assistant","message":{"role":"assistant","content":"x"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(record.kind, RecordKind::Assistant);
    }

    #[test]
    fn test_full_conversation() {
        let lines = vec![
            line(json!({"type": "file-history-snapshot", "snapshot": {}})),
            line(json!({
                "type": "user",
                "timestamp": "2025-12-30T02:53:40.140Z",
                "message": {"role": "user", "content": "Please read the config file"}
            })),
            String::new(),
            line(json!({
                "type": "assistant",
                "timestamp": "2025-12-30T02:53:42.000Z",
                "message": {"role": "assistant", "content": [
                    {"type": "thinking", "thinking": "plan"},
                    {"type": "tool_use", "name": "Read", "input": {"path": "/a"}}
                ]}
            })),
            line(json!({
                "type": "user",
                "timestamp": "2025-12-30T02:53:43.000Z",
                "message": {"role": "user", "content": [
                    {"type": "tool_result", "content": "     1→key = 1"}
                ]}
            })),
            line(json!({
                "type": "assistant",
                "timestamp": "2025-12-30T02:53:44.000Z",
                "message": {"role": "assistant", "content": [{"type": "text", "text": "It sets key to 1."}]}
            })),
        ];

        let export = en().process_lines(&lines, "abc.jsonl");
        assert_eq!(export.entry_count, 4);
        assert_eq!(export.skipped_lines, 0);
        assert_eq!(export.filename, "abc_Pleasereadtheconfigfile_key1.txt");

        let sep = "─".repeat(SEPARATOR_LENGTH);
        let expected = format!(
            "\n{sep}\n👤 User | 2025-12-30T02:53:40.140\n{sep}\nPlease read the config file\n\n\
             \n{sep}\n🤖 Assistant | 2025-12-30T02:53:42.000\n{sep}\n\n🔧 Read\nArgs: {{path: /a}}\n\n\n\n\n\
             \n{sep}\n👤 User | 2025-12-30T02:53:43.000\n{sep}\n✅ Result:\n\nkey = 1\n\n\n\n\n\
             \n{sep}\n🤖 Assistant | 2025-12-30T02:53:44.000\n{sep}\nIt sets key to 1.\n\n"
        );
        assert_eq!(export.text, expected);
    }

    #[test]
    fn test_malformed_lines_are_counted_and_skipped() {
        let lines = vec![
            "{broken".to_string(),
            line(json!({"type": "user", "message": {"role": "user", "content": "hello there"}})),
            "also broken}".to_string(),
        ];
        let export = en().process_lines(&lines, "s.jsonl");
        assert_eq!(export.skipped_lines, 2);
        assert_eq!(export.entry_count, 1);
        assert!(export.text.contains("hello there"));
    }

    #[test]
    fn test_records_without_content_are_dropped() {
        let lines = vec![
            line(json!({"type": "user", "message": {"role": "user", "content": null}})),
            line(json!({"type": "user", "message": {"role": "user"}})),
            line(json!({"type": "assistant", "message": {"role": "assistant", "content": "  "}})),
            line(json!({"type": "assistant", "message": {"role": "assistant", "content": [{"type": "thinking"}]}})),
            line(json!({"type": "system", "message": {"role": "system", "content": "boot"}})),
        ];
        let export = en().process_lines(&lines, "empty.jsonl");
        assert_eq!(export.entry_count, 0);
        assert_eq!(export.text, "");
        assert_eq!(export.filename, "empty.txt");
    }

    #[test]
    fn test_process_reader_matches_lines() {
        let raw = format!(
            "{}\n{}\n",
            line(json!({"type": "user", "message": {"role": "user", "content": "hi"}})),
            line(json!({"type": "user", "message": {"role": "user", "content": "there"}}))
        );
        let assembler = en();
        let from_reader = assembler.process_reader(Cursor::new(raw.clone()), "r.jsonl").unwrap();
        let from_lines = assembler.process_lines(raw.lines(), "r.jsonl");
        assert_eq!(from_reader, from_lines);
        assert_eq!(from_reader.entry_count, 1);
        assert!(from_reader.text.contains("hithere"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_process_reader_propagates_io_errors() {
        let reader = std::io::BufReader::new(FailingReader);
        let err = en().process_reader(reader, "x.jsonl").unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
