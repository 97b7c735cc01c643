//! Plain-text journal format.
//!
//! Each entry starts with a bracketed timestamp header:
//!
//! ```text
//! [2021-01-01 12:00] Title sentence. Rest of the first line
//! more body text
//! ```
//!
//! This module is I/O-free: it converts between text and entries.

use crate::domain::Entry;
use crate::error::{JcardError, Result};
use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}(?::\d{2})?)\](?: (.*))?$").unwrap()
    })
}

fn sentence_end_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[.?!]+\s").unwrap())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Split header text into title and the remainder of the line
fn split_title(text: &str) -> (&str, &str) {
    match sentence_end_regex().find(text) {
        Some(m) => {
            let terminator_len = m.as_str().trim_end().len();
            let title_end = m.start() + terminator_len;
            (&text[..title_end], text[m.end()..].trim_start())
        }
        None => (text.trim_end(), ""),
    }
}

struct PendingEntry {
    date: NaiveDateTime,
    title: String,
    body_lines: Vec<String>,
}

impl PendingEntry {
    fn finish(self) -> Entry {
        let body = self.body_lines.join("\n");
        Entry::new(self.date, self.title, body.trim())
    }
}

/// Parse journal text. `source` is only used in error messages.
pub fn parse_journal(text: &str, source: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut pending: Option<PendingEntry> = None;

    for (idx, line) in text.lines().enumerate() {
        if let Some(captures) = header_regex().captures(line) {
            let raw_date = &captures[1];
            let date = parse_timestamp(raw_date).ok_or_else(|| JcardError::Parse {
                path: source.to_path_buf(),
                line: idx + 1,
                message: format!("invalid timestamp '{}'", raw_date),
            })?;

            if let Some(done) = pending.take() {
                entries.push(done.finish());
            }

            let header_text = captures.get(2).map_or("", |m| m.as_str());
            let (title, rest) = split_title(header_text.trim());
            let mut body_lines = Vec::new();
            if !rest.is_empty() {
                body_lines.push(rest.to_string());
            }
            pending = Some(PendingEntry {
                date,
                title: title.to_string(),
                body_lines,
            });
            continue;
        }

        match pending.as_mut() {
            Some(entry) => entry.body_lines.push(line.to_string()),
            None if line.trim().is_empty() => {}
            None => {
                return Err(JcardError::Parse {
                    path: source.to_path_buf(),
                    line: idx + 1,
                    message: "text before the first entry header".to_string(),
                })
            }
        }
    }

    if let Some(done) = pending.take() {
        entries.push(done.finish());
    }

    Ok(entries)
}

fn format_header_date(date: NaiveDateTime) -> String {
    if date.second() == 0 {
        date.format("%Y-%m-%d %H:%M").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Serialize entries to journal text, one blank line between entries
pub fn write_journal(entries: &[Entry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}]", format_header_date(entry.date)));
        if !entry.title.is_empty() {
            out.push(' ');
            out.push_str(&entry.title);
        }
        out.push('\n');
        if !entry.body.is_empty() {
            out.push_str(&entry.body);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn source() -> &'static Path {
        Path::new("journal.txt")
    }

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_single_entry() {
        let text = "[2021-01-01 12:00] Hello world.\nFirst body line\nSecond body line\n";
        let entries = parse_journal(text, source()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, at(1, 12, 0, 0));
        assert_eq!(entries[0].title, "Hello world.");
        assert_eq!(entries[0].body, "First body line\nSecond body line");
    }

    #[test]
    fn test_title_ends_at_first_sentence() {
        let text = "[2021-01-01 12:00] Went hiking! The weather was great.";
        let entries = parse_journal(text, source()).unwrap();

        assert_eq!(entries[0].title, "Went hiking!");
        assert_eq!(entries[0].body, "The weather was great.");
    }

    #[test]
    fn test_header_without_title() {
        let entries = parse_journal("[2021-01-01 12:00]\nbody", source()).unwrap();
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].body, "body");
    }

    #[test]
    fn test_blank_lines_inside_body_are_kept() {
        let text = "[2021-01-01 12:00] Title\na\n\nb\n\n\n[2021-01-02 08:30:15] Next\n";
        let entries = parse_journal(text, source()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, "a\n\nb");
        assert_eq!(entries[1].date, at(2, 8, 30, 15));
        assert_eq!(entries[1].title, "Next");
        assert_eq!(entries[1].body, "");
    }

    #[test]
    fn test_text_before_first_header_is_an_error() {
        let result = parse_journal("\nstray text\n[2021-01-01 12:00] Title", source());
        match result {
            Err(JcardError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        let result = parse_journal("[2021-13-45 12:00] Title", source());
        assert!(matches!(result, Err(JcardError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_empty_text_has_no_entries() {
        assert!(parse_journal("", source()).unwrap().is_empty());
        assert!(parse_journal("\n\n", source()).unwrap().is_empty());
    }

    #[test]
    fn test_write_then_parse_keeps_entries() {
        let entries = vec![
            Entry::new(at(1, 12, 0, 0), "Hello world.", "line one\n\nline three"),
            Entry::new(at(2, 8, 30, 15), "No body", ""),
        ];

        let text = write_journal(&entries);
        assert!(text.starts_with("[2021-01-01 12:00] Hello world.\n"));
        assert!(text.contains("[2021-01-02 08:30:15] No body\n"));
        assert_eq!(parse_journal(&text, source()).unwrap(), entries);
    }
}
