//! Journal aggregate root

use crate::domain::{Entry, TimeFormat};

/// Settings a journal renders with, after config and overrides are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSettings {
    pub timeformat: TimeFormat,
    /// `None` or `Some(0)` both mean "use the renderer's default"
    pub linewrap: Option<usize>,
}

impl Default for JournalSettings {
    fn default() -> Self {
        JournalSettings {
            timeformat: TimeFormat::default(),
            linewrap: None,
        }
    }
}

/// A named, ordered collection of entries
#[derive(Debug, Clone)]
pub struct Journal {
    pub name: String,
    pub settings: JournalSettings,
    pub entries: Vec<Entry>,
}

impl Journal {
    pub fn new(name: impl Into<String>, settings: JournalSettings) -> Self {
        Journal {
            name: name.into(),
            settings,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    /// Sort entries chronologically, keeping file order for equal timestamps
    pub fn sort(&mut self) {
        self.entries.sort_by_key(|entry| entry.date);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_sort_is_stable() {
        let mut journal = Journal::new("default", JournalSettings::default()).with_entries(vec![
            Entry::new(at(2, 9), "later", ""),
            Entry::new(at(1, 9), "first", ""),
            Entry::new(at(1, 9), "second", ""),
        ]);

        journal.sort();

        let titles: Vec<&str> = journal.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "later"]);
    }

    #[test]
    fn test_empty_journal() {
        let journal = Journal::new("empty", JournalSettings::default());
        assert!(journal.is_empty());
        assert_eq!(journal.len(), 0);
    }
}
