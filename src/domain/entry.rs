//! Journal entry

use chrono::NaiveDateTime;

/// A single timestamped journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: NaiveDateTime,
    pub title: String,
    pub body: String,
}

impl Entry {
    pub fn new(date: NaiveDateTime, title: impl Into<String>, body: impl Into<String>) -> Self {
        Entry {
            date,
            title: title.into(),
            body: body.into(),
        }
    }
}
