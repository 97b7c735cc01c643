//! Domain layer - Entries, journals and their text format

pub mod entry;
pub mod journal;
pub mod parser;
pub mod time_format;
pub mod upgrade;

pub use entry::Entry;
pub use journal::{Journal, JournalSettings};
pub use time_format::TimeFormat;
