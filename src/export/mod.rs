//! Export layer - Card rendering of entries and journals

pub mod fancy;
pub mod wrap;

pub use fancy::{export_entry, export_journal, render_card};
