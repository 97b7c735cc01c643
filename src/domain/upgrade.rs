//! Verification of migrated journals.
//!
//! A migration rewrites a journal into a new location. Before the result is
//! trusted, the migrated journal is re-read and compared entry by entry with
//! the journal it came from.

use crate::domain::{Entry, Journal};
use crate::error::UpgradeValidationError;

fn describe(entry: &Entry) -> String {
    format!("[{}] {}", entry.date.format("%Y-%m-%d %H:%M:%S"), entry.title)
}

/// Compare a journal with its re-derived, migrated counterpart
pub fn verify_upgrade(before: &Journal, after: &Journal) -> Result<(), UpgradeValidationError> {
    if before.len() != after.len() {
        return Err(UpgradeValidationError::new(format!(
            "journal '{}' had {} entries, the upgraded journal has {}",
            before.name,
            before.len(),
            after.len()
        )));
    }

    for (idx, (old, new)) in before.entries.iter().zip(&after.entries).enumerate() {
        if old.date != new.date || old.title != new.title {
            return Err(UpgradeValidationError::new(format!(
                "entry {} changed from {} to {}",
                idx + 1,
                describe(old),
                describe(new)
            )));
        }
        if old.body != new.body {
            return Err(UpgradeValidationError::new(format!(
                "body of entry {} ({}) changed",
                idx + 1,
                describe(old)
            )));
        }
    }

    Ok(())
}
