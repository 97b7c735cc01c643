//! Export a journal as cards use case

use crate::application::open_journal::{open_journal, JournalSelector};
use crate::error::Result;
use crate::export::export_journal;
use crate::infrastructure::{Config, ConfigOverride};
use tracing::info;

/// Service rendering a selected journal as box-drawing cards
pub struct ExportService {
    config: Config,
    overrides: Vec<ConfigOverride>,
}

impl ExportService {
    pub fn new(config: Config, overrides: Vec<ConfigOverride>) -> Self {
        Self { config, overrides }
    }

    /// Render every entry of the selected journal
    pub fn execute(&self, selector: &JournalSelector) -> Result<String> {
        let journal = open_journal(&self.config, selector, &self.overrides)?;
        let rendered = export_journal(&journal)?;
        info!(journal = %journal.name, entries = journal.len(), "Exported journal");
        Ok(rendered)
    }
}
