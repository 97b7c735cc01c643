//! Resolve and load the journal a command operates on

use crate::domain::Journal;
use crate::error::Result;
use crate::infrastructure::{Config, ConfigOverride, FileSystemRepository};
use std::path::PathBuf;

/// Which journal a command should read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalSelector {
    /// A journal registered in the config file
    Named(String),
    /// A journal file or folder read directly, with global settings
    Path(PathBuf),
}

impl JournalSelector {
    /// Repository and display name for this selector
    pub fn locate(&self, config: &Config) -> Result<(FileSystemRepository, String)> {
        match self {
            JournalSelector::Named(name) => {
                let journal = config.journal(name)?;
                Ok((FileSystemRepository::new(journal.path.clone()), name.clone()))
            }
            JournalSelector::Path(path) => Ok((
                FileSystemRepository::new(path.clone()),
                path.display().to_string(),
            )),
        }
    }
}

/// Load the selected journal with config and overrides merged
pub fn open_journal(
    config: &Config,
    selector: &JournalSelector,
    overrides: &[ConfigOverride],
) -> Result<Journal> {
    let settings = match selector {
        JournalSelector::Named(name) => config.settings_for(name, overrides)?,
        JournalSelector::Path(_) => config.global_settings(overrides)?,
    };
    let (repository, name) = selector.locate(config)?;
    repository.load(&name, settings)
}
