//! File system repository for plain-text journals

use crate::domain::parser::{parse_journal, write_journal};
use crate::domain::{Entry, Journal, JournalSettings};
use crate::error::{JcardError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Reads and writes journals stored as a single file or a folder of files
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub path: PathBuf,
}

impl FileSystemRepository {
    pub fn new(path: PathBuf) -> Self {
        FileSystemRepository { path }
    }

    pub fn is_folder(&self) -> bool {
        self.path.is_dir()
    }

    /// Load every entry, sorted by date, into a journal named `name`
    pub fn load(&self, name: &str, settings: JournalSettings) -> Result<Journal> {
        if !self.path.exists() {
            return Err(JcardError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("journal file not found: {}", self.path.display()),
            )));
        }

        let entries = if self.is_folder() {
            self.load_folder()?
        } else {
            Self::load_file(&self.path)?
        };

        let mut journal = Journal::new(name, settings).with_entries(entries);
        journal.sort();
        debug!(
            journal = %journal.name,
            path = %self.path.display(),
            entries = journal.len(),
            "Loaded journal"
        );

        Ok(journal)
    }

    fn load_file(path: &Path) -> Result<Vec<Entry>> {
        let text = fs::read_to_string(path)?;
        parse_journal(&text, path)
    }

    /// Parse every `*.txt` file below the folder, walked in name order
    fn load_folder(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for dir_entry in WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dir_entry.path();
            if !dir_entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("txt")
            {
                continue;
            }
            entries.extend(Self::load_file(path)?);
        }

        Ok(entries)
    }

    /// Write entries as a single plain-text journal file
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, write_journal(entries))?;
        Ok(())
    }
}
