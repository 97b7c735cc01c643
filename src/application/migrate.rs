//! Migrate a journal into a single plain-text file use case

use crate::application::open_journal::{open_journal, JournalSelector};
use crate::domain::upgrade::verify_upgrade;
use crate::error::{JcardError, Result};
use crate::infrastructure::{Config, ConfigOverride, FileSystemRepository};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolve symlinks and `..` in `path`, which may not exist yet
fn resolved(path: &Path) -> io::Result<PathBuf> {
    if path.exists() {
        return fs::canonicalize(path);
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", path.display()),
        )
    })?;
    Ok(resolved(parent)?.join(file_name))
}

/// Sibling of `target` the migration is written to before it is verified
fn staging_path(target: &Path) -> PathBuf {
    let name = format!(
        "{}.jcard-tmp-{}",
        target
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("journal.txt"),
        std::process::id()
    );
    target.with_file_name(name)
}

/// Service rewriting a journal (file or folder) into one file
pub struct MigrateService {
    config: Config,
    overrides: Vec<ConfigOverride>,
}

impl MigrateService {
    pub fn new(config: Config, overrides: Vec<ConfigOverride>) -> Self {
        Self { config, overrides }
    }

    /// Write the selected journal to `target` and verify the result.
    ///
    /// The journal is written to a staging file next to `target` and only
    /// renamed into place once it re-reads identically, so the source is
    /// never written or removed. A target that resolves to the source, or
    /// lies inside a source folder, is rejected. Returns the number of
    /// migrated entries.
    pub fn execute(&self, selector: &JournalSelector, target: &Path) -> Result<usize> {
        let (source_repo, _) = selector.locate(&self.config)?;
        let source = resolved(&source_repo.path)?;
        let resolved_target = resolved(target)?;
        if resolved_target == source || resolved_target.starts_with(&source) {
            return Err(JcardError::Config(format!(
                "Migration target is the journal itself: {}",
                target.display()
            )));
        }

        let before = open_journal(&self.config, selector, &self.overrides)?;
        info!(
            journal = %before.name,
            entries = before.len(),
            target = %target.display(),
            "Starting migration"
        );

        let staging = staging_path(target);
        let staging_repo = FileSystemRepository::new(staging.clone());
        staging_repo.save(&before.entries)?;

        let verified = staging_repo
            .load(&before.name, before.settings.clone())
            .and_then(|after| {
                debug!(entries = after.len(), "Re-read migrated journal");
                verify_upgrade(&before, &after)?;
                Ok(after.len())
            });

        let count = match verified {
            Ok(count) => count,
            Err(err) => {
                warn!(target = %target.display(), "Migration verification failed, discarding it");
                if let Err(remove_err) = fs::remove_file(&staging) {
                    warn!(
                        path = %staging.display(),
                        error = %remove_err,
                        "Could not remove staged migration"
                    );
                }
                return Err(err);
            }
        };

        if target.exists() {
            fs::remove_file(target)?;
        }
        fs::rename(&staging, target)?;

        info!(entries = count, "Migration verified");
        Ok(count)
    }
}
