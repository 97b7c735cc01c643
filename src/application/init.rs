//! Initialize configuration use case

use crate::domain::time_format::DEFAULT_TIMEFORMAT;
use crate::error::{JcardError, Result};
use crate::infrastructure::config::INITIAL_LINEWRAP;
use crate::infrastructure::{Config, JournalConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Register `journal_path` under `name` in the config at `config_path`.
///
/// A new config gets the default time format and linewrap. The journal file
/// is created empty when it does not exist yet.
pub fn init(config_path: &Path, name: &str, journal_path: &Path) -> Result<PathBuf> {
    let is_new = !config_path.exists();
    let mut config = Config::load(config_path)?;

    if config.journals.contains_key(name) {
        return Err(JcardError::Config(format!(
            "Journal '{}' is already registered in {}",
            name,
            config_path.display()
        )));
    }

    if is_new {
        config.timeformat = Some(DEFAULT_TIMEFORMAT.to_string());
        config.linewrap = Some(INITIAL_LINEWRAP);
    }

    let journal_path = absolute(journal_path)?;
    if !journal_path.exists() {
        if let Some(dir) = journal_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&journal_path, "")?;
    }

    config
        .journals
        .insert(name.to_string(), JournalConfig::new(journal_path.clone()));
    config.save(config_path)?;

    info!(journal = name, path = %journal_path.display(), "Registered journal");
    Ok(journal_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config_and_journal() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config").join("config.toml");
        let journal_path = temp.path().join("journal.txt");

        let registered = init(&config_path, "default", &journal_path).unwrap();

        assert_eq!(registered, journal_path);
        assert!(journal_path.exists());
        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.linewrap, Some(INITIAL_LINEWRAP));
        assert_eq!(config.journal("default").unwrap().path, journal_path);
    }

    #[test]
    fn test_init_keeps_existing_journal_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let journal_path = temp.path().join("journal.txt");
        fs::write(&journal_path, "[2021-01-01 09:00] Keep me").unwrap();

        init(&config_path, "default", &journal_path).unwrap();

        assert_eq!(
            fs::read_to_string(&journal_path).unwrap(),
            "[2021-01-01 09:00] Keep me"
        );
    }

    #[test]
    fn test_init_adds_second_journal_without_touching_globals() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "linewrap = 100\n").unwrap();

        init(&config_path, "work", &temp.path().join("work.txt")).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.linewrap, Some(100));
        assert_eq!(config.timeformat, None);
        assert!(config.journals.contains_key("work"));
    }

    #[test]
    fn test_init_rejects_duplicate_name() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        init(&config_path, "default", &temp.path().join("a.txt")).unwrap();

        let result = init(&config_path, "default", &temp.path().join("b.txt"));
        assert!(matches!(result, Err(JcardError::Config(msg)) if msg.contains("already registered")));
    }
}
