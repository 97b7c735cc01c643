//! Configuration management

use crate::domain::{JournalSettings, TimeFormat};
use crate::error::{JcardError, Result, SignaledError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_JOURNAL: &str = "default";

/// Linewrap written into freshly initialized configs
pub const INITIAL_LINEWRAP: usize = 79;

/// A journal registered in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeformat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linewrap: Option<usize>,
}

impl JournalConfig {
    pub fn new(path: PathBuf) -> Self {
        JournalConfig {
            path,
            timeformat: None,
            linewrap: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeformat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linewrap: Option<usize>,
    #[serde(default)]
    pub journals: BTreeMap<String, JournalConfig>,
}

/// A `--config-override KEY VALUE` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverride {
    pub key: String,
    pub value: String,
}

impl ConfigOverride {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigOverride {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build overrides from a flat `[key, value, key, value, ...]` list
    pub fn from_pairs(raw: &[String]) -> Result<Vec<Self>> {
        if raw.len() % 2 != 0 {
            return Err(JcardError::Config(
                "Each --config-override needs a key and a value".to_string(),
            ));
        }
        Ok(raw
            .chunks(2)
            .map(|pair| ConfigOverride::new(pair[0].clone(), pair[1].clone()))
            .collect())
    }

    fn apply(&self, settings: &mut JournalSettings) -> Result<()> {
        match self.key.as_str() {
            "linewrap" => {
                let linewrap = self.value.parse::<usize>().map_err(|_| {
                    JcardError::Config(format!(
                        "Invalid linewrap override: '{}' is not a non-negative integer",
                        self.value
                    ))
                })?;
                settings.linewrap = Some(linewrap);
            }
            "timeformat" => settings.timeformat = TimeFormat::parse(&self.value)?,
            other => {
                return Err(JcardError::Config(format!(
                    "Unknown override key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

/// Fail when the directory that should hold the config is a regular file
fn check_config_directory(config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        if dir.exists() && !dir.is_dir() {
            return Err(SignaledError::config_directory_is_file(dir).into());
        }
    }
    Ok(())
}

impl Config {
    /// Config location: `JCARD_CONFIG`, then the XDG config directory
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("JCARD_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
            .map_err(|_| {
                JcardError::Config(
                    "Cannot locate a config directory: set JCARD_CONFIG or HOME".to_string(),
                )
            })?;

        Ok(base.join("jcard").join("config.toml"))
    }

    /// Load config from `path`; a missing file yields the default config
    pub fn load(path: &Path) -> Result<Self> {
        check_config_directory(path)?;

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(JcardError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| JcardError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to `path`, creating its directory when needed
    pub fn save(&self, path: &Path) -> Result<()> {
        check_config_directory(path)?;

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "Saved config");

        Ok(())
    }

    pub fn journal(&self, name: &str) -> Result<&JournalConfig> {
        self.journals
            .get(name)
            .ok_or_else(|| JcardError::JournalNotFound(name.to_string()))
    }

    /// Settings shared by every journal, with overrides applied
    pub fn global_settings(&self, overrides: &[ConfigOverride]) -> Result<JournalSettings> {
        self.resolve(None, overrides)
    }

    /// Settings for a registered journal: journal values beat global ones,
    /// overrides beat both
    pub fn settings_for(&self, name: &str, overrides: &[ConfigOverride]) -> Result<JournalSettings> {
        let journal = self.journal(name)?;
        self.resolve(Some(journal), overrides)
    }

    fn resolve(
        &self,
        journal: Option<&JournalConfig>,
        overrides: &[ConfigOverride],
    ) -> Result<JournalSettings> {
        let timeformat = journal
            .and_then(|j| j.timeformat.as_deref())
            .or(self.timeformat.as_deref())
            .map(TimeFormat::parse)
            .transpose()?
            .unwrap_or_default();
        let linewrap = journal.and_then(|j| j.linewrap).or(self.linewrap);

        let mut settings = JournalSettings {
            timeformat,
            linewrap,
        };
        for config_override in overrides {
            config_override.apply(&mut settings)?;
        }

        Ok(settings)
    }
}
