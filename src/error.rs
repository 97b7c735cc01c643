//! Error types for jcard
//!
//! Expected, user-actionable failures are built from a closed catalog of
//! [`ErrorKind`]s, each bound to a message template. Two signals live outside
//! the catalog: [`UserAbort`] and [`UpgradeValidationError`].

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const CONFIG_DIRECTORY_IS_FILE: &str = "\
The path to your jcard configuration directory is a file, not a directory:

{config_directory_path}

Removing this file will allow jcard to save its configuration.";

const LINE_WRAP_TOO_SMALL_FOR_DATE_FORMAT: &str = "\
The provided linewrap value of {config_linewrap} is too small by {columns} columns
to display the timestamps in the configured time format for journal {journal}.

You can avoid this error by specifying a linewrap value that is larger by at least {columns} in the configuration file or by using --config-override at the command line";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").unwrap())
}

/// Catalog of templated, user-actionable failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The configuration directory path resolves to a regular file
    ConfigDirectoryIsFile,
    /// The render width cannot fit the timestamp border
    LineWrapTooSmallForDateFormat,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::ConfigDirectoryIsFile => "ConfigDirectoryIsFile",
            ErrorKind::LineWrapTooSmallForDateFormat => "LineWrapTooSmallForDateFormat",
        }
    }

    /// Message template with `{placeholder}` slots
    pub fn template(&self) -> &'static str {
        match self {
            ErrorKind::ConfigDirectoryIsFile => CONFIG_DIRECTORY_IS_FILE,
            ErrorKind::LineWrapTooSmallForDateFormat => LINE_WRAP_TOO_SMALL_FOR_DATE_FORMAT,
        }
    }

    /// Names of the placeholders the template requires, in order of first use
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for captures in placeholder_regex().captures_iter(self.template()) {
            if let Some(name) = captures.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A catalog failure with its fully rendered message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SignaledError {
    kind: ErrorKind,
    message: String,
}

impl SignaledError {
    /// Render `kind`'s template from named values.
    ///
    /// # Panics
    ///
    /// Panics when the template names a placeholder missing from `values`.
    /// That is a bug in the caller, not a runtime condition.
    pub fn new<I, K, V>(kind: ErrorKind, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let values: HashMap<String, String> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();

        let missing: Vec<&str> = kind
            .placeholders()
            .into_iter()
            .filter(|name| !values.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            panic!(
                "no value for placeholder `{}` of {} template",
                missing.join("`, `"),
                kind
            );
        }

        let message = placeholder_regex()
            .replace_all(kind.template(), |captures: &Captures<'_>| {
                values.get(&captures[1]).cloned().unwrap_or_default()
            })
            .into_owned();

        SignaledError { kind, message }
    }

    pub fn config_directory_is_file(path: &Path) -> Self {
        Self::new(
            ErrorKind::ConfigDirectoryIsFile,
            [("config_directory_path", path.display().to_string())],
        )
    }

    pub fn line_wrap_too_small(config_linewrap: usize, columns: usize, journal: &str) -> Self {
        Self::new(
            ErrorKind::LineWrapTooSmallForDateFormat,
            [
                ("config_linewrap", config_linewrap.to_string()),
                ("columns", columns.to_string()),
                ("journal", journal.to_string()),
            ],
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The user deliberately cancelled an interactive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cancelled by user")]
pub struct UserAbort;

/// Migrated data no longer matches the data it was migrated from
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Upgraded journal does not match the original: {message}")]
pub struct UpgradeValidationError {
    pub message: String,
}

impl UpgradeValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        UpgradeValidationError {
            message: message.into(),
        }
    }
}

/// Main error type for jcard application
#[derive(Debug, Error)]
pub enum JcardError {
    #[error(transparent)]
    Signaled(#[from] SignaledError),

    #[error(transparent)]
    UserAbort(#[from] UserAbort),

    #[error(transparent)]
    UpgradeValidation(#[from] UpgradeValidationError),

    #[error("Journal not found: {0}")]
    JournalNotFound(String),

    #[error("Parse error in {path}:{line}: {message}", path = .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl JcardError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JcardError::UserAbort(_) => 0,
            JcardError::JournalNotFound(_) => 2,
            JcardError::Signaled(_) => 3,
            JcardError::UpgradeValidation(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JcardError::JournalNotFound(name) => {
                format!(
                    "Journal not found: '{}'\n\n\
                    Suggestions:\n\
                    • Register it with 'jcard init --journal {} <PATH>'\n\
                    • Export a file directly with 'jcard export --file <PATH>'\n\
                    • Point JCARD_CONFIG at the configuration that defines it",
                    name, name
                )
            }
            JcardError::UpgradeValidation(err) => {
                format!(
                    "{}\n\n\
                    The original journal was left untouched and the migrated copy was discarded.",
                    err
                )
            }
            JcardError::Config(msg) => {
                if msg.contains("override") {
                    format!(
                        "{}\n\n\
                        Valid override keys: linewrap, timeformat\n\
                        Example: jcard --config-override linewrap 100 export",
                        msg
                    )
                } else if msg.contains("time format") {
                    format!(
                        "{}\n\n\
                        Time formats use strftime syntax\n\
                        Example: timeformat = \"%Y-%m-%d %H:%M\"",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JcardError
pub type Result<T> = std::result::Result<T, JcardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_directory_is_file_message() {
        let err = SignaledError::config_directory_is_file(Path::new("/home/me/.config/jcard"));
        assert_eq!(err.kind(), ErrorKind::ConfigDirectoryIsFile);
        assert!(err.message().contains("is a file, not a directory"));
        assert!(err.message().contains("\n\n/home/me/.config/jcard\n\n"));
        assert!(!err.message().contains('{'));
    }

    #[test]
    fn test_line_wrap_message_substitutes_every_occurrence() {
        let err = SignaledError::line_wrap_too_small(10, 8, "work");
        assert_eq!(err.kind(), ErrorKind::LineWrapTooSmallForDateFormat);
        assert!(err
            .message()
            .starts_with("The provided linewrap value of 10 is too small by 8 columns"));
        assert!(err.message().contains("for journal work."));
        assert!(err.message().contains("larger by at least 8 in"));
        assert!(!err.message().contains("{columns}"));
    }

    #[test]
    fn test_display_is_message() {
        let err = SignaledError::line_wrap_too_small(10, 8, "work");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_generic_construction_ignores_extra_values() {
        let err = SignaledError::new(
            ErrorKind::ConfigDirectoryIsFile,
            [("config_directory_path", "/tmp/x"), ("unused", "value")],
        );
        assert!(err.message().contains("/tmp/x"));
    }

    #[test]
    #[should_panic(expected = "no value for placeholder `journal`")]
    fn test_missing_placeholder_panics() {
        SignaledError::new(
            ErrorKind::LineWrapTooSmallForDateFormat,
            [("config_linewrap", "10"), ("columns", "8")],
        );
    }

    #[test]
    #[should_panic(expected = "no value for placeholder `config_linewrap`, `journal`")]
    fn test_every_missing_placeholder_is_named() {
        SignaledError::new(ErrorKind::LineWrapTooSmallForDateFormat, [("columns", "8")]);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            ErrorKind::ConfigDirectoryIsFile.placeholders(),
            vec!["config_directory_path"]
        );
        assert_eq!(
            ErrorKind::LineWrapTooSmallForDateFormat.placeholders(),
            vec!["config_linewrap", "columns", "journal"]
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(JcardError::from(UserAbort).exit_code(), 0);
        assert_eq!(JcardError::JournalNotFound("x".into()).exit_code(), 2);
        assert_eq!(
            JcardError::from(SignaledError::line_wrap_too_small(1, 2, "x")).exit_code(),
            3
        );
        assert_eq!(
            JcardError::from(UpgradeValidationError::new("boom")).exit_code(),
            4
        );
        assert_eq!(JcardError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_signaled_error_passes_through_unchanged() {
        let signaled = SignaledError::line_wrap_too_small(12, 6, "default");
        let err = JcardError::from(signaled.clone());
        assert_eq!(err.to_string(), signaled.message());
        assert_eq!(err.display_with_suggestions(), signaled.message());
    }

    #[test]
    fn test_journal_not_found_suggestions() {
        let err = JcardError::JournalNotFound("work".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("jcard init --journal work"));
        assert!(msg.contains("--file"));
    }

    #[test]
    fn test_override_suggestions() {
        let err = JcardError::Config("Unknown override key: color".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("linewrap, timeformat"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = JcardError::Config("Something odd".to_string());
        assert_eq!(
            err.display_with_suggestions(),
            "Configuration error: Something odd"
        );
    }
}
