//! CLI command definitions

use crate::application::JournalSelector;
use crate::infrastructure::config::DEFAULT_JOURNAL;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jcard")]
#[command(about = "Render journal entries as box-drawing cards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $JCARD_CONFIG or ~/.config/jcard/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override a config value for this run (keys: linewrap, timeformat)
    #[arg(
        long,
        global = true,
        num_args = 2,
        value_names = ["KEY", "VALUE"],
        action = ArgAction::Append
    )]
    pub config_override: Vec<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a journal in the config file
    Init {
        /// Journal file or folder (created empty if missing)
        path: PathBuf,

        /// Name to register the journal under
        #[arg(short, long, default_value = DEFAULT_JOURNAL)]
        journal: String,
    },

    /// Render a journal as cards
    Export {
        /// Journal name from the config file
        journal: Option<String>,

        /// Read a journal file or folder directly instead
        #[arg(long, value_name = "PATH", conflicts_with = "journal")]
        file: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Overwrite the output file without asking
        #[arg(long)]
        force: bool,
    },

    /// Rewrite a journal into a single verified plain-text file
    Migrate {
        /// Journal name from the config file
        journal: Option<String>,

        /// Read a journal file or folder directly instead
        #[arg(long, value_name = "PATH", conflicts_with = "journal")]
        file: Option<PathBuf>,

        /// File to write the migrated journal to
        #[arg(long, value_name = "PATH")]
        to: PathBuf,

        /// Overwrite the target file without asking
        #[arg(long)]
        force: bool,
    },
}

/// Pick the journal a command reads: `--file` wins, then the name, then the default journal
pub fn journal_selector(journal: Option<String>, file: Option<PathBuf>) -> JournalSelector {
    match (file, journal) {
        (Some(path), _) => JournalSelector::Path(path),
        (None, Some(name)) => JournalSelector::Named(name),
        (None, None) => JournalSelector::Named(DEFAULT_JOURNAL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_overrides() {
        let cli = Cli::try_parse_from([
            "jcard",
            "--config-override",
            "linewrap",
            "40",
            "export",
            "work",
            "--config-override",
            "timeformat",
            "%F",
        ])
        .unwrap();

        assert_eq!(cli.config_override, vec!["linewrap", "40", "timeformat", "%F"]);
        match cli.command {
            Commands::Export { journal, file, .. } => {
                assert_eq!(journal.as_deref(), Some("work"));
                assert!(file.is_none());
            }
            other => panic!("Expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_export_file_conflicts_with_journal_name() {
        let result = Cli::try_parse_from(["jcard", "export", "work", "--file", "j.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_journal_selector() {
        assert_eq!(
            journal_selector(None, None),
            JournalSelector::Named("default".to_string())
        );
        assert_eq!(
            journal_selector(Some("work".to_string()), None),
            JournalSelector::Named("work".to_string())
        );
        assert_eq!(
            journal_selector(None, Some(PathBuf::from("j.txt"))),
            JournalSelector::Path(PathBuf::from("j.txt"))
        );
    }
}
