//! Application layer - Use cases and orchestration

pub mod export;
pub mod init;
pub mod migrate;
pub mod open_journal;

pub use export::ExportService;
pub use init::init;
pub use migrate::MigrateService;
pub use open_journal::{open_journal, JournalSelector};
