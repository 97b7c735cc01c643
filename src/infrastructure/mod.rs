//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;

pub use config::{Config, ConfigOverride, JournalConfig};
pub use repository::FileSystemRepository;
