//! jcard - Journal entries rendered as box-drawing cards
//!
//! Reads plain-text journals and renders every entry as a fixed-width card
//! with Unicode borders, reporting a precise error when the configured width
//! cannot hold the timestamp.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod export;
pub mod infrastructure;

pub use error::{ErrorKind, JcardError, SignaledError};
