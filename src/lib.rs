//! talkctl - speech driver control layer for screen readers
//!
//! Models the speech side of a screen reader core: pluggable speech drivers
//! behind a registry, a single engine worker thread that owns the active
//! driver, and a settings layer that relays preference changes onto that
//! thread as ordered commands.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod settings;

pub use error::{Result, TalkctlError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "talkctl";
