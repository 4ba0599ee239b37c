//! Speech driver abstraction
//!
//! A speech driver is a pluggable text-to-speech back-end identified by a
//! short string identifier ("native", "espeak", ...). Drivers are created by
//! the [`DriverRegistry`](registry::DriverRegistry) and owned exclusively by
//! the engine worker thread.

pub mod backends;
pub mod registry;

use crate::Result;

pub use registry::{DriverFactory, DriverRegistry, AUTO_DRIVER};

/// Speech driver trait
///
/// All back-ends implement this to produce synthesized speech output.
/// Implementations must be `Send` so the active driver can live on the
/// engine worker thread.
pub trait SpeechDriver: Send {
    /// Identifier of this driver ("native", "espeak", ...)
    fn id(&self) -> &str;

    /// Speak text to the user
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> Result<()>;

    /// Set speech rate (0-100, where 50 is normal)
    fn set_rate(&mut self, rate: u8) -> Result<()>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> Result<()>;
}
