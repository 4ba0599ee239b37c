//! Speech settings
//!
//! Binds user-facing preferences to the engine thread. Each setter persists
//! the new value, then posts the matching command; the engine applies it on
//! its own thread and handles any failure there. Callers get a result for
//! the persistence step only - nothing comes back from the engine.

use crate::config::Config;
use crate::engine::EngineHandle;
use crate::{Result, TalkctlError};
use log::debug;

/// User-facing speech preferences bound to a running engine
pub struct SpeechSettings {
    config: Config,
    engine: EngineHandle,
}

impl SpeechSettings {
    /// Bind a configuration store to an engine handle
    pub fn new(config: Config, engine: EngineHandle) -> Self {
        Self { config, engine }
    }

    /// Currently persisted driver selection
    pub fn driver(&self) -> String {
        self.config.driver()
    }

    /// Currently persisted rate, if set
    pub fn rate(&self) -> Option<u8> {
        self.config.rate()
    }

    /// Currently persisted volume, if set
    pub fn volume(&self) -> Option<u8> {
        self.config.volume()
    }

    /// Change the speech driver selection
    ///
    /// Persists the new identifier, then posts one command that makes the
    /// engine switch to the new driver and restart it, in that order, on
    /// the engine thread. The engine validates the identifier; an unknown
    /// one is logged there and the previous driver keeps running.
    pub fn set_driver(&mut self, selection: &str) -> Result<()> {
        debug!("Driver selection changed to {}", selection);

        self.config.set_driver(selection);
        self.config.save()?;

        self.engine.select_driver(selection);
        Ok(())
    }

    /// Change the speech rate (0-100)
    pub fn set_rate(&mut self, rate: u8) -> Result<()> {
        validate_percent("rate", rate)?;

        self.config.set_rate(rate);
        self.config.save()?;

        self.engine.set_rate(rate);
        Ok(())
    }

    /// Change the speech volume (0-100)
    pub fn set_volume(&mut self, volume: u8) -> Result<()> {
        validate_percent("volume", volume)?;

        self.config.set_volume(volume);
        self.config.save()?;

        self.engine.set_volume(volume);
        Ok(())
    }
}

fn validate_percent(what: &str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(TalkctlError::Config(format!(
            "Speech {} must be 0-100, got {}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent("rate", 0).is_ok());
        assert!(validate_percent("rate", 100).is_ok());
        assert!(validate_percent("rate", 101).is_err());
    }
}
