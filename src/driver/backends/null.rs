//! Silent back-end
//!
//! Accepts every operation and produces no audio. Selected explicitly by
//! users who want speech off without tearing down the engine.

use crate::driver::SpeechDriver;
use crate::Result;
use log::debug;

/// Driver that discards all speech
pub struct NullDriver;

impl NullDriver {
    pub fn new() -> Self {
        NullDriver
    }
}

impl Default for NullDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechDriver for NullDriver {
    fn id(&self) -> &str {
        "null"
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        debug!("Discarding speech: {}", text);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_rate(&mut self, _rate: u8) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_driver_accepts_everything() {
        let mut driver = NullDriver::new();

        assert_eq!(driver.id(), "null");
        assert!(driver.speak("hello").is_ok());
        assert!(driver.speak("").is_ok());
        assert!(driver.cancel().is_ok());
        assert!(driver.set_rate(0).is_ok());
        assert!(driver.set_volume(100).is_ok());
    }
}
