//! espeak-ng back-end
//!
//! Spawns one espeak-ng process per utterance and kills it on cancel. This
//! keeps latency low without linking against the synthesizer, and works
//! anywhere espeak-ng is installed (including WSL, where the system speech
//! service usually is not).

use crate::driver::SpeechDriver;
use crate::{Result, TalkctlError};
use log::{debug, error};
use std::process::{Child, Command, Stdio};

/// Default espeak-ng voice
const DEFAULT_VOICE: &str = "en";

/// Driver that shells out to espeak-ng
pub struct EspeakDriver {
    /// Currently running espeak-ng process, if any
    current: Option<Child>,

    /// Rate setting (0-100)
    rate: u8,

    /// Volume setting (0-100)
    volume: u8,

    /// Voice name passed to espeak-ng
    voice: String,

    /// Resolved espeak-ng executable
    espeak_path: String,
}

impl EspeakDriver {
    /// Create a new espeak-ng driver
    ///
    /// Verifies espeak-ng is installed before returning.
    pub fn new() -> Result<Self> {
        debug!("Creating espeak-ng back-end");

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        Ok(Self {
            current: None,
            rate: 50,
            volume: 80,
            voice: DEFAULT_VOICE.to_string(),
            espeak_path,
        })
    }

    /// Find the espeak-ng executable
    fn find_espeak() -> Result<String> {
        for path in ["espeak-ng", "/usr/bin/espeak-ng"] {
            let probe = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();

            if matches!(probe, Ok(status) if status.success()) {
                return Ok(path.to_string());
            }
        }

        Err(TalkctlError::Driver(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Convert a 0-100 rate to espeak-ng speed (80-450 wpm)
    ///
    /// 0 = 80 wpm, 50 = 265 wpm, 100 = 450 wpm.
    fn rate_to_speed(rate: u8) -> u16 {
        80 + ((rate as u16) * 370 / 100)
    }

    /// Convert a 0-100 volume to espeak-ng amplitude (0-200)
    fn volume_to_amplitude(volume: u8) -> u8 {
        ((volume as u16 * 200) / 100) as u8
    }

    /// Kill the current espeak-ng process, if one is running
    fn kill_current(&mut self) {
        if let Some(mut child) = self.current.take() {
            debug!("Killing espeak-ng process");
            if child.kill().is_ok() {
                let _ = child.wait(); // reap the zombie
            }
        }
    }
}

impl SpeechDriver for EspeakDriver {
    fn id(&self) -> &str {
        "espeak"
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        // New speech replaces whatever is still playing
        self.kill_current();

        debug!("Speaking via espeak-ng: {}", text);

        let child = Command::new(&self.espeak_path)
            .arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(Self::rate_to_speed(self.rate).to_string())
            .arg("-a")
            .arg(Self::volume_to_amplitude(self.volume).to_string())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                error!("Failed to spawn espeak-ng: {}", e);
                TalkctlError::Driver(format!("Failed to start espeak-ng: {}", e))
            })?;

        self.current = Some(child);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.kill_current();
        Ok(())
    }

    fn set_rate(&mut self, rate: u8) -> Result<()> {
        debug!("Setting rate to {}", rate);
        self.rate = rate;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        debug!("Setting volume to {}", volume);
        self.volume = volume;
        Ok(())
    }
}

impl Drop for EspeakDriver {
    fn drop(&mut self) {
        self.kill_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversion() {
        assert_eq!(EspeakDriver::rate_to_speed(0), 80); // slowest
        assert_eq!(EspeakDriver::rate_to_speed(50), 265); // normal
        assert_eq!(EspeakDriver::rate_to_speed(100), 450); // fastest
    }

    #[test]
    fn test_volume_conversion() {
        assert_eq!(EspeakDriver::volume_to_amplitude(0), 0);
        assert_eq!(EspeakDriver::volume_to_amplitude(50), 100);
        assert_eq!(EspeakDriver::volume_to_amplitude(100), 200);
    }

    #[test]
    fn test_create_espeak_driver() {
        // Only passes where espeak-ng is installed
        match EspeakDriver::new() {
            Ok(driver) => assert_eq!(driver.id(), "espeak"),
            Err(e) => println!("espeak back-end unavailable: {}", e),
        }
    }
}
