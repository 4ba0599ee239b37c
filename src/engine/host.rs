//! Driver host - the production engine
//!
//! Owns the driver registry, the current selection, and the active driver
//! instance. Runs entirely on the engine worker thread.

use crate::driver::{DriverRegistry, SpeechDriver};
use crate::engine::SpeechEngine;
use crate::{Result, TalkctlError};
use log::{info, warn};

/// Engine implementation over a driver registry
///
/// The selection and the running driver are tracked separately:
/// `change_driver` only moves the selection, `restart_driver` tears down the
/// running instance and builds a fresh one for whatever is selected. Rate
/// and volume survive restarts by being cached here and reapplied to every
/// new instance.
pub struct DriverHost {
    registry: DriverRegistry,

    /// Currently selected driver identifier
    selected: String,

    /// Running driver instance, if the last start succeeded
    active: Option<Box<dyn SpeechDriver>>,

    /// Cached rate setting (0-100)
    rate: Option<u8>,

    /// Cached volume setting (0-100)
    volume: Option<u8>,
}

impl DriverHost {
    /// Create a host and start the initially selected driver
    ///
    /// Fails on an unknown identifier. A known driver whose back-end cannot
    /// start leaves the host running silently; a later restart can recover
    /// once the back-end becomes available.
    pub fn new(registry: DriverRegistry, initial: &str) -> Result<Self> {
        if !registry.contains(initial) {
            return Err(TalkctlError::Driver(format!(
                "Unknown speech driver: {}",
                initial
            )));
        }

        let mut host = Self {
            registry,
            selected: initial.to_string(),
            active: None,
            rate: None,
            volume: None,
        };

        if let Err(e) = host.restart_driver() {
            warn!("Initial driver start failed, continuing without speech: {}", e);
        }

        Ok(host)
    }

    /// Identifier of the current selection
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Whether a driver instance is currently running
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn active_driver(&mut self) -> Result<&mut Box<dyn SpeechDriver>> {
        self.active
            .as_mut()
            .ok_or_else(|| TalkctlError::Engine("No active speech driver".to_string()))
    }
}

impl SpeechEngine for DriverHost {
    fn change_driver(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            // Selection stays where it was
            return Err(TalkctlError::Driver(format!(
                "Unknown speech driver: {}",
                id
            )));
        }

        info!("Speech driver selection: {} -> {}", self.selected, id);
        self.selected = id.to_string();
        Ok(())
    }

    fn restart_driver(&mut self) -> Result<()> {
        // Silence and drop the old instance before starting the new one
        if let Some(mut old) = self.active.take() {
            if let Err(e) = old.cancel() {
                warn!("Cancel during restart failed: {}", e);
            }
        }

        let mut driver = self.registry.create(&self.selected)?;

        if let Some(rate) = self.rate {
            driver.set_rate(rate)?;
        }
        if let Some(volume) = self.volume {
            driver.set_volume(volume)?;
        }

        info!("Speech driver started: {}", driver.id());
        self.active = Some(driver);
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.active_driver()?.speak(text)
    }

    fn cancel(&mut self) -> Result<()> {
        self.active_driver()?.cancel()
    }

    fn set_rate(&mut self, rate: u8) -> Result<()> {
        self.rate = Some(rate);
        if let Some(driver) = self.active.as_mut() {
            driver.set_rate(rate)?;
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.volume = Some(volume);
        if let Some(driver) = self.active.as_mut() {
            driver.set_volume(volume)?;
        }
        Ok(())
    }
}
