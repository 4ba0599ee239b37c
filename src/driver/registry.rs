//! Speech driver registry
//!
//! Maps driver identifiers to factories. The settings UI lists entries from
//! here, and the engine recreates the active driver through it on every
//! restart. The special `auto` entry picks the best back-end for the current
//! platform, the way a user who never touches the setting would want.

use crate::driver::backends::espeak::EspeakDriver;
use crate::driver::backends::native::NativeDriver;
use crate::driver::backends::null::NullDriver;
use crate::driver::SpeechDriver;
use crate::{Result, TalkctlError};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

/// Identifier of the platform-selection pseudo-driver
pub const AUTO_DRIVER: &str = "auto";

/// Valid driver identifiers: lowercase, digits, `-` and `_`, letter first
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("identifier regex"));

/// Factory producing a fresh driver instance on every (re)start
pub type DriverFactory = Box<dyn Fn() -> Result<Box<dyn SpeechDriver>> + Send>;

struct DriverEntry {
    id: String,
    description: String,
    factory: DriverFactory,
}

/// Registry of available speech drivers
///
/// Entries keep their registration order so listings are stable.
pub struct DriverRegistry {
    entries: Vec<DriverEntry>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a registry with the built-in drivers registered
    pub fn with_builtin() -> Self {
        let builtin: [(&str, &str, DriverFactory); 4] = [
            (
                AUTO_DRIVER,
                "Best available back-end for this platform",
                Box::new(create_auto_driver),
            ),
            (
                "native",
                "System speech service (Speech Dispatcher, AVFoundation)",
                Box::new(try_native),
            ),
            ("espeak", "espeak-ng synthesizer", Box::new(try_espeak)),
            (
                "null",
                "No speech output",
                Box::new(|| Ok(Box::new(NullDriver::new()) as Box<dyn SpeechDriver>)),
            ),
        ];

        // Built-in identifiers are literals that satisfy IDENTIFIER_RE and
        // are distinct, so they bypass register()'s validation.
        Self {
            entries: builtin
                .into_iter()
                .map(|(id, description, factory)| DriverEntry {
                    id: id.to_string(),
                    description: description.to_string(),
                    factory,
                })
                .collect(),
        }
    }

    /// Register a driver factory under an identifier
    ///
    /// Rejects malformed identifiers and duplicates.
    pub fn register(
        &mut self,
        id: &str,
        description: &str,
        factory: DriverFactory,
    ) -> Result<()> {
        if !IDENTIFIER_RE.is_match(id) {
            return Err(TalkctlError::Driver(format!(
                "Invalid driver identifier: {:?}",
                id
            )));
        }
        if self.contains(id) {
            return Err(TalkctlError::Driver(format!(
                "Driver already registered: {}",
                id
            )));
        }

        self.entries.push(DriverEntry {
            id: id.to_string(),
            description: description.to_string(),
            factory,
        });
        Ok(())
    }

    /// Check whether an identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Create a driver instance for an identifier
    pub fn create(&self, id: &str) -> Result<Box<dyn SpeechDriver>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| TalkctlError::Driver(format!("Unknown speech driver: {}", id)))?;

        (entry.factory)()
    }

    /// Iterate over `(identifier, description)` pairs in registration order
    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.id.as_str(), e.description.as_str()))
    }

    /// Number of registered drivers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Detect if running in WSL (Windows Subsystem for Linux)
///
/// WSL lacks a usable Speech Dispatcher in most setups, so the automatic
/// cascade prefers espeak-ng there.
fn is_wsl() -> bool {
    if std::env::var("WSL_DISTRO_NAME").is_ok() {
        return true;
    }

    fs::read_to_string("/proc/version")
        .map(|v| {
            let v = v.to_lowercase();
            v.contains("microsoft") || v.contains("wsl")
        })
        .unwrap_or(false)
}

/// Create the best available driver for the current platform
///
/// **WSL:** espeak-ng first (the system speech service is usually absent),
/// then the native back-end.
///
/// **Everywhere else:** the native back-end first (Speech Dispatcher on
/// Linux, AVFoundation on macOS), then espeak-ng.
fn create_auto_driver() -> Result<Box<dyn SpeechDriver>> {
    let prefer_espeak = std::env::consts::OS == "linux" && is_wsl();

    let attempts: [fn() -> Result<Box<dyn SpeechDriver>>; 2] = if prefer_espeak {
        [try_espeak, try_native]
    } else {
        [try_native, try_espeak]
    };

    let mut last_err = None;
    for attempt in attempts {
        match attempt() {
            Ok(driver) => {
                info!("Automatic driver selection chose {}", driver.id());
                return Ok(driver);
            }
            Err(e) => {
                info!("Back-end unavailable: {}", e);
                last_err = Some(e);
            }
        }
    }

    Err(TalkctlError::Driver(format!(
        "No speech back-end available. Tried native and espeak-ng. Last error: {}",
        last_err.unwrap_or_else(|| "none attempted".into())
    )))
}

fn try_native() -> Result<Box<dyn SpeechDriver>> {
    NativeDriver::new().map(|d| Box::new(d) as Box<dyn SpeechDriver>)
}

fn try_espeak() -> Result<Box<dyn SpeechDriver>> {
    EspeakDriver::new().map(|d| Box::new(d) as Box<dyn SpeechDriver>)
}
