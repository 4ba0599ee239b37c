//! Configuration management
//!
//! Persists the speech preferences (driver selection, rate, volume) in an
//! INI file at `~/.talkctl.cfg`. The settings layer writes through here so a
//! selection survives restarts of the whole process, not just of the driver.

use crate::driver::AUTO_DRIVER;
use crate::{Result, TalkctlError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Config file name under the home directory
const CONFIG_FILE: &str = ".talkctl.cfg";

/// Persistent speech preferences
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from `~/.talkctl.cfg` or create the default
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().ok_or("Could not find home directory")?;
        Self::load_from(home.join(CONFIG_FILE))
    }

    /// Load configuration from an explicit path
    ///
    /// A missing file is created with defaults first.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| TalkctlError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default.write_to_file(&path)?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| TalkctlError::Config(format!("Failed to save config: {}", e)))
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("speech")).set("driver", AUTO_DRIVER);
        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Speech preference accessors

    /// Selected speech driver identifier
    pub fn driver(&self) -> String {
        self.get_string("speech", "driver", AUTO_DRIVER)
    }

    /// Store the selected speech driver identifier
    pub fn set_driver(&mut self, id: &str) {
        self.set("speech", "driver", id);
    }

    /// Speech rate (0-100), if configured
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Store the speech rate
    pub fn set_rate(&mut self, rate: u8) {
        self.set("speech", "rate", &rate.to_string());
    }

    /// Speech volume (0-100), if configured
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Store the speech volume
    pub fn set_volume(&mut self, volume: u8) {
        self.set("speech", "volume", &volume.to_string());
    }
}
