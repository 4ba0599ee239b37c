//! Configuration loading tests
//!
//! Tests that speech preferences load with sane defaults and survive a
//! save/reload round trip.

use talkctl::config::Config;
use tempfile::tempdir;

#[test]
fn test_missing_config_gets_defaults() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("talkctl.cfg");

    let config = Config::load_from(&path).expect("create default config");

    assert_eq!(config.driver(), "auto");
    assert_eq!(config.rate(), None);
    assert_eq!(config.volume(), None);

    // The default file was written out
    assert!(path.exists());
}

#[test]
fn test_preferences_round_trip() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("talkctl.cfg");

    {
        let mut config = Config::load_from(&path).expect("create config");
        config.set_driver("espeak");
        config.set_rate(65);
        config.set_volume(80);
        config.save().expect("save config");
    }

    let config = Config::load_from(&path).expect("reload config");
    assert_eq!(config.driver(), "espeak");
    assert_eq!(config.rate(), Some(65));
    assert_eq!(config.volume(), Some(80));
}

#[test]
fn test_out_of_range_values_read_as_unset() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("talkctl.cfg");

    std::fs::write(&path, "[speech]\ndriver=native\nrate=250\nvolume=-3\n")
        .expect("write config");

    let config = Config::load_from(&path).expect("load config");
    assert_eq!(config.driver(), "native");
    assert_eq!(config.rate(), None);
    assert_eq!(config.volume(), None);
}

#[test]
fn test_generic_getters() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("talkctl.cfg");

    let mut config = Config::load_from(&path).expect("create config");
    config.set("speech", "voice", "en-gb");

    assert_eq!(config.get_string("speech", "voice", "en"), "en-gb");
    assert_eq!(config.get_string("speech", "missing", "fallback"), "fallback");
    assert_eq!(config.get_int("speech", "missing", 7), 7);
    assert!(config.path().ends_with("talkctl.cfg"));
}
