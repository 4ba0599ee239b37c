//! talkctl main entry point
//!
//! Small line-oriented front end over the engine thread: list drivers,
//! switch and restart them, adjust rate/volume, speak text. Every command
//! the user types becomes a posted engine command; nothing runs the engine
//! from this thread.

use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process;
use talkctl::config::Config;
use talkctl::driver::DriverRegistry;
use talkctl::engine::{DriverHost, EngineThread};
use talkctl::settings::SpeechSettings;
use talkctl::Result;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to talkctl.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("talkctl.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open talkctl.log for debug logging: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "talkctl version {} starting (debug mode, logging to talkctl.log)",
            talkctl::VERSION
        );
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let registry = DriverRegistry::with_builtin();
    let listing: Vec<(String, String)> = registry
        .list()
        .map(|(id, description)| (id.to_string(), description.to_string()))
        .collect();

    // Stale configs can name a driver that no longer exists; start on auto
    // instead of refusing to start at all.
    let mut selection = config.driver();
    if !registry.contains(&selection) {
        eprintln!(
            "Configured driver {:?} is not available, falling back to auto",
            selection
        );
        selection = talkctl::driver::AUTO_DRIVER.to_string();
    }

    let host = DriverHost::new(registry, &selection)?;
    let engine = EngineThread::spawn(Box::new(host))?;
    let handle = engine.handle();

    // Apply persisted speech parameters on the engine thread
    if let Some(rate) = config.rate() {
        handle.set_rate(rate);
    }
    if let Some(volume) = config.volume() {
        handle.set_volume(volume);
    }

    let mut settings = SpeechSettings::new(config, engine.handle());

    println!("talkctl {} ready (driver: {})", talkctl::VERSION, selection);
    println!("Commands: drivers, driver <id>, rate <n>, volume <n>, say <text>, stop, restart, quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "drivers" => {
                let current = settings.driver();
                for (id, description) in &listing {
                    let marker = if *id == current { "*" } else { " " };
                    println!(" {} {:<8} {}", marker, id, description);
                }
            }
            "driver" => {
                if argument.is_empty() {
                    println!("Current driver: {}", settings.driver());
                } else {
                    match settings.set_driver(argument) {
                        Ok(()) => println!("Driver preference set to {}", argument),
                        Err(e) => println!("{}", e),
                    }
                }
            }
            "rate" => match argument.parse() {
                Ok(rate) => match settings.set_rate(rate) {
                    Ok(()) => println!("Rate set to {}", rate),
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: rate <0-100>"),
            },
            "volume" => match argument.parse() {
                Ok(volume) => match settings.set_volume(volume) {
                    Ok(()) => println!("Volume set to {}", volume),
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: volume <0-100>"),
            },
            "say" => {
                if argument.is_empty() {
                    println!("Usage: say <text>");
                } else {
                    handle.speak(argument);
                }
            }
            "stop" => handle.cancel(),
            "restart" => handle.restart_driver(),
            "quit" | "exit" => break,
            _ => println!("Unknown command: {}", command),
        }

        io::stdout().flush()?;
    }

    info!("Shutting down");
    engine.shutdown();
    Ok(())
}
