//! Engine worker thread and command channel
//!
//! All driver-control commands execute on a single dedicated worker thread
//! that owns the engine state. Other threads (settings UI, the CLI loop)
//! never touch the engine directly; they send immutable [`EngineCommand`]
//! values over a channel and the worker consumes them in submission order.
//!
//! That single-consumer FIFO is the whole concurrency story: no locks, no
//! shared state, and a driver change is never interleaved with the restart
//! that follows it because both happen inside one dequeued command.

pub mod host;

use crate::Result;
use log::{debug, error, info, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

pub use host::DriverHost;

/// Engine operations, as seen from the worker thread
///
/// [`DriverHost`] is the production implementation; tests substitute a
/// recording double to observe call order.
pub trait SpeechEngine: Send {
    /// Switch the active speech driver selection to `id`
    fn change_driver(&mut self, id: &str) -> Result<()>;

    /// Stop and start the currently selected driver
    fn restart_driver(&mut self) -> Result<()>;

    /// Speak text through the active driver
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> Result<()>;

    /// Set speech rate (0-100)
    fn set_rate(&mut self, rate: u8) -> Result<()>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> Result<()>;
}

/// Commands posted to the engine worker thread
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Switch to a new speech driver and restart it, as one unit.
    ///
    /// This is what a settings-screen selection change posts: the worker
    /// applies the new selection, then restarts the driver, with nothing
    /// in between.
    SelectDriver { driver: String },
    /// Restart the currently selected driver
    RestartDriver,
    /// Speak a string of text
    Speak(String),
    /// Cancel/silence current speech
    Cancel,
    /// Set speech rate (0-100)
    SetRate(u8),
    /// Set speech volume (0-100)
    SetVolume(u8),
    /// Stop the worker thread
    Shutdown,
}

/// Cloneable handle for posting commands to the engine thread
///
/// Sends are fire-and-forget: the worker handles (and logs) failures
/// itself, and nothing is reported back to the posting thread. A send
/// after the worker has exited is logged and dropped.
#[derive(Clone)]
pub struct EngineHandle {
    tx: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Post a raw command
    pub fn send(&self, command: EngineCommand) {
        if self.tx.send(command).is_err() {
            warn!("Engine thread is gone; command dropped");
        }
    }

    /// Post a driver selection change (change + restart, in order)
    pub fn select_driver(&self, driver: &str) {
        self.send(EngineCommand::SelectDriver {
            driver: driver.to_string(),
        });
    }

    /// Post a restart of the current driver
    pub fn restart_driver(&self) {
        self.send(EngineCommand::RestartDriver);
    }

    /// Post text to speak
    pub fn speak(&self, text: &str) {
        self.send(EngineCommand::Speak(text.to_string()));
    }

    /// Post a speech cancellation
    pub fn cancel(&self) {
        self.send(EngineCommand::Cancel);
    }

    /// Post a rate change (0-100)
    pub fn set_rate(&self, rate: u8) {
        self.send(EngineCommand::SetRate(rate));
    }

    /// Post a volume change (0-100)
    pub fn set_volume(&self, volume: u8) {
        self.send(EngineCommand::SetVolume(volume));
    }
}

/// The engine worker thread
///
/// Owns the spawned thread and the sending side of its command channel.
/// Dropping it (or calling [`shutdown`](EngineThread::shutdown)) stops the
/// worker after it has drained everything submitted before the stop.
pub struct EngineThread {
    handle: EngineHandle,
    join: Option<JoinHandle<()>>,
}

impl EngineThread {
    /// Spawn the worker thread around an engine
    ///
    /// The engine moves onto the new thread and is never touched from
    /// anywhere else again.
    pub fn spawn(engine: Box<dyn SpeechEngine>) -> Result<Self> {
        let (tx, rx) = channel();

        let join = thread::Builder::new()
            .name("speech-engine".to_string())
            .spawn(move || run_engine(engine, rx))?;

        info!("Engine thread started");

        Ok(Self {
            handle: EngineHandle { tx },
            join: Some(join),
        })
    }

    /// Get a handle for posting commands
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to finish
    ///
    /// Commands submitted before the shutdown are processed first; the
    /// channel is FIFO and the worker only stops when it dequeues the
    /// shutdown itself.
    pub fn shutdown(mut self) {
        self.handle.send(EngineCommand::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                error!("Engine thread panicked");
            }
        }
    }
}

impl Drop for EngineThread {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            self.handle.send(EngineCommand::Shutdown);
            let _ = join.join();
        }
    }
}

/// Worker loop: consume commands in submission order until shutdown
///
/// Engine failures are logged here and go nowhere else. A bad driver
/// identifier or an unavailable back-end must not take down speech for
/// commands that follow.
fn run_engine(mut engine: Box<dyn SpeechEngine>, rx: Receiver<EngineCommand>) {
    while let Ok(command) = rx.recv() {
        debug!("Engine command: {:?}", command);

        match command {
            EngineCommand::SelectDriver { driver } => {
                // Change first, then restart - always both, always in this
                // order. A failed change leaves the previous selection in
                // place, so the restart brings the incumbent driver back.
                if let Err(e) = engine.change_driver(&driver) {
                    error!("Failed to change speech driver to {}: {}", driver, e);
                }
                if let Err(e) = engine.restart_driver() {
                    error!("Failed to restart speech driver: {}", e);
                }
            }
            EngineCommand::RestartDriver => {
                if let Err(e) = engine.restart_driver() {
                    error!("Failed to restart speech driver: {}", e);
                }
            }
            EngineCommand::Speak(text) => {
                if let Err(e) = engine.speak(&text) {
                    error!("Failed to speak: {}", e);
                }
            }
            EngineCommand::Cancel => {
                if let Err(e) = engine.cancel() {
                    error!("Failed to cancel speech: {}", e);
                }
            }
            EngineCommand::SetRate(rate) => {
                if let Err(e) = engine.set_rate(rate) {
                    error!("Failed to set rate: {}", e);
                }
            }
            EngineCommand::SetVolume(volume) => {
                if let Err(e) = engine.set_volume(volume) {
                    error!("Failed to set volume: {}", e);
                }
            }
            EngineCommand::Shutdown => {
                info!("Engine thread shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Engine double that records which operations ran
    struct RecordingEngine {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl SpeechEngine for RecordingEngine {
        fn change_driver(&mut self, id: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("change:{}", id));
            Ok(())
        }

        fn restart_driver(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("restart".to_string());
            Ok(())
        }

        fn speak(&mut self, text: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("speak:{}", text));
            Ok(())
        }

        fn cancel(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("cancel".to_string());
            Ok(())
        }

        fn set_rate(&mut self, rate: u8) -> Result<()> {
            self.calls.lock().unwrap().push(format!("rate:{}", rate));
            Ok(())
        }

        fn set_volume(&mut self, volume: u8) -> Result<()> {
            self.calls.lock().unwrap().push(format!("volume:{}", volume));
            Ok(())
        }
    }

    fn recording_engine() -> (Box<dyn SpeechEngine>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: Arc::clone(&calls),
        };
        (Box::new(engine), calls)
    }

    #[test]
    fn test_shutdown_drains_pending_commands() {
        let (engine, calls) = recording_engine();
        let thread = EngineThread::spawn(engine).unwrap();
        let handle = thread.handle();

        for i in 0..20 {
            handle.speak(&format!("line {}", i));
        }
        thread.shutdown();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 20);
        assert_eq!(calls[0], "speak:line 0");
        assert_eq!(calls[19], "speak:line 19");
    }

    #[test]
    fn test_commands_execute_in_submission_order() {
        let (engine, calls) = recording_engine();
        let thread = EngineThread::spawn(engine).unwrap();
        let handle = thread.handle();

        handle.set_rate(60);
        handle.speak("first");
        handle.cancel();
        handle.speak("second");
        handle.set_volume(40);
        thread.shutdown();

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["rate:60", "speak:first", "cancel", "speak:second", "volume:40"]
        );
    }

    #[test]
    fn test_send_after_shutdown_is_dropped() {
        let (engine, calls) = recording_engine();
        let thread = EngineThread::spawn(engine).unwrap();
        let handle = thread.handle();

        thread.shutdown();

        // Worker is gone; this must not panic or block
        handle.speak("too late");
        assert!(calls.lock().unwrap().is_empty());
    }
}
