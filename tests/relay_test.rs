//! Integration tests for the driver selection relay
//!
//! A selection change must reach the engine as exactly two calls - change
//! to the new identifier, then restart - executed in that order on the
//! engine worker thread, never on the thread that made the selection.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use talkctl::engine::{EngineThread, SpeechEngine};
use talkctl::Result;

/// One observed engine call: what ran, and on which thread
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Change(String),
    Restart,
    Speak(String),
}

type CallLog = Arc<Mutex<Vec<(Call, ThreadId)>>>;

/// Engine double recording every call with the thread it ran on
struct RecordingEngine {
    calls: CallLog,
}

impl RecordingEngine {
    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap()
            .push((call, thread::current().id()));
    }
}

impl SpeechEngine for RecordingEngine {
    fn change_driver(&mut self, id: &str) -> Result<()> {
        self.record(Call::Change(id.to_string()));
        Ok(())
    }

    fn restart_driver(&mut self) -> Result<()> {
        self.record(Call::Restart);
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.record(Call::Speak(text.to_string()));
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

fn spawn_recording_engine() -> (EngineThread, CallLog) {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let engine = RecordingEngine {
        calls: Arc::clone(&calls),
    };
    let thread = EngineThread::spawn(Box::new(engine)).expect("spawn engine thread");
    (thread, calls)
}

#[test]
fn selection_change_issues_change_then_restart() {
    let (engine, calls) = spawn_recording_engine();
    let handle = engine.handle();

    handle.select_driver("espeak");

    // Joining the worker guarantees the command was processed
    engine.shutdown();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2, "exactly two engine calls per selection");
    assert_eq!(calls[0].0, Call::Change("espeak".to_string()));
    assert_eq!(calls[1].0, Call::Restart);
}

#[test]
fn selection_change_runs_on_engine_thread() {
    let (engine, calls) = spawn_recording_engine();
    let handle = engine.handle();
    let caller = thread::current().id();

    handle.select_driver("native");
    engine.shutdown();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);

    let change_thread = calls[0].1;
    let restart_thread = calls[1].1;
    assert_eq!(change_thread, restart_thread, "both calls on one thread");
    assert_ne!(change_thread, caller, "never on the selecting thread");
}

#[test]
fn repeated_selections_preserve_submission_order() {
    let (engine, calls) = spawn_recording_engine();
    let handle = engine.handle();

    for id in ["espeak", "null", "native"] {
        handle.select_driver(id);
    }
    engine.shutdown();

    let calls = calls.lock().unwrap();
    let observed: Vec<&Call> = calls.iter().map(|(c, _)| c).collect();
    assert_eq!(
        observed,
        vec![
            &Call::Change("espeak".to_string()),
            &Call::Restart,
            &Call::Change("null".to_string()),
            &Call::Restart,
            &Call::Change("native".to_string()),
            &Call::Restart,
        ]
    );
}

#[test]
fn speech_and_selection_stay_ordered() {
    let (engine, calls) = spawn_recording_engine();
    let handle = engine.handle();

    handle.speak("before");
    handle.select_driver("espeak");
    handle.speak("after");
    engine.shutdown();

    let calls = calls.lock().unwrap();
    let observed: Vec<&Call> = calls.iter().map(|(c, _)| c).collect();
    assert_eq!(
        observed,
        vec![
            &Call::Speak("before".to_string()),
            &Call::Change("espeak".to_string()),
            &Call::Restart,
            &Call::Speak("after".to_string()),
        ]
    );
}

#[test]
fn selections_from_several_threads_each_stay_paired() {
    let (engine, calls) = spawn_recording_engine();

    let mut workers = Vec::new();
    for id in ["a-driver", "b-driver", "c-driver"] {
        let handle = engine.handle();
        workers.push(thread::spawn(move || handle.select_driver(id)));
    }
    for worker in workers {
        worker.join().unwrap();
    }
    engine.shutdown();

    // Interleaving across senders is unspecified, but every change is
    // immediately followed by its restart - the pair is one posted unit.
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 6);
    for pair in calls.chunks(2) {
        assert!(matches!(pair[0].0, Call::Change(_)));
        assert_eq!(pair[1].0, Call::Restart);
    }
}
