//! Speech driver back-ends

// System speech service via the tts crate (cross-platform)
pub mod native;

// espeak-ng subprocess back-end
pub mod espeak;

// Silent back-end
pub mod null;
