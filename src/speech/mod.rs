//! Speech output
//!
//! This module provides:
//! - The [`SpeechEngine`] and [`VoiceCatalog`] capability traits
//! - [`SpeechOutput`], which validates voice and rate before speaking
//! - Text-to-speech (TTS) using VITS models via sherpa-rs

pub mod output;
pub mod segment;
pub mod tts;
pub mod voice;

// Re-export commonly used types
pub use output::{SpeechEngine, SpeechOutput};
pub use segment::split_for_synthesis;
pub use tts::{SynthesizedAudio, TtsConfig, VitsEngine, VITS_SAMPLE_RATE};
pub use voice::{
    SpeakerId, VoiceCatalog, VoiceEntry, VoiceList, VoiceSettings, DEFAULT_RATE_WPM,
    DEFAULT_VOICE, MAX_RATE_WPM, MIN_RATE_WPM,
};
