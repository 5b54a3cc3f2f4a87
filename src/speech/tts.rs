//! Text-to-speech implementation with sherpa-rs (VITS models)
//!
//! This module provides the concrete [`SpeechEngine`] used by the command line
//! tool. Document text is split into sentence-aligned segments, each segment
//! is synthesized with the selected speaker, and the resulting samples are
//! either played or written to a WAV file.

use super::output::SpeechEngine;
use super::segment::split_for_synthesis;
use super::voice::{VoiceCatalog, VoiceList, VoiceSettings};
use crate::audio::write_wav;
use crate::{Pdf2AudioError, Result};
use serde::Deserialize;
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default sample rate for VITS TTS output (22050 Hz typical for Piper models)
pub const VITS_SAMPLE_RATE: u32 = 22050;

/// Default upper bound on the size of one synthesis segment, in bytes
pub const DEFAULT_MAX_SEGMENT_BYTES: usize = 400;

/// Configuration for the VITS engine
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Path to the ONNX model file
    pub model_path: PathBuf,

    /// Path to the tokens file
    pub tokens_path: PathBuf,

    /// Path to the lexicon file (optional for some models)
    pub lexicon_path: Option<PathBuf>,

    /// Path to the espeak-ng data directory (optional)
    pub data_dir: Option<PathBuf>,

    /// Path to dict directory (optional)
    pub dict_dir: Option<PathBuf>,

    /// Length scale (1.0 = model's natural pace; the speaking rate is applied on top)
    pub length_scale: f32,

    /// Noise scale for variation
    pub noise_scale: f32,

    /// Noise scale width
    pub noise_scale_w: f32,

    /// Maximum bytes of text handed to the model in one call
    pub max_segment_bytes: usize,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokens_path: PathBuf::new(),
            lexicon_path: None,
            data_dir: None,
            dict_dir: None,
            length_scale: 1.0,
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            max_segment_bytes: DEFAULT_MAX_SEGMENT_BYTES,
        }
    }
}

impl TtsConfig {
    /// Create a new TTS config with required paths
    pub fn new(model_path: impl Into<PathBuf>, tokens_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            tokens_path: tokens_path.into(),
            ..Default::default()
        }
    }

    /// Set the lexicon path
    pub fn with_lexicon(mut self, lexicon_path: impl Into<PathBuf>) -> Self {
        self.lexicon_path = Some(lexicon_path.into());
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Set the dict directory
    pub fn with_dict_dir(mut self, dict_dir: impl Into<PathBuf>) -> Self {
        self.dict_dir = Some(dict_dir.into());
        self
    }

    /// Set the segment size limit
    pub fn with_max_segment_bytes(mut self, max_segment_bytes: usize) -> Self {
        self.max_segment_bytes = max_segment_bytes.max(1);
        self
    }

    /// Check that the required paths are set and exist
    pub fn validate(&self) -> Result<()> {
        if self.model_path.as_os_str().is_empty() {
            return Err(Pdf2AudioError::ConfigError("Model path is required".into()));
        }

        if self.tokens_path.as_os_str().is_empty() {
            return Err(Pdf2AudioError::ConfigError("Tokens path is required".into()));
        }

        if !self.model_path.exists() {
            return Err(Pdf2AudioError::ModelLoadError(format!(
                "Model not found: {}",
                self.model_path.display()
            )));
        }

        if !self.tokens_path.exists() {
            return Err(Pdf2AudioError::ModelLoadError(format!(
                "Tokens file not found: {}",
                self.tokens_path.display()
            )));
        }

        Ok(())
    }
}

/// Generated audio data from TTS
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynthesizedAudio {
    /// Audio samples (f32, mono)
    pub samples: Vec<f32>,

    /// Sample rate of the audio
    pub sample_rate: u32,
}

impl SynthesizedAudio {
    /// Empty audio at the given rate
    pub fn silent(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    /// Get the duration of this audio in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Get the duration of this audio in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }

    /// Append another block; the first non-empty block fixes the sample rate
    pub fn append(&mut self, other: SynthesizedAudio) -> Result<()> {
        if other.samples.is_empty() {
            return Ok(());
        }
        if self.samples.is_empty() {
            self.sample_rate = other.sample_rate;
        } else if self.sample_rate != other.sample_rate {
            return Err(Pdf2AudioError::AudioProcessingError(format!(
                "Sample rate changed mid-document: {} Hz then {} Hz",
                self.sample_rate, other.sample_rate
            )));
        }
        self.samples.extend(other.samples);
        Ok(())
    }
}

/// Speech engine wrapping sherpa-rs VitsTts
pub struct VitsEngine {
    tts: VitsTts,
    config: TtsConfig,
    voices: VoiceList,
}

impl VitsEngine {
    /// Load the model described by `config`, offering `voices`
    pub fn new(config: TtsConfig, voices: VoiceList) -> Result<Self> {
        config.validate()?;

        info!("Loading VITS TTS model from: {}", config.model_path.display());

        let vits_config = VitsTtsConfig {
            model: path_string(&config.model_path),
            tokens: path_string(&config.tokens_path),
            lexicon: config.lexicon_path.as_deref().map(path_string).unwrap_or_default(),
            data_dir: config.data_dir.as_deref().map(path_string).unwrap_or_default(),
            dict_dir: config.dict_dir.as_deref().map(path_string).unwrap_or_default(),
            length_scale: config.length_scale,
            noise_scale: config.noise_scale,
            noise_scale_w: config.noise_scale_w,
            ..Default::default()
        };

        let tts = VitsTts::new(vits_config);

        info!("TTS engine initialized with {} voice(s)", voices.count());

        Ok(Self {
            tts,
            config,
            voices,
        })
    }

    /// Synthesize the whole text with the given settings
    pub fn synthesize(&mut self, text: &str, settings: &VoiceSettings) -> Result<SynthesizedAudio> {
        let segments = split_for_synthesis(text, self.config.max_segment_bytes);
        let mut audio = SynthesizedAudio::silent(VITS_SAMPLE_RATE);

        debug!(
            "Synthesizing {} segment(s) with speaker {} at speed {:.2}",
            segments.len(),
            settings.speaker_id,
            settings.speed()
        );

        for (index, segment) in segments.iter().enumerate() {
            debug!(
                "Segment {}: {}",
                index,
                segment.chars().take(50).collect::<String>()
            );

            let generated = self
                .tts
                .create(segment, settings.speaker_id, settings.speed())
                .map_err(|e| Pdf2AudioError::TTSError(format!("Synthesis failed: {}", e)))?;

            audio.append(SynthesizedAudio {
                samples: generated.samples,
                sample_rate: generated.sample_rate as u32,
            })?;
        }

        debug!(
            "Synthesized {} samples ({:.2}s)",
            audio.samples.len(),
            audio.duration_secs()
        );

        Ok(audio)
    }
}

impl SpeechEngine for VitsEngine {
    fn voices(&self) -> &dyn VoiceCatalog {
        &self.voices
    }

    fn speak(&mut self, text: &str, settings: &VoiceSettings) -> Result<()> {
        let audio = self.synthesize(text, settings)?;
        if audio.samples.is_empty() {
            info!("Nothing to speak");
            return Ok(());
        }
        play(&audio)
    }

    fn render_to_file(&mut self, text: &str, settings: &VoiceSettings, path: &Path) -> Result<()> {
        if !has_wav_extension(path) {
            warn!(
                "Output {:?} does not end in .wav, the file will contain WAV audio",
                path
            );
        }

        let audio = self.synthesize(text, settings)?;
        write_wav(path, &audio.samples, audio.sample_rate)
    }
}

#[cfg(feature = "audio-io")]
fn play(audio: &SynthesizedAudio) -> Result<()> {
    let output = crate::audio::AudioOutput::new()?;
    output.play_blocking(&audio.samples, audio.sample_rate)
}

#[cfg(not(feature = "audio-io"))]
fn play(_audio: &SynthesizedAudio) -> Result<()> {
    Err(Pdf2AudioError::AudioDeviceError(
        "Playback support was not compiled in (enable the audio-io feature)".into(),
    ))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tts_config_default() {
        let config = TtsConfig::default();
        assert_eq!(config.max_segment_bytes, DEFAULT_MAX_SEGMENT_BYTES);
        assert!((config.length_scale - 1.0).abs() < f32::EPSILON);
        assert!(config.lexicon_path.is_none());
    }

    #[test]
    fn test_tts_config_builder() {
        let config = TtsConfig::new("model.onnx", "tokens.txt")
            .with_lexicon("lexicon.txt")
            .with_data_dir("espeak-ng-data")
            .with_max_segment_bytes(0);

        assert_eq!(config.model_path, PathBuf::from("model.onnx"));
        assert_eq!(config.tokens_path, PathBuf::from("tokens.txt"));
        assert_eq!(config.lexicon_path, Some(PathBuf::from("lexicon.txt")));
        assert_eq!(config.data_dir, Some(PathBuf::from("espeak-ng-data")));
        assert_eq!(config.max_segment_bytes, 1);
    }

    #[test]
    fn test_validate_requires_paths() {
        let err = TtsConfig::default().validate().unwrap_err();
        assert!(matches!(err, Pdf2AudioError::ConfigError(_)));

        let err = TtsConfig::new("/nonexistent/model.onnx", "/nonexistent/tokens.txt")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Pdf2AudioError::ModelLoadError(_)));
    }

    #[test]
    fn test_engine_rejects_missing_model() {
        let result = VitsEngine::new(
            TtsConfig::new("/nonexistent/model.onnx", "/nonexistent/tokens.txt"),
            VoiceList::default(),
        );
        assert!(matches!(result, Err(Pdf2AudioError::ModelLoadError(_))));
    }

    #[test]
    fn test_audio_duration() {
        let audio = SynthesizedAudio {
            samples: vec![0.0; 22050],
            sample_rate: 22050,
        };

        assert!((audio.duration_secs() - 1.0).abs() < 0.01);
        assert_eq!(audio.duration_ms(), 1000);
        assert_eq!(SynthesizedAudio::default().duration_ms(), 0);
    }

    #[test]
    fn test_append_keeps_order_and_rate() {
        let mut audio = SynthesizedAudio::silent(VITS_SAMPLE_RATE);
        audio
            .append(SynthesizedAudio {
                samples: vec![0.1, 0.2],
                sample_rate: 16000,
            })
            .unwrap();
        audio.append(SynthesizedAudio::silent(44100)).unwrap();
        audio
            .append(SynthesizedAudio {
                samples: vec![0.3],
                sample_rate: 16000,
            })
            .unwrap();

        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.samples, vec![0.1, 0.2, 0.3]);

        let mismatch = audio.append(SynthesizedAudio {
            samples: vec![0.4],
            sample_rate: 22050,
        });
        assert!(mismatch.is_err());
    }

    #[test]
    fn test_wav_extension_check() {
        assert!(has_wav_extension(Path::new("out.wav")));
        assert!(has_wav_extension(Path::new("OUT.WAV")));
        assert!(!has_wav_extension(Path::new("out.mp3")));
        assert!(!has_wav_extension(Path::new("out")));
    }
}
