//! Voice catalog and per-invocation voice settings

use crate::{Pdf2AudioError, Result};
use serde::Deserialize;

/// Speaker id understood by the synthesis backend
pub type SpeakerId = i32;

/// Slowest accepted speaking rate, in words per minute
pub const MIN_RATE_WPM: u32 = 50;

/// Fastest accepted speaking rate, in words per minute
pub const MAX_RATE_WPM: u32 = 400;

/// Rate used when none is given
pub const DEFAULT_RATE_WPM: u32 = 150;

/// Voice index used when none is given
pub const DEFAULT_VOICE: usize = 0;

/// Indexed list of the voices an engine can speak with
pub trait VoiceCatalog {
    /// Number of available voices
    fn count(&self) -> usize;

    /// Backend id of the voice at `index`, if it exists
    fn id_at(&self, index: usize) -> Option<SpeakerId>;

    /// Human-readable name of the voice at `index`
    fn name_at(&self, index: usize) -> Option<&str>;
}

/// A single configured voice
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VoiceEntry {
    pub name: String,
    pub speaker_id: SpeakerId,
}

impl VoiceEntry {
    pub fn new(name: impl Into<String>, speaker_id: SpeakerId) -> Self {
        Self {
            name: name.into(),
            speaker_id,
        }
    }
}

/// Voice catalog backed by a plain list
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceList {
    entries: Vec<VoiceEntry>,
}

impl VoiceList {
    pub fn new(entries: Vec<VoiceEntry>) -> Self {
        Self { entries }
    }

    /// Single-speaker catalog, as exposed by most VITS models
    pub fn single() -> Self {
        Self::new(vec![VoiceEntry::new("default", 0)])
    }

    /// Catalog with speakers `0..count` named by their id
    pub fn speakers(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| VoiceEntry::new(format!("speaker-{}", i), i as SpeakerId))
                .collect(),
        )
    }
}

impl Default for VoiceList {
    fn default() -> Self {
        Self::single()
    }
}

impl VoiceCatalog for VoiceList {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn id_at(&self, index: usize) -> Option<SpeakerId> {
        self.entries.get(index).map(|e| e.speaker_id)
    }

    fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }
}

/// Voice and rate the next speech action will use
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceSettings {
    /// Catalog index of the selected voice
    pub voice_index: usize,

    /// Backend id of the selected voice
    pub speaker_id: SpeakerId,

    /// Speaking rate in words per minute
    pub rate_wpm: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_index: DEFAULT_VOICE,
            speaker_id: 0,
            rate_wpm: DEFAULT_RATE_WPM,
        }
    }
}

impl VoiceSettings {
    /// Speed multiplier relative to the default rate (1.0 = 150 wpm)
    pub fn speed(&self) -> f32 {
        self.rate_wpm as f32 / DEFAULT_RATE_WPM as f32
    }
}

/// Resolve a requested voice index against a catalog
pub fn resolve_voice(catalog: &dyn VoiceCatalog, index: i64) -> Result<(usize, SpeakerId)> {
    let count = catalog.count();
    if count == 0 {
        return Err(Pdf2AudioError::InvalidArgument(
            "Invalid voice_id. No voices are available".into(),
        ));
    }

    usize::try_from(index)
        .ok()
        .and_then(|i| catalog.id_at(i).map(|id| (i, id)))
        .ok_or_else(|| {
            Pdf2AudioError::InvalidArgument(format!(
                "Invalid voice_id {}. It must be between 0 and {}",
                index,
                count - 1
            ))
        })
}

/// Check a requested rate against the accepted range
pub fn validate_rate(rate: i64) -> Result<u32> {
    if (MIN_RATE_WPM as i64..=MAX_RATE_WPM as i64).contains(&rate) {
        Ok(rate as u32)
    } else {
        Err(Pdf2AudioError::InvalidArgument(format!(
            "Invalid rate {}. It must be between {} and {} words per minute",
            rate, MIN_RATE_WPM, MAX_RATE_WPM
        )))
    }
}
