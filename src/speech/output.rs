//! Speech output: voice/rate configuration in front of a speech engine

use super::voice::{resolve_voice, validate_rate, VoiceCatalog, VoiceSettings};
use crate::Result;
use std::path::Path;
use tracing::{debug, info};

/// Text-to-speech capability consumed by [`SpeechOutput`]
///
/// Both actions are synchronous and return only once playback has finished
/// or the file has been written.
pub trait SpeechEngine {
    /// Voices this engine can speak with
    fn voices(&self) -> &dyn VoiceCatalog;

    /// Speak `text` on the default output device
    fn speak(&mut self, text: &str, settings: &VoiceSettings) -> Result<()>;

    /// Synthesize `text` into an audio file at `path`, replacing any existing file
    fn render_to_file(&mut self, text: &str, settings: &VoiceSettings, path: &Path) -> Result<()>;
}

/// Configured speech output
///
/// Voice and rate persist across calls on the same instance.
pub struct SpeechOutput<E: SpeechEngine> {
    engine: E,
    settings: VoiceSettings,
}

impl<E: SpeechEngine> SpeechOutput<E> {
    pub fn new(engine: E) -> Self {
        let settings = VoiceSettings {
            speaker_id: engine.voices().id_at(0).unwrap_or_default(),
            ..Default::default()
        };

        Self { engine, settings }
    }

    /// Select the voice at catalog index `id`
    pub fn set_voice(&mut self, id: i64) -> Result<()> {
        let (voice_index, speaker_id) = resolve_voice(self.engine.voices(), id)?;
        debug!(
            "Voice set to {} ({})",
            voice_index,
            self.engine.voices().name_at(voice_index).unwrap_or("unnamed")
        );
        self.settings.voice_index = voice_index;
        self.settings.speaker_id = speaker_id;
        Ok(())
    }

    /// Set the speaking rate in words per minute
    pub fn set_rate(&mut self, wpm: i64) -> Result<()> {
        self.settings.rate_wpm = validate_rate(wpm)?;
        debug!("Rate set to {} wpm", self.settings.rate_wpm);
        Ok(())
    }

    pub fn speak(&mut self, text: &str) -> Result<()> {
        info!("Speaking {} bytes of text", text.len());
        self.engine.speak(text, &self.settings)
    }

    pub fn render_to_file(&mut self, text: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Rendering {} bytes of text to {:?}", text.len(), path);
        self.engine.render_to_file(text, &self.settings, path)
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
