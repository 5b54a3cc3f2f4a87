use super::source::{LopdfSource, PdfTextSource};
use crate::speech::{SpeechEngine, SpeechOutput};
use crate::{Pdf2AudioError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fail with `InvalidArgument` for an empty path and `NotFound` when the
/// path is not an existing file
pub fn check_document_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Pdf2AudioError::InvalidArgument(
            "File name must not be empty".into(),
        ));
    }

    if !path.is_file() {
        return Err(Pdf2AudioError::NotFound(format!(
            "File '{}' does not exist!",
            path.display()
        )));
    }

    Ok(())
}

/// Reads a PDF and hands its text to a [`SpeechOutput`]
pub struct DocumentConverter<S: PdfTextSource, E: SpeechEngine> {
    source: S,
    speech: SpeechOutput<E>,
    path: Option<PathBuf>,
}

impl<E: SpeechEngine> DocumentConverter<LopdfSource, E> {
    /// Open the PDF at `path`, checked with [`check_document_path`]
    ///
    /// No text is extracted yet.
    pub fn open(path: impl AsRef<Path>, speech: SpeechOutput<E>) -> Result<Self> {
        let path = path.as_ref();
        check_document_path(path)?;

        info!("Opening PDF: {}", path.display());
        let source = LopdfSource::from_reader(File::open(path)?)?;

        Ok(Self {
            source,
            speech,
            path: Some(path.to_path_buf()),
        })
    }
}

impl<S: PdfTextSource, E: SpeechEngine> DocumentConverter<S, E> {
    /// Build a converter over an already-opened text source
    pub fn new(source: S, speech: SpeechOutput<E>) -> Self {
        Self {
            source,
            speech,
            path: None,
        }
    }

    /// Concatenate the trimmed text of every page, in page order
    pub fn extract_text(&self) -> Result<String> {
        let mut content = String::new();
        for index in 0..self.source.page_count() {
            let text = self.source.page_text(index)?;
            debug!("Page {}: {} bytes", index + 1, text.len());
            content.push_str(text.trim());
        }
        Ok(content)
    }

    /// Render the document to an audio file at `output`
    pub fn save_audio(&mut self, output: impl AsRef<Path>, voice_id: i64, rate: i64) -> Result<()> {
        self.speech.set_voice(voice_id)?;
        self.speech.set_rate(rate)?;
        let text = self.extract_text()?;
        self.speech.render_to_file(&text, output)
    }

    /// Speak the document on the default output device
    pub fn play_audio(&mut self, voice_id: i64, rate: i64) -> Result<()> {
        self.speech.set_voice(voice_id)?;
        self.speech.set_rate(rate)?;
        let text = self.extract_text()?;
        self.speech.speak(&text)
    }

    /// Path the document was opened from, if it came from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn speech(&self) -> &SpeechOutput<E> {
        &self.speech
    }
}
