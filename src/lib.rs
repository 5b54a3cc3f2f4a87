pub mod audio;
pub mod cli;
pub mod config;
pub mod document;
pub mod speech;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Pdf2AudioError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("PDF error: {0}")]
    PdfError(String),

    #[error("TTS error: {0}")]
    TTSError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for Pdf2AudioError {
    fn from(e: std::io::Error) -> Self {
        Pdf2AudioError::IOError(e.to_string())
    }
}

impl Pdf2AudioError {
    /// Whether the caller supplied something wrong, as opposed to a failure
    /// inside one of the collaborators
    pub fn is_user_error(&self) -> bool {
        match self {
            Pdf2AudioError::InvalidArgument(_) => true,
            Pdf2AudioError::NotFound(_) => true,
            Pdf2AudioError::ConfigError(_) => true,
            Pdf2AudioError::PdfError(_) => false,
            Pdf2AudioError::TTSError(_) => false,
            Pdf2AudioError::ModelLoadError(_) => false,
            Pdf2AudioError::AudioDeviceError(_) => false,
            Pdf2AudioError::AudioProcessingError(_) => false,
            Pdf2AudioError::IOError(_) => false,
        }
    }

    /// Get a short hint for the terminal
    pub fn user_message(&self) -> String {
        match self {
            Pdf2AudioError::InvalidArgument(_) => {
                "A value passed to pdf2audio is out of range or malformed.".to_string()
            }
            Pdf2AudioError::NotFound(_) => "Check the PDF file path.".to_string(),
            Pdf2AudioError::PdfError(_) => {
                "The PDF could not be read. It may be corrupted or encrypted.".to_string()
            }
            Pdf2AudioError::TTSError(_) => "Speech synthesis failed.".to_string(),
            Pdf2AudioError::ModelLoadError(_) => {
                "Failed to load the voice model. Please verify model files are present."
                    .to_string()
            }
            Pdf2AudioError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
            Pdf2AudioError::AudioProcessingError(_) => "Audio processing failed.".to_string(),
            Pdf2AudioError::IOError(_) => "File system error occurred.".to_string(),
            Pdf2AudioError::ConfigError(_) => {
                "Configuration error. Please check the config file and model paths.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Pdf2AudioError>;
