//! Command line surface
//!
//! Parsing and validation happen here, before any configuration is read or
//! any model is loaded, so usage mistakes fail fast.

use crate::config::AppConfig;
use crate::document::{check_document_path, DocumentConverter};
use crate::speech::voice::{resolve_voice, validate_rate};
use crate::speech::{SpeechEngine, SpeechOutput, DEFAULT_RATE_WPM, DEFAULT_VOICE};
use crate::Result;
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;
use tracing::info;

/// Convert PDF files to audio
#[derive(Parser, Debug)]
#[command(name = "pdf2audio")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["play", "save"])))]
pub struct Cli {
    /// Name of the PDF file
    pub file_name: PathBuf,

    /// Play the PDF file as audio
    #[arg(short, long)]
    pub play: bool,

    /// Save the PDF file as an audio file
    #[arg(short, long)]
    pub save: bool,

    /// ID of the voice to use
    #[arg(short, long, default_value_t = DEFAULT_VOICE as i64, allow_negative_numbers = true)]
    pub voice: i64,

    /// Rate of speech in words per minute
    #[arg(short, long, default_value_t = DEFAULT_RATE_WPM as i64, allow_negative_numbers = true)]
    pub rate: i64,

    /// Output file name when using --save
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/pdf2audio/config.toml)
    #[arg(long, env = "PDF2AUDIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// VITS model file, overrides the config file
    #[arg(long, env = "PDF2AUDIO_MODEL")]
    pub model: Option<PathBuf>,

    /// Tokens file for the model, overrides the config file
    #[arg(long, env = "PDF2AUDIO_TOKENS")]
    pub tokens: Option<PathBuf>,
}

/// What to do with the document
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Play,
    Save { output: PathBuf },
}

/// A validated command line
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub file_name: PathBuf,
    pub action: Action,
    pub voice: i64,
    pub rate: i64,
    pub config: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub tokens: Option<PathBuf>,
}

impl Cli {
    /// Check the option combinations clap cannot express
    pub fn into_invocation(self) -> std::result::Result<Invocation, clap::Error> {
        let action = match (self.play, self.save, self.output) {
            (true, _, Some(_)) => {
                return Err(Cli::command().error(
                    ErrorKind::ArgumentConflict,
                    "--play does not take any additional arguments",
                ));
            }
            (true, _, None) => Action::Play,
            (false, true, Some(output)) => Action::Save { output },
            (false, true, None) => {
                return Err(Cli::command().error(
                    ErrorKind::MissingRequiredArgument,
                    "--save requires --output argument",
                ));
            }
            (false, false, _) => {
                return Err(Cli::command().error(
                    ErrorKind::MissingRequiredArgument,
                    "one of --play or --save is required",
                ));
            }
        };

        Ok(Invocation {
            file_name: self.file_name,
            action,
            voice: self.voice,
            rate: self.rate,
            config: self.config,
            model: self.model,
            tokens: self.tokens,
        })
    }
}

impl Invocation {
    /// Checks that need neither the config file nor the model: the document
    /// path and the speaking rate
    pub fn preflight(&self) -> Result<()> {
        check_document_path(&self.file_name)?;
        validate_rate(self.rate)?;
        Ok(())
    }

    /// Run [`Self::preflight`], load the config and check the voice index
    /// against the configured catalog
    ///
    /// Everything that can be rejected is rejected here, before the model is
    /// loaded.
    pub fn prepare(&self) -> Result<AppConfig> {
        self.preflight()?;
        let config = self.load_config()?;
        resolve_voice(&config.voice_list(), self.voice)?;
        Ok(config)
    }

    /// Load the config file and apply command line overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(tokens) = &self.tokens {
            config = config.with_tokens(tokens);
        }
        Ok(config)
    }

    /// One-line message printed before conversion starts
    pub fn status_line(&self) -> String {
        match &self.action {
            Action::Play => format!(
                "Playing pdf file '{}' as audio",
                self.file_name.display()
            ),
            Action::Save { output } => format!(
                "Saving pdf file '{}' as '{}'",
                self.file_name.display(),
                output.display()
            ),
        }
    }
}

/// Open the document and play or save it with `engine`
pub fn execute<E: SpeechEngine>(invocation: &Invocation, engine: E) -> Result<()> {
    let speech = SpeechOutput::new(engine);
    let mut converter = DocumentConverter::open(&invocation.file_name, speech)?;

    println!("{}", invocation.status_line());

    match &invocation.action {
        Action::Play => converter.play_audio(invocation.voice, invocation.rate)?,
        Action::Save { output } => {
            converter.save_audio(output, invocation.voice, invocation.rate)?
        }
    }

    info!("Done");
    Ok(())
}
