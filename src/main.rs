use anyhow::{Context, Result};
use clap::Parser;
use pdf2audio::cli::{self, Cli};
use pdf2audio::speech::VitsEngine;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the status line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf2audio=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let invocation = match Cli::parse().into_invocation() {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };

    info!("Starting pdf2audio");

    let config = invocation.prepare().map_err(|e| {
        error!("{}", e.user_message());
        e
    })?;
    let engine = VitsEngine::new(config.tts.clone(), config.voice_list())
        .context("Failed to initialize speech engine")?;

    cli::execute(&invocation, engine).map_err(|e| {
        error!("{}", e.user_message());
        e
    })?;

    Ok(())
}
