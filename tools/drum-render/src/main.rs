//! drum-render - play step patterns through the drum synth offline
//!
//! # Usage
//!
//! ```bash
//! # Render the built-in beat
//! drum-render --output beat.wav
//!
//! # Render a pattern file, 8 bars, and keep the cutoff bus too
//! drum-render --config patterns/basic.toml --output basic.wav \
//!     --cutoff-output basic-cutoff.wav --bars 8
//! ```
//!
//! Output is unsigned 8-bit mono at the synth's native rate. See
//! [`config`] for the pattern file format.

mod config;
mod pattern;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use config::RenderConfig;

/// Render drum patterns to WAV
#[derive(Parser)]
#[command(name = "drum-render")]
#[command(about = "Render drum synth step patterns to WAV")]
#[command(version)]
struct Cli {
    /// Pattern file (TOML); the built-in beat is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Audio output path
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the cutoff bus as a second WAV file
    #[arg(long)]
    cutoff_output: Option<PathBuf>,

    /// Number of 4/4 bars to render
    #[arg(short, long, default_value_t = 4)]
    bars: u32,

    /// Override the pattern tempo (BPM)
    #[arg(short, long)]
    tempo: Option<u32>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(tempo) = cli.tempo {
        config.pattern.tempo = tempo;
        config.validate()?;
    }

    info!(
        "Rendering {} bars at {} BPM",
        cli.bars, config.pattern.tempo
    );
    let output = render::render_pattern(&config, cli.bars)?;

    render::write_wav(&cli.output, &output.audio)?;
    if let Some(path) = &cli.cutoff_output {
        render::write_wav(path, &output.cutoff)?;
    }

    Ok(())
}
