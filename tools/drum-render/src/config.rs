//! Render configuration (TOML)
//!
//! ```toml
//! [synth]
//! bandwidth = 224
//!
//! [pattern]
//! tempo = 120
//! presets = [1, 7, 12]
//! bd = "x... x... x... x..."
//! sd = ".... x... .... x..."
//! hh = "..o. ..o. ..o. ..o."
//! ```
//!
//! Both tables are optional; an empty file renders the default beat.

use std::path::Path;

use anyhow::{Context, Result, bail};
use drum_synth::patch::NUM_PRESETS;
use drum_synth::{ALL_INSTRUMENTS, DrumSynthConfig, NUM_INSTRUMENTS};
use serde::Deserialize;

use crate::pattern::Pattern;

#[derive(Debug, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub synth: DrumSynthConfig,
    #[serde(default)]
    pub pattern: PatternSection,
}

/// Tempo, mix settings, kit selection and step strings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PatternSection {
    /// Beats per minute
    pub tempo: u32,
    pub steps_per_beat: u32,
    /// Base cutoff sent with every render call
    pub cutoff: u8,
    /// Instrument mask (bit 0 = bass drum)
    pub instruments: u8,
    /// Preset index per instrument, loaded before morphing
    pub presets: Option<Vec<usize>>,
    /// Morph value per instrument
    pub morph: Option<Vec<u8>>,
    pub bd: String,
    pub sd: String,
    pub hh: String,
}

impl Default for PatternSection {
    fn default() -> Self {
        Self {
            tempo: 120,
            steps_per_beat: 4,
            cutoff: 64,
            instruments: ALL_INSTRUMENTS,
            presets: None,
            morph: None,
            bd: "x... .... x.x. ....".to_string(),
            sd: ".... x... .... x...".to_string(),
            hh: "x.o. x.o. x.o. x.oo".to_string(),
        }
    }
}

impl PatternSection {
    pub fn steps(&self) -> Result<Pattern> {
        Pattern::parse(&self.bd, &self.sd, &self.hh).context("Invalid step pattern")
    }
}

impl RenderConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read render config: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse render config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.synth.validate()?;

        let pattern = &self.pattern;
        if pattern.tempo == 0 {
            bail!("pattern.tempo must be greater than 0");
        }
        if pattern.steps_per_beat == 0 {
            bail!("pattern.steps_per_beat must be greater than 0");
        }
        if let Some(presets) = &pattern.presets {
            if presets.len() > NUM_INSTRUMENTS {
                bail!(
                    "pattern.presets has {} entries (max {})",
                    presets.len(),
                    NUM_INSTRUMENTS
                );
            }
            if let Some(&bad) = presets.iter().find(|&&p| p >= NUM_PRESETS) {
                bail!("pattern.presets: preset {} out of range (max {})", bad, NUM_PRESETS - 1);
            }
        }
        if let Some(morph) = &pattern.morph {
            if morph.len() > NUM_INSTRUMENTS {
                bail!(
                    "pattern.morph has {} entries (max {})",
                    morph.len(),
                    NUM_INSTRUMENTS
                );
            }
        }
        pattern.steps()?;
        Ok(())
    }
}
