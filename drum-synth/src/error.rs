//! Drum synth error types

use thiserror::Error;

use crate::patch::NUM_PRESETS;
use crate::{AUDIO_BLOCK_SIZE, NUM_INSTRUMENTS};

/// Errors reported by the control surface and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrumSynthError {
    /// Instrument index is not 0 (bass drum), 1 (snare) or 2 (hi-hat)
    #[error("instrument {0} out of range (max {max})", max = NUM_INSTRUMENTS - 1)]
    InvalidInstrument(usize),
    /// Preset index past the end of the factory preset table
    #[error("preset {0} out of range (max {max})", max = NUM_PRESETS - 1)]
    InvalidPreset(usize),
    /// Cutoff bus capacity cannot hold a single block
    #[error("buffer capacity {0} is smaller than one audio block ({block} samples)", block = AUDIO_BLOCK_SIZE)]
    BufferTooSmall(usize),
}
