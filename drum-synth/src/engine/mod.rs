//! Drum synth engine
//!
//! Owns the three patches and voices plus the render-loop state that has to
//! survive between calls (held output sample, decimation counter, last
//! trigger time).
//!
//! Architecture:
//! - Control operations (`trigger`, patch loading, controllers) only touch
//!   patches and trigger-time voice state
//! - `render()` steps envelopes once per 32-sample block and oscillators
//!   once per sample
//! - The audio stream goes to a caller-supplied [`SampleSink`]; the cutoff
//!   bus goes to a ring buffer owned by the engine
//!
//! [`SampleSink`]: crate::SampleSink

use ringbuf::HeapRb;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::DrumSynthConfig;
use crate::error::DrumSynthError;
use crate::noise::{NoiseSource, PcgNoise};
use crate::patch::{NUM_PRESETS, PRESETS, Patch, cc_target, morph_presets};
use crate::voice::VoiceState;
use crate::NUM_INSTRUMENTS;

mod render;


/// Presets loaded by [`DrumSynth::init`]: a bass drum, a snare, a hi-hat
const DEFAULT_PRESETS: [usize; NUM_INSTRUMENTS] = [0, 8, 14];

/// Three-voice drum synthesizer
pub struct DrumSynth<C: Clock = SystemClock, N: NoiseSource = PcgNoise> {
    patches: [Patch; NUM_INSTRUMENTS],
    voices: [VoiceState; NUM_INSTRUMENTS],
    /// Output is refreshed when the sample counter exceeds this
    decimation: u8,
    sample_counter: u8,
    /// Last committed output sample, held between decimation ticks
    sample: u8,
    last_event_time: u32,
    idle_timeout_ms: u32,
    idle: bool,
    cutoff_bus: HeapRb<u8>,
    clock: C,
    noise: N,
}

impl DrumSynth {
    /// Create an engine on the system clock with seeded PCG noise
    pub fn new(config: &DrumSynthConfig) -> Result<Self, DrumSynthError> {
        Self::with_sources(config, SystemClock::new(), PcgNoise::new(config.noise_seed))
    }
}

impl<C: Clock, N: NoiseSource> DrumSynth<C, N> {
    /// Create an engine with caller-supplied time and noise
    pub fn with_sources(
        config: &DrumSynthConfig,
        clock: C,
        noise: N,
    ) -> Result<Self, DrumSynthError> {
        config.validate()?;

        let mut synth = Self {
            patches: [Patch::default(); NUM_INSTRUMENTS],
            voices: [VoiceState::default(); NUM_INSTRUMENTS],
            decimation: 0,
            sample_counter: 0,
            sample: 0,
            last_event_time: 0,
            idle_timeout_ms: config.idle_timeout_ms,
            idle: false,
            cutoff_bus: HeapRb::new(config.buffer_capacity),
            clock,
            noise,
        };
        synth.init();
        synth.set_bandwidth(config.bandwidth);
        if let Some(balance) = config.balance {
            synth.set_balance(balance);
        }

        Ok(synth)
    }

    /// Silence every voice and load the default kit
    pub fn init(&mut self) {
        self.voices = [VoiceState::default(); NUM_INSTRUMENTS];
        self.sample = 0;
        self.sample_counter = 0;
        for (instrument, preset) in DEFAULT_PRESETS.into_iter().enumerate() {
            self.apply_preset(instrument, preset);
        }
        self.last_event_time = self.clock.milliseconds();
        self.idle = false;

        debug!("Drum synth initialized with presets {:?}", DEFAULT_PRESETS);
    }

    /// Start a hit on one instrument
    ///
    /// `level` is the velocity; it is scaled by the patch level.
    pub fn trigger(&mut self, instrument: usize, level: u8) -> Result<(), DrumSynthError> {
        check_instrument(instrument)?;

        self.last_event_time = self.clock.milliseconds();
        if self.idle {
            debug!("Drum synth leaving idle mute");
            self.idle = false;
        }
        self.voices[instrument].trigger(&self.patches[instrument], level);
        Ok(())
    }

    /// Copy a factory preset into an instrument, at full level
    pub fn load_patch(&mut self, instrument: usize, preset: usize) -> Result<(), DrumSynthError> {
        check_instrument(instrument)?;
        if preset >= NUM_PRESETS {
            warn!("load_patch: preset {} out of range (max {})", preset, NUM_PRESETS - 1);
            return Err(DrumSynthError::InvalidPreset(preset));
        }

        self.apply_preset(instrument, preset);
        debug!("Loaded preset {} into instrument {}", preset, instrument);
        Ok(())
    }

    /// Blend between adjacent presets of the instrument slot's bank
    ///
    /// The bank follows the slot (0-4, 5-9, 10-14), not the algorithm the
    /// slot plays. The algorithm selector is never changed and the level is
    /// reset to full.
    pub fn morph_patch(&mut self, instrument: usize, value: u8) -> Result<(), DrumSynthError> {
        check_instrument(instrument)?;

        let current = &mut self.patches[instrument];
        let synth = current.synth;
        *current = morph_presets(instrument, value);
        current.synth = synth;
        current.level = 255;
        Ok(())
    }

    /// Apply a controller change; controllers outside 16..=30 are ignored
    pub fn set_parameter_cc(&mut self, cc: u8, value: u8) {
        if let Some((instrument, field)) = cc_target(cc) {
            self.patches[instrument].set(field, value << 1);
        }
    }

    /// Map a bandwidth control to the decimation divisor (0-31)
    ///
    /// Higher bandwidth means less decimation; 255 refreshes every sample.
    pub fn set_bandwidth(&mut self, bandwidth: u8) {
        self.decimation = !bandwidth >> 3;
    }

    /// Crossfade bass drum against snare; the hi-hat follows at half the
    /// snare level
    pub fn set_balance(&mut self, mix: u8) {
        if mix < 128 {
            self.patches[0].level = 255;
            self.patches[1].level = mix << 1;
        } else {
            self.patches[0].level = !((mix - 128) << 1);
            self.patches[1].level = 255;
        }
        self.patches[2].level = self.patches[1].level >> 1;
    }

    pub fn patch(&self, instrument: usize) -> Option<&Patch> {
        self.patches.get(instrument)
    }

    pub fn patches(&self) -> &[Patch; NUM_INSTRUMENTS] {
        &self.patches
    }

    pub fn voice(&self, instrument: usize) -> Option<&VoiceState> {
        self.voices.get(instrument)
    }

    /// Current decimation divisor
    pub fn decimation(&self) -> u8 {
        self.decimation
    }

    /// Whether the last render was muted by the idle policy
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Cutoff bus, one byte per rendered audio sample
    pub fn cutoff_buffer(&self) -> &HeapRb<u8> {
        &self.cutoff_bus
    }

    pub fn cutoff_buffer_mut(&mut self) -> &mut HeapRb<u8> {
        &mut self.cutoff_bus
    }

    fn apply_preset(&mut self, instrument: usize, preset: usize) {
        let patch = &mut self.patches[instrument];
        *patch = PRESETS[preset];
        patch.level = 255;
    }
}

fn check_instrument(instrument: usize) -> Result<(), DrumSynthError> {
    if instrument >= NUM_INSTRUMENTS {
        warn!(
            "instrument {} out of range (max {})",
            instrument,
            NUM_INSTRUMENTS - 1
        );
        return Err(DrumSynthError::InvalidInstrument(instrument));
    }
    Ok(())
}
