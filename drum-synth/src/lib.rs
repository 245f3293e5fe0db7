//! Drum Synth: fixed-point three-voice drum synthesizer
//!
//! A table-driven synthesizer that mixes a bass drum, a snare and a hi-hat
//! into a single unsigned 8-bit mono stream. Every voice is a 16-bit phase
//! accumulator reading a waveform table, shaped by two one-shot envelopes
//! (amplitude and pitch) that are stepped once per 32-sample block.
//!
//! Alongside the audio stream the engine produces a "cutoff bus": a base
//! cutoff value plus the amplitude level of every voice, clamped to a byte,
//! pushed once per sample. A downstream filter can use it to open up on each
//! hit.
//!
//! # Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`dsp`] | 8-bit fixed-point multiply, mix and table interpolation |
//! | [`tables`] | Waveform, envelope and increment lookup tables |
//! | [`patch`] | Patch model, factory presets, controller map |
//! | [`voice`] | Per-instrument oscillator and envelope state |
//! | [`DrumSynth`] | Control surface and block render loop |
//!
//! The host supplies time through a [`Clock`], noise through a
//! [`NoiseSource`] and receives samples through any [`SampleSink`]
//! (every `ringbuf` ring buffer of bytes is one).
//!
//! # Usage
//!
//! ```
//! use drum_synth::{DrumSynth, DrumSynthConfig, ALL_INSTRUMENTS};
//! use ringbuf::{HeapRb, traits::Consumer};
//!
//! let mut synth = DrumSynth::new(&DrumSynthConfig::default()).unwrap();
//! let mut audio = HeapRb::<u8>::new(256);
//!
//! synth.trigger(0, 255).unwrap();
//! synth.render(64, &mut audio, ALL_INSTRUMENTS);
//!
//! let samples: Vec<u8> = audio.pop_iter().collect();
//! assert_eq!(samples.len(), 256);
//! ```

pub mod dsp;
pub mod patch;
pub mod tables;
pub mod voice;

mod clock;
mod config;
mod engine;
mod error;
mod noise;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DrumSynthConfig;
pub use engine::DrumSynth;
pub use error::DrumSynthError;
pub use noise::{NoiseSource, PcgNoise};
pub use patch::{Patch, PatchField, SynthKind};
pub use sink::SampleSink;
pub use voice::VoiceState;

// =============================================================================
// Constants
// =============================================================================

/// Number of drum instruments (bass drum, snare, hi-hat)
pub const NUM_INSTRUMENTS: usize = 3;

/// Samples rendered per modulation step
pub const AUDIO_BLOCK_SIZE: usize = 32;

/// Nominal output sample rate in Hz (20 MHz / 512)
///
/// The engine itself is rate-agnostic; this is the rate the lookup tables
/// are tuned for.
pub const SAMPLE_RATE: u32 = 39_062;

/// Instrument mask selecting every voice
pub const ALL_INSTRUMENTS: u8 = 0b111;

/// Sample written on each render call while the engine is idle
pub const IDLE_SAMPLE: u8 = 0;

/// Default idle time after which rendering is muted (5 minutes)
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 300_000;
