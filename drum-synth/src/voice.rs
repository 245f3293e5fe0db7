//! Per-instrument oscillator and envelope state
//!
//! A voice owns three 16-bit accumulators: the oscillator phase, advanced
//! every sample, and the pitch and amplitude envelope phases, advanced once
//! per block by [`VoiceState::update_modulation`]. Envelopes are one-shot:
//! they run from 0 to `0xFFFF` and freeze there until the next trigger.

use crate::dsp::{
    envelope_step, interpolate_increasing, interpolate_sample, s8u8_mul_shift8, u8u8_mul,
    u8u8_mul_shift8,
};
use crate::patch::{Patch, SynthKind};
use crate::tables::{ENV_INCREMENTS, ENVELOPE, HIHAT, PHASE_INCREMENTS, SINE};

/// Runtime state of one drum voice
///
/// Everything here is derived from the patch and the last trigger; control
/// operations never write it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoiceState {
    phase: u16,
    phase_increment: u16,
    pitch_env_phase: u16,
    pitch_env_increment: u16,
    amp_env_phase: u16,
    amp_env_increment: u16,
    /// Velocity scaled by the patch level at trigger time
    level: u8,
    amp_level: u8,
    amp_level_noise: u8,
}

impl VoiceState {
    /// Restart the voice from the top of both envelopes
    pub(crate) fn trigger(&mut self, patch: &Patch, velocity: u8) {
        self.phase = 0;
        self.pitch_env_phase = 0;
        self.amp_env_phase = 0;

        self.pitch_env_increment = ENV_INCREMENTS[patch.pitch_decay as usize];
        self.amp_env_increment = ENV_INCREMENTS[patch.amp_decay as usize];
        self.level = u8u8_mul_shift8(velocity, patch.level);
    }

    /// Block-rate update: step both envelopes, derive levels and pitch
    ///
    /// `pitch_noise` is a random byte for the voice whose pitch is
    /// randomised by crunchiness (instrument 0), `None` for the others.
    pub(crate) fn update_modulation(&mut self, patch: &Patch, pitch_noise: Option<u8>) {
        let (amp_env_phase, terminated) = envelope_step(self.amp_env_phase, self.amp_env_increment);
        self.amp_env_phase = amp_env_phase;
        if terminated {
            self.amp_env_increment = 0;
        }
        self.amp_level = u8u8_mul_shift8(self.level, interpolate_sample(&ENVELOPE, self.amp_env_phase));

        let (pitch_env_phase, terminated) =
            envelope_step(self.pitch_env_phase, self.pitch_env_increment);
        self.pitch_env_phase = pitch_env_phase;
        if terminated {
            self.pitch_env_increment = 0;
        }

        let mut pitch = (patch.pitch as u16) << 8;
        if let Some(noise) = pitch_noise {
            pitch = pitch.wrapping_add(u8u8_mul(noise, patch.crunchiness()));
        }
        let pitch_env = interpolate_sample(&ENVELOPE, self.pitch_env_phase);
        pitch = pitch.wrapping_add(u8u8_mul(patch.pitch_mod(), pitch_env));

        self.phase_increment = interpolate_increasing(&PHASE_INCREMENTS, pitch);

        match patch.synth_kind() {
            SynthKind::BassDrum => {}
            SynthKind::Snare => {
                self.amp_level_noise = u8u8_mul_shift8(self.amp_level, patch.crunchiness());
                self.amp_level = u8u8_mul_shift8(self.amp_level, !patch.crunchiness());
            }
            SynthKind::HiHat => {
                // The hi-hat table is 16 times longer and already periodic
                self.phase_increment >>= 6;
            }
        }
    }

    /// Advance the oscillator by one sample and return its signed output
    ///
    /// `noise` is the per-sample noise byte shared by every voice.
    #[inline]
    pub(crate) fn next_sample(&mut self, kind: SynthKind, noise: u8) -> i16 {
        self.phase = self.phase.wrapping_add(self.phase_increment);
        let phase = self.phase;

        match kind {
            SynthKind::BassDrum => {
                let index = (phase >> 8) as usize;
                let a = SINE[index];
                let b = SINE[index + 1];
                let sample = a.wrapping_add(s8u8_mul_shift8(b.wrapping_sub(a), phase as u8));
                s8u8_mul_shift8(sample, self.amp_level) as i16
            }
            SynthKind::Snare => {
                let body = s8u8_mul_shift8(SINE[(phase >> 8) as usize], self.amp_level);
                let rattle = s8u8_mul_shift8(noise as i8, self.amp_level_noise);
                body as i16 + rattle as i16
            }
            SynthKind::HiHat => s8u8_mul_shift8(HIHAT[(phase >> 4) as usize], self.amp_level) as i16,
        }
    }

    pub fn phase(&self) -> u16 {
        self.phase
    }

    pub fn phase_increment(&self) -> u16 {
        self.phase_increment
    }

    pub fn pitch_env_phase(&self) -> u16 {
        self.pitch_env_phase
    }

    pub fn pitch_env_increment(&self) -> u16 {
        self.pitch_env_increment
    }

    pub fn amp_env_phase(&self) -> u16 {
        self.amp_env_phase
    }

    pub fn amp_env_increment(&self) -> u16 {
        self.amp_env_increment
    }

    /// Gain latched by the last trigger
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Current envelope-scaled amplitude (tonal part for snares)
    pub fn amp_level(&self) -> u8 {
        self.amp_level
    }

    /// Current noise amplitude (snares only)
    pub fn amp_level_noise(&self) -> u8 {
        self.amp_level_noise
    }
}
