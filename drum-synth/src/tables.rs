//! Lookup tables
//!
//! Every table is built at compile time by a `const fn` using integer math
//! only, so the binary carries plain read-only arrays and the render path
//! never computes a transcendental.
//!
//! | Table | Entries | Indexed by |
//! |-------|---------|------------|
//! | [`SINE`] | 256 + guard | `phase >> 8` (bass drum, snare) |
//! | [`HIHAT`] | 4096 | `phase >> 4` (hi-hat) |
//! | [`ENVELOPE`] | 256 + guard | envelope phase, interpolated |
//! | [`ENV_INCREMENTS`] | 256 | decay selector |
//! | [`PHASE_INCREMENTS`] | 256 + guard | 8.8 pitch, interpolated |

use crate::SAMPLE_RATE;

/// Signed sine wave, one period, entry 256 repeats entry 0
pub static SINE: [i8; 257] = build_sine();

/// Metallic hi-hat wave: six detuned square partials over one table period
pub static HIHAT: [i8; HIHAT_LEN] = build_hihat();

/// Exponential decay shape from 255 down to exactly 0
pub static ENVELOPE: [u8; 257] = build_envelope();

/// Envelope phase increment per block, by decay selector
///
/// Larger selectors give smaller increments and therefore longer decays.
pub static ENV_INCREMENTS: [u16; 256] = build_env_increments();

/// Oscillator phase increment, by pitch (24 steps per octave from 10 Hz)
pub static PHASE_INCREMENTS: [u16; 257] = build_phase_increments();

/// Hi-hat table length (12-bit index)
pub const HIHAT_LEN: usize = 4096;

/// Square partials of the hi-hat, in cycles per table period
const HIHAT_PARTIALS: [u32; 6] = [410, 608, 739, 1045, 1080, 1600];

/// Per-entry envelope decay, Q16 (about 0.98)
const ENVELOPE_DECAY_Q16: u64 = 64_225;

/// Shortest envelope, in blocks, Q16
const SHORTEST_DECAY_Q16: u64 = 16 << 16;

/// Decay length ratio between neighbouring selectors, Q16 (2^(1/32))
const DECAY_RATIO_Q16: u64 = 66_971;

/// Increment of the lowest pitch (10 Hz), Q16
const LOWEST_INCREMENT_Q16: u64 = (10u64 << 32) / SAMPLE_RATE as u64;

/// Ratio between neighbouring pitches, Q16 (2^(1/24))
const PITCH_RATIO_Q16: u64 = 67_456;

const fn build_sine() -> [i8; 257] {
    let mut table = [0i8; 257];
    let mut i = 0;
    while i < 257 {
        let position = i % 256;
        // Bhaskara I over each half period: sin ≈ 16p / (5·128² − 4p)
        let t = (position % 128) as i64;
        let p = t * (128 - t);
        let denominator = 81_920 - 4 * p;
        let magnitude = ((127 * 32 * p + denominator) / (2 * denominator)) as i8;
        table[i] = if position < 128 { magnitude } else { -magnitude };
        i += 1;
    }
    table
}

const fn build_hihat() -> [i8; HIHAT_LEN] {
    let mut table = [0i8; HIHAT_LEN];
    let mut i = 0;
    while i < HIHAT_LEN {
        let mut sum: i32 = 0;
        let mut k = 0;
        while k < HIHAT_PARTIALS.len() {
            let phase = (i as u32 * HIHAT_PARTIALS[k]) % HIHAT_LEN as u32;
            sum += if phase < (HIHAT_LEN / 2) as u32 { 1 } else { -1 };
            k += 1;
        }
        table[i] = (sum * 21) as i8;
        i += 1;
    }
    table
}

const fn build_envelope() -> [u8; 257] {
    let mut table = [0u8; 257];
    let mut level: u64 = 255u64 << 16;
    let mut i = 0;
    while i < 257 {
        // Linear taper on top of the exponential so the tail lands on 0
        table[i] = ((level * (256 - i as u64) / 256) >> 16) as u8;
        level = (level * ENVELOPE_DECAY_Q16) >> 16;
        i += 1;
    }
    table
}

const fn build_env_increments() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut duration = SHORTEST_DECAY_Q16;
    let mut i = 0;
    while i < 256 {
        let increment = (1u64 << 32) / duration;
        table[i] = if increment > u16::MAX as u64 {
            u16::MAX
        } else if increment == 0 {
            1
        } else {
            increment as u16
        };
        duration = (duration * DECAY_RATIO_Q16) >> 16;
        i += 1;
    }
    table
}

const fn build_phase_increments() -> [u16; 257] {
    let mut table = [0u16; 257];
    let mut increment = LOWEST_INCREMENT_Q16;
    let mut i = 0;
    while i < 257 {
        let whole = increment >> 16;
        table[i] = if whole > u16::MAX as u64 {
            u16::MAX
        } else {
            whole as u16
        };
        increment = (increment * PITCH_RATIO_Q16) >> 16;
        i += 1;
    }
    table
}
