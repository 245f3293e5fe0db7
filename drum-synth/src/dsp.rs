//! Fixed-point primitives
//!
//! All arithmetic is 8-bit in, 8- or 16-bit out, with truncating right
//! shifts. Rendering is bit-exact across platforms as long as these stay
//! integer-only.

/// Unsigned 8×8 multiply, keep the high byte
#[inline]
pub const fn u8u8_mul_shift8(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16) >> 8) as u8
}

/// Unsigned 8×8 multiply, full 16-bit product
#[inline]
pub const fn u8u8_mul(a: u8, b: u8) -> u16 {
    a as u16 * b as u16
}

/// Signed × unsigned multiply, keep the high byte (arithmetic shift)
#[inline]
pub const fn s8u8_mul_shift8(a: i8, b: u8) -> i8 {
    ((a as i16 * b as i16) >> 8) as i8
}

/// Crossfade two bytes: `balance = 0` returns `a` exactly, `255` is within
/// one step of `b`
#[inline]
pub const fn u8_mix(a: u8, b: u8, balance: u8) -> u8 {
    let weight_b = balance as u32;
    let weight_a = 256 - weight_b;
    ((a as u32 * weight_a + b as u32 * weight_b) >> 8) as u8
}

/// Read a 257-entry byte table at a 8.8 fixed-point position
///
/// The high byte of `phase` selects the entry, the low byte blends towards
/// the next one. The guard entry at index 256 keeps `phase = 0xFFFF` in
/// bounds.
#[inline]
pub fn interpolate_sample(table: &[u8; 257], phase: u16) -> u8 {
    let index = (phase >> 8) as usize;
    u8_mix(table[index], table[index + 1], phase as u8)
}

/// Read a 257-entry monotonically increasing word table at a 8.8 position
#[inline]
pub fn interpolate_increasing(table: &[u16; 257], position: u16) -> u16 {
    let index = (position >> 8) as usize;
    let a = table[index];
    let delta = table[index + 1].saturating_sub(a) as u32;
    a + ((delta * (position & 0xFF) as u32) >> 8) as u16
}

/// Advance a one-shot envelope phase
///
/// Returns the new phase and whether the envelope terminated. On
/// termination the phase is pinned at `u16::MAX`; the caller must zero the
/// increment so the envelope stays there.
#[inline]
pub const fn envelope_step(phase: u16, increment: u16) -> (u16, bool) {
    match phase.checked_add(increment) {
        Some(next) => (next, false),
        None => (u16::MAX, true),
    }
}
