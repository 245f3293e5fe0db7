//! Patch model, factory presets and controller map
//!
//! A patch is six bytes. The three instrument patches together form an
//! 18-byte parameter space: controller numbers and preset morphing address
//! it field by field, through [`PatchField`] rather than raw offsets.

use crate::NUM_INSTRUMENTS;

/// Bytes per patch
pub const PATCH_SIZE: usize = 6;

/// Presets per voice type
pub const PRESETS_PER_VOICE: usize = 5;

/// Total factory presets (5 per voice type × 3 voice types)
pub const NUM_PRESETS: usize = PRESETS_PER_VOICE * 3;

/// First controller number mapped to a patch field
pub const FIRST_CC: u8 = 16;

/// Last controller number mapped to a patch field
pub const LAST_CC: u8 = 30;

/// Synthesis algorithm of a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SynthKind {
    /// Interpolated sine with pitch sweep
    #[default]
    BassDrum = 0,
    /// Sine body crossfaded with noise
    Snare = 1,
    /// Metallic square cluster
    HiHat = 2,
}

impl SynthKind {
    /// Decode a selector byte; anything unknown plays as a bass drum
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            1 => SynthKind::Snare,
            2 => SynthKind::HiHat,
            _ => SynthKind::BassDrum,
        }
    }

    /// Index of this voice type's first preset
    pub const fn preset_bank(self) -> usize {
        self as usize * PRESETS_PER_VOICE
    }
}

/// One byte of a patch, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField {
    Synth,
    Pitch,
    PitchDecay,
    AmpDecay,
    Level,
    /// Crunchiness for noise, depth for the pitch envelope
    Modulation,
}

impl PatchField {
    /// All fields in storage order
    pub const ALL: [PatchField; PATCH_SIZE] = [
        PatchField::Synth,
        PatchField::Pitch,
        PatchField::PitchDecay,
        PatchField::AmpDecay,
        PatchField::Level,
        PatchField::Modulation,
    ];

    /// Byte offset inside a patch
    pub const fn offset(self) -> usize {
        self as usize
    }
}

/// Per-instrument synthesis parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Patch {
    /// Algorithm selector, kept as the raw byte so controller writes
    /// round-trip through [`Patch::get`]
    pub synth: u8,
    /// Base pitch, 24 steps per octave
    pub pitch: u8,
    /// Pitch envelope decay selector
    pub pitch_decay: u8,
    /// Amplitude envelope decay selector
    pub amp_decay: u8,
    /// Output gain
    pub level: u8,
    /// Crunchiness / pitch modulation depth
    pub modulation: u8,
}

impl Patch {
    pub const fn from_bytes(bytes: [u8; PATCH_SIZE]) -> Self {
        Self {
            synth: bytes[0],
            pitch: bytes[1],
            pitch_decay: bytes[2],
            amp_decay: bytes[3],
            level: bytes[4],
            modulation: bytes[5],
        }
    }

    pub const fn to_bytes(&self) -> [u8; PATCH_SIZE] {
        [
            self.synth,
            self.pitch,
            self.pitch_decay,
            self.amp_decay,
            self.level,
            self.modulation,
        ]
    }

    /// Decoded algorithm selector
    pub const fn synth_kind(&self) -> SynthKind {
        SynthKind::from_byte(self.synth)
    }

    /// Noise depth: pitch randomisation on instrument 0, noise mix on snares
    pub const fn crunchiness(&self) -> u8 {
        self.modulation
    }

    /// Pitch envelope depth
    pub const fn pitch_mod(&self) -> u8 {
        self.modulation
    }

    pub const fn get(&self, field: PatchField) -> u8 {
        match field {
            PatchField::Synth => self.synth,
            PatchField::Pitch => self.pitch,
            PatchField::PitchDecay => self.pitch_decay,
            PatchField::AmpDecay => self.amp_decay,
            PatchField::Level => self.level,
            PatchField::Modulation => self.modulation,
        }
    }

    pub fn set(&mut self, field: PatchField, value: u8) {
        match field {
            PatchField::Synth => self.synth = value,
            PatchField::Pitch => self.pitch = value,
            PatchField::PitchDecay => self.pitch_decay = value,
            PatchField::AmpDecay => self.amp_decay = value,
            PatchField::Level => self.level = value,
            PatchField::Modulation => self.modulation = value,
        }
    }
}

// =============================================================================
// Factory presets
// =============================================================================

const BD: u8 = SynthKind::BassDrum as u8;
const SD: u8 = SynthKind::Snare as u8;
const HH: u8 = SynthKind::HiHat as u8;

/// Factory presets: bass drums 0-4, snares 5-9, hi-hats 10-14
///
/// The level byte is overwritten with 255 whenever a preset is loaded.
pub static PRESETS: [Patch; NUM_PRESETS] = [
    Patch::from_bytes([BD, 60, 18, 104, 120, 0]),
    Patch::from_bytes([BD, 56, 60, 120, 150, 0]),
    Patch::from_bytes([BD, 60, 42, 130, 180, 14]),
    Patch::from_bytes([BD, 72, 20, 66, 224, 0]),
    Patch::from_bytes([BD, 42, 52, 106, 160, 60]),
    Patch::from_bytes([SD, 108, 18, 16, 72, 64]),
    Patch::from_bytes([SD, 108, 36, 32, 96, 140]),
    Patch::from_bytes([SD, 108, 36, 50, 90, 180]),
    Patch::from_bytes([SD, 116, 36, 32, 80, 150]),
    Patch::from_bytes([SD, 124, 40, 190, 90, 40]),
    Patch::from_bytes([HH, 124, 0, 0, 80, 0]),
    Patch::from_bytes([HH, 150, 0, 0, 80, 0]),
    Patch::from_bytes([HH, 136, 0, 0, 110, 0]),
    Patch::from_bytes([HH, 148, 0, 0, 90, 0]),
    Patch::from_bytes([HH, 154, 0, 0, 45, 0]),
];

/// Blend two adjacent presets from the bank of instrument slot `instrument`
///
/// Slot 0 morphs through presets 0-4, slot 1 through 5-9, slot 2 through
/// 10-14, whatever algorithm the slot currently plays. `value >> 6` picks
/// the pair, the low six bits the position between them. The selector byte
/// comes out of the blend like any other byte; callers that must keep their
/// algorithm restore it afterwards.
///
/// # Panics
///
/// If `instrument >= NUM_INSTRUMENTS`.
pub fn morph_presets(instrument: usize, value: u8) -> Patch {
    let first = instrument * PRESETS_PER_VOICE + (value >> 6) as usize;
    let balance = value << 2;
    let a = PRESETS[first].to_bytes();
    let b = PRESETS[first + 1].to_bytes();

    let mut mixed = [0u8; PATCH_SIZE];
    for (out, (&a, &b)) in mixed.iter_mut().zip(a.iter().zip(b.iter())) {
        *out = crate::dsp::u8_mix(a, b, balance);
    }
    Patch::from_bytes(mixed)
}

// =============================================================================
// Controller map
// =============================================================================

/// Targets of controllers 16..=30
///
/// Byte offsets 0-5 (bass drum), 6-11 (snare), then 12, 15 and 17 of the
/// hi-hat.
const CC_MAP: [(usize, PatchField); (LAST_CC - FIRST_CC + 1) as usize] = [
    (0, PatchField::Synth),
    (0, PatchField::Pitch),
    (0, PatchField::PitchDecay),
    (0, PatchField::AmpDecay),
    (0, PatchField::Level),
    (0, PatchField::Modulation),
    (1, PatchField::Synth),
    (1, PatchField::Pitch),
    (1, PatchField::PitchDecay),
    (1, PatchField::AmpDecay),
    (1, PatchField::Level),
    (1, PatchField::Modulation),
    (2, PatchField::Synth),
    (2, PatchField::AmpDecay),
    (2, PatchField::Modulation),
];

/// Resolve a controller number to the (instrument, field) it drives
pub fn cc_target(cc: u8) -> Option<(usize, PatchField)> {
    if !(FIRST_CC..=LAST_CC).contains(&cc) {
        return None;
    }
    let target = CC_MAP[(cc - FIRST_CC) as usize];
    debug_assert!(target.0 < NUM_INSTRUMENTS);
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_round_trip_in_field_order() {
        let patch = Patch::from_bytes([2, 10, 20, 30, 40, 50]);
        assert_eq!(patch.to_bytes(), [2, 10, 20, 30, 40, 50]);
        for (i, field) in PatchField::ALL.iter().enumerate() {
            assert_eq!(field.offset(), i);
            assert_eq!(patch.get(*field), patch.to_bytes()[i]);
        }
    }

    #[test]
    fn test_set_touches_one_field() {
        let mut patch = PRESETS[0];
        patch.set(PatchField::AmpDecay, 7);
        let before = PRESETS[0].to_bytes();
        let after = patch.to_bytes();
        for i in 0..PATCH_SIZE {
            if i == PatchField::AmpDecay.offset() {
                assert_eq!(after[i], 7);
            } else {
                assert_eq!(after[i], before[i]);
            }
        }
    }

    #[test]
    fn test_synth_kind_decoding() {
        assert_eq!(SynthKind::from_byte(0), SynthKind::BassDrum);
        assert_eq!(SynthKind::from_byte(1), SynthKind::Snare);
        assert_eq!(SynthKind::from_byte(2), SynthKind::HiHat);
        assert_eq!(SynthKind::from_byte(254), SynthKind::BassDrum);
    }

    #[test]
    fn test_preset_banks_match_their_voice_type() {
        for kind in [SynthKind::BassDrum, SynthKind::Snare, SynthKind::HiHat] {
            let bank = kind.preset_bank();
            for preset in &PRESETS[bank..bank + PRESETS_PER_VOICE] {
                assert_eq!(preset.synth_kind(), kind);
            }
        }
    }

    #[test]
    fn test_shared_modulation_byte() {
        let patch = PRESETS[7];
        assert_eq!(patch.crunchiness(), 180);
        assert_eq!(patch.pitch_mod(), 180);
    }

    #[test]
    fn test_morph_at_pair_boundaries() {
        for coarse in 0..4u8 {
            let value = coarse << 6;
            let morphed = morph_presets(1, value);
            assert_eq!(morphed, PRESETS[5 + coarse as usize]);
        }
    }

    #[test]
    fn test_morph_halfway() {
        // value 0x20: first pair, balance 128
        let morphed = morph_presets(0, 0x20);
        assert_eq!(morphed.pitch, 58);
        assert_eq!(morphed.pitch_decay, 39);
        assert_eq!(morphed.amp_decay, 112);
    }

    #[test]
    fn test_morph_bank_follows_slot() {
        for instrument in 0..NUM_INSTRUMENTS {
            let first = instrument * PRESETS_PER_VOICE;
            assert_eq!(morph_presets(instrument, 0), PRESETS[first]);
            assert_eq!(morph_presets(instrument, 0xC0), PRESETS[first + 3]);
        }
    }

    #[test]
    fn test_cc_map_covers_16_to_30() {
        assert_eq!(cc_target(15), None);
        assert_eq!(cc_target(31), None);
        assert_eq!(cc_target(0), None);
        assert_eq!(cc_target(127), None);
        assert_eq!(cc_target(16), Some((0, PatchField::Synth)));
        assert_eq!(cc_target(17), Some((0, PatchField::Pitch)));
        assert_eq!(cc_target(27), Some((1, PatchField::Modulation)));
        assert_eq!(cc_target(28), Some((2, PatchField::Synth)));
        assert_eq!(cc_target(29), Some((2, PatchField::AmpDecay)));
        assert_eq!(cc_target(30), Some((2, PatchField::Modulation)));
    }

    #[test]
    fn test_cc_map_matches_byte_offsets() {
        let offsets = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 15, 17];
        for (cc, offset) in (FIRST_CC..=LAST_CC).zip(offsets) {
            let (instrument, field) = cc_target(cc).unwrap();
            assert_eq!(instrument * PATCH_SIZE + field.offset(), offset, "cc {cc}");
        }
    }
}
