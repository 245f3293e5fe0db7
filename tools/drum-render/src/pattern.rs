//! Step pattern parsing
//!
//! One string per instrument, one character per step:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `x` / `X` | accented hit (velocity 255) |
//! | `o` | normal hit (velocity 160) |
//! | `.` / `-` | rest |
//! | whitespace, `\|` | ignored (grouping only) |
//!
//! Tracks of different lengths loop independently.

use drum_synth::NUM_INSTRUMENTS;
use thiserror::Error;

pub const ACCENT_VELOCITY: u8 = 255;
pub const NORMAL_VELOCITY: u8 = 160;

const TRACK_NAMES: [&str; NUM_INSTRUMENTS] = ["bd", "sd", "hh"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("{track}: invalid step character '{ch}' at position {position}")]
    InvalidStep {
        track: &'static str,
        ch: char,
        position: usize,
    },
}

/// One velocity per step, `None` for rests
pub type Track = Vec<Option<u8>>;

/// Parse a single track string
///
/// `position` in errors is the character index in the original string,
/// counting ignored characters.
pub fn parse_track(track: &'static str, steps: &str) -> Result<Track, PatternError> {
    let mut out = Vec::with_capacity(steps.len());
    for (position, ch) in steps.chars().enumerate() {
        match ch {
            'x' | 'X' => out.push(Some(ACCENT_VELOCITY)),
            'o' => out.push(Some(NORMAL_VELOCITY)),
            '.' | '-' => out.push(None),
            '|' => {}
            c if c.is_whitespace() => {}
            ch => {
                return Err(PatternError::InvalidStep {
                    track,
                    ch,
                    position,
                });
            }
        }
    }
    Ok(out)
}

/// Parsed tracks for all three instruments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    tracks: [Track; NUM_INSTRUMENTS],
}

impl Pattern {
    pub fn parse(bd: &str, sd: &str, hh: &str) -> Result<Self, PatternError> {
        Ok(Self {
            tracks: [
                parse_track(TRACK_NAMES[0], bd)?,
                parse_track(TRACK_NAMES[1], sd)?,
                parse_track(TRACK_NAMES[2], hh)?,
            ],
        })
    }

    /// Length of the longest track
    pub fn len(&self) -> usize {
        self.tracks.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Velocity of `instrument` at absolute step `step`, looping its track
    pub fn hit(&self, instrument: usize, step: usize) -> Option<u8> {
        let track = self.tracks.get(instrument)?;
        if track.is_empty() {
            return None;
        }
        track[step % track.len()]
    }

    /// Every hit at `step` as (instrument, velocity)
    pub fn hits_at(&self, step: usize) -> impl Iterator<Item = (usize, u8)> + '_ {
        (0..NUM_INSTRUMENTS).filter_map(move |i| self.hit(i, step).map(|v| (i, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_characters() {
        let track = parse_track("bd", "xXo.-").unwrap();
        assert_eq!(
            track,
            vec![Some(255), Some(255), Some(160), None, None]
        );
    }

    #[test]
    fn test_grouping_is_ignored() {
        let grouped = parse_track("hh", "x... | o...\n x.").unwrap();
        let plain = parse_track("hh", "x...o...x.").unwrap();
        assert_eq!(grouped, plain);
    }

    #[test]
    fn test_invalid_character_names_position() {
        let err = parse_track("sd", "x. .y").unwrap_err();
        assert_eq!(
            err,
            PatternError::InvalidStep {
                track: "sd",
                ch: 'y',
                position: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "sd: invalid step character 'y' at position 4"
        );
    }

    #[test]
    fn test_pattern_error_reports_track() {
        let err = Pattern::parse("x...", "....", "x.?.").unwrap_err();
        assert!(matches!(err, PatternError::InvalidStep { track: "hh", .. }));
    }

    #[test]
    fn test_tracks_loop_independently() {
        let pattern = Pattern::parse("x...", "..x", "").unwrap();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.hit(0, 4), Some(255));
        assert_eq!(pattern.hit(1, 5), Some(255));
        assert_eq!(pattern.hit(1, 4), None);
        assert_eq!(pattern.hit(2, 0), None);
        assert_eq!(pattern.hit(3, 0), None);
    }

    #[test]
    fn test_hits_at() {
        let pattern = Pattern::parse("x.", "o.", "xo").unwrap();
        let hits: Vec<_> = pattern.hits_at(0).collect();
        assert_eq!(hits, vec![(0, 255), (1, 160), (2, 255)]);
        let hits: Vec<_> = pattern.hits_at(1).collect();
        assert_eq!(hits, vec![(2, 160)]);
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = Pattern::parse("", " | ", "").unwrap();
        assert!(pattern.is_empty());
        assert_eq!(pattern.hits_at(0).count(), 0);
    }
}
