//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::DrumSynthError;
use crate::{AUDIO_BLOCK_SIZE, DEFAULT_IDLE_TIMEOUT_MS};

/// Construction-time settings for [`DrumSynth`](crate::DrumSynth)
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```toml
/// idle_timeout_ms = 60000
/// bandwidth = 192
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrumSynthConfig {
    /// Capacity of the cutoff bus ring buffer, in samples
    pub buffer_capacity: usize,
    /// Time without triggers after which rendering is muted
    pub idle_timeout_ms: u32,
    /// Seed of the noise generator
    pub noise_seed: u64,
    /// Initial bandwidth control (255 = no decimation)
    pub bandwidth: u8,
    /// Initial balance control; `None` keeps the preset levels
    pub balance: Option<u8>,
}

impl Default for DrumSynthConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 256,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            noise_seed: 0x5EED,
            bandwidth: 255,
            balance: None,
        }
    }
}

impl DrumSynthConfig {
    pub fn validate(&self) -> Result<(), DrumSynthError> {
        if self.buffer_capacity < AUDIO_BLOCK_SIZE {
            return Err(DrumSynthError::BufferTooSmall(self.buffer_capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DrumSynthConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_small_buffer_rejected() {
        let config = DrumSynthConfig {
            buffer_capacity: 16,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(DrumSynthError::BufferTooSmall(16)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DrumSynthConfig {
            idle_timeout_ms: 1_500,
            noise_seed: 7,
            bandwidth: 96,
            balance: Some(200),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("bandwidth = 96"));
        let parsed: DrumSynthConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);

        // An unset balance is left out and comes back as None
        let text = toml::to_string(&DrumSynthConfig::default()).unwrap();
        assert!(!text.contains("balance"));
        let parsed: DrumSynthConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, DrumSynthConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: DrumSynthConfig = toml::from_str(
            r#"
            idle_timeout_ms = 60000
            bandwidth = 192
            balance = 64
            "#,
        )
        .unwrap();
        assert_eq!(config.idle_timeout_ms, 60_000);
        assert_eq!(config.bandwidth, 192);
        assert_eq!(config.balance, Some(64));
        assert_eq!(config.buffer_capacity, 256);
        assert_eq!(config.noise_seed, 0x5EED);
    }
}
