//! Tunables for the beeping behaviour. Defaults reproduce the stock gadget.

use core::time::Duration;

use crate::error::ConfigError;
use crate::rings::MAX_RINGS;

/// Period of the sequencer tick.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(300);

/// Shortest tick period the millisecond clock can schedule.
pub const MIN_BASE_INTERVAL: Duration = Duration::from_millis(1);

/// Beeps are doubled in rate at tick `1 + threshold * 2`.
pub const DEFAULT_DOUBLE_TIME_THRESHOLD: u32 = 4;

pub const DEFAULT_RING_COUNT: usize = 3;

/// Idle taps before the "Shake it!" hint appears.
pub const DEFAULT_CONFUSION_TAPS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeepConfig {
    pub base_interval: Duration,
    pub double_time_threshold: u32,
    pub ring_count: usize,
    pub confusion_taps: u8,
}

impl Default for BeepConfig {
    fn default() -> Self {
        Self {
            base_interval: DEFAULT_BASE_INTERVAL,
            double_time_threshold: DEFAULT_DOUBLE_TIME_THRESHOLD,
            ring_count: DEFAULT_RING_COUNT,
            confusion_taps: DEFAULT_CONFUSION_TAPS,
        }
    }
}

impl BeepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_interval < MIN_BASE_INTERVAL {
            return Err(ConfigError::IntervalTooShort);
        }
        if self.ring_count == 0 || self.ring_count > MAX_RINGS {
            return Err(ConfigError::InvalidRingCount {
                requested: self.ring_count,
            });
        }
        if self.confusion_taps == 0 {
            return Err(ConfigError::ZeroConfusionTaps);
        }
        Ok(())
    }

    /// Length of one full ring cycle: half a tick, so a cycle always ends
    /// before the next beep even at double time.
    pub fn animation_speed(&self) -> Duration {
        self.base_interval / 2
    }

    /// Tick index from which every tick beeps.
    pub fn double_time_tick(&self) -> u32 {
        self.double_time_threshold.saturating_mul(2).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BeepConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.double_time_tick(), 9);
        assert_eq!(config.animation_speed(), Duration::from_millis(150));
    }

    #[test]
    fn rejects_bad_ring_counts() {
        for rings in [0, MAX_RINGS + 1] {
            let config = BeepConfig {
                ring_count: rings,
                ..BeepConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidRingCount { requested: rings })
            );
        }
    }

    #[test]
    fn rejects_zero_interval_and_taps() {
        let config = BeepConfig {
            base_interval: Duration::ZERO,
            ..BeepConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IntervalTooShort));

        let config = BeepConfig {
            confusion_taps: 0,
            ..BeepConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConfusionTaps));
    }

    #[test]
    fn rejects_sub_millisecond_interval() {
        let config = BeepConfig {
            base_interval: Duration::from_micros(500),
            ..BeepConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IntervalTooShort));

        let config = BeepConfig {
            base_interval: MIN_BASE_INTERVAL,
            ..BeepConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
