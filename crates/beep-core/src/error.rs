use crate::rings::MAX_RINGS;

/// Errors raised while validating a [`BeepConfig`](crate::BeepConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Ring count outside `1..=MAX_RINGS`.
    InvalidRingCount { requested: usize },
    /// Base tick interval shorter than the clock's 1ms resolution.
    IntervalTooShort,
    /// A confusion threshold of zero would show the hint on no taps at all.
    ZeroConfusionTaps,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidRingCount { requested } => {
                write!(
                    f,
                    "invalid ring count {}: expected 1 to {}",
                    requested, MAX_RINGS
                )
            }
            ConfigError::IntervalTooShort => write!(f, "beep interval must be at least 1ms"),
            ConfigError::ZeroConfusionTaps => {
                write!(f, "confusion tap threshold must be greater than zero")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
