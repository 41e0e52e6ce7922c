//! Shake detection from accelerometer intensity samples.

use crate::input::InputEvent;

/// Intensity at which movement counts as a shake.
pub const DEFAULT_TRIGGER_LEVEL: f32 = 0.6;

/// Intensity the device has to settle below for the shake to be over.
pub const DEFAULT_RELEASE_LEVEL: f32 = 0.2;

/// Turns a stream of movement intensities (`0.0..=1.0`) into one
/// [`InputEvent::Shake`] per shake. The event fires when the shake ends, so
/// holding the device in the air and waving it keeps it quiet until it's put
/// down.
#[derive(Debug)]
pub struct ShakeDetector {
    trigger_level: f32,
    release_level: f32,
    shaking: bool,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_LEVEL, DEFAULT_RELEASE_LEVEL)
    }
}

impl ShakeDetector {
    /// `release_level` is clamped to `trigger_level` so the hysteresis band
    /// can't be inverted.
    pub fn new(trigger_level: f32, release_level: f32) -> Self {
        Self {
            trigger_level,
            release_level: release_level.min(trigger_level),
            shaking: false,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn sample(&mut self, intensity: f32) -> Option<InputEvent> {
        if !self.shaking {
            if intensity >= self.trigger_level {
                self.shaking = true;
                log::trace!("shake began at {:.2}", intensity);
            }
            return None;
        }

        if intensity <= self.release_level {
            self.shaking = false;
            log::debug!("shake detected");
            return Some(InputEvent::Shake);
        }
        None
    }
}
