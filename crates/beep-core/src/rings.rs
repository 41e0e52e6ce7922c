//! Ring pulse animation.
//!
//! One cycle reveals the core and then each ring outward, one step at a time,
//! leaving a short afterglow behind the newest shape, then drains the last two
//! shapes. A cycle can't be interrupted or queued: triggers that arrive while
//! one is running are dropped.

use core::time::Duration;

use heapless::Vec;

use crate::error::ConfigError;
use crate::time::Instant;

pub const MAX_RINGS: usize = 7;

/// Core plus rings.
pub const MAX_LAYERS: usize = MAX_RINGS + 1;

/// How many shapes stay lit behind the newest one during the reveal.
pub const AFTERGLOW: usize = 1;

pub const OPAQUE: f32 = 1.0;
pub const TRANSPARENT: f32 = 0.0;

/// Where the animator is in its cycle. The value names the step that runs
/// when the next deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPhase {
    Idle,
    /// Next step shows the shape at this index.
    Revealing(usize),
    /// Next step hides the second-to-last shape.
    DrainStep1,
    /// Next step hides the last shape and ends the cycle.
    DrainStep2,
}

pub struct RingAnimator {
    opacities: Vec<f32, MAX_LAYERS>,
    phase: RingPhase,
    interval: Duration,
    next_step: Option<Instant>,
}

impl RingAnimator {
    /// Creates an animator with every shape visible.
    pub fn new(ring_count: usize) -> Result<Self, ConfigError> {
        if ring_count == 0 || ring_count > MAX_RINGS {
            return Err(ConfigError::InvalidRingCount {
                requested: ring_count,
            });
        }

        let mut opacities = Vec::new();
        for _ in 0..=ring_count {
            // capacity checked above
            let _ = opacities.push(OPAQUE);
        }

        Ok(Self {
            opacities,
            phase: RingPhase::Idle,
            interval: Duration::ZERO,
            next_step: None,
        })
    }

    pub fn ring_count(&self) -> usize {
        self.opacities.len() - 1
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    pub fn phase(&self) -> RingPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != RingPhase::Idle
    }

    /// Forces every shape to full opacity. Doesn't touch a running cycle's
    /// schedule.
    pub fn show_layers(&mut self) {
        self.opacities.iter_mut().for_each(|o| *o = OPAQUE);
    }

    /// Starts one pulse lasting roughly `speed`. Returns `false` and does
    /// nothing if a pulse is already running.
    pub fn trigger(&mut self, now: Instant, speed: Duration) -> bool {
        if self.is_animating() {
            log::trace!("ring pulse dropped, cycle in flight");
            return false;
        }

        self.hide_all();
        // the `+ 2` leaves room for the two drain steps
        self.interval = speed / (self.ring_count() as u32 + 2);
        self.phase = RingPhase::Revealing(0);
        self.next_step = Some(now + self.interval);
        true
    }

    /// Runs every step whose deadline has passed.
    pub fn update(&mut self, now: Instant) {
        while let Some(due) = self.next_step {
            if now < due {
                break;
            }
            self.step();
            self.next_step = match self.phase {
                RingPhase::Idle => None,
                _ => Some(due + self.interval),
            };
        }
    }

    fn step(&mut self) {
        let last = self.opacities.len() - 1;

        self.phase = match self.phase {
            RingPhase::Idle => RingPhase::Idle,
            RingPhase::Revealing(index) => {
                self.opacities[index] = OPAQUE;
                if index > AFTERGLOW {
                    self.opacities[..index - AFTERGLOW]
                        .iter_mut()
                        .for_each(|o| *o = TRANSPARENT);
                }

                if index < last {
                    RingPhase::Revealing(index + 1)
                } else {
                    RingPhase::DrainStep1
                }
            }
            RingPhase::DrainStep1 => {
                if last > 0 {
                    self.opacities[last - 1] = TRANSPARENT;
                }
                RingPhase::DrainStep2
            }
            RingPhase::DrainStep2 => {
                self.opacities[last] = TRANSPARENT;
                RingPhase::Idle
            }
        };
    }

    fn hide_all(&mut self) {
        self.opacities.iter_mut().for_each(|o| *o = TRANSPARENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: Duration = Duration::from_millis(150);

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn lit(animator: &RingAnimator) -> Vec<usize, MAX_LAYERS> {
        let mut lit = Vec::new();
        for (i, o) in animator.opacities().iter().enumerate() {
            if *o == OPAQUE {
                let _ = lit.push(i);
            }
        }
        lit
    }

    #[test]
    fn starts_fully_visible() {
        let animator = RingAnimator::new(3).unwrap();
        assert_eq!(animator.opacities(), &[1.0, 1.0, 1.0, 1.0]);
        assert!(!animator.is_animating());
    }

    #[test]
    fn rejects_ring_count_out_of_range() {
        assert!(RingAnimator::new(0).is_err());
        assert!(RingAnimator::new(MAX_RINGS + 1).is_err());
        assert!(RingAnimator::new(MAX_RINGS).is_ok());
    }

    #[test]
    fn full_cycle_step_by_step() {
        let mut animator = RingAnimator::new(3).unwrap();
        assert!(animator.trigger(ms(0), SPEED));
        assert!(lit(&animator).is_empty());

        // interval = 150 / (3 + 2) = 30ms
        let expected: [(u64, &[usize], RingPhase); 6] = [
            (30, &[0], RingPhase::Revealing(1)),
            (60, &[0, 1], RingPhase::Revealing(2)),
            (90, &[1, 2], RingPhase::Revealing(3)),
            (120, &[2, 3], RingPhase::DrainStep1),
            (150, &[3], RingPhase::DrainStep2),
            (180, &[], RingPhase::Idle),
        ];

        for (at, shapes, phase) in expected {
            animator.update(ms(at - 1));
            assert_ne!(animator.phase(), phase, "stepped early at {}", at);
            animator.update(ms(at));
            assert_eq!(lit(&animator).as_slice(), shapes, "at {}ms", at);
            assert_eq!(animator.phase(), phase, "at {}ms", at);
        }
        assert!(!animator.is_animating());
    }

    #[test]
    fn trigger_while_animating_is_dropped() {
        let mut animator = RingAnimator::new(3).unwrap();
        animator.trigger(ms(0), SPEED);
        animator.update(ms(60));

        let opacities: Vec<f32, MAX_LAYERS> = Vec::from_slice(animator.opacities()).unwrap();
        let phase = animator.phase();

        assert!(!animator.trigger(ms(61), SPEED));
        assert_eq!(animator.opacities(), opacities.as_slice());
        assert_eq!(animator.phase(), phase);

        // the first trigger's schedule still ends the cycle on time
        animator.update(ms(180));
        assert_eq!(animator.phase(), RingPhase::Idle);
    }

    #[test]
    fn afterglow_window_never_exceeded() {
        for rings in 1..=MAX_RINGS {
            let mut animator = RingAnimator::new(rings).unwrap();
            animator.trigger(ms(0), Duration::from_millis(1_000));
            for t in 0..=2_000 {
                animator.update(ms(t));
                assert!(lit(&animator).len() <= AFTERGLOW + 1);
            }
            assert!(!animator.is_animating(), "{} rings", rings);
        }
    }

    #[test]
    fn cycle_length_is_ring_count_plus_three_intervals() {
        let mut animator = RingAnimator::new(5).unwrap();
        // interval = 140 / 7 = 20ms, cycle = 8 * 20ms
        animator.trigger(ms(1_000), Duration::from_millis(140));
        animator.update(ms(1_159));
        assert!(animator.is_animating());
        animator.update(ms(1_160));
        assert!(!animator.is_animating());
    }

    #[test]
    fn single_ring_cycle() {
        let mut animator = RingAnimator::new(1).unwrap();
        // interval = 90 / 3 = 30ms
        animator.trigger(ms(0), Duration::from_millis(90));
        animator.update(ms(60));
        assert_eq!(lit(&animator).as_slice(), &[0, 1]);
        animator.update(ms(90));
        assert_eq!(lit(&animator).as_slice(), &[1]);
        animator.update(ms(120));
        assert!(lit(&animator).is_empty());
        assert!(!animator.is_animating());
    }

    #[test]
    fn one_late_update_runs_whole_cycle() {
        let mut animator = RingAnimator::new(3).unwrap();
        animator.trigger(ms(0), SPEED);
        animator.update(ms(5_000));
        assert!(!animator.is_animating());
        assert!(lit(&animator).is_empty());
    }

    #[test]
    fn show_layers_lights_everything() {
        let mut animator = RingAnimator::new(3).unwrap();
        animator.trigger(ms(0), SPEED);
        animator.update(ms(200));
        animator.show_layers();
        assert_eq!(lit(&animator).as_slice(), &[0, 1, 2, 3]);
    }
}
