//! Beep sequencer: a repeating tick that beeps on every other tick at first,
//! then on every tick once enough time has passed.

use core::time::Duration;

use crate::config::{BeepConfig, MIN_BASE_INTERVAL};
use crate::time::Instant;

/// Divisor used at the start of every run: beep on every second tick.
pub const INITIAL_RATE_DIVISOR: u32 = 2;

/// Divisor after the double-time switch: beep on every tick.
pub const DOUBLE_TIME_RATE_DIVISOR: u32 = 1;

/// A tick running later than this many intervals is fired once, and the
/// ticks missed behind it are dropped instead of replayed.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

/// Snapshot of the sequencer's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerState {
    pub running: bool,
    pub tick_count: u32,
    pub rate_divisor: u32,
}

/// One processed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub index: u32,
    /// When the tick was due, which may be earlier than the frame that ran it.
    /// After a stall past the catch-up window this is the frame time instead.
    pub at: Instant,
    pub beep: bool,
}

pub struct BeepSequencer {
    base_interval: Duration,
    double_time_tick: u32,
    tick_count: u32,
    rate_divisor: u32,
    next_tick: Option<Instant>,
}

impl BeepSequencer {
    pub fn new(config: &BeepConfig) -> Self {
        Self {
            base_interval: config.base_interval.max(MIN_BASE_INTERVAL),
            double_time_tick: config.double_time_tick(),
            tick_count: 0,
            rate_divisor: INITIAL_RATE_DIVISOR,
            next_tick: None,
        }
    }

    /// Starts ticking. Returns `false` and leaves the counters alone if
    /// already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }

        self.tick_count = 0;
        self.rate_divisor = INITIAL_RATE_DIVISOR;
        self.next_tick = Some(now + self.base_interval);
        log::info!("beeping started");
        true
    }

    /// Cancels the schedule. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        if self.next_tick.take().is_none() {
            return false;
        }

        log::info!("beeping stopped after {} ticks", self.tick_count);
        true
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn state(&self) -> SequencerState {
        SequencerState {
            running: self.is_running(),
            tick_count: self.tick_count,
            rate_divisor: self.rate_divisor,
        }
    }

    /// Processes the next tick if it is due by `now`. Call in a loop until it
    /// returns `None` to catch up after a slow frame. A backlog longer than
    /// [`MAX_CATCH_UP_TICKS`] intervals collapses into a single tick.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        let due = self.next_tick?;
        if now < due {
            return None;
        }

        let interval_ms = u64::try_from(self.base_interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        let behind = now.saturating_duration_since(due).as_millis() as u64 / interval_ms;

        if behind > u64::from(MAX_CATCH_UP_TICKS) {
            log::warn!("sequencer stalled, skipping {} ticks", behind);
            let tick = self.fire(now);
            // back onto the original grid, first slot after `now`
            let skip = Duration::from_millis(interval_ms.saturating_mul(behind + 1));
            self.next_tick = Some(due + skip);
            return Some(tick);
        }

        let tick = self.fire(due);
        self.next_tick = Some(due + self.base_interval);
        Some(tick)
    }

    fn fire(&mut self, at: Instant) -> Tick {
        if self.tick_count >= self.double_time_tick
            && self.rate_divisor != DOUBLE_TIME_RATE_DIVISOR
        {
            self.rate_divisor = DOUBLE_TIME_RATE_DIVISOR;
            log::debug!("double time at tick {}", self.tick_count);
        }

        let tick = Tick {
            index: self.tick_count,
            at,
            beep: self.tick_count % self.rate_divisor == 0,
        };
        self.tick_count = self.tick_count.saturating_add(1);
        tick
    }
}
