//! Shared test infrastructure for beep-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::time::Duration;

use beep_core::buzzer::Buzzer;
use beep_core::{Instant, TimeSource};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock clock that only moves when told to
pub struct MockTimeSource {
    current_time: Cell<Instant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Instant::ZERO),
        }
    }

    pub fn advance(&self, duration: Duration) -> Instant {
        let next = self.current_time.get() + duration;
        self.current_time.set(next);
        next
    }

    pub fn advance_ms(&self, millis: u64) -> Instant {
        self.advance(Duration::from_millis(millis))
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

/// Buzzer that counts beeps instead of making noise
pub struct MockBuzzer {
    beeps: Cell<u32>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self {
            beeps: Cell::new(0),
        }
    }

    pub fn beeps(&self) -> u32 {
        self.beeps.get()
    }
}

impl Buzzer for MockBuzzer {
    fn beep(&self) {
        self.beeps.set(self.beeps.get() + 1);
    }
}
