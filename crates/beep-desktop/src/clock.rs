use beep_core::{Instant, TimeSource};

/// Wall clock counting milliseconds from when it was created.
pub struct StdTimeSource {
    epoch: std::time::Instant,
}

impl StdTimeSource {
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

impl TimeSource for StdTimeSource {
    fn now(&self) -> Instant {
        let millis = u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        Instant::from_millis(millis)
    }
}
