/// Counts taps that land while nothing is beeping. Enough of them in a row
/// means the user probably doesn't know to shake the device.
#[derive(Debug)]
pub struct ConfusionCounter {
    taps: u8,
    threshold: u8,
}

impl ConfusionCounter {
    pub fn new(threshold: u8) -> Self {
        Self { taps: 0, threshold }
    }

    pub fn taps(&self) -> u8 {
        self.taps
    }

    /// Records one idle tap. Returns `true` when the hint should be shown,
    /// which also starts the count over.
    pub fn record_idle_tap(&mut self) -> bool {
        self.taps = self.taps.saturating_add(1);
        if self.taps >= self.threshold {
            self.taps = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.taps = 0;
    }
}
