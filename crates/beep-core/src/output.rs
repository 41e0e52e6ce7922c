use crate::buzzer::Buzzer;

pub struct Output<'a> {
    buzzer: &'a dyn Buzzer,
    beeps: u32,
}

impl<'a> Output<'a> {
    pub fn new(buzzer: &'a dyn Buzzer) -> Self {
        Self { buzzer, beeps: 0 }
    }

    pub fn beep(&mut self) {
        self.beeps = self.beeps.wrapping_add(1);
        self.buzzer.beep();
    }

    /// Number of beeps sent to the buzzer since the engine was created.
    pub fn beep_count(&self) -> u32 {
        self.beeps
    }
}
