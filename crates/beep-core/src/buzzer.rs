// Platform-agnostic beeper: plays the short beep clip once per call.
// Implementations must not block; a missing clip is the implementation's
// problem to log, never the caller's.
pub trait Buzzer: Send {
    fn beep(&self);
}
