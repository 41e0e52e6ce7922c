use heapless::Deque;

pub const INPUT_QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The device was shaken (fires once the shake is over).
    Shake,
    /// The screen was tapped.
    Tap,
}

/// Events collected between two frames.
#[derive(Debug)]
pub struct Input {
    events: Deque<InputEvent, INPUT_QUEUE_CAPACITY>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Queues an event for the next frame. When the queue is full the oldest
    /// event is dropped.
    pub fn push(&mut self, event: InputEvent) {
        if self.events.is_full() {
            log::warn!("input queue full, dropping {:?}", self.events.front());
            self.events.pop_front();
        }
        let _ = self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_order() {
        let mut input = Input::new();
        input.push(InputEvent::Shake);
        input.push(InputEvent::Tap);

        assert_eq!(input.pop(), Some(InputEvent::Shake));
        assert_eq!(input.pop(), Some(InputEvent::Tap));
        assert_eq!(input.pop(), None);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut input = Input::new();
        input.push(InputEvent::Shake);
        for _ in 0..INPUT_QUEUE_CAPACITY {
            input.push(InputEvent::Tap);
        }

        assert_eq!(input.len(), INPUT_QUEUE_CAPACITY);
        assert!(core::iter::from_fn(|| input.pop()).all(|e| e == InputEvent::Tap));
    }
}
