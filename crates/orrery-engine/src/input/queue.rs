/// Input event types the viewer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas pixel coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at canvas pixel coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to canvas pixel coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; only the sign of `delta_y` matters.
    Wheel { delta_y: f32 },
    /// The canvas changed size (CSS pixels).
    Resize { width: f32, height: f32 },
    /// Focus a body by name, or return to the overview with `None`.
    Focus { name: Option<String> },
    /// A UI command; see [`commands`] for the `kind` values and their payloads.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// `Custom` kinds for the UI commands.
pub mod commands {
    /// `a` = simulated days per second.
    pub const SET_SPEED: u32 = 1;
    /// `a` = body index, negative for none.
    pub const FOCUS_INDEX: u32 = 2;
    pub const RESET_VIEW: u32 = 3;
    pub const TOGGLE_ORBITS: u32 = 4;
    pub const TOGGLE_FULLSCREEN: u32 = 5;
}

/// Events collected between frames, handled at the start of the next one.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop queued events without handling them (teardown).
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_keeps_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 320.0, y: 240.0 });
        queue.push(InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert_eq!(drained[0], InputEvent::PointerDown { x: 320.0, y: 240.0 });
        assert_eq!(drained[1], InputEvent::Wheel { delta_y: -120.0 });
        assert!(queue.is_empty());
    }

    #[test]
    fn speed_command_carries_days_per_second() {
        let mut queue = InputQueue::default();
        queue.push(InputEvent::Custom { kind: commands::SET_SPEED, a: 25.0, b: 0.0, c: 0.0 });
        let Some(InputEvent::Custom { kind, a, .. }) = queue.drain().pop() else {
            panic!("speed command lost");
        };
        assert_eq!((kind, a), (commands::SET_SPEED, 25.0));
    }

    #[test]
    fn clear_discards() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Focus { name: Some("Earth".into()) });
        queue.clear();
        assert!(queue.drain().is_empty());
    }
}
