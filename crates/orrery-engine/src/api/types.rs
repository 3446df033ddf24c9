use bytemuck::{Pod, Zeroable};

/// An event communicated from Rust to the host UI.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ViewerEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl ViewerEvent {
    pub const FLOATS: usize = 4;

    /// `a` = focused body index, or -1 for the overview.
    pub const FOCUS_CHANGED: f32 = 1.0;
    /// `a` = speed now in effect (days per second).
    pub const SPEED_CHANGED: f32 = 2.0;
    /// `a` = 1 visible, 0 hidden.
    pub const ORBITS_TOGGLED: f32 = 3.0;
    /// `a` = 1 requested fullscreen, 0 requested exit. The host performs it.
    pub const FULLSCREEN_TOGGLED: f32 = 4.0;

    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }

    pub fn focus_changed(index: Option<u32>) -> Self {
        Self::new(Self::FOCUS_CHANGED, index.map_or(-1.0, |i| i as f32))
    }

    pub fn speed_changed(speed: f64) -> Self {
        Self::new(Self::SPEED_CHANGED, speed as f32)
    }

    pub fn orbits_toggled(visible: bool) -> Self {
        Self::new(Self::ORBITS_TOGGLED, if visible { 1.0 } else { 0.0 })
    }

    pub fn fullscreen_toggled(on: bool) -> Self {
        Self::new(Self::FULLSCREEN_TOGGLED, if on { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_four_floats() {
        assert_eq!(std::mem::size_of::<ViewerEvent>(), ViewerEvent::FLOATS * 4);
    }

    #[test]
    fn overview_focus_is_negative() {
        assert_eq!(ViewerEvent::focus_changed(None).a, -1.0);
        assert_eq!(ViewerEvent::focus_changed(Some(3)).a, 3.0);
    }
}
