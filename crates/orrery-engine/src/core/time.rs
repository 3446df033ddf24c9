/// Lowest user-selectable simulation speed (days per second).
pub const MIN_SPEED: f64 = 0.1;
/// Highest user-selectable simulation speed (days per second).
pub const MAX_SPEED: f64 = 100.0;

/// Frame deltas above this are clamped (tab switches, debugger pauses).
pub const MAX_FRAME_DT: f64 = 0.25;

/// Simulated-time accumulator.
///
/// Accumulates `dt * speed` so a speed change only affects motion from that
/// frame on, instead of rescaling the whole elapsed time.
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Simulated days elapsed since the clock started.
    sim_time: f64,
    /// Days per real second.
    speed: f64,
}

impl SimClock {
    pub fn new(speed: f64) -> Self {
        Self {
            sim_time: 0.0,
            speed: clamp_speed(speed).unwrap_or(1.0),
        }
    }

    /// Advance by a real-time delta (seconds). Returns the new simulated time.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.sim_time += dt * self.speed;
        self.sim_time
    }

    /// Set the speed, clamped to [MIN_SPEED, MAX_SPEED]. Non-finite input is ignored.
    /// Returns the speed now in effect.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        if let Some(s) = clamp_speed(speed) {
            self.speed = s;
        }
        self.speed
    }

    /// Freeze orbital motion without touching the user speed range.
    pub fn freeze(&mut self) {
        self.speed = 0.0;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

fn clamp_speed(speed: f64) -> Option<f64> {
    speed.is_finite().then(|| speed.clamp(MIN_SPEED, MAX_SPEED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_scaled_time() {
        let mut clock = SimClock::new(10.0);
        clock.advance(0.1);
        clock.advance(0.1);
        assert!((clock.sim_time() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn speed_change_is_continuous() {
        let mut clock = SimClock::new(1.0);
        clock.advance(0.2);
        let before = clock.sim_time();
        clock.set_speed(50.0);
        assert_eq!(clock.sim_time(), before);
        clock.advance(0.1);
        assert!((clock.sim_time() - (before + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn speed_is_clamped() {
        let mut clock = SimClock::new(1.0);
        assert_eq!(clock.set_speed(0.0), MIN_SPEED);
        assert_eq!(clock.set_speed(1e6), MAX_SPEED);
        assert_eq!(clock.set_speed(f64::NAN), MAX_SPEED);
    }

    #[test]
    fn large_deltas_are_capped() {
        let mut clock = SimClock::new(1.0);
        clock.advance(30.0);
        assert!((clock.sim_time() - MAX_FRAME_DT).abs() < 1e-12);
        clock.advance(-1.0);
        assert!((clock.sim_time() - MAX_FRAME_DT).abs() < 1e-12);
    }

    #[test]
    fn frozen_clock_does_not_advance() {
        let mut clock = SimClock::new(5.0);
        clock.freeze();
        clock.advance(0.1);
        assert_eq!(clock.sim_time(), 0.0);
    }
}
