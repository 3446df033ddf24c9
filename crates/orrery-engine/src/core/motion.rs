//! Orbital motion: pure math, no scene dependencies.
//!
//! Uses f64 for time and phase (long sessions at 100 days/s accumulate large
//! numbers). Only the final position is converted to f32.

use std::f64::consts::TAU;

use glam::Vec3;

use crate::core::body::BodyParams;

/// Divisor applied to the period so that one period is one full revolution.
pub const PERIOD_SCALE: f64 = 1.0 / TAU;

/// Self-rotation added per tick (radians).
pub const SELF_ROTATION_STEP: f32 = 0.01;

/// Point on an inclined ellipse at angle `t`.
///
/// The orbital plane is tilted by lifting the point proportionally to its
/// z-coordinate. This is a visual approximation, not a rotation: both the
/// orbit guide and the integrator go through this function so they agree.
pub fn inclined_ellipse_point(a: f64, b: f64, inclination_rad: f64, t: f64) -> Vec3 {
    let x = t.cos() * a;
    let z = t.sin() * b;
    let y = inclination_rad.sin() * z;
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Output of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub position: Vec3,
    /// Radians to add to the body's self-rotation this tick.
    pub self_rotation_delta: f32,
}

/// Computes body positions from simulated time.
///
/// Self-rotation advances by a fixed step every tick, independent of the
/// orbital speed factor (it keeps spinning when the speed is 0).
#[derive(Debug, Clone, Copy)]
pub struct OrbitalMotionIntegrator {
    pub period_scale: f64,
    pub self_rotation_step: f32,
}

impl Default for OrbitalMotionIntegrator {
    fn default() -> Self {
        Self {
            period_scale: PERIOD_SCALE,
            self_rotation_step: SELF_ROTATION_STEP,
        }
    }
}

impl OrbitalMotionIntegrator {
    pub fn new(self_rotation_step: f32) -> Self {
        Self {
            self_rotation_step,
            ..Default::default()
        }
    }

    /// Orbital phase (radians) for a body at the given time.
    pub fn phase(&self, body: &BodyParams, start_offset: f64, elapsed: f64, speed: f64) -> f64 {
        let divisor = body.period * self.period_scale;
        if !(divisor.is_finite() && divisor > 0.0) {
            return start_offset;
        }
        let advance = elapsed * speed / divisor;
        if advance.is_finite() {
            advance + start_offset
        } else {
            start_offset
        }
    }

    /// Position and rotation increment for `body` after `elapsed` seconds at `speed` days/second.
    pub fn compute_position(
        &self,
        body: &BodyParams,
        start_offset: f64,
        elapsed: f64,
        speed: f64,
    ) -> MotionSample {
        let t = self.phase(body, start_offset, elapsed, speed);
        MotionSample {
            position: inclined_ellipse_point(
                body.a as f64,
                body.b as f64,
                (body.inclination as f64).to_radians(),
                t,
            ),
            self_rotation_delta: self.self_rotation_step,
        }
    }

    /// Simulated time at which `body` (with zero offset) reaches phase `t` at speed 1.
    pub fn time_for_phase(&self, body: &BodyParams, t: f64) -> f64 {
        t * body.period * self.period_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn earth() -> BodyParams {
        BodyParams::new("Earth", 16.0, 15.98, 365.0).with_radius(1.2)
    }

    #[test]
    fn earth_at_time_zero() {
        let integrator = OrbitalMotionIntegrator::default();
        let sample = integrator.compute_position(&earth(), 0.0, 0.0, 1.0);
        assert!((sample.position - Vec3::new(16.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn earth_at_quarter_phase() {
        let integrator = OrbitalMotionIntegrator::default();
        let body = earth();
        let time = integrator.time_for_phase(&body, FRAC_PI_2);
        let sample = integrator.compute_position(&body, 0.0, time, 1.0);
        assert!(sample.position.x.abs() < 1e-4, "x = {}", sample.position.x);
        assert!(sample.position.y.abs() < 1e-6);
        assert!((sample.position.z - 15.98).abs() < 1e-4, "z = {}", sample.position.z);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let integrator = OrbitalMotionIntegrator::default();
        let body = earth().with_inclination(7.0);
        let a = integrator.compute_position(&body, 1.234, 98.7, 12.5);
        let b = integrator.compute_position(&body, 1.234, 98.7, 12.5);
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
        assert_eq!(a.position.z.to_bits(), b.position.z.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn stays_on_ellipse_before_tilt() {
        let integrator = OrbitalMotionIntegrator::default();
        let body = BodyParams::new("Pluto", 68.0, 67.5, 90520.0).with_inclination(17.2);
        for step in 0..500 {
            let elapsed = step as f64 * 37.3;
            let p = integrator.compute_position(&body, 0.7, elapsed, 100.0).position;
            let ex = p.x / body.a;
            let ez = p.z / body.b;
            let r = ex * ex + ez * ez;
            assert!((r - 1.0).abs() < 1e-4, "off-ellipse at step {step}: {r}");
        }
    }

    #[test]
    fn zero_speed_freezes_at_offset() {
        let integrator = OrbitalMotionIntegrator::default();
        let body = earth();
        let frozen = integrator.compute_position(&body, 0.5, 0.0, 0.0);
        let later = integrator.compute_position(&body, 0.5, 10_000.0, 0.0);
        assert_eq!(frozen.position, later.position);
        assert!(later.position.is_finite());
        // Spin continues regardless of orbital speed
        assert_eq!(later.self_rotation_delta, SELF_ROTATION_STEP);
    }

    #[test]
    fn inclination_lifts_with_z() {
        let p = inclined_ellipse_point(10.0, 10.0, 30f64.to_radians(), FRAC_PI_2);
        assert!((p.y - 5.0).abs() < 1e-4, "y = {}", p.y);
    }

    #[test]
    fn full_period_returns_to_start() {
        let integrator = OrbitalMotionIntegrator::default();
        let body = earth();
        let start = integrator.compute_position(&body, 0.0, 0.0, 1.0).position;
        let end = integrator.compute_position(&body, 0.0, 365.0, 1.0).position;
        assert!((start - end).length() < 1e-3);
    }
}
