use std::f32::consts::PI;

use glam::Vec3;

/// Spherical coordinates around a target, Y-up.
///
/// `polar` is measured from +Y, `azimuth` around Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl Spherical {
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self { radius, polar, azimuth }
    }

    /// Convert a target-relative offset. A zero offset maps to radius 0 on the +Y pole.
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    /// Target-relative Cartesian offset.
    pub fn to_offset(self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }

    /// Keep the polar angle inside `[eps, PI - eps]` so the view direction never
    /// lines up with the up vector.
    pub fn make_safe(&mut self, eps: f32) {
        let eps = eps.clamp(f32::EPSILON, PI / 2.0);
        self.polar = self.polar.clamp(eps, PI - eps);
    }
}
