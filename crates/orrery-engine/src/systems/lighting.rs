//! Scene light rig: one ambient term, a point light at the sun and a
//! directional fill light.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::mesh::Color;

/// A point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light falls to zero.
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Directional light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

/// Lights of one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: Color,
    pub ambient_intensity: f32,
    pub point: PointLight,
    pub directional: DirectionalLight,
}

/// Tunable light values. Colors are `0xRRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub point_color: u32,
    pub point_intensity: f32,
    /// Distance at which the sun's light falls to zero.
    pub point_distance: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x404040,
            ambient_intensity: 1.2,
            point_color: 0xffffff,
            point_intensity: 35.0,
            point_distance: 1000.0,
            directional_color: 0xffffff,
            directional_intensity: 0.8,
            directional_position: [50.0, 50.0, 50.0],
        }
    }
}

impl LightConfig {
    /// First offending field, if any.
    pub fn problem(&self) -> Option<&'static str> {
        let intensities = [self.ambient_intensity, self.point_intensity, self.directional_intensity];
        if intensities.iter().any(|i| !(i.is_finite() && *i >= 0.0)) {
            return Some("light intensities must be finite and non-negative");
        }
        if !(self.point_distance.is_finite() && self.point_distance > 0.0) {
            return Some("point light distance must be positive");
        }
        if !Vec3::from(self.directional_position).is_finite() {
            return Some("directional light position must be finite");
        }
        None
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}

impl LightRig {
    /// Sun-centered point light plus ambient and directional fill.
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            ambient: Color::from_hex(config.ambient_color),
            ambient_intensity: config.ambient_intensity,
            point: PointLight::new(
                Vec3::ZERO,
                Color::from_hex(config.point_color),
                config.point_intensity,
                config.point_distance,
            ),
            directional: DirectionalLight {
                position: Vec3::from(config.directional_position),
                color: Color::from_hex(config.directional_color),
                intensity: config.directional_intensity,
            },
        }
    }

    /// Ambient color premultiplied by its intensity.
    pub fn ambient_rgb(&self) -> [f32; 3] {
        let a = self.ambient;
        let k = self.ambient_intensity;
        [a.r * k, a.g * k, a.b * k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rig_values() {
        let rig = LightRig::default();
        assert_eq!(rig.point.position(), Vec3::ZERO);
        assert_eq!(rig.point.intensity, 35.0);
        assert_eq!(rig.point.range, 1000.0);
        assert_eq!(rig.directional.intensity, 0.8);
        assert!((rig.ambient.r - 64.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn directional_points_at_origin() {
        let rig = LightRig::default();
        let d = rig.directional.direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x < 0.0 && d.y < 0.0 && d.z < 0.0);
    }

    #[test]
    fn ambient_is_premultiplied() {
        let rig = LightRig::default();
        let rgb = rig.ambient_rgb();
        assert!((rgb[0] - 64.0 / 255.0 * 1.2).abs() < 1e-6);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), PointLight::FLOATS * 4);
    }

    #[test]
    fn rig_follows_config() {
        let config = LightConfig {
            point_intensity: 12.0,
            point_distance: 300.0,
            directional_color: 0xff0000,
            ..Default::default()
        };
        let rig = LightRig::from_config(&config);
        assert_eq!(rig.point.intensity, 12.0);
        assert_eq!(rig.point.range, 300.0);
        assert_eq!(rig.directional.color, Color::from_hex(0xff0000));
        assert_eq!(rig.ambient_intensity, 1.2);
    }

    #[test]
    fn config_problems_are_reported() {
        assert_eq!(LightConfig::default().problem(), None);
        let negative = LightConfig { ambient_intensity: -1.0, ..Default::default() };
        assert!(negative.problem().is_some());
        let unbounded = LightConfig { point_distance: 0.0, ..Default::default() };
        assert!(unbounded.problem().is_some());
    }
}
