use glam::Vec3;

use crate::core::motion::inclined_ellipse_point;

/// Default number of segments for an orbit guide.
pub const DEFAULT_SEGMENTS: usize = 100;
/// Fewer segments than this would not form a loop.
pub const MIN_SEGMENTS: usize = 3;

/// Immutable closed polyline tracing a body's orbit.
///
/// Holds `segments + 1` points; the last point repeats the first, so the
/// guide can be drawn as a plain line strip.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGuide {
    points: Vec<Vec3>,
}

impl OrbitGuide {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Flat `[x, y, z, x, y, z, ...]` view for vertex upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.points.as_slice())
    }
}

/// Sample an inclined ellipse into a closed loop.
pub fn build_path(a: f32, b: f32, inclination_deg: f32, segments: usize) -> OrbitGuide {
    let segments = segments.max(MIN_SEGMENTS);
    let incl = (inclination_deg as f64).to_radians();
    let step = std::f64::consts::TAU / segments as f64;

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        points.push(inclined_ellipse_point(a as f64, b as f64, incl, i as f64 * step));
    }
    points.push(points[0]);
    OrbitGuide { points }
}
