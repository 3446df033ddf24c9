use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, OrreryResult};

/// Index of a body within its table / scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Visual style of a planetary ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingType {
    Saturn,
    Uranus,
    Neptune,
}

/// Ring geometry relative to the body's visual radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    pub inner_radius_factor: f32,
    pub outer_radius_factor: f32,
    pub ring_type: RingType,
}

impl RingDescriptor {
    pub fn new(ring_type: RingType, inner_radius_factor: f32, outer_radius_factor: f32) -> Self {
        Self {
            inner_radius_factor,
            outer_radius_factor,
            ring_type,
        }
    }

    /// Default proportions per ring type.
    pub fn for_type(ring_type: RingType) -> Self {
        match ring_type {
            RingType::Saturn => Self::new(ring_type, 1.4, 2.4),
            RingType::Uranus => Self::new(ring_type, 1.5, 2.0),
            RingType::Neptune => Self::new(ring_type, 1.6, 2.2),
        }
    }
}

/// Static orbital and visual parameters for one body.
///
/// Values are cosmetic: `a`/`b` in scene units, `period` in simulated days,
/// `inclination` in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    pub name: String,
    pub radius: f32,
    pub texture: String,
    pub a: f32,
    pub b: f32,
    pub period: f64,
    #[serde(default)]
    pub inclination: f32,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
}

impl BodyParams {
    pub fn new(name: impl Into<String>, a: f32, b: f32, period: f64) -> Self {
        Self {
            name: name.into(),
            radius: 1.0,
            texture: String::new(),
            a,
            b,
            period,
            inclination: 0.0,
            ring: None,
        }
    }

    // -- Builder pattern --

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = path.into();
        self
    }

    pub fn with_inclination(mut self, degrees: f32) -> Self {
        self.inclination = degrees;
        self
    }

    pub fn with_ring(mut self, ring: RingDescriptor) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn inclination_rad(&self) -> f32 {
        self.inclination.to_radians()
    }

    /// Check the invariants the integrator and path builder rely on.
    pub fn validate(&self) -> OrreryResult<()> {
        let name = self.name.as_str();
        if name.trim().is_empty() {
            return Err(OrreryError::invalid_body("<unnamed>", "name must not be empty"));
        }
        if !(self.a.is_finite() && self.b.is_finite()) {
            return Err(OrreryError::invalid_body(name, "axes must be finite"));
        }
        if self.b <= 0.0 {
            return Err(OrreryError::invalid_body(name, format!("semi-minor axis {} must be > 0", self.b)));
        }
        if self.a < self.b {
            return Err(OrreryError::invalid_body(
                name,
                format!("semi-major axis {} is smaller than semi-minor axis {}", self.a, self.b),
            ));
        }
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(OrreryError::invalid_body(name, format!("period {} must be > 0", self.period)));
        }
        if !(self.inclination.is_finite() && (0.0..90.0).contains(&self.inclination)) {
            return Err(OrreryError::invalid_body(
                name,
                format!("inclination {} outside [0, 90)", self.inclination),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(OrreryError::invalid_body(name, format!("radius {} must be > 0", self.radius)));
        }
        if let Some(ring) = &self.ring {
            let inner = ring.inner_radius_factor;
            let outer = ring.outer_radius_factor;
            if !(inner.is_finite() && outer.is_finite() && inner > 0.0 && inner < outer) {
                return Err(OrreryError::invalid_body(
                    name,
                    format!("ring factors must satisfy 0 < inner < outer (got {inner}, {outer})"),
                ));
            }
        }
        Ok(())
    }
}

/// Per-instance mutable state, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    /// Accumulated self-rotation about the body's Y axis (radians).
    pub rotation: f32,
    /// Phase offset (radians) fixed at creation to desynchronize bodies.
    pub start_offset: f64,
}

impl BodyState {
    pub fn new(start_offset: f64) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            start_offset,
        }
    }
}
