//! Orbit camera controller.
//!
//! Pointer drags and wheel steps are turned into pending spherical deltas that
//! decay over several ticks, which gives the camera inertia. Independently of
//! input, the controller can ease its target toward a focused body (tracking
//! the body's live position) or back to the scene overview.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::spherical::Spherical;
use crate::core::body::BodyId;

/// Where the controller can read a body's current position.
pub trait PositionProvider {
    fn position_of(&self, body: BodyId) -> Option<Vec3>;
}

/// Tunables for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of pending motion consumed (and decayed) per tick.
    pub damping: f32,
    /// When false, pending motion is applied in full on the next tick.
    pub damping_enabled: bool,
    /// Fraction of the remaining distance covered per tick while retargeting.
    pub focus_rate: f32,
    /// Added to a focused body's semi-major axis to get the viewing distance.
    pub focus_buffer: f32,
    /// Viewing distance when no body is focused.
    pub overview_distance: f32,
    /// Camera position at startup (target is the origin).
    pub initial_position: [f32; 3],
    pub min_radius: f32,
    pub max_radius: f32,
    /// Minimum angular distance from either pole (radians).
    pub polar_epsilon: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    /// Distance under which a retarget snaps and completes.
    pub settle_epsilon: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let initial = Vec3::new(0.0, 10.0, 40.0);
        Self {
            damping: 0.05,
            damping_enabled: true,
            focus_rate: 0.05,
            focus_buffer: 10.0,
            overview_distance: initial.length(),
            initial_position: initial.to_array(),
            min_radius: 1.0,
            max_radius: 800.0,
            polar_epsilon: 1e-3,
            zoom_in_factor: 0.95,
            zoom_out_factor: 1.05,
            settle_epsilon: 1e-3,
        }
    }
}

/// Body to track, with the semi-major axis used for the viewing distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub body: BodyId,
    pub orbit_radius: f32,
}

/// Input-driven state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Dragging,
    /// A wheel impulse is still being consumed.
    Zooming,
}

/// What the target is easing toward, independent of `ControlState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retarget {
    /// No automatic movement.
    Free,
    /// Follow a body's live position at `radius`.
    Body { body: BodyId, radius: f32 },
    /// Return to the origin at `radius`; becomes `Free` once settled.
    Overview { radius: f32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PendingRotation {
    azimuth: f32,
    polar: f32,
}

/// Spherical orbit camera rig. Single owner of the camera state.
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    config: CameraConfig,
    target: Vec3,
    spherical: Spherical,
    pending: PendingRotation,
    /// Multiplicative radius change still to apply (1.0 = none).
    pending_scale: f32,
    drag_last: Option<Vec2>,
    retarget: Retarget,
    viewport: Vec2,
    position: Vec3,
}

const NEUTRAL_EPSILON: f32 = 1e-6;

impl OrbitCameraController {
    pub fn new(config: CameraConfig) -> Self {
        let position = Vec3::from_array(config.initial_position);
        let mut spherical = Spherical::from_offset(position);
        if spherical.radius <= 0.0 {
            spherical = Spherical::new(config.overview_distance, PI / 2.0, 0.0);
        }
        let mut cam = Self {
            config,
            target: Vec3::ZERO,
            spherical,
            pending: PendingRotation::default(),
            pending_scale: 1.0,
            drag_last: None,
            retarget: Retarget::Free,
            // Drags are ignored until the host reports a size
            viewport: Vec2::ZERO,
            position,
        };
        cam.clamp();
        cam.position = cam.resolve_position();
        cam
    }

    // -- Viewport --

    /// Record the viewport size used to convert drag pixels to angles.
    /// Zero-area sizes are rejected and leave the previous size in place.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::debug!("ignoring zero-area viewport {width}x{height}");
            return false;
        }
        self.viewport = Vec2::new(width, height);
        true
    }

    // -- Pointer input --

    /// Idle -> Dragging.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.drag_last = Some(pointer);
    }

    /// Accumulate rotation from pointer movement while dragging.
    pub fn update_drag(&mut self, pointer: Vec2) {
        let Some(last) = self.drag_last else {
            return;
        };
        self.drag_last = Some(pointer);
        let height = self.viewport.y;
        if height <= 0.0 {
            return;
        }
        let delta = pointer - last;
        self.pending.azimuth += TAU * delta.x / height;
        self.pending.polar += TAU * delta.y / height;
    }

    /// Dragging -> Idle. Pending rotation keeps decaying (inertia).
    pub fn end_drag(&mut self) {
        self.drag_last = None;
    }

    /// One wheel step: negative zooms in, positive zooms out, zero is ignored.
    pub fn apply_zoom(&mut self, wheel_delta_sign: f32) {
        let factor = if wheel_delta_sign < 0.0 {
            self.config.zoom_in_factor
        } else if wheel_delta_sign > 0.0 {
            self.config.zoom_out_factor
        } else {
            return;
        };
        self.pending_scale *= factor;
        // Keep an active retarget from undoing the zoom
        match &mut self.retarget {
            Retarget::Body { radius, .. } | Retarget::Overview { radius } => {
                *radius = clamp_radius(*radius * factor, &self.config);
            }
            Retarget::Free => {}
        }
    }

    // -- Focus --

    /// Track a body, or with `None` ease back to the overview.
    pub fn set_focus(&mut self, focus: Option<FocusTarget>) {
        self.retarget = match focus {
            Some(f) => Retarget::Body {
                body: f.body,
                radius: clamp_radius(f.orbit_radius + self.config.focus_buffer, &self.config),
            },
            None => Retarget::Overview {
                radius: clamp_radius(self.config.overview_distance, &self.config),
            },
        };
    }

    /// Return to the overview and drop any inertia.
    pub fn reset(&mut self) {
        self.pending = PendingRotation::default();
        self.pending_scale = 1.0;
        self.set_focus(None);
    }

    /// Stop reacting to input (scene teardown).
    pub fn detach(&mut self) {
        self.drag_last = None;
        self.pending = PendingRotation::default();
        self.pending_scale = 1.0;
        self.retarget = Retarget::Free;
    }

    // -- Per-frame update --

    /// Advance one frame. Must run to completion before the frame is rendered.
    pub fn tick<P: PositionProvider + ?Sized>(&mut self, positions: &P) {
        self.step_retarget(positions);

        let share = if self.config.damping_enabled {
            self.config.damping.clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.spherical.azimuth -= self.pending.azimuth * share;
        self.spherical.polar -= self.pending.polar * share;
        if (self.pending_scale - 1.0).abs() > NEUTRAL_EPSILON && self.pending_scale > 0.0 {
            self.spherical.radius *= self.pending_scale.powf(share);
        }

        self.clamp();
        self.position = self.resolve_position();

        // Decay toward neutral
        let keep = 1.0 - share;
        self.pending.azimuth *= keep;
        self.pending.polar *= keep;
        self.pending_scale = if self.pending_scale > 0.0 { self.pending_scale.powf(keep) } else { 1.0 };
        if self.pending.azimuth.abs() < NEUTRAL_EPSILON {
            self.pending.azimuth = 0.0;
        }
        if self.pending.polar.abs() < NEUTRAL_EPSILON {
            self.pending.polar = 0.0;
        }
        if (self.pending_scale - 1.0).abs() < NEUTRAL_EPSILON {
            self.pending_scale = 1.0;
        }
    }

    fn step_retarget<P: PositionProvider + ?Sized>(&mut self, positions: &P) {
        let rate = self.config.focus_rate.clamp(0.0, 1.0);
        match self.retarget {
            Retarget::Free => {}
            Retarget::Body { body, radius } => {
                match positions.position_of(body) {
                    Some(live) => self.target = self.target.lerp(live, rate),
                    None => log::debug!("focused body {body:?} has no position; holding target"),
                }
                self.spherical.radius += (radius - self.spherical.radius) * rate;
            }
            Retarget::Overview { radius } => {
                self.target = self.target.lerp(Vec3::ZERO, rate);
                self.spherical.radius += (radius - self.spherical.radius) * rate;
                let eps = self.config.settle_epsilon;
                if self.target.length() < eps && (self.spherical.radius - radius).abs() < eps {
                    self.target = Vec3::ZERO;
                    self.spherical.radius = radius;
                    self.retarget = Retarget::Free;
                }
            }
        }
    }

    fn clamp(&mut self) {
        self.spherical.make_safe(self.config.polar_epsilon);
        self.spherical.radius = clamp_radius(self.spherical.radius, &self.config);
        self.spherical.azimuth = wrap_angle(self.spherical.azimuth);
    }

    fn resolve_position(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    // -- Read-only accessors (renderer side) --

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn retarget(&self) -> Retarget {
        self.retarget
    }

    pub fn focused_body(&self) -> Option<BodyId> {
        match self.retarget {
            Retarget::Body { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn state(&self) -> ControlState {
        if self.drag_last.is_some() {
            ControlState::Dragging
        } else if (self.pending_scale - 1.0).abs() > NEUTRAL_EPSILON {
            ControlState::Zooming
        } else {
            ControlState::Idle
        }
    }

    /// Pending (not yet applied) yaw and pitch deltas.
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.pending.azimuth, self.pending.polar)
    }

    pub fn pending_scale(&self) -> f32 {
        self.pending_scale
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

fn clamp_radius(radius: f32, config: &CameraConfig) -> f32 {
    let min = config.min_radius.max(f32::EPSILON);
    let max = config.max_radius.max(min);
    if radius.is_finite() {
        radius.clamp(min, max)
    } else {
        max
    }
}

fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    (angle + PI).rem_euclid(TAU) - PI
}
