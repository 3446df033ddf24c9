use serde::{Deserialize, Serialize};

use crate::camera::controller::CameraConfig;
use crate::error::{OrreryError, OrreryResult};
use crate::geometry::orbit_path::DEFAULT_SEGMENTS;
use crate::systems::lighting::LightConfig;

/// Configuration for a viewer, provided by the `Orrery` implementation or
/// parsed from JSON handed over by the host page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub sim: SimConfig,
}

/// Static scene dressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub star_count: usize,
    /// Side length of the cube the stars are scattered in.
    pub star_spread: f32,
    pub orbit_segments: usize,
    pub orbit_color: u32,
    pub orbit_opacity: f32,
    /// Whether orbit guides start visible.
    pub orbits_visible: bool,
    pub sun_radius: f32,
    pub sun_texture: String,
    pub sun_emissive: u32,
    pub sun_emissive_intensity: f32,
    pub clear_color: u32,
    pub lights: LightConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 5000,
            star_spread: 2000.0,
            orbit_segments: DEFAULT_SEGMENTS,
            orbit_color: 0xaaaaaa,
            orbit_opacity: 0.3,
            orbits_visible: true,
            sun_radius: 4.0,
            sun_texture: "/textures/sun.jpg".to_string(),
            sun_emissive: 0xffaa00,
            sun_emissive_intensity: 2.0,
            clear_color: 0x000011,
            lights: LightConfig::default(),
        }
    }
}

/// Simulation clock and per-body phase settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated days per real second at startup.
    pub initial_speed: f64,
    /// Self-rotation per tick (radians).
    pub self_rotation_step: f32,
    /// Seed for phase offsets, stars and ring speckles.
    pub seed: u64,
    /// Explicit phase offsets (radians), one per body. Overrides the seed.
    pub phase_offsets: Option<Vec<f64>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_speed: 10.0,
            self_rotation_step: 0.01,
            seed: 0x0BB1_7A15,
            phase_offsets: None,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sim.seed = seed;
        self
    }

    pub fn with_phase_offsets(mut self, offsets: Vec<f64>) -> Self {
        self.sim.phase_offsets = Some(offsets);
        self
    }

    pub fn validate(&self) -> OrreryResult<()> {
        let cam = &self.camera;
        if !(cam.min_radius > 0.0 && cam.max_radius >= cam.min_radius && cam.max_radius.is_finite()) {
            return Err(invalid(format!(
                "camera radius range [{}, {}] is empty or non-positive",
                cam.min_radius, cam.max_radius
            )));
        }
        if !(0.0..=1.0).contains(&cam.damping) {
            return Err(invalid(format!("camera damping {} outside [0, 1]", cam.damping)));
        }
        if cam.damping_enabled && cam.damping <= 0.0 {
            return Err(invalid("damping must be positive while enabled"));
        }
        if !(cam.focus_rate > 0.0 && cam.focus_rate <= 1.0) {
            return Err(invalid(format!("focus rate {} outside (0, 1]", cam.focus_rate)));
        }
        if !(cam.zoom_in_factor > 0.0 && cam.zoom_in_factor < 1.0 && cam.zoom_out_factor > 1.0) {
            return Err(invalid("zoom factors must satisfy 0 < in < 1 < out"));
        }
        if !(cam.overview_distance.is_finite() && cam.overview_distance > 0.0) {
            return Err(invalid("overview distance must be positive"));
        }
        let scene = &self.scene;
        if !(scene.star_spread.is_finite() && scene.star_spread >= 0.0) {
            return Err(invalid(format!("star spread {} is invalid", scene.star_spread)));
        }
        if !(scene.sun_radius.is_finite() && scene.sun_radius > 0.0) {
            return Err(invalid("sun radius must be positive"));
        }
        if !(0.0..=1.0).contains(&scene.orbit_opacity) {
            return Err(invalid("orbit opacity outside [0, 1]"));
        }
        if let Some(problem) = scene.lights.problem() {
            return Err(invalid(problem));
        }
        let sim = &self.sim;
        if !(sim.initial_speed.is_finite() && sim.initial_speed >= 0.0) {
            return Err(invalid(format!("initial speed {} is invalid", sim.initial_speed)));
        }
        if !sim.self_rotation_step.is_finite() {
            return Err(invalid("self rotation step must be finite"));
        }
        if let Some(offsets) = &sim.phase_offsets {
            if offsets.iter().any(|o| !o.is_finite()) {
                return Err(invalid("phase offsets must be finite"));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> OrreryError {
    OrreryError::InvalidConfig(msg.into())
}
