//! Per-frame driver: integrate every body, settle the camera, submit exactly
//! one render. The host schedules frames; the driver only decides whether it
//! wants another one.

use crate::assets::registry::TextureRegistry;
use crate::camera::controller::OrbitCameraController;
use crate::core::motion::OrbitalMotionIntegrator;
use crate::core::scene::SolarScene;
use crate::core::table::BodyTable;
use crate::core::time::SimClock;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::{FrameData, Renderer};

/// Returned from every frame so the host knows whether to reschedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Mutable borrows of the viewer state a frame touches.
pub struct FrameParts<'a> {
    pub table: &'a BodyTable,
    pub scene: &'a mut SolarScene,
    pub controller: &'a mut OrbitCameraController,
    pub camera: &'a mut PerspectiveCamera,
    pub textures: &'a TextureRegistry,
}

pub struct RenderLoopDriver {
    integrator: OrbitalMotionIntegrator,
    clock: SimClock,
    last_now: Option<f64>,
    running: bool,
    frames: u64,
}

impl RenderLoopDriver {
    pub fn new(integrator: OrbitalMotionIntegrator, clock: SimClock) -> Self {
        Self {
            integrator,
            clock,
            last_now: None,
            running: false,
            frames: 0,
        }
    }

    /// Begin (or resume) at host time `now` (seconds).
    pub fn start(&mut self, now: f64) {
        self.running = true;
        self.last_now = Some(now);
        log::debug!("render loop started at {now:.3}s");
    }

    /// Cancel. Later frames do nothing and return `Stop`.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("render loop stopped after {} frames", self.frames);
        }
        self.running = false;
        self.last_now = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames rendered since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    /// Run one frame at host time `now` (seconds).
    pub fn frame(&mut self, now: f64, parts: FrameParts<'_>, renderer: &mut dyn Renderer) -> LoopControl {
        if !self.running {
            return LoopControl::Stop;
        }
        let dt = self.last_now.map_or(0.0, |prev| now - prev);
        self.last_now = Some(now);
        let sim_time = self.clock.advance(dt);

        // 1. Motion
        for (id, params) in parts.table.iter() {
            let Some(offset) = parts.scene.body(id).map(|n| n.state.start_offset) else {
                continue;
            };
            // Speed is already folded into sim_time
            let sample = self.integrator.compute_position(params, offset, sim_time, 1.0);
            parts.scene.apply_motion(id.0 as usize, sample);
        }

        // 2. Camera, fully resolved before rendering
        parts.controller.tick(&*parts.scene);
        parts.camera.look_at(parts.controller.position(), parts.controller.target());

        // 3. Exactly one submission
        self.frames += 1;
        if self.frames == 1 {
            log::debug!("first frame goes to the {} backend", renderer.backend());
        }
        let frame = FrameData {
            scene: &*parts.scene,
            camera: &*parts.camera,
            textures: parts.textures,
            frame_index: self.frames,
        };
        if let Err(err) = renderer.render(&frame) {
            log::warn!("frame {} render failed: {err}", self.frames);
        }
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ViewerConfig;
    use crate::camera::controller::PositionProvider;
    use crate::core::assembler::SceneAssembler;
    use crate::core::body::{BodyId, BodyParams};
    use crate::error::{OrreryError, OrreryResult};
    use crate::texture::ring::RingTextureCache;
    use glam::Vec3;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        fail: bool,
        /// Camera eye and Earth position seen at each render.
        seen: Vec<(Vec3, Vec3)>,
    }

    impl Renderer for Recorder {
        fn backend(&self) -> &'static str {
            "recorder"
        }

        fn render(&mut self, frame: &FrameData) -> OrreryResult<()> {
            self.calls += 1;
            self.seen.push((frame.camera.position, frame.scene.bodies()[0].state.position));
            if self.fail {
                return Err(OrreryError::Render("lost context".into()));
            }
            Ok(())
        }

        fn resize(&mut self, _width: u32, _height: u32) {}
    }

    struct Fixture {
        table: BodyTable,
        scene: SolarScene,
        controller: OrbitCameraController,
        camera: PerspectiveCamera,
        textures: TextureRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let table = BodyTable::new(vec![BodyParams::new("Earth", 16.0, 15.98, 365.0)]).unwrap();
            let mut config = ViewerConfig::default().with_phase_offsets(vec![0.0]);
            config.scene.star_count = 4;
            let mut textures = TextureRegistry::new();
            let scene = SceneAssembler::new(&config)
                .assemble(&table, &mut textures, &mut RingTextureCache::new())
                .unwrap();
            Self {
                table,
                scene,
                controller: OrbitCameraController::default(),
                camera: PerspectiveCamera::new(800.0, 600.0),
                textures,
            }
        }

        fn parts(&mut self) -> FrameParts<'_> {
            FrameParts {
                table: &self.table,
                scene: &mut self.scene,
                controller: &mut self.controller,
                camera: &mut self.camera,
                textures: &self.textures,
            }
        }
    }

    fn driver(speed: f64) -> RenderLoopDriver {
        RenderLoopDriver::new(OrbitalMotionIntegrator::default(), SimClock::new(speed))
    }

    #[test]
    fn exactly_one_render_per_frame() {
        let mut fx = Fixture::new();
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        d.start(0.0);
        for i in 1..=10 {
            assert_eq!(d.frame(i as f64 / 60.0, fx.parts(), &mut rec), LoopControl::Continue);
        }
        assert_eq!(rec.calls, 10);
        assert_eq!(d.frames(), 10);
    }

    #[test]
    fn camera_is_settled_before_render() {
        let mut fx = Fixture::new();
        fx.controller.set_focus(fx.scene.focus_target("Earth"));
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        d.start(0.0);
        d.frame(0.016, fx.parts(), &mut rec);
        assert_eq!(rec.seen[0].0, fx.controller.position());
        assert_eq!(rec.seen[0].1, fx.scene.position_of(BodyId(0)).unwrap());
    }

    #[test]
    fn stopped_loop_does_nothing() {
        let mut fx = Fixture::new();
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        assert_eq!(d.frame(0.0, fx.parts(), &mut rec), LoopControl::Stop);
        d.start(0.0);
        d.frame(0.1, fx.parts(), &mut rec);
        d.stop();
        assert_eq!(d.frame(0.2, fx.parts(), &mut rec), LoopControl::Stop);
        assert_eq!(rec.calls, 1);
        assert!(!d.is_running());
    }

    #[test]
    fn render_error_keeps_looping() {
        let mut fx = Fixture::new();
        let mut rec = Recorder { fail: true, ..Default::default() };
        let mut d = driver(1.0);
        d.start(0.0);
        assert_eq!(d.frame(0.1, fx.parts(), &mut rec), LoopControl::Continue);
        assert_eq!(d.frame(0.2, fx.parts(), &mut rec), LoopControl::Continue);
        assert_eq!(rec.calls, 2);
    }

    #[test]
    fn speed_change_does_not_jump() {
        let mut fx = Fixture::new();
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        d.start(0.0);
        d.frame(0.1, fx.parts(), &mut rec);
        let before = fx.scene.bodies()[0].state.position;
        d.clock_mut().set_speed(100.0);
        // Same timestamp: no real time passed, so nothing may move
        d.frame(0.1, fx.parts(), &mut rec);
        assert_eq!(fx.scene.bodies()[0].state.position, before);
    }

    #[test]
    fn frozen_clock_holds_positions() {
        let mut fx = Fixture::new();
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        d.clock_mut().freeze();
        d.start(0.0);
        for i in 1..5 {
            d.frame(i as f64 * 0.1, fx.parts(), &mut rec);
        }
        let p = fx.scene.bodies()[0].state.position;
        assert!((p - Vec3::new(16.0, 0.0, 0.0)).length() < 1e-5);
        // Self-rotation keeps advancing at speed 0
        assert!((fx.scene.bodies()[0].state.rotation - 0.04).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut fx = Fixture::new();
        let mut rec = Recorder::default();
        let mut d = driver(1.0);
        d.start(0.0);
        d.frame(30.0, fx.parts(), &mut rec);
        assert!((d.clock().sim_time() - 0.25).abs() < 1e-12);
    }
}
