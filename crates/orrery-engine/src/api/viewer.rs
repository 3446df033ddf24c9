use glam::Vec2;

use crate::api::config::ViewerConfig;
use crate::api::types::ViewerEvent;
use crate::assets::registry::TextureRegistry;
use crate::camera::controller::OrbitCameraController;
use crate::core::assembler::SceneAssembler;
use crate::core::body::BodyId;
use crate::core::motion::OrbitalMotionIntegrator;
use crate::core::scene::SolarScene;
use crate::core::table::BodyTable;
use crate::core::time::SimClock;
use crate::error::{OrreryError, OrreryResult};
use crate::input::queue::{commands, InputEvent, InputQueue};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::FrameBuffer;
use crate::renderer::traits::Renderer;
use crate::systems::render_loop::{FrameParts, LoopControl, RenderLoopDriver};
use crate::texture::bitmap::Bitmap;
use crate::texture::ring::RingTextureCache;

/// The contract every solar-system build fulfills.
pub trait Orrery {
    /// Viewer configuration. Called once before the scene is built.
    fn config(&self) -> ViewerConfig {
        ViewerConfig::default()
    }

    /// The bodies to display.
    fn bodies(&self) -> OrreryResult<BodyTable>;
}

/// One mounted solar-system view.
///
/// Owns the scene and everything scoped to it (texture caches, camera,
/// render loop). Input goes through `push_input` and is handled at the start
/// of the next frame; the direct methods exist for embedding and tests.
pub struct Viewer {
    table: BodyTable,
    scene: SolarScene,
    textures: TextureRegistry,
    rings: RingTextureCache,
    controller: OrbitCameraController,
    camera: PerspectiveCamera,
    driver: RenderLoopDriver,
    input: InputQueue,
    renderer: FrameBuffer,
    events: Vec<ViewerEvent>,
    fullscreen: bool,
    alive: bool,
}

impl Viewer {
    pub fn new(table: BodyTable, config: ViewerConfig) -> OrreryResult<Self> {
        let mut textures = TextureRegistry::new();
        let mut rings = RingTextureCache::new();
        let scene = SceneAssembler::new(&config).assemble(&table, &mut textures, &mut rings)?;
        let driver = RenderLoopDriver::new(
            OrbitalMotionIntegrator::new(config.sim.self_rotation_step),
            SimClock::new(config.sim.initial_speed),
        );
        let controller = OrbitCameraController::new(config.camera);
        let mut camera = PerspectiveCamera::new(1.0, 1.0);
        camera.look_at(controller.position(), controller.target());

        Ok(Self {
            table,
            scene,
            textures,
            rings,
            controller,
            camera,
            driver,
            input: InputQueue::new(),
            renderer: FrameBuffer::new(),
            events: Vec::with_capacity(8),
            fullscreen: false,
            alive: true,
        })
    }

    pub fn from_orrery<O: Orrery>(orrery: &O) -> OrreryResult<Self> {
        Self::new(orrery.bodies()?, orrery.config())
    }

    // -- Lifecycle --

    pub fn start(&mut self, now: f64) {
        if self.alive {
            self.driver.start(now);
        }
    }

    /// Handle queued input, then run one frame at host time `now` (seconds).
    pub fn frame(&mut self, now: f64) -> LoopControl {
        if !self.alive {
            return LoopControl::Stop;
        }
        self.events.clear();
        for event in self.input.drain() {
            self.handle(event);
        }
        let parts = FrameParts {
            table: &self.table,
            scene: &mut self.scene,
            controller: &mut self.controller,
            camera: &mut self.camera,
            textures: &self.textures,
        };
        self.driver.frame(now, parts, &mut self.renderer)
    }

    /// Stop the loop, detach the camera and release every scene-scoped cache.
    /// Idempotent; the viewer is inert afterwards.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.driver.stop();
        self.controller.detach();
        self.input.clear();
        self.textures.clear();
        self.rings.clear();
        self.renderer.clear();
        self.events.clear();
        self.alive = false;
        log::info!("viewer torn down");
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    // -- Input --

    pub fn push_input(&mut self, event: InputEvent) {
        if self.alive {
            self.input.push(event);
        }
    }

    /// Apply one input event now.
    pub fn handle(&mut self, event: InputEvent) {
        if !self.alive {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.controller.begin_drag(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.controller.update_drag(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.controller.end_drag(),
            InputEvent::Wheel { delta_y } => self.controller.apply_zoom(delta_y),
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
            }
            InputEvent::Focus { name: Some(name) } => {
                self.focus_by_name(&name);
            }
            InputEvent::Focus { name: None } => self.clear_focus(),
            InputEvent::Custom { kind, a, .. } => match kind {
                commands::SET_SPEED => {
                    self.set_speed(a as f64);
                }
                commands::FOCUS_INDEX if a < 0.0 => self.clear_focus(),
                commands::FOCUS_INDEX => {
                    self.focus_index(a as u32);
                }
                commands::RESET_VIEW => self.reset_view(),
                commands::TOGGLE_ORBITS => {
                    self.toggle_orbits();
                }
                commands::TOGGLE_FULLSCREEN => {
                    self.toggle_fullscreen();
                }
                other => log::debug!("ignoring custom event kind {other}"),
            },
        }
    }

    /// Focus the camera on a body. Unknown names are a no-op.
    pub fn focus_by_name(&mut self, name: &str) -> bool {
        match self.table.find(name) {
            Some(id) => self.focus_index(id.0),
            None => {
                log::debug!("focus ignored: no body named '{name}'");
                false
            }
        }
    }

    fn focus_index(&mut self, index: u32) -> bool {
        let Some(params) = self.table.get(BodyId(index)) else {
            log::debug!("focus ignored: no body at index {index}");
            return false;
        };
        let Some(target) = self.scene.focus_target(&params.name) else {
            return false;
        };
        self.controller.set_focus(Some(target));
        self.events.push(ViewerEvent::focus_changed(Some(index)));
        log::info!("focusing {}", params.name);
        true
    }

    /// Ease back to the overview, keeping any inertia.
    pub fn clear_focus(&mut self) {
        self.controller.set_focus(None);
        self.events.push(ViewerEvent::focus_changed(None));
    }

    /// Back to the overview with inertia dropped.
    pub fn reset_view(&mut self) {
        self.controller.reset();
        self.events.push(ViewerEvent::focus_changed(None));
    }

    /// Returns the speed in effect.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        let applied = self.driver.clock_mut().set_speed(speed);
        if applied != speed {
            log::debug!("speed {speed} adjusted to {applied}");
        }
        self.events.push(ViewerEvent::speed_changed(applied));
        applied
    }

    pub fn toggle_orbits(&mut self) -> bool {
        let visible = self.scene.toggle_orbits();
        self.events.push(ViewerEvent::orbits_toggled(visible));
        visible
    }

    /// Flip the requested fullscreen state; the host performs the switch.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.events.push(ViewerEvent::fullscreen_toggled(self.fullscreen));
        self.fullscreen
    }

    /// Zero-area sizes (minimized or hidden canvas) are skipped.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.controller.set_viewport(width, height) || !self.camera.resize(width, height) {
            return false;
        }
        self.renderer.resize(width.round() as u32, height.round() as u32);
        true
    }

    // -- Textures --

    /// Paths the host still has to fetch.
    pub fn pending_texture_paths(&self) -> Vec<String> {
        self.textures.pending().map(|(_, path)| path.to_string()).collect()
    }

    /// Host decoded a texture into RGBA8 bytes.
    pub fn texture_loaded(&mut self, path: &str, width: u32, height: u32, rgba: &[u8]) -> bool {
        if !self.alive {
            return false;
        }
        let result = Bitmap::from_rgba(width, height, rgba).ok_or_else(|| OrreryError::Texture {
            path: path.to_string(),
            reason: format!("{} bytes do not match {width}x{height} RGBA", rgba.len()),
        });
        let ok = result.is_ok();
        self.textures.resolve(path, result).is_some() && ok
    }

    /// Host failed to fetch or decode a texture; the fallback stays.
    pub fn texture_failed(&mut self, path: &str, reason: &str) {
        if !self.alive {
            return;
        }
        self.textures.resolve(
            path,
            Err(OrreryError::Texture {
                path: path.to_string(),
                reason: reason.to_string(),
            }),
        );
    }

    // -- Read access --

    /// Events emitted during the last frame (and by direct calls since).
    pub fn events(&self) -> &[ViewerEvent] {
        &self.events
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.renderer
    }

    pub fn scene(&self) -> &SolarScene {
        &self.scene
    }

    pub fn controller(&self) -> &OrbitCameraController {
        &self.controller
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }

    pub fn speed(&self) -> f64 {
        self.driver.clock().speed()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }
}
