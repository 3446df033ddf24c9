use orrery_engine::{
    InputEvent, LoopControl, Orrery, OrreryResult, TextureId, Viewer, ViewerConfig, ViewerEvent,
};

/// Generic viewer runner that wires an `Orrery` to the browser.
///
/// Each concrete build (e.g. `solar-system`) creates a `thread_local!`
/// ViewerRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
///
/// Host timestamps arrive in milliseconds (`performance.now()`).
pub struct ViewerRunner<O: Orrery> {
    orrery: O,
    viewer: Viewer,
}

impl<O: Orrery> ViewerRunner<O> {
    pub fn new(orrery: O, config: ViewerConfig) -> OrreryResult<Self> {
        let viewer = Viewer::new(orrery.bodies()?, config)?;
        Ok(Self { orrery, viewer })
    }

    pub fn orrery(&self) -> &O {
        &self.orrery
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn start(&mut self, now_ms: f64) {
        self.viewer.start(now_ms / 1000.0);
    }

    /// Run one frame. Returns false when the host should stop scheduling.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.viewer.frame(now_ms / 1000.0) == LoopControl::Continue
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.viewer.push_input(event);
    }

    pub fn teardown(&mut self) {
        self.viewer.teardown();
    }

    // ---- Textures ----

    pub fn pending_textures(&self) -> Vec<String> {
        self.viewer.pending_texture_paths()
    }

    pub fn texture_loaded(&mut self, path: &str, width: u32, height: u32, rgba: &[u8]) -> bool {
        self.viewer.texture_loaded(path, width, height, rgba)
    }

    pub fn texture_failed(&mut self, path: &str, reason: &str) {
        self.viewer.texture_failed(path, reason);
    }

    /// Ids whose pixels changed since the last call (host re-uploads these).
    pub fn take_updated_textures(&mut self) -> Vec<u32> {
        self.viewer
            .textures_mut()
            .take_updated()
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    pub fn texture_id(&self, path: &str) -> i32 {
        self.viewer.textures().id_of(path).map_or(-1, |id| id.0 as i32)
    }

    pub fn texture_ptr(&self, id: u32) -> *const u8 {
        self.viewer
            .textures()
            .get(TextureId(id))
            .map_or(std::ptr::null(), |e| e.bitmap.as_bytes().as_ptr())
    }

    pub fn texture_width(&self, id: u32) -> u32 {
        self.viewer.textures().get(TextureId(id)).map_or(0, |e| e.bitmap.width())
    }

    pub fn texture_height(&self, id: u32) -> u32 {
        self.viewer.textures().get(TextureId(id)).map_or(0, |e| e.bitmap.height())
    }

    // ---- Pointer accessors for WASM memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.viewer.frame_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.viewer.frame_buffer().instance_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.viewer.frame_buffer().camera_ptr()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.viewer.frame_buffer().lights_ptr()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.viewer.events().as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.viewer.events().len() as u32
    }

    pub fn event_floats(&self) -> u32 {
        ViewerEvent::FLOATS as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.viewer.scene().starfield().as_floats().as_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.viewer.scene().starfield().len() as u32
    }

    pub fn orbit_ptr(&self, body: u32) -> *const f32 {
        self.viewer
            .scene()
            .bodies()
            .get(body as usize)
            .map_or(std::ptr::null(), |n| n.orbit.guide.as_floats().as_ptr())
    }

    pub fn orbit_point_count(&self, body: u32) -> u32 {
        self.viewer
            .scene()
            .bodies()
            .get(body as usize)
            .map_or(0, |n| n.orbit.guide.points().len() as u32)
    }

    pub fn clear_color(&self) -> u32 {
        let c = self.viewer.scene().clear_color();
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (to_byte(c.r) << 16) | (to_byte(c.g) << 8) | to_byte(c.b)
    }

    // ---- UI state ----

    pub fn body_names(&self) -> Vec<String> {
        self.viewer.body_names().map(str::to_string).collect()
    }

    pub fn speed(&self) -> f64 {
        self.viewer.speed()
    }

    pub fn orbits_visible(&self) -> bool {
        self.viewer.scene().orbits_visible()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.viewer.is_fullscreen()
    }
}
