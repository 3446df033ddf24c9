use bytemuck::{Pod, Zeroable};

use super::camera::CameraUniform;
use super::traits::{FrameData, Renderer};
use crate::assets::registry::{TextureId, TextureStatus};
use crate::error::{OrreryError, OrreryResult};
use crate::systems::lighting::PointLight;

/// Per-instance render data read by the host renderer from WASM memory.
/// Must match the host protocol: 12 floats = 48 bytes stride.
///
/// Instance 0 is the sun; bodies follow in table order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Self-rotation about Y in radians.
    pub rotation: f32,
    pub radius: f32,
    /// Surface texture id.
    pub texture: f32,
    pub emissive_intensity: f32,
    /// 1.0 when the orbit guide is drawn.
    pub orbit_visible: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    /// Ring texture id, or -1 without a ring.
    pub ring_texture: f32,
    /// 1.0 once the surface texture has real pixels; 0.0 while the fallback shows.
    pub texture_ready: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Light data for the host's shading pass (20 floats).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// rgb premultiplied by intensity, w unused.
    pub ambient: [f32; 4],
    pub point: PointLight,
    /// xyz = direction of travel, w = intensity.
    pub directional: [f32; 4],
    /// rgb of the directional light, w unused.
    pub directional_color: [f32; 4],
}

impl LightUniform {
    pub const FLOATS: usize = 20;
}

/// `Renderer` that flattens each frame into `#[repr(C)]` arrays the host
/// reads through raw pointers.
pub struct FrameBuffer {
    pub instances: Vec<BodyInstance>,
    pub camera: CameraUniform,
    pub lights: LightUniform,
    width: u32,
    height: u32,
    /// Index of the last frame packed.
    frames: u64,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
            camera: CameraUniform::zeroed(),
            lights: LightUniform::default(),
            width: 0,
            height: 0,
            frames: 0,
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Index of the last successfully packed frame (0 before the first).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        &self.lights as *const LightUniform as *const f32
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for FrameBuffer {
    fn backend(&self) -> &'static str {
        "frame-buffer"
    }

    fn render(&mut self, frame: &FrameData) -> OrreryResult<()> {
        let uniform = frame.camera.uniform();
        if uniform.view_proj.iter().flatten().any(|v| !v.is_finite()) {
            return Err(OrreryError::Render("camera matrix is not finite".into()));
        }
        self.camera = uniform;

        let rig = frame.scene.lights();
        let [r, g, b] = rig.ambient_rgb();
        let dir = rig.directional.direction();
        let color = rig.directional.color;
        self.lights = LightUniform {
            ambient: [r, g, b, 0.0],
            point: rig.point,
            directional: [dir.x, dir.y, dir.z, rig.directional.intensity],
            directional_color: [color.r, color.g, color.b, 0.0],
        };
        let ready = |id: Option<TextureId>| {
            let status = id.and_then(|id| frame.textures.get(id)).map(|e| e.status);
            if status == Some(TextureStatus::Ready) { 1.0 } else { 0.0 }
        };

        self.instances.clear();
        let sun = frame.scene.sun();
        self.instances.push(BodyInstance {
            radius: sun.mesh.radius,
            texture: sun.material.texture.map_or(-1.0, |t| t.0 as f32),
            emissive_intensity: sun.material.emissive_intensity,
            ring_texture: -1.0,
            texture_ready: ready(sun.material.texture),
            ..Default::default()
        });
        for node in frame.scene.bodies() {
            let p = node.state.position;
            let (ring_inner, ring_outer, ring_texture) = match &node.ring {
                Some(ring) => (ring.mesh.inner_radius, ring.mesh.outer_radius, ring.mesh.texture.0 as f32),
                None => (0.0, 0.0, -1.0),
            };
            self.instances.push(BodyInstance {
                x: p.x,
                y: p.y,
                z: p.z,
                rotation: node.state.rotation,
                radius: node.mesh.radius,
                texture: node.material.texture.map_or(-1.0, |t| t.0 as f32),
                emissive_intensity: node.material.emissive_intensity,
                orbit_visible: if node.orbit.material.visible { 1.0 } else { 0.0 },
                ring_inner,
                ring_outer,
                ring_texture,
                texture_ready: ready(node.material.texture),
            });
        }

        self.frames = frame.frame_index;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::TextureRegistry;
    use crate::components::mesh::Color;
    use crate::core::scene::tests::scene;
    use crate::texture::bitmap::Bitmap;
    use crate::renderer::camera::PerspectiveCamera;
    use glam::Vec3;

    #[test]
    fn body_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<LightUniform>(), LightUniform::FLOATS * 4);
    }

    #[test]
    fn render_packs_sun_then_bodies() {
        let mut fb = FrameBuffer::new();
        let scene = scene();
        let camera = PerspectiveCamera::new(800.0, 600.0);
        let textures = TextureRegistry::new();
        let frame = FrameData { scene: &scene, camera: &camera, textures: &textures, frame_index: 1 };
        fb.render(&frame).unwrap();
        assert_eq!(fb.instance_count(), 3);
        assert_eq!(fb.instances[0].radius, 4.0);
        assert_eq!(fb.instances[2].orbit_visible, 1.0);
        assert_eq!(fb.instances[2].ring_texture, -1.0);
        assert_eq!(fb.frames(), 1);
        assert_eq!(fb.lights.point.intensity, 35.0);
    }

    #[test]
    fn directional_color_reaches_uniform() {
        let mut fb = FrameBuffer::new();
        let mut scene = scene();
        scene.lights.directional.color = Color::from_hex(0xff8000);
        let camera = PerspectiveCamera::new(800.0, 600.0);
        let textures = TextureRegistry::new();
        let frame = FrameData { scene: &scene, camera: &camera, textures: &textures, frame_index: 7 };
        fb.render(&frame).unwrap();
        assert_eq!(fb.lights.directional_color[0], 1.0);
        assert!((fb.lights.directional_color[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(fb.lights.directional_color[2], 0.0);
        assert_eq!(fb.frames(), 7);
    }

    #[test]
    fn texture_ready_tracks_registry() {
        let mut fb = FrameBuffer::new();
        let scene = scene();
        let camera = PerspectiveCamera::new(800.0, 600.0);
        let mut textures = TextureRegistry::new();
        let id = textures.request("textures/mercury.jpg");
        assert_eq!(id, TextureId(0));

        let frame = FrameData { scene: &scene, camera: &camera, textures: &textures, frame_index: 1 };
        fb.render(&frame).unwrap();
        assert_eq!(fb.instances[1].texture_ready, 0.0);

        textures.resolve("textures/mercury.jpg", Ok(Bitmap::new(2, 2)));
        let frame = FrameData { scene: &scene, camera: &camera, textures: &textures, frame_index: 2 };
        fb.render(&frame).unwrap();
        assert_eq!(fb.instances[1].texture_ready, 1.0);
        // Sun has no texture in the fixture
        assert_eq!(fb.instances[0].texture_ready, 0.0);
    }

    #[test]
    fn degenerate_camera_is_an_error() {
        let mut fb = FrameBuffer::new();
        let scene = scene();
        let mut camera = PerspectiveCamera::new(800.0, 600.0);
        camera.look_at(Vec3::ZERO, Vec3::ZERO);
        let textures = TextureRegistry::new();
        let frame = FrameData { scene: &scene, camera: &camera, textures: &textures, frame_index: 1 };
        assert!(fb.render(&frame).is_err());
        assert_eq!(fb.frames(), 0);
    }

    #[test]
    fn zero_resize_ignored() {
        let mut fb = FrameBuffer::new();
        fb.resize(640, 480);
        fb.resize(0, 480);
        assert_eq!(fb.size(), (640, 480));
    }
}
