//! Renderer contract.
//!
//! The browser build hands frames to the host through `FrameBuffer`; the host
//! draws with WebGL. Native or test backends implement the same trait.

use crate::assets::registry::TextureRegistry;
use crate::core::scene::SolarScene;
use crate::error::OrreryResult;
use crate::renderer::camera::PerspectiveCamera;

/// Everything a backend needs to draw one frame. Borrowed, read-only.
pub struct FrameData<'a> {
    pub scene: &'a SolarScene,
    pub camera: &'a PerspectiveCamera,
    pub textures: &'a TextureRegistry,
    /// Frames submitted so far, including this one.
    pub frame_index: u64,
}

/// Renderer trait for drawing backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct WebGlRenderer {
///     gl: web_sys::WebGl2RenderingContext,
///     // ...
/// }
///
/// impl Renderer for WebGlRenderer {
///     fn backend(&self) -> &'static str { "webgl2" }
///
///     fn render(&mut self, frame: &FrameData) -> OrreryResult<()> {
///         // Upload transforms, issue draw calls...
///     }
///
///     fn resize(&mut self, width: u32, height: u32) {
///         // Resize the drawing buffer...
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g. "frame-buffer", "webgl2").
    fn backend(&self) -> &'static str;

    /// Submit one frame. Errors are logged by the caller; the loop keeps going.
    fn render(&mut self, frame: &FrameData) -> OrreryResult<()>;

    /// Handle a non-zero viewport resize.
    fn resize(&mut self, width: u32, height: u32);
}
