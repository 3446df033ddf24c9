pub mod api;
pub mod assets;
pub mod camera;
pub mod components;
pub mod core;
pub mod error;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod texture;

// Re-export key types at crate root for convenience
pub use api::config::{SceneConfig, SimConfig, ViewerConfig};
pub use api::types::ViewerEvent;
pub use api::viewer::{Orrery, Viewer};
pub use assets::manifest::BodyManifest;
pub use assets::registry::{TextureId, TextureRegistry, TextureStatus};
pub use camera::{CameraConfig, ControlState, FocusTarget, OrbitCameraController, PositionProvider, Retarget, Spherical};
pub use components::mesh::{Color, LineMaterial, RingMesh, SphereMesh, SurfaceMaterial};
pub use core::assembler::SceneAssembler;
pub use core::body::{BodyId, BodyParams, BodyState, RingDescriptor, RingType};
pub use core::motion::{inclined_ellipse_point, MotionSample, OrbitalMotionIntegrator, PERIOD_SCALE};
pub use core::rng::Rng;
pub use core::scene::{BodyNode, SolarScene};
pub use core::table::BodyTable;
pub use core::time::SimClock;
pub use error::{OrreryError, OrreryResult};
pub use geometry::orbit_path::{build_path, OrbitGuide};
pub use geometry::starfield::Starfield;
pub use input::queue::{commands, InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::instance::{BodyInstance, FrameBuffer, LightUniform};
pub use renderer::{FrameData, Renderer};
pub use systems::lighting::{LightRig, PointLight};
pub use systems::render_loop::{LoopControl, RenderLoopDriver};
pub use texture::bitmap::{Bitmap, Rgba};
pub use texture::ring::{synthesize as synthesize_ring, RingTextureCache};
