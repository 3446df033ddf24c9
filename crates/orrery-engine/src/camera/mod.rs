// Orbit camera rig. The controller owns the spherical state; the perspective
// projection lives in renderer::camera.

pub mod controller;
pub mod spherical;

pub use controller::{CameraConfig, ControlState, FocusTarget, OrbitCameraController, PositionProvider, Retarget};
pub use spherical::Spherical;
