use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera for 3D rendering.
/// Position and target are written by the orbit controller every frame.
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w unused.
    pub eye: [f32; 4],
}

impl PerspectiveCamera {
    pub const DEFAULT_FOV: f32 = 75.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 1000.0;

    pub fn new(width: f32, height: f32) -> Self {
        let aspect = if width > 0.0 && height > 0.0 { width / height } else { 1.0 };
        Self {
            fov_deg: Self::DEFAULT_FOV,
            aspect,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            position: Vec3::new(0.0, 10.0, 40.0),
            target: Vec3::ZERO,
        }
    }

    /// Right-handed, Y-up view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Perspective projection, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// Update the aspect ratio on viewport resize.
    /// Zero-area viewports (minimized window) are skipped; returns false then.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) -> bool {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return false;
        }
        self.aspect = viewport_width / viewport_height;
        true
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_perspective() {
        let cam = PerspectiveCamera::new(800.0, 600.0);
        let cols = cam.projection_matrix().to_cols_array_2d();
        // Perspective divide: w takes -z
        assert!((cols[2][3] + 1.0).abs() < 1e-6);
        assert!(cols[3][3].abs() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = PerspectiveCamera::new(800.0, 600.0);
        assert!(cam.resize(1920.0, 1080.0));
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn zero_area_resize_is_skipped() {
        let mut cam = PerspectiveCamera::new(800.0, 600.0);
        assert!(!cam.resize(0.0, 0.0));
        assert!(!cam.resize(1024.0, 0.0));
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let mut cam = PerspectiveCamera::new(800.0, 600.0);
        cam.look_at(Vec3::new(5.0, 3.0, 20.0), Vec3::new(1.0, 0.0, -2.0));
        let clip = Mat4::from_cols_array_2d(&cam.uniform().view_proj) * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
