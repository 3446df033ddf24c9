use crate::assets::registry::TextureId;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// UV sphere geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereMesh {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            width_segments: 32,
            height_segments: 32,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.width_segments = segments;
        self.height_segments = segments;
        self
    }
}

/// Flat annulus lying in the body's equatorial (XZ) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMesh {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub theta_segments: u32,
    pub texture: TextureId,
}

impl RingMesh {
    pub fn new(inner_radius: f32, outer_radius: f32, texture: TextureId) -> Self {
        Self {
            inner_radius,
            outer_radius,
            theta_segments: 64,
            texture,
        }
    }
}

/// Surface material for spheres and rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub texture: Option<TextureId>,
    pub emissive: Color,
    /// HDR glow multiplier.
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub transparent: bool,
    pub double_sided: bool,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            texture: None,
            emissive: Color::BLACK,
            emissive_intensity: 0.1,
            roughness: 0.8,
            metalness: 0.1,
            transparent: false,
            double_sided: false,
        }
    }
}

impl SurfaceMaterial {
    pub fn textured(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self
    }

    /// Alpha-blended, visible from both sides (ring planes).
    pub fn see_through(mut self) -> Self {
        self.transparent = true;
        self.double_sided = true;
        self
    }
}

/// Material for orbit guide lines. `visible` is toggled in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
    pub visible: bool,
}

impl LineMaterial {
    pub fn new(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color() {
        let c = Color::from_hex(0xffaa00);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 170.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn ring_material_is_see_through() {
        let m = SurfaceMaterial::textured(TextureId(3)).see_through();
        assert!(m.transparent && m.double_sided);
        assert_eq!(m.texture, Some(TextureId(3)));
    }

    #[test]
    fn line_material_starts_visible() {
        assert!(LineMaterial::new(Color::from_hex(0xaaaaaa), 0.3).visible);
    }
}
