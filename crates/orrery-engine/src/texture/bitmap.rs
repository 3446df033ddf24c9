use bytemuck::{Pod, Zeroable};

/// RGBA8 pixel color.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque color from a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }
}

/// Owned CPU-side image, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Bitmap with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Wrap raw RGBA bytes (e.g. decoded by the host). Returns None on size mismatch.
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if bytes.len() != expected || width == 0 || height == 0 {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba([c[0], c[1], c[2], c[3]]))
            .collect();
        Some(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Source-over composite of `color` (with extra `opacity`) onto one pixel.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba, opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        let dst = self.pixels[i].0;
        let src = color.0;

        let sa = (src[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = src[c] as f32 * sa;
            let d = dst[c] as f32 * da * (1.0 - sa);
            out[c] = ((s + d) / out_a).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.pixels[i] = Rgba(out);
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bitmap_is_transparent() {
        let bmp = Bitmap::new(4, 3);
        assert_eq!(bmp.pixels().len(), 12);
        assert!(bmp.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(Bitmap::from_rgba(2, 2, &[0; 16]).is_some());
        assert!(Bitmap::from_rgba(2, 2, &[0; 15]).is_none());
        assert!(Bitmap::from_rgba(0, 0, &[]).is_none());
    }

    #[test]
    fn blend_over_transparent_keeps_color() {
        let mut bmp = Bitmap::new(1, 1);
        bmp.blend(0, 0, Rgba::new(200, 100, 50, 255), 0.5);
        let px = bmp.get(0, 0).unwrap();
        assert_eq!(&px.0[..3], &[200, 100, 50]);
        assert_eq!(px.alpha(), 128);
    }

    #[test]
    fn blend_never_lowers_alpha() {
        let mut bmp = Bitmap::filled(1, 1, Rgba::new(10, 10, 10, 100));
        bmp.blend(0, 0, Rgba::new(255, 255, 255, 255), 0.1);
        assert!(bmp.get(0, 0).unwrap().alpha() >= 100);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.set(5, 5, Rgba::from_hex(0xffffff));
        bmp.blend(2, 0, Rgba::from_hex(0xffffff), 1.0);
        assert!(bmp.get(2, 0).is_none());
    }

    #[test]
    fn bytes_are_rgba_order() {
        let bmp = Bitmap::filled(1, 1, Rgba::from_hex(0x112233));
        assert_eq!(bmp.as_bytes(), &[0x11, 0x22, 0x33, 0xff]);
    }
}
