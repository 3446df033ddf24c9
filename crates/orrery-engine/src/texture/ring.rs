//! Procedural ring textures.
//!
//! A ring is a radial gradient painted into an annulus on a fixed-size canvas,
//! with a scatter of speckles on top. Colors, stops and speckle ranges come
//! from a per-type style table; the geometry depends only on the radii.

use std::collections::HashMap;

use crate::assets::registry::{TextureId, TextureRegistry};
use crate::core::body::RingType;
use crate::core::rng::Rng;
use crate::texture::bitmap::{Bitmap, Rgba};

/// Canvas edge length in pixels.
pub const RING_CANVAS_SIZE: u32 = 512;
/// Gap between the outer ring edge and the canvas edge.
pub const RING_CANVAS_MARGIN: f32 = 10.0;

/// Color stop at `offset` in [0, 1] across the annulus (0 = inner edge).
#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    pub offset: f32,
    pub rgb: [u8; 3],
    pub alpha: f32,
}

const fn stop(offset: f32, rgb: [u8; 3], alpha: f32) -> GradientStop {
    GradientStop { offset, rgb, alpha }
}

/// Noise layered over the gradient.
#[derive(Debug, Clone, Copy)]
pub struct SpeckleStyle {
    pub count: u32,
    pub rgb: [u8; 3],
    /// Speckle radius range in canvas pixels.
    pub radius: (f32, f32),
    pub opacity: (f32, f32),
}

#[derive(Debug, Clone, Copy)]
pub struct RingStyle {
    pub stops: &'static [GradientStop],
    pub speckles: SpeckleStyle,
}

const SATURN_GOLD: [u8; 3] = [212, 175, 55];
const URANUS_GREY: [u8; 3] = [74, 74, 74];
const NEPTUNE_GREY: [u8; 3] = [102, 102, 102];

// Cassini division sits between 0.45 and 0.55.
const SATURN_STOPS: [GradientStop; 6] = [
    stop(0.0, SATURN_GOLD, 0.8),
    stop(0.3, SATURN_GOLD, 0.9),
    stop(0.45, SATURN_GOLD, 0.3),
    stop(0.55, SATURN_GOLD, 0.3),
    stop(0.7, SATURN_GOLD, 0.9),
    stop(1.0, SATURN_GOLD, 0.6),
];

const URANUS_STOPS: [GradientStop; 3] = [
    stop(0.0, URANUS_GREY, 0.6),
    stop(0.5, [1, 111, 255], 0.49),
    stop(1.0, [76, 189, 255], 0.73),
];

const NEPTUNE_STOPS: [GradientStop; 3] = [
    stop(0.0, NEPTUNE_GREY, 0.5),
    stop(0.7, NEPTUNE_GREY, 0.3),
    stop(1.0, NEPTUNE_GREY, 0.1),
];

const SATURN_STYLE: RingStyle = RingStyle {
    stops: &SATURN_STOPS,
    speckles: SpeckleStyle { count: 50, rgb: SATURN_GOLD, radius: (1.0, 4.0), opacity: (0.0, 0.3) },
};

const URANUS_STYLE: RingStyle = RingStyle {
    stops: &URANUS_STOPS,
    speckles: SpeckleStyle { count: 30, rgb: URANUS_GREY, radius: (1.0, 3.0), opacity: (0.0, 0.2) },
};

const NEPTUNE_STYLE: RingStyle = RingStyle {
    stops: &NEPTUNE_STOPS,
    speckles: SpeckleStyle { count: 20, rgb: NEPTUNE_GREY, radius: (2.0, 6.0), opacity: (0.2, 0.6) },
};

/// Style table lookup.
pub fn style(ring_type: RingType) -> &'static RingStyle {
    match ring_type {
        RingType::Saturn => &SATURN_STYLE,
        RingType::Uranus => &URANUS_STYLE,
        RingType::Neptune => &NEPTUNE_STYLE,
    }
}

/// Evaluate a gradient at `s` in [0, 1].
pub fn sample_gradient(stops: &[GradientStop], s: f32) -> Rgba {
    let s = s.clamp(0.0, 1.0);
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Rgba::TRANSPARENT,
    };
    if s <= first.offset {
        return to_rgba(first.rgb, first.alpha);
    }
    if s >= last.offset {
        return to_rgba(last.rgb, last.alpha);
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if s <= hi.offset {
            let span = hi.offset - lo.offset;
            let f = if span > 0.0 { (s - lo.offset) / span } else { 1.0 };
            let mut rgb = [0u8; 3];
            for c in 0..3 {
                let v = lo.rgb[c] as f32 + (hi.rgb[c] as f32 - lo.rgb[c] as f32) * f;
                rgb[c] = v.round() as u8;
            }
            return to_rgba(rgb, lo.alpha + (hi.alpha - lo.alpha) * f);
        }
    }
    to_rgba(last.rgb, last.alpha)
}

fn to_rgba(rgb: [u8; 3], alpha: f32) -> Rgba {
    Rgba::new(rgb[0], rgb[1], rgb[2], (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Annulus radii mapped into canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub center: f32,
    pub inner_px: f32,
    pub outer_px: f32,
}

impl RingLayout {
    pub fn new(inner: f32, outer: f32) -> Self {
        let center = RING_CANVAS_SIZE as f32 / 2.0;
        let max_radius = center - RING_CANVAS_MARGIN;
        if !(outer.is_finite() && outer > 0.0) {
            return Self { center, inner_px: 0.0, outer_px: 0.0 };
        }
        let scale = max_radius / outer;
        let inner = if inner.is_finite() { inner.clamp(0.0, outer) } else { 0.0 };
        Self {
            center,
            inner_px: inner * scale,
            outer_px: max_radius,
        }
    }

    /// Distance of a pixel center from the canvas center.
    pub fn distance(&self, x: u32, y: u32) -> f32 {
        let dx = x as f32 + 0.5 - self.center;
        let dy = y as f32 + 0.5 - self.center;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn contains(&self, d: f32) -> bool {
        self.outer_px > 0.0 && d >= self.inner_px && d <= self.outer_px
    }
}

/// Paint the ring for `ring_type` with the given radii.
///
/// Speckles are clipped to the annulus, so the transparent cutout and the
/// painted region are the same on every call; only speckle placement varies
/// with `rng`.
pub fn synthesize(ring_type: RingType, inner: f32, outer: f32, rng: &mut Rng) -> Bitmap {
    let style = style(ring_type);
    let layout = RingLayout::new(inner, outer);
    let mut bitmap = Bitmap::new(RING_CANVAS_SIZE, RING_CANVAS_SIZE);
    if layout.outer_px <= 0.0 {
        return bitmap;
    }

    let width = (layout.outer_px - layout.inner_px).max(f32::EPSILON);
    for y in 0..RING_CANVAS_SIZE {
        for x in 0..RING_CANVAS_SIZE {
            let d = layout.distance(x, y);
            if layout.contains(d) {
                let s = (d - layout.inner_px) / width;
                bitmap.set(x, y, sample_gradient(style.stops, s));
            }
        }
    }

    let sp = style.speckles;
    let color = Rgba::new(sp.rgb[0], sp.rgb[1], sp.rgb[2], 255);
    for _ in 0..sp.count {
        let angle = rng.next_f32() * std::f32::consts::TAU;
        let radius = layout.inner_px + rng.next_f32() * (layout.outer_px - layout.inner_px);
        let cx = layout.center + angle.cos() * radius;
        let cy = layout.center + angle.sin() * radius;
        let r = rng.range(sp.radius.0, sp.radius.1);
        let opacity = rng.range(sp.opacity.0, sp.opacity.1);
        paint_speckle(&mut bitmap, &layout, cx, cy, r, color, opacity);
    }

    bitmap
}

fn paint_speckle(bitmap: &mut Bitmap, layout: &RingLayout, cx: f32, cy: f32, r: f32, color: Rgba, opacity: f32) {
    let size = RING_CANVAS_SIZE as f32;
    let x0 = (cx - r).floor().clamp(0.0, size - 1.0) as u32;
    let x1 = (cx + r).ceil().clamp(0.0, size - 1.0) as u32;
    let y0 = (cy - r).floor().clamp(0.0, size - 1.0) as u32;
    let y1 = (cy + r).ceil().clamp(0.0, size - 1.0) as u32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy > r * r {
                continue;
            }
            if layout.contains(layout.distance(x, y)) {
                bitmap.blend(x, y, color, opacity);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RingKey {
    ring_type: RingType,
    inner: u32,
    outer: u32,
}

/// Memoizes synthesized rings by (type, inner radius, outer radius).
///
/// Bitmaps live in the `TextureRegistry`; this only maps keys to their ids.
#[derive(Debug, Default)]
pub struct RingTextureCache {
    entries: HashMap<RingKey, TextureId>,
}

impl RingTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached ring or synthesize and register it.
    pub fn get_or_synthesize(
        &mut self,
        ring_type: RingType,
        inner: f32,
        outer: f32,
        textures: &mut TextureRegistry,
        rng: &mut Rng,
    ) -> TextureId {
        let key = RingKey {
            ring_type,
            inner: inner.to_bits(),
            outer: outer.to_bits(),
        };
        if let Some(id) = self.entries.get(&key) {
            return *id;
        }
        let bitmap = synthesize(ring_type, inner, outer, rng);
        let name = format!("ring:{ring_type:?}:{inner}:{outer}").to_lowercase();
        let id = textures.insert_generated(&name, bitmap);
        log::debug!("synthesized ring texture {name}");
        self.entries.insert(key, id);
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
