use glam::Vec3;

use crate::core::rng::Rng;

/// Point cloud of background stars.
#[derive(Debug, Clone)]
pub struct Starfield {
    positions: Vec<Vec3>,
    pub color: [f32; 3],
    pub size: f32,
    pub opacity: f32,
}

impl Starfield {
    /// Scatter `count` stars uniformly inside a cube of side `spread` centered at the origin.
    pub fn generate(count: usize, spread: f32, rng: &mut Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let x = (rng.next_f32() - 0.5) * spread;
            let y = (rng.next_f32() - 0.5) * spread;
            let z = (rng.next_f32() - 0.5) * spread;
            positions.push(Vec3::new(x, y, z));
        }
        Self {
            positions,
            color: [1.0, 1.0, 1.0],
            size: 1.0,
            opacity: 0.8,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_stay_inside_cube() {
        let mut rng = Rng::new(3);
        let stars = Starfield::generate(2000, 200.0, &mut rng);
        assert_eq!(stars.len(), 2000);
        for p in stars.positions() {
            assert!(p.abs().max_element() <= 100.0, "star outside cube: {p:?}");
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = Starfield::generate(50, 10.0, &mut Rng::new(11));
        let b = Starfield::generate(50, 10.0, &mut Rng::new(11));
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn zero_stars_is_empty() {
        let stars = Starfield::generate(0, 10.0, &mut Rng::new(1));
        assert!(stars.is_empty());
        assert!(stars.as_floats().is_empty());
    }
}
