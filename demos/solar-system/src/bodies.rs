//! Body table for the viewer: compressed distances and exaggerated radii so
//! every planet, Pluto included, stays readable in one view.

use orrery_engine::{BodyParams, BodyTable, OrreryResult, RingDescriptor, RingType};

/// Body index constants (table order).
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLUTO: usize = 8;
pub const BODY_COUNT: usize = 9;

/// (name, a, b, period days, inclination deg, radius)
const ORBITS: [(&str, f32, f32, f64, f32, f32); BODY_COUNT] = [
    ("Mercury", 8.0, 7.8, 88.0, 7.0, 0.7),
    ("Venus", 12.0, 11.9, 225.0, 3.4, 1.0),
    ("Earth", 16.0, 15.98, 365.0, 0.0, 1.2),
    ("Mars", 20.0, 19.8, 687.0, 1.85, 1.0),
    ("Jupiter", 28.0, 27.9, 4333.0, 1.3, 2.0),
    ("Saturn", 38.0, 37.8, 10759.0, 2.5, 1.8),
    ("Uranus", 48.0, 47.8, 30687.0, 0.8, 1.4),
    ("Neptune", 58.0, 57.8, 60190.0, 1.8, 1.3),
    ("Pluto", 68.0, 67.5, 90520.0, 17.2, 0.5),
];

fn ring_for(index: usize) -> Option<RingType> {
    match index {
        SATURN => Some(RingType::Saturn),
        URANUS => Some(RingType::Uranus),
        NEPTUNE => Some(RingType::Neptune),
        _ => None,
    }
}

pub fn body_params() -> Vec<BodyParams> {
    ORBITS
        .iter()
        .enumerate()
        .map(|(i, &(name, a, b, period, inclination, radius))| {
            let params = BodyParams::new(name, a, b, period)
                .with_inclination(inclination)
                .with_radius(radius)
                .with_texture(format!("textures/{}.jpg", name.to_lowercase()));
            match ring_for(i) {
                Some(ring) => params.with_ring(RingDescriptor::for_type(ring)),
                None => params,
            }
        })
        .collect()
}

pub fn body_table() -> OrreryResult<BodyTable> {
    BodyTable::new(body_params())
}
