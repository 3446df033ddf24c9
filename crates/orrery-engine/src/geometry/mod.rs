pub mod orbit_path;
pub mod starfield;
