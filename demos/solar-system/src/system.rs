//! Solar System: nine bodies on inclined orbits around a glowing sun,
//! procedural rings on the three outer giants.

use orrery_engine::{BodyTable, Orrery, OrreryResult, ViewerConfig};

use crate::bodies;

/// Days per second at startup: one Earth year in about 36 seconds.
const INITIAL_SPEED: f64 = 10.0;

pub struct SolarSystem;

impl SolarSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Orrery for SolarSystem {
    fn config(&self) -> ViewerConfig {
        let mut config = ViewerConfig::default();
        config.sim.initial_speed = INITIAL_SPEED;
        config
    }

    fn bodies(&self) -> OrreryResult<BodyTable> {
        bodies::body_table()
    }
}
