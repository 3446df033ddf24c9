use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
mod system;
use system::SolarSystem;

orrery_web::export_viewer!(SolarSystem, "solar-system");
