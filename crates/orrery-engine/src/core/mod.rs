pub mod assembler;
pub mod body;
pub mod motion;
pub mod rng;
pub mod scene;
pub mod table;
pub mod time;
