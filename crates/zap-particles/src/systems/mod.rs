pub mod debug;
pub mod generator;
pub mod render;
pub mod rng;
