pub mod simulation;
pub mod spawn_rate;
pub mod time;
pub mod transform;
