pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{DragMoveType, ParticleViewConfig};
pub use api::error::{ParticleError, Result};
pub use api::host::{Host, ManualHost, TickCallback};
pub use components::color::{Color, DEFAULT_PALETTE};
pub use components::direction::DirectionRange;
pub use components::particle::Particle;
pub use components::rect::Rect;
pub use components::shape::{LogoKind, PaintStyle, ParticleShape};
pub use core::simulation::{ParticleView, RunState};
pub use core::spawn_rate::RateBasedSpawner;
pub use core::time::Stopwatch;
pub use input::touch::{TouchAction, TouchEvent};
pub use renderer::recording::{DrawCommand, RecordingSurface};
pub use renderer::surface::{DrawSurface, SavedState};
pub use systems::debug::FrameStats;
pub use systems::generator::{ParticleGenerator, SamplingProfile, ShapeSelection};
pub use systems::render::{draw_debug_overlay, paint_particles};

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};
