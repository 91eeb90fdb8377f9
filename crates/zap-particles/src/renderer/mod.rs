pub mod recording;
pub mod surface;
#[cfg(feature = "vectors")]
pub mod vector;

pub use surface::{DrawSurface, SavedState};
