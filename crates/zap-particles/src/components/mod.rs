pub mod color;
pub mod direction;
pub mod particle;
pub mod rect;
pub mod shape;
