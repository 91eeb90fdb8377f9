//! Drawing-surface contract supplied by the host at paint time.
//!
//! Mirrors the small subset of a 2D canvas API the particle renderer needs:
//! a save/restore transform stack plus filled rectangles, ellipses and text.

use std::ops::{Deref, DerefMut};

use glam::{Affine2, Vec2};

use crate::components::color::Color;
use crate::components::rect::Rect;
use crate::components::shape::PaintStyle;

/// A 2D drawing surface with a transform stack.
pub trait DrawSurface {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Push the current transform state.
    fn save(&mut self);

    /// Pop the transform state pushed by the matching `save`.
    fn restore(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine2);

    /// Current transform.
    fn transform(&self) -> Affine2;

    /// Fill an axis-aligned rectangle (in the current transform's space).
    fn fill_rect(&mut self, rect: Rect, style: &PaintStyle);

    /// Fill an ellipse given its center and radii.
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, style: &PaintStyle);

    /// Draw a line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color);
}

/// Scoped transform state: `save` on creation, `restore` on drop.
///
/// Derefs to the wrapped surface so drawing goes through the guard.
pub struct SavedState<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
