use glam::{Affine2, Vec2};

use super::surface::DrawSurface;
use crate::components::color::Color;
use crate::components::rect::Rect;
use crate::components::shape::PaintStyle;

/// One recorded draw call, with the transform that was active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        style: PaintStyle,
        transform: Affine2,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        style: PaintStyle,
        transform: Affine2,
    },
    Text {
        text: String,
        origin: Vec2,
        size: f32,
        color: Color,
    },
}

/// Headless surface that records draw calls instead of rasterizing them.
/// Used by tests and by hosts that replay commands on their own backend.
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    current: Affine2,
    stack: Vec<Affine2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(512),
            current: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of filled shapes (rects + ellipses) recorded.
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. } | DrawCommand::FillEllipse { .. }))
            .count()
    }

    /// All recorded text lines, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.current = Affine2::IDENTITY;
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        // Unbalanced restore is a no-op, as on a canvas.
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.current = transform;
    }

    fn transform(&self) -> Affine2 {
        self.current
    }

    fn fill_rect(&mut self, rect: Rect, style: &PaintStyle) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            style: *style,
            transform: self.current,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, style: &PaintStyle) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            style: *style,
            transform: self.current,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size,
            color,
        });
    }
}
