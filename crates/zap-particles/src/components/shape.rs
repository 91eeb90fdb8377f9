//! Draw primitives for particles.
//!
//! Every particle shares the same kinematics; only the draw step differs,
//! so shapes are a closed set of variants rather than a type hierarchy.

use glam::Vec2;

use super::color::Color;
use super::rect::Rect;
use crate::renderer::surface::DrawSurface;

/// Fill paint for a particle: color plus optional blur radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub color: Color,
    /// Blur radius in surface units (0 = sharp).
    pub blur: f32,
}

impl PaintStyle {
    pub fn new(color: Color, blur: f32) -> Self {
        Self { color, blur: blur.max(0.0) }
    }

    /// Sharp fill with no blur.
    pub fn solid(color: Color) -> Self {
        Self::new(color, 0.0)
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_blur(&mut self, blur: f32) {
        self.blur = blur.max(0.0);
    }
}

/// Decorative multi-color logo variants.
/// These ignore the palette color and draw with their own fixed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoKind {
    /// Four colored squares on a light plate.
    Tiles,
    /// Concentric rings.
    Rings,
    /// Three horizontal bars.
    Stripes,
}

impl LogoKind {
    pub const ALL: [LogoKind; 3] = [Self::Tiles, Self::Rings, Self::Stripes];

    const PLATE: Color = Color::rgb8(0xf3, 0xf3, 0xf3);
    const TILE_COLORS: [Color; 4] = [
        Color::rgb8(0xf3, 0x53, 0x25),
        Color::rgb8(0x81, 0xbc, 0x06),
        Color::rgb8(0x05, 0xa6, 0xf0),
        Color::rgb8(0xff, 0xba, 0x08),
    ];
    const RING_COLORS: [Color; 3] = [
        Color::rgb8(0xe5, 0x39, 0x35),
        Color::WHITE,
        Color::rgb8(0xe5, 0x39, 0x35),
    ];
    const STRIPE_COLORS: [Color; 3] = [
        Color::rgb8(0x00, 0x55, 0xa4),
        Color::WHITE,
        Color::rgb8(0xef, 0x41, 0x35),
    ];

    fn draw(self, center: Vec2, size: Vec2, surface: &mut dyn DrawSurface) {
        match self {
            LogoKind::Tiles => {
                // 23-unit grid: 1-unit gutters around two 10-unit tiles per row.
                let unit = size / 23.0;
                let origin = center - size * 0.5;
                surface.fill_rect(Rect::from_center_size(center, size), &PaintStyle::solid(Self::PLATE));
                for (i, color) in Self::TILE_COLORS.iter().enumerate() {
                    let col = (i % 2) as f32;
                    let row = (i / 2) as f32;
                    let min = origin + unit * Vec2::new(1.0 + 11.0 * col, 1.0 + 11.0 * row);
                    let rect = Rect::new(min, min + unit * 10.0);
                    surface.fill_rect(rect, &PaintStyle::solid(*color));
                }
            }
            LogoKind::Rings => {
                let outer = size * 0.5;
                for (i, color) in Self::RING_COLORS.iter().enumerate() {
                    let radii = outer * (1.0 - i as f32 / 3.0);
                    surface.fill_ellipse(center, radii, &PaintStyle::solid(*color));
                }
            }
            LogoKind::Stripes => {
                let band = Vec2::new(size.x, size.y / 3.0);
                let top = center.y - size.y * 0.5;
                for (i, color) in Self::STRIPE_COLORS.iter().enumerate() {
                    let c = Vec2::new(center.x, top + band.y * (i as f32 + 0.5));
                    surface.fill_rect(Rect::from_center_size(c, band), &PaintStyle::solid(*color));
                }
            }
        }
    }
}

/// Shape-specific draw step of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleShape {
    Rect,
    Ellipse,
    Logo(LogoKind),
}

impl ParticleShape {
    /// Draw the shape centered at `position` in the surface's current transform.
    pub fn draw(&self, position: Vec2, size: Vec2, style: &PaintStyle, surface: &mut dyn DrawSurface) {
        match self {
            ParticleShape::Rect => surface.fill_rect(Rect::from_center_size(position, size), style),
            ParticleShape::Ellipse => surface.fill_ellipse(position, size * 0.5, style),
            ParticleShape::Logo(kind) => kind.draw(position, size, surface),
        }
    }
}
