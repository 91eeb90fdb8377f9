//! Lyon-backed drawing surface.
//!
//! Tessellates every filled primitive on the CPU into a flat triangle list,
//! with the surface transform already applied, ready to upload to a GPU
//! vertex buffer. Text and blur have no vertex representation and are
//! skipped.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, VertexBuffers,
};

use super::surface::DrawSurface;
use crate::components::color::Color;
use crate::components::rect::Rect;
use crate::components::shape::PaintStyle;

/// Per-vertex data for the particle triangle list.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Places tessellated points through the current transform.
struct FillVertexCtor {
    transform: Affine2,
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        let at = self.transform.transform_point2(Vec2::new(p.x, p.y));
        VectorVertex {
            x: at.x,
            y: at.y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// A [`DrawSurface`] that records triangles instead of pixels.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    current: Affine2,
    stack: Vec<Affine2>,
    tolerance: f32,
}

impl VectorSurface {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(4096),
            current: Affine2::IDENTITY,
            stack: Vec::new(),
            tolerance: 0.5,
        }
    }

    /// Flattening tolerance for curved shapes, in surface units.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The triangle list as raw floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Expand indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let ctor = FillVertexCtor { transform: self.current, color };
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(self.tolerance),
            &mut BuffersBuilder::new(&mut self.geometry, ctor),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for VectorSurface {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
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
        let size = rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(rect.min.x, rect.min.y));
        builder.line_to(point(rect.max.x, rect.min.y));
        builder.line_to(point(rect.max.x, rect.max.y));
        builder.line_to(point(rect.min.x, rect.max.y));
        builder.close();
        let path = builder.build();

        self.fill_path(&path, style.color);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, style: &PaintStyle) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_ellipse(
            point(center.x, center.y),
            lyon::math::vector(radii.x, radii.y),
            lyon::math::Angle::radians(0.0),
            lyon::path::Winding::Positive,
        );
        let path = builder.build();

        self.fill_path(&path, style.color);
    }

    fn draw_text(&mut self, _text: &str, _origin: Vec2, _size: f32, _color: Color) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    fn red() -> PaintStyle {
        PaintStyle::solid(Color::RED)
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut s = VectorSurface::new();
        s.fill_rect(Rect::new(Vec2::ZERO, Vec2::new(10.0, 5.0)), &red());
        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.as_floats().len(), 36);
        assert!(s.vertices().iter().all(|v| v.r == 1.0 && v.g == 0.0 && v.a == 1.0));
    }

    #[test]
    fn transform_is_baked_into_vertices() {
        let mut s = VectorSurface::new();
        s.set_transform(Affine2::from_translation(Vec2::new(100.0, 50.0)));
        s.fill_rect(Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0)), &red());
        for v in s.vertices() {
            assert!((100.0..=110.0).contains(&v.x));
            assert!((50.0..=60.0).contains(&v.y));
        }
    }

    #[test]
    fn ellipse_stays_within_radii() {
        let mut s = VectorSurface::new();
        s.fill_ellipse(Vec2::new(20.0, 20.0), Vec2::new(8.0, 4.0), &red());
        assert!(s.vertex_count() >= 3);
        assert_eq!(s.vertex_count() % 3, 0);
        for v in s.vertices() {
            assert!((v.x - 20.0).abs() <= 8.01);
            assert!((v.y - 20.0).abs() <= 4.01);
        }
    }

    #[test]
    fn degenerate_shapes_and_text_produce_nothing() {
        let mut s = VectorSurface::new();
        s.fill_ellipse(Vec2::ZERO, Vec2::new(0.0, 3.0), &red());
        s.fill_rect(Rect::new(Vec2::ONE, Vec2::ONE), &red());
        s.draw_text("fps", Vec2::ZERO, 12.0, Color::WHITE);
        assert_eq!(s.vertex_count(), 0);
    }

    #[test]
    fn save_restore_and_clear() {
        let mut s = VectorSurface::new();
        s.save();
        s.set_transform(Affine2::from_scale(Vec2::splat(2.0)));
        s.fill_rect(Rect::new(Vec2::ZERO, Vec2::ONE), &red());
        s.restore();
        assert_eq!(s.transform(), Affine2::IDENTITY);
        assert!(s.vertex_count() > 0);

        s.clear();
        assert_eq!(s.vertex_count(), 0);
    }
}
