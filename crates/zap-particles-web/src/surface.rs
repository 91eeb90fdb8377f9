//! `DrawSurface` over a 2D canvas context.

use std::f64::consts::TAU;

use glam::{Affine2, Vec2};
use wasm_bindgen::JsCast;
use web_sys::CanvasRenderingContext2d;
use zap_particles::{Color, DrawSurface, PaintStyle, ParticleError, Rect};

use crate::host::canvas_by_id;

/// Canvas `setTransform` arguments `(a, b, c, d, e, f)` for an affine map.
fn canvas_matrix(t: Affine2) -> [f64; 6] {
    let m = t.matrix2;
    [
        m.x_axis.x as f64,
        m.x_axis.y as f64,
        m.y_axis.x as f64,
        m.y_axis.y as f64,
        t.translation.x as f64,
        t.translation.y as f64,
    ]
}

/// CSS filter value for a blur radius.
fn blur_filter(blur: f32) -> String {
    if blur > 0.0 {
        format!("blur({}px)", blur)
    } else {
        "none".to_string()
    }
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
    current: Affine2,
    stack: Vec<Affine2>,
}

impl CanvasSurface {
    pub fn from_canvas_id(id: &str) -> Result<Self, ParticleError> {
        let canvas = canvas_by_id(id)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ParticleError::Host(format!("getContext failed: {:?}", e)))?
            .ok_or_else(|| ParticleError::Host("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ParticleError::Host("unexpected context type".into()))?;
        Ok(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
            current: Affine2::IDENTITY,
            stack: Vec::new(),
        })
    }

    fn apply_style(&self, style: &PaintStyle) {
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.set_filter(&blur_filter(style.blur));
    }

    fn apply_transform(&self) {
        let [a, b, c, d, e, f] = canvas_matrix(self.current);
        if let Err(err) = self.ctx.set_transform(a, b, c, d, e, f) {
            log::warn!("setTransform failed: {:?}", err);
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.save();
        if let Err(err) = self.ctx.reset_transform() {
            log::warn!("resetTransform failed: {:?}", err);
        }
        self.ctx.clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
        self.ctx.restore();
    }

    fn save(&mut self) {
        self.stack.push(self.current);
        self.ctx.save();
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
            self.ctx.restore();
        }
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.current = transform;
        self.apply_transform();
    }

    fn transform(&self) -> Affine2 {
        self.current
    }

    fn fill_rect(&mut self, rect: Rect, style: &PaintStyle) {
        self.apply_style(style);
        let size = rect.size();
        self.ctx
            .fill_rect(rect.min.x as f64, rect.min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, style: &PaintStyle) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.apply_style(style);
        self.ctx.begin_path();
        let traced = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            TAU,
        );
        match traced {
            Ok(()) => self.ctx.fill(),
            Err(err) => log::warn!("ellipse failed: {:?}", err),
        }
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color) {
        self.ctx.set_filter("none");
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{}px sans-serif", size));
        if let Err(err) = self.ctx.fill_text(text, origin.x as f64, origin.y as f64) {
            log::warn!("fillText failed: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_order_matches_canvas() {
        let t = Affine2::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(canvas_matrix(t), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn blur_maps_to_css_filter() {
        assert_eq!(blur_filter(0.0), "none");
        assert_eq!(blur_filter(2.5), "blur(2.5px)");
    }
}
