//! WASM exports that host a confetti [`ParticleView`] on a `<canvas>`.
//!
//! ```ignore
//! import init, * as particles from "./zap_particles_web.js";
//! await init();
//! particles.particles_init("confetti", JSON.stringify({ addParticlesOnTap: true }));
//! canvas.addEventListener("pointerup", e => particles.particles_touch(3, e.offsetX, e.offsetY));
//! ```

pub mod host;
pub mod surface;

use std::cell::RefCell;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use zap_particles::{Color, DragMoveType, Host, ParticleView, ParticleViewConfig, TouchEvent};

pub use host::WebHost;
pub use surface::CanvasSurface;

thread_local! {
    static VIEW: RefCell<Option<ParticleView<WebHost>>> = const { RefCell::new(None) };
}

/// Run `f` against the view, or log and return `R::default()` before init.
fn with_view<R: Default>(f: impl FnOnce(&ParticleView<WebHost>) -> R) -> R {
    VIEW.with(|cell| match cell.borrow().as_ref() {
        Some(view) => f(view),
        None => {
            log::warn!("particle view not initialized. Call particles_init() first.");
            R::default()
        }
    })
}

/// Map a point from layout (CSS) pixels into canvas pixels.
/// An empty layout size leaves the point unscaled.
fn to_canvas_space(point: Vec2, canvas: Vec2, logical: Vec2) -> Vec2 {
    if logical.x <= 0.0 || logical.y <= 0.0 {
        point
    } else {
        point * canvas / logical
    }
}

fn to_js(e: zap_particles::ParticleError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Paint the current frame onto the view's canvas.
pub(crate) fn paint_now() {
    with_view(|view| match CanvasSurface::from_canvas_id(view.host().canvas_id()) {
        Ok(mut surface) => view.paint(&mut surface),
        Err(e) => log::error!("{}", e),
    });
}

/// Create the view for `canvas_id`, configured from camelCase JSON
/// (an empty string uses the defaults). Replaces any previous view.
#[wasm_bindgen]
pub fn particles_init(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        ParticleViewConfig::default()
    } else {
        ParticleViewConfig::from_json(config_json).map_err(to_js)?
    };
    host::canvas_by_id(canvas_id).map_err(to_js)?;

    particles_destroy();
    let view = ParticleView::new(WebHost::new(canvas_id), config);
    VIEW.with(|cell| *cell.borrow_mut() = Some(view));
    log::info!("particles: initialized on #{}", canvas_id);
    Ok(())
}

/// Drop the view and cancel its timers.
#[wasm_bindgen]
pub fn particles_destroy() {
    let old = VIEW.with(|cell| cell.borrow_mut().take());
    if let Some(view) = old {
        view.deactivate();
    }
    host::clear_all_timers();
}

// ---- Options ----

#[wasm_bindgen]
pub fn particles_set_active(active: bool) {
    with_view(|v| v.set_active(active));
}

#[wasm_bindgen]
pub fn particles_set_running(running: bool) {
    with_view(|v| v.set_running(running));
}

#[wasm_bindgen]
pub fn particles_set_falling(enabled: bool, per_second: f32) {
    with_view(|v| {
        v.set_falling_particles_per_second(per_second);
        v.set_has_falling_particles(enabled);
    });
}

#[wasm_bindgen]
pub fn particles_set_tap(enabled: bool, count: u32) {
    with_view(|v| v.set_tap(enabled, count as usize));
}

/// `radiate` selects the radial generator for drags; otherwise particles fall.
#[wasm_bindgen]
pub fn particles_set_drag(enabled: bool, count: u32, radiate: bool) {
    let move_type = if radiate { DragMoveType::Radiate } else { DragMoveType::Fall };
    with_view(|v| v.set_drag(enabled, count as usize, move_type));
}

/// Palette as hex strings, e.g. `["#ff0000", "#ffd700"]`.
#[wasm_bindgen]
pub fn particles_set_colors(colors: Vec<String>) -> Result<(), JsValue> {
    let palette = colors
        .iter()
        .map(|c| Color::from_hex(c))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_js)?;
    with_view(|v| v.set_particle_colors(palette));
    Ok(())
}

#[wasm_bindgen]
pub fn particles_set_debug_info(show: bool, color: &str) -> Result<(), JsValue> {
    let color = Color::from_hex(color).map_err(to_js)?;
    with_view(|v| {
        v.set_debug_info_color(color);
        v.set_show_debug_info(show);
    });
    Ok(())
}

// ---- Input and drawing ----

/// Forward a touch event given in layout (CSS) pixels, e.g. `offsetX`/`offsetY`.
/// `action` uses the `TouchAction` codes (0 entered, 1 pressed, 2 moved,
/// 3 released, 4 cancelled, 5 exited, 6 wheel). Returns the number of
/// particles spawned.
#[wasm_bindgen]
pub fn particles_touch(action: u32, x: f32, y: f32) -> u32 {
    with_view(|v| {
        let host = v.host();
        let at = to_canvas_space(Vec2::new(x, y), host.canvas_size(), host.logical_size());
        match TouchEvent::from_raw(action, at.x, at.y) {
            Ok(event) => v.handle_touch(event) as u32,
            Err(e) => {
                log::error!("dropping touch event: {}", e);
                0
            }
        }
    })
}

/// Paint immediately instead of waiting for the next animation frame.
#[wasm_bindgen]
pub fn particles_paint() {
    paint_now();
}

#[wasm_bindgen]
pub fn particles_count() -> u32 {
    with_view(|v| v.particle_count()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_points_scale_to_device_pixels() {
        let canvas = Vec2::new(1_600.0, 1_200.0);
        let layout = Vec2::new(800.0, 600.0);
        assert_eq!(to_canvas_space(Vec2::new(400.0, 300.0), canvas, layout), Vec2::new(800.0, 600.0));
        assert_eq!(to_canvas_space(Vec2::new(10.0, 20.0), layout, layout), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn empty_layout_leaves_touch_point_alone() {
        let p = Vec2::new(12.0, 34.0);
        assert_eq!(to_canvas_space(p, Vec2::new(100.0, 100.0), Vec2::ZERO), p);
        assert_eq!(to_canvas_space(p, Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)), p);
    }
}
