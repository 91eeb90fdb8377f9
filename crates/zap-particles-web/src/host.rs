//! Browser implementation of the particle view's host contract.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use zap_particles::{Host, ParticleError, TickCallback};

thread_local! {
    /// Live `setInterval` closures, keyed by interval id.
    static TIMERS: RefCell<HashMap<i32, Closure<dyn FnMut()>>> = RefCell::new(HashMap::new());
    /// Cleared intervals whose closures can be dropped once they stop running.
    static FINISHED: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
    static FRAME_PENDING: Cell<bool> = const { Cell::new(false) };
    /// Set once a missing canvas has been reported.
    static CANVAS_MISSING: Cell<bool> = const { Cell::new(false) };
}

pub(crate) fn window() -> Result<web_sys::Window, ParticleError> {
    web_sys::window().ok_or_else(|| ParticleError::Host("no global window".into()))
}

pub(crate) fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, ParticleError> {
    window()?
        .document()
        .ok_or_else(|| ParticleError::Host("no document".into()))?
        .get_element_by_id(id)
        .ok_or_else(|| ParticleError::Host(format!("no element with id {:?}", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ParticleError::Host(format!("element {:?} is not a canvas", id)))
}

/// Report a missing canvas loudly once, then quietly on every later frame.
fn missing_canvas_level(already_reported: bool) -> log::Level {
    if already_reported {
        log::Level::Debug
    } else {
        log::Level::Error
    }
}

/// Drop closures of intervals that have been cleared.
fn reclaim_finished() {
    let finished: Vec<i32> = FINISHED.with(|f| f.borrow_mut().drain(..).collect());
    if finished.is_empty() {
        return;
    }
    TIMERS.with(|timers| {
        let mut timers = timers.borrow_mut();
        for id in finished {
            timers.remove(&id);
        }
    });
}

/// Clear every interval and drop its closure.
pub(crate) fn clear_all_timers() {
    let timers = TIMERS.with(|t| std::mem::take(&mut *t.borrow_mut()));
    if let Ok(window) = window() {
        for id in timers.keys() {
            window.clear_interval_with_handle(*id);
        }
    }
    FINISHED.with(|f| f.borrow_mut().clear());
}

/// Host backed by a canvas element looked up by id on every call.
///
/// Holds no JS handles, so it is `Send + Sync` as the core requires.
pub struct WebHost {
    canvas_id: String,
}

impl WebHost {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self { canvas_id: canvas_id.into() }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn canvas(&self) -> Option<HtmlCanvasElement> {
        match canvas_by_id(&self.canvas_id) {
            Ok(canvas) => {
                CANVAS_MISSING.with(|m| m.set(false));
                Some(canvas)
            }
            Err(e) => {
                let level = missing_canvas_level(CANVAS_MISSING.with(|m| m.replace(true)));
                log::log!(level, "{}", e);
                None
            }
        }
    }

    fn start_interval(&self, interval_ms: u32, mut callback: TickCallback) -> Result<(), ParticleError> {
        let window = window()?;
        let id_cell: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let own_id = id_cell.clone();

        let closure = Closure::<dyn FnMut()>::new(move || {
            if callback() {
                return;
            }
            if let Some(id) = own_id.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                }
                FINISHED.with(|f| f.borrow_mut().push(id));
            }
        });

        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
                interval_ms as i32,
            )
            .map_err(|e| ParticleError::Host(format!("setInterval failed: {:?}", e)))?;
        id_cell.set(Some(id));
        TIMERS.with(|t| t.borrow_mut().insert(id, closure));
        Ok(())
    }
}

impl Host for WebHost {
    fn schedule_recurring(&self, interval_ms: u32, callback: TickCallback) {
        reclaim_finished();
        if let Err(e) = self.start_interval(interval_ms, callback) {
            log::error!("{}", e);
        }
    }

    fn invalidate_surface(&self) {
        if FRAME_PENDING.with(|p| p.replace(true)) {
            return;
        }
        let request = window().and_then(|w| {
            let paint = Closure::once_into_js(|| {
                FRAME_PENDING.with(|p| p.set(false));
                crate::paint_now();
            });
            w.request_animation_frame(paint.unchecked_ref())
                .map_err(|e| ParticleError::Host(format!("requestAnimationFrame failed: {:?}", e)))
        });
        if let Err(e) = request {
            FRAME_PENDING.with(|p| p.set(false));
            log::error!("{}", e);
        }
    }

    fn canvas_size(&self) -> Vec2 {
        self.canvas()
            .map(|c| Vec2::new(c.width() as f32, c.height() as f32))
            .unwrap_or(Vec2::ZERO)
    }

    fn logical_size(&self) -> Vec2 {
        self.canvas()
            .map(|c| Vec2::new(c.client_width() as f32, c.client_height() as f32))
            .unwrap_or(Vec2::ZERO)
    }

    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}
