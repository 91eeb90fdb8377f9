//! Contract between the particle view and the UI host embedding it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::Vec2;

/// Recurring timer callback. Returning `false` cancels the timer.
pub type TickCallback = Box<dyn FnMut() -> bool + Send + 'static>;

/// Services the embedding UI framework provides.
///
/// Callbacks may be invoked from any thread; implementations must not call
/// back into the view while holding their own locks.
pub trait Host: Send + Sync + 'static {
    /// Invoke `callback` every `interval_ms` until it returns `false`.
    fn schedule_recurring(&self, interval_ms: u32, callback: TickCallback);

    /// Ask for a repaint. Asynchronous; the host eventually calls `paint`.
    fn invalidate_surface(&self);

    /// Drawing surface size in device pixels.
    fn canvas_size(&self) -> Vec2;

    /// Component size in layout units.
    fn logical_size(&self) -> Vec2;

    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;
}

struct Scheduled {
    interval_ms: u32,
    callback: TickCallback,
}

struct ManualState {
    now_ms: f64,
    canvas_size: Vec2,
    logical_size: Vec2,
    timers: Vec<Scheduled>,
    invalidations: u64,
}

/// Host driven by hand: time only moves when told to and timers fire on
/// `fire`/`step`. Used for tests and headless embedding.
pub struct ManualHost {
    state: Mutex<ManualState>,
}

impl ManualHost {
    pub fn new(canvas_size: Vec2, logical_size: Vec2) -> Self {
        Self {
            state: Mutex::new(ManualState {
                now_ms: 0.0,
                canvas_size,
                logical_size,
                timers: Vec::new(),
                invalidations: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn advance(&self, ms: f64) {
        self.lock().now_ms += ms;
    }

    pub fn set_canvas_size(&self, size: Vec2) {
        self.lock().canvas_size = size;
    }

    pub fn set_logical_size(&self, size: Vec2) {
        self.lock().logical_size = size;
    }

    /// Number of live recurring timers.
    pub fn timer_count(&self) -> usize {
        self.lock().timers.len()
    }

    /// Interval of the first live timer.
    pub fn timer_interval(&self) -> Option<u32> {
        self.lock().timers.first().map(|t| t.interval_ms)
    }

    pub fn invalidations(&self) -> u64 {
        self.lock().invalidations
    }

    /// Run every live timer once, dropping those that return `false`.
    /// Timers run without the host lock held so they may call back in.
    pub fn fire(&self) {
        let mut due = std::mem::take(&mut self.lock().timers);
        due.retain_mut(|t| (t.callback)());
        let mut state = self.lock();
        // Timers scheduled while firing were pushed into the fresh list.
        due.append(&mut state.timers);
        state.timers = due;
    }

    /// Advance by the first timer's interval (16ms if none) and fire.
    pub fn step(&self) {
        let interval = self.timer_interval().unwrap_or(16);
        self.advance(f64::from(interval));
        self.fire();
    }

    /// Step `n` times.
    pub fn run_ticks(&self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }
}

impl Host for ManualHost {
    fn schedule_recurring(&self, interval_ms: u32, callback: TickCallback) {
        self.lock().timers.push(Scheduled { interval_ms, callback });
    }

    fn invalidate_surface(&self) {
        self.lock().invalidations += 1;
    }

    fn canvas_size(&self) -> Vec2 {
        self.lock().canvas_size
    }

    fn logical_size(&self) -> Vec2 {
        self.lock().logical_size
    }

    fn now_ms(&self) -> f64 {
        self.lock().now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn timer_runs_until_it_returns_false() {
        let host = ManualHost::new(Vec2::splat(100.0), Vec2::splat(100.0));
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        host.schedule_recurring(16, Box::new(move || c.fetch_add(1, Ordering::SeqCst) < 2));

        host.run_ticks(5);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(host.timer_count(), 0);
        assert_eq!(host.now_ms(), 80.0);
    }

    #[test]
    fn step_uses_timer_interval() {
        let host = ManualHost::new(Vec2::ONE, Vec2::ONE);
        host.schedule_recurring(33, Box::new(|| true));
        host.step();
        assert_eq!(host.now_ms(), 33.0);
    }
}
