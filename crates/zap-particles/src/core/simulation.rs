//! The particle view: frame loop, state machine and touch handling.
//!
//! Three contexts touch a view: the host's recurring timer (`tick`), the
//! host's paint callback (`paint`) and touch input (`handle_touch`). Tick and
//! touch share one state lock. Every mutation ends by publishing an immutable
//! snapshot of the live collection, which paint draws without taking the
//! state lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use super::spawn_rate::RateBasedSpawner;
use super::time::Stopwatch;
use crate::api::config::{DragMoveType, ParticleViewConfig};
use crate::api::host::Host;
use crate::components::color::Color;
use crate::components::particle::Particle;
use crate::components::rect::Rect;
use crate::input::touch::{TouchAction, TouchEvent};
use crate::renderer::surface::DrawSurface;
use crate::systems::debug::FrameStats;
use crate::systems::generator::ParticleGenerator;
use crate::systems::render::{draw_debug_overlay, paint_particles};

/// Lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No timer, no particles.
    Inactive,
    /// Timer scheduled; particles spawn and advance.
    Running,
    /// Timer stopped; particles and clock frozen.
    Paused,
}

/// Evenly spaced spawn points along the top edge, ending at the right edge.
fn falling_anchors(width: f32, count: usize) -> Vec<Vec2> {
    let step = width / count as f32;
    (1..=count).map(|i| Vec2::new(i as f32 * step, 0.0)).collect()
}

struct ViewState {
    run_state: RunState,
    config: ParticleViewConfig,
    particles: Vec<Particle>,
    stopwatch: Stopwatch,
    spawner: RateBasedSpawner,
    stats: FrameStats,
    falling: Arc<ParticleGenerator>,
    radial: Arc<ParticleGenerator>,
}

/// What paint draws.
struct Published {
    particles: Arc<Vec<Particle>>,
    stats: FrameStats,
    overlay: Option<Color>,
    last_paint_ms: Option<f64>,
    frame_interval_ms: f64,
}

struct Shared<H: Host> {
    host: H,
    state: Mutex<ViewState>,
    frame: Mutex<Published>,
    /// Bumped whenever the timer is started or stopped; a callback scheduled
    /// under an older generation cancels itself.
    generation: AtomicU64,
}

impl<H: Host> Shared<H> {
    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_frame(&self) -> MutexGuard<'_, Published> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Canvas pixels per layout unit.
    fn scale(&self) -> Vec2 {
        let canvas = self.host.canvas_size();
        let logical = self.host.logical_size();
        if logical.x <= 0.0 || logical.y <= 0.0 {
            log::warn!("logical size {:?} is empty, drawing at scale 1", logical);
            Vec2::ONE
        } else {
            canvas / logical
        }
    }

    fn publish(&self, state: &ViewState) {
        let snapshot = Arc::new(state.particles.clone());
        let mut frame = self.lock_frame();
        frame.particles = snapshot;
        frame.stats = state.stats;
        frame.overlay = state.config.show_debug_info.then_some(state.config.debug_info_color);
    }

    /// One frame: cull, spawn, update, publish. Returns `false` once the
    /// view is no longer running or `generation` is stale.
    fn tick(&self, generation: Option<u64>) -> bool {
        let started = self.host.now_ms();
        let canvas = self.host.canvas_size();
        let scale = self.scale();

        {
            let mut guard = self.lock_state();
            let state = &mut *guard;
            if state.run_state != RunState::Running {
                return false;
            }
            if generation.is_some_and(|g| g != self.generation.load(Ordering::SeqCst)) {
                return false;
            }

            let elapsed = state.stopwatch.elapsed_ms(started);

            let bounds = Rect::from_size(canvas);
            state.particles.retain(|p| p.bounds().intersects(&bounds));

            if state.config.has_falling_particles {
                let count = state
                    .spawner
                    .amount_to_request(state.config.falling_particles_per_second, state.config.tick_interval_ms);
                if count > 0 {
                    let anchors = falling_anchors(canvas.x, state.config.falling_anchor_count);
                    let batch = state.falling.generate(&anchors, count, Some(state.config.palette()));
                    state.particles.extend(batch);
                    state.stats.falling_spawned += count as u64;
                    log::debug!("spawned {} falling particles", count);
                }
            }

            for particle in &mut state.particles {
                particle.update(elapsed, scale);
            }

            state.stats.ticks += 1;
            state.stats.particle_count = state.particles.len();
            state.stats.update_ms = self.host.now_ms() - started;
            self.publish(state);
        }

        self.host.invalidate_surface();
        true
    }
}

/// A confetti view hosted by `H`.
///
/// Created from a [`ParticleViewConfig`]; the config's `active` and
/// `running` flags pick the initial state. Dropping the view cancels its
/// timer on the next callback.
pub struct ParticleView<H: Host> {
    shared: Arc<Shared<H>>,
}

impl<H: Host> ParticleView<H> {
    /// Panics if the config has a zero tick interval or no falling anchors.
    pub fn new(host: H, config: ParticleViewConfig) -> Self {
        assert!(config.tick_interval_ms > 0, "tick interval must be positive");
        assert!(config.falling_anchor_count > 0, "falling particles need at least one anchor");

        let falling = ParticleGenerator::falling().with_seed(config.seed);
        let radial = ParticleGenerator::radial().with_seed(config.seed.wrapping_add(1));
        let (active, running) = (config.active, config.running);

        let view = Self {
            shared: Arc::new(Shared {
                host,
                state: Mutex::new(ViewState {
                    run_state: RunState::Inactive,
                    config,
                    particles: Vec::new(),
                    stopwatch: Stopwatch::new(),
                    spawner: RateBasedSpawner::new(),
                    stats: FrameStats::default(),
                    falling: Arc::new(falling),
                    radial: Arc::new(radial),
                }),
                frame: Mutex::new(Published {
                    particles: Arc::new(Vec::new()),
                    stats: FrameStats::default(),
                    overlay: None,
                    last_paint_ms: None,
                    frame_interval_ms: 0.0,
                }),
                generation: AtomicU64::new(0),
            }),
        };

        if active {
            if running {
                view.activate();
            } else {
                view.enter_paused();
            }
        }
        view
    }

    fn start_timer(&self, generation: u64, interval_ms: u32) {
        let weak = Arc::downgrade(&self.shared);
        self.shared.host.schedule_recurring(
            interval_ms,
            Box::new(move || weak.upgrade().is_some_and(|shared| shared.tick(Some(generation)))),
        );
    }

    // -- State machine --

    /// Inactive -> Running: fresh clock and accumulator, timer started.
    /// Returns `false` if the view was already active.
    pub fn activate(&self) -> bool {
        let now = self.shared.host.now_ms();
        let (generation, interval) = {
            let mut state = self.shared.lock_state();
            if state.run_state != RunState::Inactive {
                return false;
            }
            state.run_state = RunState::Running;
            state.particles.clear();
            state.stopwatch.restart(now);
            state.spawner.reset();
            state.stats = FrameStats::default();
            self.shared.publish(&state);
            (self.shared.bump_generation(), state.config.tick_interval_ms)
        };
        log::info!("particle view activated ({}ms ticks)", interval);
        self.start_timer(generation, interval);
        true
    }

    /// Inactive -> Paused, for a view that is active but not yet running.
    fn enter_paused(&self) {
        let mut state = self.shared.lock_state();
        if state.run_state == RunState::Inactive {
            state.run_state = RunState::Paused;
            state.stopwatch.reset();
            state.spawner.reset();
            log::info!("particle view activated paused");
        }
    }

    /// Any active state -> Inactive: timer stopped, particles cleared,
    /// clock zeroed.
    pub fn deactivate(&self) -> bool {
        {
            let mut state = self.shared.lock_state();
            if state.run_state == RunState::Inactive {
                return false;
            }
            self.shared.bump_generation();
            state.run_state = RunState::Inactive;
            state.particles.clear();
            state.stopwatch.reset();
            state.spawner.reset();
            state.stats.particle_count = 0;
            self.shared.publish(&state);
        }
        log::info!("particle view deactivated");
        self.shared.host.invalidate_surface();
        true
    }

    /// Running -> Paused: timer stopped, particles and clock frozen.
    /// Clears the `running` option.
    pub fn pause(&self) -> bool {
        let now = self.shared.host.now_ms();
        let mut state = self.shared.lock_state();
        if state.run_state != RunState::Running {
            return false;
        }
        self.shared.bump_generation();
        state.run_state = RunState::Paused;
        state.config.running = false;
        state.stopwatch.stop(now);
        log::info!("particle view paused at {}ms", state.stopwatch.elapsed_ms(now));
        true
    }

    /// Paused -> Running: timer restarted, clock continues from the pause.
    /// Sets the `running` option.
    pub fn resume(&self) -> bool {
        let now = self.shared.host.now_ms();
        let (generation, interval) = {
            let mut state = self.shared.lock_state();
            if state.run_state != RunState::Paused {
                return false;
            }
            state.run_state = RunState::Running;
            state.config.running = true;
            state.stopwatch.start(now);
            (self.shared.bump_generation(), state.config.tick_interval_ms)
        };
        log::info!("particle view resumed");
        self.start_timer(generation, interval);
        true
    }

    // -- Option setters --

    /// Master switch. Turning on while `running` is off leaves the view paused.
    pub fn set_active(&self, active: bool) {
        let running = {
            let mut state = self.shared.lock_state();
            state.config.active = active;
            state.config.running
        };
        if !active {
            self.deactivate();
        } else if running {
            if !self.activate() {
                self.resume();
            }
        } else {
            self.enter_paused();
        }
    }

    /// Pause or resume without clearing particles. Ignored while inactive.
    pub fn set_running(&self, running: bool) {
        self.shared.lock_state().config.running = running;
        if running {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn set_has_falling_particles(&self, enabled: bool) {
        let mut state = self.shared.lock_state();
        state.config.has_falling_particles = enabled;
        if !enabled {
            state.spawner.reset();
        }
    }

    pub fn set_falling_particles_per_second(&self, rate: f32) {
        self.shared.lock_state().config.falling_particles_per_second = rate;
    }

    pub fn set_tap(&self, enabled: bool, count: usize) {
        let mut state = self.shared.lock_state();
        state.config.add_particles_on_tap = enabled;
        state.config.tap_particle_count = count;
    }

    pub fn set_drag(&self, enabled: bool, count: usize, move_type: DragMoveType) {
        let mut state = self.shared.lock_state();
        state.config.add_particles_on_drag = enabled;
        state.config.drag_particle_count = count;
        state.config.drag_move_type = move_type;
    }

    /// Palette for particles spawned from now on.
    pub fn set_particle_colors(&self, colors: Vec<Color>) {
        self.shared.lock_state().config.particle_colors = colors;
    }

    pub fn set_show_debug_info(&self, show: bool) {
        let mut state = self.shared.lock_state();
        state.config.show_debug_info = show;
        self.shared.publish(&state);
    }

    pub fn set_debug_info_color(&self, color: Color) {
        let mut state = self.shared.lock_state();
        state.config.debug_info_color = color;
        self.shared.publish(&state);
    }

    /// Replace the generator used for falling particles and fall-mode drags.
    pub fn set_falling_generator(&self, generator: ParticleGenerator) {
        self.shared.lock_state().falling = Arc::new(generator);
    }

    /// Replace the generator used for taps and radiate-mode drags.
    pub fn set_touch_generator(&self, generator: ParticleGenerator) {
        self.shared.lock_state().radial = Arc::new(generator);
    }

    // -- Frame loop --

    /// Run one tick now, outside the scheduled timer.
    /// Returns `false` if the view is not running.
    pub fn tick(&self) -> bool {
        self.shared.tick(None)
    }

    /// Spawn a burst for a tap (`Released`) or drag (`Moved`) event.
    /// Returns the number of particles added.
    pub fn handle_touch(&self, event: TouchEvent) -> usize {
        let (generator, count, palette) = {
            let state = self.shared.lock_state();
            if state.run_state == RunState::Inactive {
                return 0;
            }
            let config = &state.config;
            let (generator, count) = match event.action {
                TouchAction::Released if config.add_particles_on_tap => {
                    (state.radial.clone(), config.tap_particle_count)
                }
                TouchAction::Moved if config.add_particles_on_drag => {
                    let generator = match config.drag_move_type {
                        DragMoveType::Fall => state.falling.clone(),
                        DragMoveType::Radiate => state.radial.clone(),
                    };
                    (generator, config.drag_burst_size())
                }
                _ => return 0,
            };
            let palette = config.palette().to_vec();
            (generator, count, palette)
        };
        if count == 0 {
            return 0;
        }

        // Generators are lock-free; only the append holds the state lock.
        let batch = generator.generate(&[event.location], count, Some(&palette[..]));
        {
            let mut state = self.shared.lock_state();
            if state.run_state == RunState::Inactive {
                return 0;
            }
            state.particles.extend(batch);
            state.stats.burst_spawned += count as u64;
            state.stats.particle_count = state.particles.len();
            self.shared.publish(&state);
        }
        log::debug!("{:?} at {} spawned {} particles", event.action, event.location, count);
        self.shared.host.invalidate_surface();
        count
    }

    /// Draw the last published frame.
    pub fn paint(&self, surface: &mut dyn DrawSurface) {
        let now = self.shared.host.now_ms();
        let (particles, stats, overlay) = {
            let mut frame = self.shared.lock_frame();
            if let Some(last) = frame.last_paint_ms {
                frame.frame_interval_ms = now - last;
            }
            frame.last_paint_ms = Some(now);
            let mut stats = frame.stats;
            stats.frame_interval_ms = frame.frame_interval_ms;
            (frame.particles.clone(), stats, frame.overlay)
        };

        surface.clear();
        paint_particles(&particles, surface);
        if let Some(color) = overlay {
            let scale = self.shared.scale();
            draw_debug_overlay(&stats, self.shared.host.canvas_size(), scale.x, color, surface);
        }
    }

    // -- Accessors --

    /// Copy of the live collection.
    pub fn particles(&self) -> Vec<Particle> {
        self.shared.lock_state().particles.clone()
    }

    pub fn particle_count(&self) -> usize {
        self.shared.lock_state().particles.len()
    }

    pub fn state(&self) -> RunState {
        self.shared.lock_state().run_state
    }

    pub fn stats(&self) -> FrameStats {
        let mut stats = self.shared.lock_state().stats;
        stats.frame_interval_ms = self.shared.lock_frame().frame_interval_ms;
        stats
    }

    pub fn config(&self) -> ParticleViewConfig {
        self.shared.lock_state().config.clone()
    }

    pub fn host(&self) -> &H {
        &self.shared.host
    }
}
