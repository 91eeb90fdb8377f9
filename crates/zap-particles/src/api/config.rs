use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::components::color::{Color, DEFAULT_PALETTE};

/// Which generator drag bursts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMoveType {
    /// Particles fall from the touch point.
    #[default]
    Fall,
    /// Particles radiate out of the touch point.
    Radiate,
}

/// Options recognized by the particle view.
/// Parsed from JSON with camelCase keys; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleViewConfig {
    /// Master switch. Turning it off clears every particle and stops the timer.
    pub active: bool,
    /// Pause/resume without clearing particles.
    pub running: bool,
    /// Spawn particles along the top edge every tick.
    pub has_falling_particles: bool,
    /// Target falling spawn rate.
    pub falling_particles_per_second: f32,
    pub add_particles_on_tap: bool,
    pub tap_particle_count: usize,
    pub add_particles_on_drag: bool,
    /// Particles per second of dragging (spread over ~60 move events).
    pub drag_particle_count: usize,
    pub drag_move_type: DragMoveType,
    pub particle_colors: Vec<Color>,
    pub show_debug_info: bool,
    pub debug_info_color: Color,
    /// Nominal interval of the recurring tick callback.
    pub tick_interval_ms: u32,
    /// Number of evenly spaced spawn points along the top edge.
    pub falling_anchor_count: usize,
    /// Base seed for the built-in generators.
    pub seed: u64,
}

impl Default for ParticleViewConfig {
    fn default() -> Self {
        Self {
            active: true,
            running: true,
            has_falling_particles: false,
            falling_particles_per_second: 60.0,
            add_particles_on_tap: false,
            tap_particle_count: 30,
            add_particles_on_drag: false,
            drag_particle_count: 60,
            drag_move_type: DragMoveType::Fall,
            particle_colors: DEFAULT_PALETTE.to_vec(),
            show_debug_info: false,
            debug_info_color: Color::LAWN_GREEN,
            tick_interval_ms: 16,
            falling_anchor_count: 9,
            seed: 42,
        }
    }
}

impl ParticleViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Palette for generators; falls back to the default palette when empty.
    pub fn palette(&self) -> &[Color] {
        if self.particle_colors.is_empty() {
            &DEFAULT_PALETTE[..]
        } else {
            &self.particle_colors
        }
    }

    /// Particles added per drag move event.
    pub fn drag_burst_size(&self) -> usize {
        self.drag_particle_count.div_ceil(60)
    }

    // -- Builder pattern --

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    pub fn with_falling_particles(mut self, per_second: f32) -> Self {
        self.has_falling_particles = true;
        self.falling_particles_per_second = per_second;
        self
    }

    pub fn with_tap(mut self, count: usize) -> Self {
        self.add_particles_on_tap = true;
        self.tap_particle_count = count;
        self
    }

    pub fn with_drag(mut self, count: usize, move_type: DragMoveType) -> Self {
        self.add_particles_on_drag = true;
        self.drag_particle_count = count;
        self.drag_move_type = move_type;
        self
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.particle_colors = colors;
        self
    }

    pub fn with_debug_info(mut self, color: Color) -> Self {
        self.show_debug_info = true;
        self.debug_info_color = color;
        self
    }

    pub fn with_tick_interval_ms(mut self, interval_ms: u32) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    pub fn with_falling_anchor_count(mut self, count: usize) -> Self {
        self.falling_anchor_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_control() {
        let c = ParticleViewConfig::default();
        assert!(c.active && c.running);
        assert!(!c.has_falling_particles);
        assert_eq!(c.falling_particles_per_second, 60.0);
        assert_eq!(c.tap_particle_count, 30);
        assert_eq!(c.drag_particle_count, 60);
        assert_eq!(c.drag_move_type, DragMoveType::Fall);
        assert_eq!(c.palette().len(), 7);
        assert_eq!(c.tick_interval_ms, 16);
    }

    #[test]
    fn parses_partial_json() {
        let c = ParticleViewConfig::from_json(
            r##"{
                "hasFallingParticles": true,
                "fallingParticlesPerSecond": 120,
                "dragMoveType": "radiate",
                "particleColors": ["#ff0000", "#00ff00"],
                "debugInfoColor": "#ffffff"
            }"##,
        )
        .unwrap();
        assert!(c.has_falling_particles);
        assert_eq!(c.falling_particles_per_second, 120.0);
        assert_eq!(c.drag_move_type, DragMoveType::Radiate);
        assert_eq!(c.particle_colors, vec![Color::RED, Color::rgb8(0, 255, 0)]);
        assert_eq!(c.debug_info_color, Color::WHITE);
        assert_eq!(c.tap_particle_count, 30);
    }

    #[test]
    fn rejects_bad_color() {
        let err = ParticleViewConfig::from_json(r#"{"particleColors": ["nope"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_palette_falls_back() {
        let c = ParticleViewConfig::new().with_colors(Vec::new());
        assert_eq!(c.palette(), &DEFAULT_PALETTE[..]);
    }

    #[test]
    fn drag_burst_rounds_up() {
        assert_eq!(ParticleViewConfig::new().drag_burst_size(), 1);
        assert_eq!(ParticleViewConfig::new().with_drag(61, DragMoveType::Fall).drag_burst_size(), 2);
        assert_eq!(ParticleViewConfig::new().with_drag(0, DragMoveType::Fall).drag_burst_size(), 0);
    }
}
