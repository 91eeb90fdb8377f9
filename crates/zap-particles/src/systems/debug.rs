//! Debug statistics for the optional on-canvas overlay.

/// Per-view timing and spawn counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Host time between the last two paints.
    pub frame_interval_ms: f64,
    /// Wall time of the last tick (cull + spawn + update).
    pub update_ms: f64,
    /// Live particles after the last tick.
    pub particle_count: usize,
    /// Ticks since activation.
    pub ticks: u64,
    /// Falling particles spawned since activation.
    pub falling_spawned: u64,
    /// Tap/drag particles spawned since activation.
    pub burst_spawned: u64,
}

impl FrameStats {
    pub fn fps(&self) -> f64 {
        if self.frame_interval_ms > 0.0 {
            1000.0 / self.frame_interval_ms
        } else {
            0.0
        }
    }

    /// Overlay text, one entry per line.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{:.0} FPS ({:.1} ms/frame)", self.fps(), self.frame_interval_ms),
            format!("update {:.2} ms", self.update_ms),
            format!("{} particles", self.particle_count),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_interval() {
        let stats = FrameStats { frame_interval_ms: 20.0, ..Default::default() };
        assert_eq!(stats.fps(), 50.0);
        assert_eq!(FrameStats::default().fps(), 0.0);
    }

    #[test]
    fn lines_mention_counts() {
        let stats = FrameStats {
            frame_interval_ms: 16.0,
            update_ms: 0.25,
            particle_count: 12,
            ..Default::default()
        };
        let lines = stats.lines();
        assert_eq!(lines[0], "62 FPS (16.0 ms/frame)");
        assert_eq!(lines[1], "update 0.25 ms");
        assert_eq!(lines[2], "12 particles");
    }
}
