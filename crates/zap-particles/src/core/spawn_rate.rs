/// Converts a continuous spawn rate into whole particles per frame,
/// carrying the fractional remainder forward between frames.
#[derive(Debug, Clone, Default)]
pub struct RateBasedSpawner {
    /// Particles owed but not yet requested.
    carry: f64,
}

impl RateBasedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of particles to spawn for a frame of `frame_interval_ms`
    /// at `rate_per_second`. Negative rates count as zero.
    pub fn amount_to_request(&mut self, rate_per_second: f32, frame_interval_ms: u32) -> usize {
        assert!(frame_interval_ms > 0, "frame interval must be positive");

        let rate = f64::from(rate_per_second.max(0.0));
        self.carry += rate * (f64::from(frame_interval_ms) * 0.001);

        if self.carry >= 1.0 {
            let whole = self.carry.floor();
            self.carry = (self.carry - whole).max(0.0);
            whole as usize
        } else {
            0
        }
    }

    /// Drop any owed fraction.
    pub fn reset(&mut self) {
        self.carry = 0.0;
    }

    pub fn carry(&self) -> f64 {
        self.carry
    }
}
