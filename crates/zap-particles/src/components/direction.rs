use serde::{Deserialize, Serialize};

/// Closed angular interval `[min, max]` in degrees.
/// 0 points along +X, 90 points down (+Y) in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionRange {
    pub min: f32,
    pub max: f32,
}

impl DirectionRange {
    /// Every direction.
    pub const FULL_CIRCLE: Self = Self::new(0.0, 360.0);
    /// Narrow cone pointing down the canvas.
    pub const DOWNWARD_CONE: Self = Self::new(45.0, 135.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit value `t` in [0, 1) onto the interval.
    #[inline]
    pub fn sample(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stays_in_range() {
        let r = DirectionRange::DOWNWARD_CONE;
        assert_eq!(r.sample(0.0), 45.0);
        assert_eq!(r.sample(0.5), 90.0);
        assert!(r.contains(r.sample(0.999)));
    }
}
