//! Particle generators: data-driven spawn policies.
//!
//! A generator is a record of direction ranges, a sampling profile and a
//! shape-selection rule. All flavors share one factory routine; there is no
//! per-flavor code path.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Vec2, Vec3};

use super::rng::Rng;
use crate::components::color::{Color, DEFAULT_PALETTE};
use crate::components::direction::DirectionRange;
use crate::components::particle::Particle;
use crate::components::shape::{LogoKind, PaintStyle, ParticleShape};

/// Batches at least this large are generated on the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

/// Uniform sampling ranges for the kinematic parameters of a new particle.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingProfile {
    /// Units per second.
    pub translation_speed: (f32, f32),
    /// Initial orientation per axis, degrees.
    pub orientation: (f32, f32),
    /// Rotation speed per axis, degrees per second.
    pub rotation_speed: (f32, f32),
    /// Extra spin multiplier for rectangles and logos.
    pub rect_spin_boost: f32,
    pub rect_size: (f32, f32),
    pub ellipse_size: (f32, f32),
    pub logo_size: (f32, f32),
}

impl SamplingProfile {
    /// Tuning used by the built-in confetti flavors.
    pub fn confetti() -> Self {
        Self {
            translation_speed: (100.0, 300.0),
            orientation: (0.0, 360.0),
            rotation_speed: (0.0, 360.0),
            rect_spin_boost: 1.2,
            rect_size: (6.0, 11.0),
            ellipse_size: (2.0, 7.0),
            logo_size: (4.0, 9.0),
        }
    }
}

impl Default for SamplingProfile {
    fn default() -> Self {
        Self::confetti()
    }
}

/// How a generator picks the draw primitive of each particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSelection {
    /// Rectangle when a unit coin flip lands above `rect_above`, ellipse otherwise.
    RectOrEllipse { rect_above: f32 },
    /// One of the decorative logos, in equal thirds.
    Logos,
}

/// Produces batches of randomized particles around anchor points.
///
/// Generators hold no mutable random state: each batch takes a fresh seed
/// from an atomic counter and every particle in the batch gets its own RNG
/// stream, so a generator can be shared across threads without a lock.
#[derive(Debug)]
pub struct ParticleGenerator {
    directions: Vec<DirectionRange>,
    profile: SamplingProfile,
    shapes: ShapeSelection,
    seed: u64,
    batches: AtomicU64,
}

impl ParticleGenerator {
    pub const DEFAULT_SEED: u64 = 42;
    /// Coin-flip threshold for rectangles versus ellipses.
    pub const RECT_THRESHOLD: f32 = 0.45;

    pub fn new(directions: Vec<DirectionRange>, profile: SamplingProfile, shapes: ShapeSelection) -> Self {
        assert!(!directions.is_empty(), "generator needs at least one direction range");
        Self {
            directions,
            profile,
            shapes,
            seed: Self::DEFAULT_SEED,
            batches: AtomicU64::new(0),
        }
    }

    /// Particles fly out in every direction.
    pub fn radial() -> Self {
        Self::new(
            vec![DirectionRange::FULL_CIRCLE],
            SamplingProfile::confetti(),
            ShapeSelection::RectOrEllipse { rect_above: Self::RECT_THRESHOLD },
        )
    }

    /// Particles fall inside a narrow downward cone.
    pub fn falling() -> Self {
        Self::new(
            vec![DirectionRange::DOWNWARD_CONE],
            SamplingProfile::confetti(),
            ShapeSelection::RectOrEllipse { rect_above: Self::RECT_THRESHOLD },
        )
    }

    /// Falling logos instead of plain confetti.
    pub fn decorative() -> Self {
        Self::new(
            vec![DirectionRange::DOWNWARD_CONE],
            SamplingProfile::confetti(),
            ShapeSelection::Logos,
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.batches = AtomicU64::new(0);
        self
    }

    pub fn directions(&self) -> &[DirectionRange] {
        &self.directions
    }

    pub fn profile(&self) -> &SamplingProfile {
        &self.profile
    }

    pub fn shapes(&self) -> ShapeSelection {
        self.shapes
    }

    /// Generate exactly `count` particles, each spawned at one of `anchors`
    /// and colored from `palette` (the default palette when `None`).
    ///
    /// Panics if `anchors` or the palette is empty.
    pub fn generate(&self, anchors: &[Vec2], count: usize, palette: Option<&[Color]>) -> Vec<Particle> {
        assert!(!anchors.is_empty(), "generate needs at least one anchor point");
        let palette = palette.unwrap_or(&DEFAULT_PALETTE[..]);
        assert!(!palette.is_empty(), "generate needs a non-empty palette");

        let batch = self.batches.fetch_add(1, Ordering::Relaxed);
        let batch_seed = Rng::derive(self.seed, batch).next_u64();
        let make = |i: usize| self.random_particle(anchors, palette, Rng::derive(batch_seed, i as u64));

        #[cfg(feature = "parallel")]
        if count >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return (0..count).into_par_iter().map(make).collect();
        }

        (0..count).map(make).collect()
    }

    /// Shared factory: one independently randomized particle.
    fn random_particle(&self, anchors: &[Vec2], palette: &[Color], mut rng: Rng) -> Particle {
        let range = self.directions[rng.next_index(self.directions.len())];
        let direction = range.sample(rng.next_f32());
        let anchor = anchors[rng.next_index(anchors.len())];

        let p = &self.profile;
        let (shape, spin, size_range) = match self.shapes {
            ShapeSelection::RectOrEllipse { rect_above } => {
                if rng.next_f32() > rect_above {
                    (ParticleShape::Rect, p.rect_spin_boost, p.rect_size)
                } else {
                    (ParticleShape::Ellipse, 1.0, p.ellipse_size)
                }
            }
            ShapeSelection::Logos => {
                let u = rng.next_f32();
                let kind = if u > 0.66 {
                    LogoKind::Tiles
                } else if u > 0.33 {
                    LogoKind::Rings
                } else {
                    LogoKind::Stripes
                };
                (ParticleShape::Logo(kind), p.rect_spin_boost, p.logo_size)
            }
        };

        let color = palette[rng.next_index(palette.len())];
        let mut axis = |(lo, hi): (f32, f32)| Vec3::new(rng.range(lo, hi), rng.range(lo, hi), rng.range(lo, hi));
        let rotation_speed = axis(p.rotation_speed) * spin;
        let orientation = axis(p.orientation);
        let speed = rng.range(p.translation_speed.0, p.translation_speed.1);
        let size = Vec2::new(
            rng.range(size_range.0, size_range.1),
            rng.range(size_range.0, size_range.1),
        );

        Particle::new(shape, anchor)
            .with_direction(direction)
            .with_translation_speed(speed)
            .with_rotation_speed(rotation_speed)
            .with_orientation(orientation)
            .with_size(size)
            .with_style(PaintStyle::solid(color))
    }
}
