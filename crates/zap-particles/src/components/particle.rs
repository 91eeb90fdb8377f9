//! A single confetti particle: fixed kinematics, cached transform, draw step.

use glam::{Affine2, Vec2, Vec3};

use super::color::Color;
use super::rect::Rect;
use super::shape::{PaintStyle, ParticleShape};
use crate::core::transform::particle_transform;
use crate::renderer::surface::{DrawSurface, SavedState};

/// A particle whose position and orientation are pure functions of the time
/// elapsed since its first update.
///
/// Direction and speeds are fixed at creation; `update` only advances the
/// internal clock and recomputes the cached transform.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec2,
    initial_position: Vec2,
    /// Degrees about X, Y, Z.
    orientation: Vec3,
    initial_orientation: Vec3,
    /// Degrees per second about X, Y, Z.
    rotation_speed: Vec3,
    /// Units per second.
    translation_speed: f32,
    /// Travel direction in degrees.
    direction: f32,
    size: Vec2,
    transform: Affine2,
    shape: ParticleShape,
    style: PaintStyle,
    /// Host timestamp seen on the previous update; `None` until seeded.
    previous_elapsed_ms: Option<u64>,
    /// Time this particle has been simulated for.
    internal_ms: u64,
}

impl Particle {
    /// Create a motionless particle at `position`.
    pub fn new(shape: ParticleShape, position: Vec2) -> Self {
        Self {
            position,
            initial_position: position,
            orientation: Vec3::ZERO,
            initial_orientation: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
            translation_speed: 0.0,
            direction: 0.0,
            size: Vec2::splat(8.0),
            transform: Affine2::IDENTITY,
            shape,
            style: PaintStyle::solid(Color::WHITE),
            previous_elapsed_ms: None,
            internal_ms: 0,
        }
    }

    // -- Builder pattern --

    pub fn with_direction(mut self, degrees: f32) -> Self {
        self.direction = degrees;
        self
    }

    pub fn with_translation_speed(mut self, speed: f32) -> Self {
        self.translation_speed = speed;
        self
    }

    pub fn with_rotation_speed(mut self, speed: Vec3) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn with_orientation(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self.initial_orientation = orientation;
        self.transform = particle_transform(self.position, Vec2::ONE, orientation);
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Advance to the host's absolute elapsed time.
    ///
    /// The first call only records the timestamp (and caches the transform
    /// for the current scale); motion starts on the second call. Timestamps
    /// that go backwards advance nothing.
    pub fn update(&mut self, absolute_elapsed_ms: u64, scale: Vec2) {
        let Some(previous) = self.previous_elapsed_ms else {
            self.previous_elapsed_ms = Some(absolute_elapsed_ms);
            self.transform = particle_transform(self.position, scale, self.orientation);
            return;
        };

        self.internal_ms += absolute_elapsed_ms.saturating_sub(previous);
        self.previous_elapsed_ms = Some(absolute_elapsed_ms.max(previous));

        let seconds = self.internal_ms as f32 * 0.001;
        let distance = self.translation_speed * seconds;
        let angle = self.direction.to_radians();
        self.position = self.initial_position + distance * Vec2::new(angle.cos(), angle.sin());
        self.orientation = self.initial_orientation + seconds * self.rotation_speed;

        self.transform = particle_transform(self.position, scale, self.orientation);
    }

    /// Draw with the cached transform; the surface's transform is restored
    /// afterwards even if drawing unwinds.
    pub fn paint(&self, surface: &mut dyn DrawSurface) {
        let mut saved = SavedState::new(surface);
        saved.set_transform(self.transform);
        self.shape.draw(self.position, self.size, &self.style, &mut *saved);
    }

    /// Untransformed bounding box centered on the current position.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    // -- Live restyling --

    pub fn set_color(&mut self, color: Color) {
        self.style.set_color(color);
    }

    pub fn set_blur(&mut self, blur: f32) {
        self.style.set_blur(blur);
    }

    // -- Accessors --

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn initial_orientation(&self) -> Vec3 {
        self.initial_orientation
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    pub fn translation_speed(&self) -> f32 {
        self.translation_speed
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    pub fn shape(&self) -> ParticleShape {
        self.shape
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    /// Simulated time since the seeding update, in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.internal_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    fn moving(direction: f32, speed: f32) -> Particle {
        Particle::new(ParticleShape::Rect, Vec2::new(100.0, 0.0))
            .with_direction(direction)
            .with_translation_speed(speed)
            .with_rotation_speed(Vec3::new(90.0, 45.0, 180.0))
            .with_orientation(Vec3::new(10.0, 20.0, 30.0))
    }

    fn closed_form(p: &Particle, t_ms: u64) -> Vec2 {
        let a = p.direction().to_radians();
        p.initial_position() + p.translation_speed() * (t_ms as f32 * 0.001) * Vec2::new(a.cos(), a.sin())
    }

    #[test]
    fn first_update_only_seeds() {
        let mut p = moving(90.0, 200.0);
        p.update(5_000, Vec2::ONE);
        assert_eq!(p.position(), Vec2::new(100.0, 0.0));
        assert_eq!(p.elapsed_ms(), 0);
    }

    #[test]
    fn first_update_at_zero_still_seeds() {
        let mut p = moving(0.0, 100.0);
        p.update(0, Vec2::ONE);
        p.update(500, Vec2::ONE);
        assert!((p.position() - Vec2::new(150.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn position_matches_closed_form_regardless_of_step_size() {
        let mut coarse = moving(60.0, 250.0);
        let mut fine = moving(60.0, 250.0);
        coarse.update(1_000, Vec2::ONE);
        fine.update(1_000, Vec2::ONE);

        coarse.update(1_900, Vec2::ONE);
        for t in (1_016..=1_900).step_by(17) {
            fine.update(t, Vec2::ONE);
        }
        fine.update(1_900, Vec2::ONE);

        let expected = closed_form(&coarse, 900);
        assert!((coarse.position() - expected).length() < 1e-3);
        assert!((fine.position() - expected).length() < 1e-3);
    }

    #[test]
    fn resampling_same_timestamp_is_idempotent() {
        let mut p = moving(120.0, 150.0);
        p.update(10, Vec2::ONE);
        p.update(410, Vec2::ONE);
        let first = p.position();
        let orientation = p.orientation();
        p.update(410, Vec2::ONE);
        assert_eq!(p.position(), first);
        assert_eq!(p.orientation(), orientation);
    }

    #[test]
    fn orientation_advances_linearly() {
        let mut p = moving(0.0, 0.0);
        p.update(100, Vec2::ONE);
        p.update(2_100, Vec2::ONE);
        let expected = Vec3::new(10.0, 20.0, 30.0) + 2.0 * Vec3::new(90.0, 45.0, 180.0);
        assert!((p.orientation() - expected).length() < 1e-3);
    }

    #[test]
    fn backwards_timestamp_does_not_move() {
        let mut p = moving(90.0, 100.0);
        p.update(1_000, Vec2::ONE);
        p.update(1_500, Vec2::ONE);
        let at = p.position();
        p.update(1_200, Vec2::ONE);
        assert_eq!(p.position(), at);
        p.update(1_600, Vec2::ONE);
        assert!((p.position() - closed_form(&p, 600)).length() < 1e-3);
    }

    #[test]
    fn paint_restores_ambient_transform() {
        let mut p = moving(90.0, 100.0);
        p.update(1, Vec2::new(2.0, 2.0));
        p.update(101, Vec2::new(2.0, 2.0));

        let mut surface = RecordingSurface::new();
        let ambient = Affine2::from_translation(Vec2::new(-7.0, 3.0));
        surface.set_transform(ambient);
        p.paint(&mut surface);

        assert_eq!(surface.transform(), ambient);
        assert_eq!(surface.depth(), 0);
        match &surface.commands[0] {
            DrawCommand::FillRect { transform, .. } => assert_eq!(*transform, p.transform()),
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn restyle_changes_paint() {
        let mut p = Particle::new(ParticleShape::Ellipse, Vec2::ZERO).with_style(PaintStyle::solid(Color::RED));
        p.set_color(Color::GOLD);
        p.set_blur(4.0);
        assert_eq!(p.style().color, Color::GOLD);
        assert_eq!(p.style().blur, 4.0);
    }

    #[test]
    fn bounds_follow_position() {
        let mut p = moving(0.0, 1_000.0).with_size(Vec2::new(10.0, 6.0));
        p.update(0, Vec2::ONE);
        p.update(1_000, Vec2::ONE);
        let b = p.bounds();
        assert_eq!(b.center(), p.position());
        assert_eq!(b.size(), Vec2::new(10.0, 6.0));
    }
}
