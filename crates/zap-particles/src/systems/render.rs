//! Render pass: paints the live particles and the debug overlay.

use glam::Vec2;

use super::debug::FrameStats;
use crate::components::color::Color;
use crate::components::particle::Particle;
use crate::renderer::surface::DrawSurface;

/// Overlay text size in layout units.
const DEBUG_TEXT_SIZE: f32 = 32.0;

/// Paint every particle in collection order.
pub fn paint_particles(particles: &[Particle], surface: &mut dyn DrawSurface) {
    for particle in particles {
        particle.paint(surface);
    }
}

/// Draw frame statistics near the top-left corner, sized for the
/// canvas-to-layout scale so it reads the same on dense displays.
pub fn draw_debug_overlay(
    stats: &FrameStats,
    canvas_size: Vec2,
    scale: f32,
    color: Color,
    surface: &mut dyn DrawSurface,
) {
    let size = DEBUG_TEXT_SIZE * scale;
    let origin = canvas_size * 0.1;
    for (i, line) in stats.lines().iter().enumerate() {
        let baseline = origin + Vec2::new(0.0, size * 1.2 * i as f32);
        surface.draw_text(line, baseline, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::shape::ParticleShape;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    #[test]
    fn paints_each_particle_once() {
        let particles = vec![
            Particle::new(ParticleShape::Rect, Vec2::new(1.0, 1.0)),
            Particle::new(ParticleShape::Ellipse, Vec2::new(2.0, 2.0)),
            Particle::new(ParticleShape::Rect, Vec2::new(3.0, 3.0)),
        ];
        let mut surface = RecordingSurface::new();
        paint_particles(&particles, &mut surface);
        assert_eq!(surface.shape_count(), 3);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn overlay_scales_text() {
        let mut surface = RecordingSurface::new();
        let stats = FrameStats { particle_count: 4, ..Default::default() };
        draw_debug_overlay(&stats, Vec2::new(800.0, 600.0), 2.0, Color::LAWN_GREEN, &mut surface);

        assert_eq!(surface.texts().len(), 3);
        match &surface.commands[0] {
            DrawCommand::Text { origin, size, color, .. } => {
                assert_eq!(*origin, Vec2::new(80.0, 60.0));
                assert_eq!(*size, 64.0);
                assert_eq!(*color, Color::LAWN_GREEN);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
