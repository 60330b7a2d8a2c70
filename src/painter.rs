//! The drawing capability a field renders through.
//!
//! The simulation never talks to a real surface. It issues clear, disc, and
//! line calls against this trait, which keeps the core testable headless: a
//! test can hand [`ParticleField::render`](crate::ParticleField::render) a
//! recording implementation and assert on the calls, while the shipped
//! backend ([`gpu::Frame`](crate::gpu::Frame)) turns the same calls into
//! instance buffers.

use glam::{Vec2, Vec3};

/// A minimal 2D painting surface.
///
/// Coordinates are surface-local: origin at the top-left, y growing
/// downward, one unit per pixel. Colors are RGB in 0.0-1.0 with a separate
/// alpha.
pub trait Painter {
    /// Erase everything drawn so far this frame.
    fn clear(&mut self);

    /// Draw a filled disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32);

    /// Draw a straight line segment of the given stroke width.
    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Vec3, alpha: f32);
}
