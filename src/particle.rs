//! The particle value type.
//!
//! A field stores particles in a plain `Vec`; the order of that vector is
//! draw order and nothing else. All per-particle state lives here, so a
//! particle can be cloned, inspected, or rewritten freely by tests and
//! external drivers.

use glam::{Vec2, Vec3};

use crate::color::hsl_to_rgb;

/// Saturation of every particle color (HSL model).
pub const SATURATION: f32 = 0.7;
/// Lightness of every particle color (HSL model).
pub const LIGHTNESS: f32 = 0.6;

/// A single drifting particle.
///
/// Velocity is expressed in surface units per frame: the field advances one
/// fixed tick per animation frame, so there is no time unit involved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface-local coordinates (origin top-left, y down).
    pub position: Vec2,
    /// Velocity in units per frame.
    pub velocity: Vec2,
    /// Drawn disc radius.
    pub radius: f32,
    /// Base opacity of the disc, in [0.2, 0.7).
    pub opacity: f32,
    /// Color hue in degrees. Spawned in [220, 280) for the blue-violet band.
    pub hue: f32,
}

impl Particle {
    /// RGB color of this particle: HSL(hue, 70%, 60%).
    #[inline]
    pub fn color(&self) -> Vec3 {
        hsl_to_rgb(self.hue, SATURATION, LIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_tracks_hue() {
        let mut p = Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 2.0,
            opacity: 0.5,
            hue: 240.0,
        };
        let blue = p.color();
        // Hue 240 is the blue corner: blue channel dominates.
        assert!(blue.z > blue.x && blue.z > blue.y);

        p.hue = 220.0;
        assert_ne!(p.color(), blue);
    }
}
