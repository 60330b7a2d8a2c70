//! The particle field: pool, per-frame update, and link enumeration.
//!
//! A [`ParticleField`] owns a fixed pool of particles anchored to a
//! rectangular surface. Each frame it advances every particle by its
//! velocity, reflects velocities at the surface edges, applies the pointer
//! force, and enumerates proximity links between close pairs. The field
//! itself never touches a window or a GPU; drawing goes through the
//! [`Painter`] capability.
//!
//! # Example
//!
//! ```ignore
//! use driftnet::{FieldConfig, ParticleField, Vec2};
//!
//! let mut field = ParticleField::with_seed(800.0, 600.0, FieldConfig::default(), 42);
//! field.set_pointer(Vec2::new(400.0, 300.0));
//! field.step();
//! for link in field.links() {
//!     println!("{} -> {} (alpha {:.2})", link.a, link.b, link.alpha);
//! }
//! ```

use glam::{Vec2, Vec3};

use crate::color::hex;
use crate::painter::Painter;
use crate::particle::Particle;
use crate::spawn::{entropy_seed, SpawnContext};

/// Tuning knobs for a particle field.
///
/// The defaults reproduce the classic portfolio backdrop: one particle per
/// 15000 square pixels, a 100-pixel pointer halo, and indigo links fading
/// out at 120 pixels. All forces are ad-hoc visual tuning, not physics.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Surface area, in square units, allotted to each particle.
    /// Pool size is `floor(width * height / density)`.
    pub density: f32,
    /// Maximum spawn speed; velocity components land in `[-speed, speed)`.
    pub speed: f32,
    /// Spawned disc radius range `[radius_min, radius_max)`.
    pub radius_min: f32,
    pub radius_max: f32,
    /// Spawned opacity range `[opacity_min, opacity_max)`.
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Spawned hue range `[hue_min, hue_max)`, degrees.
    pub hue_min: f32,
    pub hue_max: f32,
    /// Distance below which the pointer acts on a particle.
    pub pointer_radius: f32,
    /// Velocity change per frame at zero pointer distance, per unit of
    /// displacement.
    pub pointer_strength: f32,
    /// Distance below which two particles are linked (strict).
    pub link_radius: f32,
    /// Peak link opacity, reached as the pair distance approaches zero.
    pub link_alpha: f32,
    /// Link stroke width.
    pub link_width: f32,
    /// Link stroke color.
    pub link_color: Vec3,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 15000.0,
            speed: 1.0,
            radius_min: 1.0,
            radius_max: 4.0,
            opacity_min: 0.2,
            opacity_max: 0.7,
            hue_min: 220.0,
            hue_max: 280.0,
            pointer_radius: 100.0,
            pointer_strength: 0.01,
            link_radius: 120.0,
            link_alpha: 0.3,
            link_width: 1.0,
            link_color: hex(0x667eea),
        }
    }
}

impl FieldConfig {
    /// Set the area-per-particle density.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set the pointer interaction radius.
    pub fn with_pointer_radius(mut self, radius: f32) -> Self {
        self.pointer_radius = radius;
        self
    }

    /// Set the link radius.
    pub fn with_link_radius(mut self, radius: f32) -> Self {
        self.link_radius = radius;
        self
    }

    /// Set the spawned hue band in degrees.
    pub fn with_hue_range(mut self, min: f32, max: f32) -> Self {
        self.hue_min = min;
        self.hue_max = max;
        self
    }

    /// Set the link stroke color.
    pub fn with_link_color(mut self, color: Vec3) -> Self {
        self.link_color = color;
        self
    }
}

/// A rendered connection between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Endpoint at the lower-indexed particle.
    pub a: Vec2,
    /// Endpoint at the higher-indexed particle.
    pub b: Vec2,
    /// Opacity, `((radius - dist) / radius) * link_alpha`.
    pub alpha: f32,
}

/// A fixed pool of particles bound to a rectangular surface.
#[derive(Clone, Debug)]
pub struct ParticleField {
    width: f32,
    height: f32,
    pointer: Vec2,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    /// Create a field sized to the given surface, seeded from the clock.
    pub fn new(width: f32, height: f32, config: FieldConfig) -> Self {
        Self::with_seed(width, height, config, entropy_seed())
    }

    /// Create a field with a fixed seed. Two fields built with identical
    /// dimensions, config, and seed hold bit-identical pools.
    pub fn with_seed(width: f32, height: f32, config: FieldConfig, seed: u64) -> Self {
        let count = particle_count(width, height, config.density);

        let particles = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, count, seed);
                Particle {
                    position: ctx.random_in_rect(width, height),
                    velocity: ctx.random_velocity(config.speed),
                    radius: ctx.random_range(config.radius_min, config.radius_max),
                    opacity: ctx.random_range(config.opacity_min, config.opacity_max),
                    hue: ctx.random_range(config.hue_min, config.hue_max),
                }
            })
            .collect();

        Self {
            width,
            height,
            pointer: Vec2::ZERO,
            particles,
            config,
        }
    }

    /// Surface width in units.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Surface height in units.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of particles in the pool. Fixed for the field's lifetime.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// The particle pool, in draw order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the pool, for external drivers and tests.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// The active tuning configuration.
    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Last known pointer position. An untouched pointer sits at the
    /// origin, which still acts on particles that drift near it.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Record a pointer move, in surface-local coordinates. No smoothing.
    #[inline]
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Adopt new surface dimensions.
    ///
    /// The pool is deliberately left alone: the count stays fixed and
    /// particles stranded outside the new bounds reflect back in over the
    /// following frames.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance the simulation by one frame tick.
    ///
    /// For each particle, in pool order: advance by velocity, reflect the
    /// velocity sign at the surface edges (position is never clamped, so a
    /// particle may sit just outside for a frame), then apply the pointer
    /// force with linear falloff over `pointer_radius`.
    ///
    /// Deterministic: given the same pool and pointer, two calls produce
    /// the same result.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        let pointer = self.pointer;
        let cfg = &self.config;

        for p in &mut self.particles {
            p.position += p.velocity;

            if p.position.x < 0.0 || p.position.x > w {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > h {
                p.velocity.y = -p.velocity.y;
            }

            let to_pointer = pointer - p.position;
            let dist = to_pointer.length();
            if dist < cfg.pointer_radius {
                let force = (cfg.pointer_radius - dist) / cfg.pointer_radius;
                p.velocity -= to_pointer * force * cfg.pointer_strength;
            }
        }
    }

    /// Visit every link between particles closer than `link_radius`.
    ///
    /// Pairs are scanned exhaustively (i < j in pool order). Quadratic in
    /// the pool size, which the area-derived count keeps small; this is the
    /// scaling limit of the field, not a defect to hide behind an index.
    pub fn for_each_link<F: FnMut(Link)>(&self, mut f: F) {
        let radius = self.config.link_radius;
        let alpha_scale = self.config.link_alpha;

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist = a.position.distance(b.position);
                if dist < radius {
                    f(Link {
                        a: a.position,
                        b: b.position,
                        alpha: ((radius - dist) / radius) * alpha_scale,
                    });
                }
            }
        }
    }

    /// Collect the current links into a `Vec`.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        self.for_each_link(|l| out.push(l));
        out
    }

    /// Paint the current frame: clear, every disc in pool order, then the
    /// links on top.
    pub fn render(&self, painter: &mut dyn Painter) {
        painter.clear();

        for p in &self.particles {
            painter.fill_circle(p.position, p.radius, p.color(), p.opacity);
        }

        let cfg = &self.config;
        self.for_each_link(|l| {
            painter.stroke_line(l.a, l.b, cfg.link_width, cfg.link_color, l.alpha);
        });
    }
}

/// Pool size for a surface: `floor(area / density)`, clamped to zero for
/// degenerate or non-finite dimensions from a misbehaving host.
fn particle_count(width: f32, height: f32, density: f32) -> u32 {
    let n = width * height / density;
    if n.is_finite() && n > 0.0 {
        n.floor() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(w: f32, h: f32) -> ParticleField {
        ParticleField::with_seed(w, h, FieldConfig::default(), 0xD1F7)
    }

    #[test]
    fn test_count_follows_area() {
        assert_eq!(field(300.0, 500.0).particle_count(), 10);
        assert_eq!(field(400.0, 400.0).particle_count(), 10);
        assert_eq!(field(1920.0, 1080.0).particle_count(), 138);
    }

    #[test]
    fn test_degenerate_dimensions_spawn_nothing() {
        assert_eq!(field(0.0, 500.0).particle_count(), 0);
        assert_eq!(field(f32::NAN, 500.0).particle_count(), 0);
        assert_eq!(field(-300.0, 500.0).particle_count(), 0);

        // An empty pool still steps and links without incident.
        let mut f = field(0.0, 0.0);
        f.step();
        assert!(f.links().is_empty());
    }

    #[test]
    fn test_spawn_ranges() {
        let f = field(1000.0, 1000.0);
        assert!(f.particle_count() > 0);
        for p in f.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 1000.0);
            assert!(p.position.y >= 0.0 && p.position.y < 1000.0);
            assert!(p.velocity.x >= -1.0 && p.velocity.x < 1.0);
            assert!(p.velocity.y >= -1.0 && p.velocity.y < 1.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.opacity >= 0.2 && p.opacity < 0.7);
            assert!(p.hue >= 220.0 && p.hue < 280.0);
        }
    }

    #[test]
    fn test_reflection_flips_sign_without_clamp() {
        let mut f = field(400.0, 400.0);
        f.set_pointer(Vec2::new(200.0, 200.0));
        let p = &mut f.particles_mut()[0];
        p.position = Vec2::new(-1.0, 200.0);
        p.velocity = Vec2::new(-0.5, 0.0);

        f.step();

        let p = f.particles()[0];
        assert_eq!(p.velocity.x, 0.5);
        // Advanced before reflecting: still outside, not clamped.
        assert_eq!(p.position.x, -1.5);
    }

    #[test]
    fn test_pointer_force_zero_at_zero_distance() {
        let mut f = field(400.0, 400.0);
        f.set_pointer(Vec2::new(103.0, 100.0));
        let p = &mut f.particles_mut()[0];
        // Lands exactly on the pointer after the advance.
        p.position = Vec2::new(100.0, 100.0);
        p.velocity = Vec2::new(3.0, 0.0);

        f.step();

        // dx = dy = 0 cancels the force term outright.
        assert_eq!(f.particles()[0].velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_pointer_force_at_half_radius() {
        let mut f = field(400.0, 400.0);
        f.set_pointer(Vec2::new(150.0, 100.0));
        let p = &mut f.particles_mut()[0];
        p.position = Vec2::new(100.0, 100.0);
        p.velocity = Vec2::ZERO;

        f.step();

        // dist 50 -> force 0.5; dv = -(50, 0) * 0.5 * 0.01 = (-0.25, 0).
        let v = f.particles()[0].velocity;
        assert!((v.x - (-0.25)).abs() < 1e-5);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_no_pointer_force_outside_radius() {
        let mut f = field(400.0, 400.0);
        f.set_pointer(Vec2::new(300.0, 100.0));
        let p = &mut f.particles_mut()[0];
        p.position = Vec2::new(100.0, 100.0);
        p.velocity = Vec2::new(0.25, 0.25);

        f.step();

        assert_eq!(f.particles()[0].velocity, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn test_link_threshold_is_strict() {
        let mut f = field(400.0, 400.0);
        {
            let ps = f.particles_mut();
            ps[0].position = Vec2::new(10.0, 10.0);
            ps[1].position = Vec2::new(130.0, 10.0); // exactly 120 away
            // Park everything else out of range of the pair.
            for p in &mut ps[2..] {
                p.position = Vec2::new(399.0, 399.0);
            }
        }
        assert!(f
            .links()
            .iter()
            .all(|l| l.a != Vec2::new(10.0, 10.0) || l.b != Vec2::new(130.0, 10.0)));

        f.particles_mut()[1].position = Vec2::new(129.9, 10.0);
        let links = f.links();
        assert!(links
            .iter()
            .any(|l| l.a == Vec2::new(10.0, 10.0) && l.b == Vec2::new(129.9, 10.0)));
    }

    #[test]
    fn test_link_alpha_fades_linearly() {
        let mut f = field(400.0, 400.0);
        {
            let ps = f.particles_mut();
            ps[0].position = Vec2::new(10.0, 10.0);
            ps[1].position = Vec2::new(70.0, 10.0); // 60 apart, half the radius
            for p in &mut ps[2..] {
                p.position = Vec2::new(399.0, 399.0);
            }
        }
        let links = f.links();
        let link = links
            .iter()
            .find(|l| l.a == Vec2::new(10.0, 10.0))
            .expect("pair within radius must link");
        assert!((link.alpha - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_particles_link_cleanly() {
        let mut f = field(400.0, 400.0);
        {
            let ps = f.particles_mut();
            ps[0].position = Vec2::new(50.0, 50.0);
            ps[1].position = Vec2::new(50.0, 50.0);
            for p in &mut ps[2..] {
                p.position = Vec2::new(399.0, 399.0);
            }
        }
        let links = f.links();
        let link = links.iter().find(|l| l.a == l.b).expect("zero-distance link");
        assert!((link.alpha - 0.3).abs() < 1e-5);
        assert!(link.alpha.is_finite());
    }

    #[test]
    fn test_resize_keeps_pool_untouched() {
        let mut f = field(400.0, 400.0);
        let before = f.particles().to_vec();

        f.resize(800.0, 800.0);

        assert_eq!(f.width(), 800.0);
        assert_eq!(f.height(), 800.0);
        assert_eq!(f.particle_count(), before.len());
        assert_eq!(f.particles(), &before[..]);
    }

    #[test]
    fn test_positions_stay_near_bounds() {
        let mut f = field(400.0, 400.0);
        // Keep the pointer away from the edges so the halo cannot shove
        // particles outward while they sit on a boundary.
        f.set_pointer(Vec2::new(200.0, 200.0));

        for _ in 0..2000 {
            f.step();
            let eps = f
                .particles()
                .iter()
                .map(|p| p.velocity.x.abs().max(p.velocity.y.abs()))
                .fold(0.0_f32, f32::max)
                + 1e-3;
            for p in f.particles() {
                assert!(p.position.x >= -eps && p.position.x <= 400.0 + eps);
                assert!(p.position.y >= -eps && p.position.y <= 400.0 + eps);
            }
        }
    }

    #[test]
    fn test_seeded_construction_is_reproducible() {
        let a = ParticleField::with_seed(640.0, 480.0, FieldConfig::default(), 7);
        let b = ParticleField::with_seed(640.0, 480.0, FieldConfig::default(), 7);
        assert_eq!(a.particles(), b.particles());

        let c = ParticleField::with_seed(640.0, 480.0, FieldConfig::default(), 8);
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut a = field(640.0, 480.0);
        let mut b = a.clone();
        a.set_pointer(Vec2::new(320.0, 240.0));
        b.set_pointer(Vec2::new(320.0, 240.0));

        for _ in 0..100 {
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }
}
