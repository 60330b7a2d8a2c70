//! # driftnet
//!
//! An animated particle-field backdrop: drifting discs that reflect off
//! the surface edges, react to the pointer, and join into a faint
//! constellation of proximity-faded lines, redrawn every frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftnet::prelude::*;
//!
//! fn main() -> Result<(), BackdropError> {
//!     Backdrop::new()
//!         .with_title("portfolio backdrop")
//!         .with_size(1280, 720)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] is the simulation: a pool of `floor(area / 15000)`
//! particles, fixed at creation, advanced one tick per frame. Boundary
//! handling flips velocity signs without clamping positions, the pointer
//! exerts a linear-falloff force inside a 100-unit halo, and every pair of
//! particles closer than 120 units yields a [`Link`]. The pair scan is
//! deliberately quadratic; the area-derived count keeps it cheap, and that
//! is the field's documented scaling limit.
//!
//! The field knows nothing about windows or GPUs. It draws through the
//! [`Painter`] capability, so tests run it against a recording painter and
//! the GPU layer is just the shipped implementation.
//!
//! ### Tuning
//!
//! Every constant of the effect lives in [`FieldConfig`]: density, pointer
//! halo, link radius and color, spawn ranges. Defaults reproduce the
//! classic indigo portfolio backdrop.
//!
//! ### Determinism
//!
//! Randomness is confined to spawning and flows through a seed
//! ([`ParticleField::with_seed`]); stepping is pure. Two fields with the
//! same seed, dimensions, and pointer history stay bit-identical forever.
//!
//! ### Presentation
//!
//! [`Backdrop`] opens a winit window and drives the field through the
//! redraw cycle: step, record into a [`gpu::Frame`], present with wgpu,
//! request the next redraw. Closing the window cancels the loop.

pub mod backdrop;
pub mod color;
pub mod error;
pub mod field;
pub mod gpu;
pub mod painter;
pub mod particle;
pub mod spawn;
pub mod time;

pub use backdrop::Backdrop;
pub use error::{BackdropError, SurfaceError};
pub use field::{FieldConfig, Link, ParticleField};
pub use glam::{Vec2, Vec3};
pub use painter::Painter;
pub use particle::Particle;
pub use spawn::SpawnContext;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftnet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::error::{BackdropError, SurfaceError};
    pub use crate::field::{FieldConfig, Link, ParticleField};
    pub use crate::painter::Painter;
    pub use crate::particle::Particle;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
