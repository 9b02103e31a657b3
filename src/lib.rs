//! # Ember2D - 2D sprite particle emitters
//!
//! CPU-side particle simulation and vertex generation for the classic
//! plist-driven 2D particle format. Ember2D owns the particle lifecycle:
//! it spawns on a fixed cadence, integrates per-frame kinetics, retires
//! expired particles and turns the survivors into a quad-vertex stream.
//! The scene graph, renderer and asset pipeline stay on the host side.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ember2d::prelude::*;
//!
//! // Sprite lookup is the host's concern; a closure will do.
//! let resolver = |name: &str| Some(Sprite::new(name, 32, 32));
//!
//! let mut emitter = ParticleEmitter::new();
//! emitter.load_str(include_str!("fire.plist"), &resolver)?;
//!
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! loop {
//!     let (_, dt) = clock.update();
//!     emitter.advance(dt);
//!     let (vertices, rebuilt) = emitter.build_vertices();
//!     if rebuilt {
//!         // upload `vertices` (4 per particle) to the sprite batcher
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Emitter models
//!
//! Every particle obeys one of two kinematic rule families, selected by the
//! `emitterType` field:
//!
//! | Model | Motion |
//! |-------|--------|
//! | [`EmitterKind::Gravity`] | Velocity integration under gravity plus radial/tangential acceleration |
//! | [`EmitterKind::Radial`] | Parametric orbit around the source, radius decaying to a retirement floor |
//!
//! ### Variance
//!
//! Almost every parameter is a `(base, variance)` pair. At spawn each is
//! sampled once as `base + variance * U(-1, 1)` and stays fixed for that
//! particle's whole life; size and color then ramp linearly toward their
//! sampled end values.
//!
//! ### Loading
//!
//! [`plist::parse`] reads the legacy XML dictionary into a [`ParamTable`];
//! [`EmitterConfig::from_table`] maps the table onto a parameter set,
//! failing fast on the first missing key. Loading is all-or-nothing: a
//! failed load never disturbs the emitter's current state.
//!
//! ### Threading
//!
//! One emitter instance is single-threaded state. Run as many independent
//! emitters on worker threads as you like, but serialize calls per instance:
//! an update pass, then a render pass, never overlapping.

pub mod blend;
pub mod component;
pub mod config;
mod emitter;
pub mod error;
pub mod params;
mod particle;
pub mod plist;
pub mod sprite;
pub mod time;
mod vertex;

pub use blend::BlendMode;
pub use bytemuck;
pub use component::{SceneComponent, SceneHandle};
pub use config::{EmitterConfig, EmitterKind};
pub use emitter::ParticleEmitter;
pub use error::LoadError;
pub use glam::{Vec2, Vec4};
pub use params::{ParamTable, Value};
pub use particle::Particle;
pub use sprite::{DirectorySpriteResolver, Sprite, SpriteResolver};
pub use time::FrameClock;
pub use vertex::{pack_color, Vertex, QUAD_UVS};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use ember2d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blend::BlendMode;
    pub use crate::component::{SceneComponent, SceneHandle};
    pub use crate::config::{EmitterConfig, EmitterKind};
    pub use crate::error::LoadError;
    pub use crate::params::{ParamTable, Value};
    pub use crate::sprite::{DirectorySpriteResolver, Sprite, SpriteResolver};
    pub use crate::time::FrameClock;
    pub use crate::vertex::Vertex;
    pub use crate::ParticleEmitter;
    pub use crate::{Vec2, Vec4};
}
