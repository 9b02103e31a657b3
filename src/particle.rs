//! The per-particle value type.

use glam::{Vec2, Vec4};

/// State of a single live particle.
///
/// Particles are plain values owned by the emitter's pool; every field is
/// sampled once at spawn and then advanced by the integrator. A particle is
/// live while `time_to_live > 0`.
///
/// The radial fields (`radius*`, `rotation*`) are only driven under the
/// radial emitter model, and the acceleration fields only under the gravity
/// model; the unused group simply stays at its spawn values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    /// Seconds of life remaining.
    pub time_to_live: f32,
    /// Position at spawn, the center the gravity model measures displacement from.
    pub start_position: Vec2,
    /// Current position.
    pub position: Vec2,
    /// Current velocity (gravity model only).
    pub velocity: Vec2,
    /// Current orbit radius (radial model only).
    pub radius: f32,
    /// Radius shrink rate per second (radial model only).
    pub radius_delta: f32,
    /// Current orbit angle (radial model only).
    pub rotation: f32,
    /// Orbit angular rate per second (radial model only).
    pub rotation_delta: f32,
    /// Outward acceleration along the displacement direction (gravity model only).
    pub radial_accel: f32,
    /// Acceleration perpendicular to the displacement direction (gravity model only).
    pub tangential_accel: f32,
    /// Current sprite size.
    pub size: f32,
    /// Size change per second toward the sampled end size.
    pub size_delta: f32,
    /// Current RGBA color. Channels are not clamped during simulation.
    pub color: Vec4,
    /// Color change per second toward the sampled end color.
    pub color_delta: Vec4,
}
