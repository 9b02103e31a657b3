//! The particle simulator: pool, spawn scheduler, integrator, vertex builder.
//!
//! [`ParticleEmitter`] owns a bounded pool of particles and drives their
//! whole lifecycle. Each frame the host calls [`advance`](ParticleEmitter::advance),
//! which retires expired particles, integrates the survivors, emits new
//! particles on a fixed cadence and counts down any finite duration. Before
//! rendering, [`build_vertices`](ParticleEmitter::build_vertices) lazily
//! converts the live pool into a quad-vertex stream.
//!
//! # Pool discipline
//!
//! Live particles are packed into pool indices `[0, live_count)`. Retirement
//! swaps the retiring slot with the last live one and shrinks the count, so
//! removal is O(1), the pool never has holes, and no frame allocates.
//! Consumers must not assume index stability across frames.
//!
//! # Spawn cadence
//!
//! Spawning is a fixed-cadence accumulator, not a Poisson process:
//! `cadence = particle_life_span / max_particles`, which sustains a
//! steady-state population of about `max_particles` live particles.
//!
//! # Example
//!
//! ```ignore
//! use ember2d::prelude::*;
//!
//! let resolver = |name: &str| Some(Sprite::new(name, 32, 32));
//! let mut emitter = ParticleEmitter::new();
//! emitter.load_str(include_str!("fire.plist"), &resolver)?;
//!
//! loop {
//!     emitter.advance(1.0 / 60.0);
//!     let (vertices, rebuilt) = emitter.build_vertices();
//!     // hand `vertices` to the sprite batcher
//! }
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::component::SceneHandle;
use crate::config::{EmitterConfig, EmitterKind};
use crate::error::LoadError;
use crate::params::ParamTable;
use crate::particle::Particle;
use crate::plist;
use crate::sprite::SpriteResolver;
use crate::vertex::{pack_color, Vertex, QUAD_UVS};

/// A 2D sprite particle emitter.
///
/// One emitter instance is single-logical-thread state: the host must
/// serialize `advance` and `build_vertices` calls per instance, but
/// independent instances can run on separate worker threads.
pub struct ParticleEmitter {
    config: EmitterConfig,
    particles: Vec<Particle>,
    live: usize,
    emit_timer: f32,
    remaining_duration: f32,
    vertices: Vec<Vertex>,
    vertices_dirty: bool,
    units_per_pixel: f32,
    enabled: bool,
    scene: Option<SceneHandle>,
    rng: SmallRng,
}

impl ParticleEmitter {
    /// Create an emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an emitter from an existing configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        let mut emitter = Self {
            config: EmitterConfig::default(),
            particles: Vec::new(),
            live: 0,
            emit_timer: 0.0,
            remaining_duration: -1.0,
            vertices: Vec::new(),
            vertices_dirty: true,
            units_per_pixel: 1.0,
            enabled: true,
            scene: None,
            rng: SmallRng::from_entropy(),
        };
        emitter.apply_config(config);
        emitter
    }

    /// Seed the spawn-time RNG for reproducible runs.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Load an emitter definition from plist document text.
    ///
    /// All-or-nothing: on any error the current configuration and pool are
    /// left untouched.
    pub fn load_str<R: SpriteResolver>(
        &mut self,
        source: &str,
        resolver: &R,
    ) -> Result<(), LoadError> {
        let table = plist::parse(source)?;
        self.configure(&table, resolver)
    }

    /// Apply a flat parameter table produced by an external front-end.
    ///
    /// All-or-nothing, like [`load_str`](Self::load_str).
    pub fn configure<R: SpriteResolver>(
        &mut self,
        table: &ParamTable,
        resolver: &R,
    ) -> Result<(), LoadError> {
        let config = EmitterConfig::from_table(table, resolver)?;
        self.apply_config(config);
        Ok(())
    }

    /// Replace the configuration, resizing the pool and restarting the
    /// duration countdown.
    pub fn apply_config(&mut self, config: EmitterConfig) {
        self.config = config;
        self.remaining_duration = self.config.duration();
        self.emit_timer = 0.0;
        self.resize_pool();
    }

    /// Set the pool capacity.
    ///
    /// Shrinking below the current live count discards the overflow live
    /// particles outright rather than retiring them gracefully. This is an
    /// explicit simplification of this emitter, not an oversight.
    pub fn set_max_particles(&mut self, max_particles: i32) {
        self.config.set_max_particles(max_particles);
        self.resize_pool();
    }

    fn resize_pool(&mut self) {
        let capacity = self.config.max_particles() as usize;
        self.particles.resize_with(capacity, Particle::default);
        self.vertices.reserve(capacity.saturating_mul(4));
        if self.live > capacity {
            log::warn!(
                "particle pool shrink discards {} live particles",
                self.live - capacity
            );
            self.live = capacity;
        }
        self.vertices_dirty = true;
    }

    /// Set the world-units-per-pixel scale applied to generated vertices.
    pub fn set_units_per_pixel(&mut self, units_per_pixel: f32) {
        self.units_per_pixel = units_per_pixel;
        self.vertices_dirty = true;
    }

    /// Attach to a host scene.
    pub fn attach(&mut self, scene: SceneHandle) {
        self.scene = Some(scene);
    }

    /// Enable or disable per-frame advancement.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // =========================================================================
    // PER-FRAME DRIVER
    // =========================================================================

    /// Advance the simulation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        // Retire-or-integrate pass. Retirement is checked before integration:
        // a particle with no more life than dt vanishes without being
        // advanced this frame.
        let mut index = 0;
        while index < self.live {
            if self.particles[index].time_to_live > dt {
                let mut particle = self.particles[index];
                update_particle(&self.config, &mut particle, dt);
                self.particles[index] = particle;
                index += 1;
            } else {
                self.particles.swap(index, self.live - 1);
                self.live -= 1;
            }
        }

        // Emission runs while the duration is infinite (negative) or still
        // counting down; exactly zero is terminal.
        if self.remaining_duration != 0.0 {
            let cadence =
                self.config.particle_life_span() / self.config.max_particles() as f32;
            self.emit_timer += dt;
            while self.emit_timer > 0.0 {
                self.emit_one();
                self.emit_timer -= cadence;
            }

            if self.remaining_duration > 0.0 {
                self.remaining_duration = (self.remaining_duration - dt).max(0.0);
            }
        }

        self.vertices_dirty = true;
    }

    /// Spawn a single particle, sampling every parameter once.
    ///
    /// No-op at capacity. A sampled lifespan `<= 0` silently skips the spawn;
    /// the cadence budget for it is still consumed, not retried.
    fn emit_one(&mut self) {
        let capacity = self.config.max_particles() as usize;
        if self.live >= capacity || self.live >= self.particles.len() {
            return;
        }

        let cfg = &self.config;
        let rng = &mut self.rng;
        let mut signed = || rng.gen_range(-1.0_f32..1.0);

        let lifespan =
            cfg.particle_life_span() + cfg.particle_life_span_variance() * signed();
        if lifespan <= 0.0 {
            return;
        }

        let position = Vec2::new(
            cfg.source_position().x + cfg.source_position_variance().x * signed(),
            cfg.source_position().y + cfg.source_position_variance().y * signed(),
        );
        let angle = cfg.emit_angle() + cfg.emit_angle_variance() * signed();
        let speed = cfg.speed() + cfg.speed_variance() * signed();

        let start_size = (cfg.start_particle_size()
            + cfg.start_particle_size_variance() * signed())
        .max(0.1);
        let end_size =
            (cfg.end_particle_size() + cfg.end_particle_size_variance() * signed()).max(0.1);

        // A color variance is scaled by one shared draw, not one per channel.
        let start_color = cfg.start_color() + cfg.start_color_variance() * signed();
        let end_color = cfg.end_color() + cfg.end_color_variance() * signed();

        // The legacy format carries a maxRadiusVariance key whose draw is
        // taken and thrown away: orbits always start at max_radius.
        let _ = cfg.max_radius_variance() * signed();

        let particle = Particle {
            time_to_live: lifespan,
            start_position: cfg.source_position(),
            position,
            velocity: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            radius: cfg.max_radius(),
            radius_delta: cfg.max_radius() / lifespan,
            // Rotation takes an independent draw from the same emit-angle
            // distribution, not the velocity angle.
            rotation: cfg.emit_angle() + cfg.emit_angle_variance() * signed(),
            rotation_delta: cfg.rotate_per_second() + cfg.rotate_per_second_variance() * signed(),
            radial_accel: cfg.radial_acceleration()
                + cfg.radial_acceleration_variance() * signed(),
            tangential_accel: cfg.tangential_acceleration()
                + cfg.tangential_acceleration_variance() * signed(),
            size: start_size,
            size_delta: (end_size - start_size) / lifespan,
            color: start_color,
            color_delta: (end_color - start_color) / lifespan,
        };

        self.particles[self.live] = particle;
        self.live += 1;
    }

    // =========================================================================
    // VERTEX STREAM
    // =========================================================================

    /// Build the quad-vertex stream for the live particles.
    ///
    /// Returns the vertex slice and whether it was rebuilt since the last
    /// call. The buffer is cleared and fully repopulated on rebuild; with
    /// pools in the tens to low hundreds this beats incremental patching.
    /// Without a usable sprite the stream stays empty and the dirty flag
    /// stays set.
    pub fn build_vertices(&mut self) -> (&[Vertex], bool) {
        if !self.vertices_dirty {
            return (&self.vertices, false);
        }

        self.vertices.clear();

        let Some(sprite) = self.config.sprite() else {
            return (&self.vertices, true);
        };
        if sprite.is_empty() {
            return (&self.vertices, true);
        }

        let scale = self.units_per_pixel;
        for particle in &self.particles[..self.live] {
            // Quad rotation is fixed at identity in this format; the angle
            // terms stay in the half-extent formula with cos=1, sin=0.
            let (c, s) = (1.0_f32, 0.0_f32);
            let add = (c + s) * particle.size * 0.5;
            let sub = (c - s) * particle.size * 0.5;
            let color = pack_color(particle.color);
            let Vec2 { x, y } = particle.position;

            let corners = [
                [x - sub, y - add],
                [x - add, y + sub],
                [x + sub, y + add],
                [x + add, y - sub],
            ];
            for (corner, uv) in corners.iter().zip(QUAD_UVS) {
                self.vertices.push(Vertex {
                    position: [corner[0] * scale, corner[1] * scale, 0.0],
                    color,
                    uv,
                });
            }
        }

        self.vertices_dirty = false;
        (&self.vertices, true)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The current configuration.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Number of live particles.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// The live particles, packed at the front of the pool.
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.live]
    }

    /// Seconds of emission left; negative means infinite, zero means
    /// emission has halted permanently.
    pub fn remaining_duration(&self) -> f32 {
        self.remaining_duration
    }

    /// World-units-per-pixel scale applied to generated vertices.
    pub fn units_per_pixel(&self) -> f32 {
        self.units_per_pixel
    }

    /// Whether per-frame advancement is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The attached scene, if any.
    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance one particle by `dt` under the configured emitter model.
fn update_particle(config: &EmitterConfig, particle: &mut Particle, dt: f32) {
    // advance() retires particles with time_to_live <= dt before integrating,
    // so the clamp only guards direct large-step calls.
    let dt = dt.min(particle.time_to_live);
    particle.time_to_live -= dt;

    match config.emitter_kind() {
        EmitterKind::Radial => {
            particle.rotation += particle.rotation_delta * dt;
            particle.radius -= particle.radius_delta * dt;

            // Position is a function of (rotation, radius), not integrated
            // velocity.
            let offset = Vec2::new(particle.rotation.cos(), particle.rotation.sin());
            particle.position = config.source_position() - offset * particle.radius;

            if particle.radius < config.min_radius() {
                particle.time_to_live = 0.0;
            }
        }
        EmitterKind::Gravity => {
            let displacement = particle.position - particle.start_position;
            // Floor the magnitude so the spawn instant cannot divide by ~0.
            let distance = displacement.length().max(0.01);
            let radial = displacement / distance;
            let tangential = Vec2::new(-radial.y, radial.x);

            let accel = config.gravity()
                + radial * particle.radial_accel
                + tangential * particle.tangential_accel;
            particle.velocity += accel * dt;
            particle.position += particle.velocity * dt;
        }
    }

    particle.size += particle.size_delta * dt;
    particle.color += particle.color_delta * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Sprite;

    fn quiet_config() -> EmitterConfig {
        let mut config = EmitterConfig::default();
        config.set_sprite(Sprite::new("test.png", 8, 8));
        config.set_max_particles(8);
        config.set_particle_life_span(1.0);
        config.set_speed(0.0);
        config.set_rotate_per_second(0.0);
        config.set_rotate_per_second_variance(0.0);
        config
    }

    #[test]
    fn test_zero_capacity_never_spawns() {
        let mut config = quiet_config();
        config.set_max_particles(0);
        let mut emitter = ParticleEmitter::with_config(config).with_rng_seed(7);

        for _ in 0..10 {
            emitter.advance(0.1);
            assert_eq!(emitter.live_count(), 0);
        }
    }

    #[test]
    fn test_live_particles_always_have_life_left() {
        let mut config = quiet_config();
        // Lifespan draws that land at or below zero skip the spawn, so
        // nothing dead-on-arrival ever enters the pool.
        config.set_particle_life_span(0.01);
        config.set_particle_life_span_variance(0.5);
        let mut emitter = ParticleEmitter::with_config(config).with_rng_seed(99);

        for _ in 0..50 {
            emitter.advance(0.02);
            for particle in emitter.particles() {
                assert!(particle.time_to_live > 0.0);
            }
        }
    }

    #[test]
    fn test_pool_shrink_discards_live_particles() {
        let mut emitter = ParticleEmitter::with_config(quiet_config()).with_rng_seed(3);
        for _ in 0..8 {
            emitter.advance(0.125);
        }
        assert!(emitter.live_count() > 2);

        emitter.set_max_particles(2);
        assert_eq!(emitter.live_count(), 2);
        assert_eq!(emitter.config().max_particles(), 2);
    }

    #[test]
    fn test_disabled_emitter_does_not_advance() {
        let mut emitter = ParticleEmitter::with_config(quiet_config()).with_rng_seed(5);
        emitter.set_enabled(false);
        emitter.advance(1.0);
        assert_eq!(emitter.live_count(), 0);
    }

    #[test]
    fn test_vertex_stream_is_lazy() {
        let mut emitter = ParticleEmitter::with_config(quiet_config()).with_rng_seed(11);
        emitter.advance(0.5);

        let (vertices, rebuilt) = emitter.build_vertices();
        assert!(rebuilt);
        let count = vertices.len();
        assert!(count > 0);
        assert_eq!(count % 4, 0);

        // Unchanged state: no rebuild.
        let (vertices, rebuilt) = emitter.build_vertices();
        assert!(!rebuilt);
        assert_eq!(vertices.len(), count);

        emitter.advance(0.01);
        let (_, rebuilt) = emitter.build_vertices();
        assert!(rebuilt);
    }

    #[test]
    fn test_missing_sprite_yields_empty_stream() {
        // Default config carries no sprite.
        let mut config = EmitterConfig::default();
        config.set_max_particles(8);
        config.set_speed(0.0);
        let mut emitter = ParticleEmitter::with_config(config).with_rng_seed(1);
        emitter.advance(0.5);

        let (vertices, rebuilt) = emitter.build_vertices();
        assert!(rebuilt);
        assert!(vertices.is_empty());

        // The dirty flag survives a sprite-less build.
        let (_, rebuilt) = emitter.build_vertices();
        assert!(rebuilt);
    }

    #[test]
    fn test_quad_corners_and_uvs() {
        let mut config = quiet_config();
        config.set_max_particles(1);
        config.set_start_particle_size(4.0);
        config.set_end_particle_size(4.0);
        let mut emitter = ParticleEmitter::with_config(config).with_rng_seed(2);
        emitter.advance(0.25);
        assert_eq!(emitter.live_count(), 1);

        let center = emitter.particles()[0].position;
        let size = emitter.particles()[0].size;
        let half = size * 0.5;
        let (vertices, _) = emitter.build_vertices();
        assert_eq!(vertices.len(), 4);

        assert_eq!(vertices[0].position[0], center.x - half);
        assert_eq!(vertices[0].position[1], center.y - half);
        assert_eq!(vertices[2].position[0], center.x + half);
        assert_eq!(vertices[2].position[1], center.y + half);
        for (vertex, uv) in vertices.iter().zip(QUAD_UVS) {
            assert_eq!(vertex.uv, uv);
        }
    }

    #[test]
    fn test_failed_load_leaves_state_untouched() {
        let mut emitter = ParticleEmitter::with_config(quiet_config()).with_rng_seed(4);
        emitter.advance(0.5);
        let live_before = emitter.live_count();
        let max_before = emitter.config().max_particles();

        let resolver = |_: &str| None::<Sprite>;
        let err = emitter
            .load_str("<plist><dict></dict></plist>", &resolver)
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingParameter(_)));
        assert_eq!(emitter.live_count(), live_before);
        assert_eq!(emitter.config().max_particles(), max_before);
    }
}
