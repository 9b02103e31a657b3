//! Emitter configuration: the full parameter set of the legacy format.
//!
//! [`EmitterConfig`] is the immutable-per-frame bag of tunables the
//! simulator reads: spawn geometry, kinematics, orbit parameters, visual
//! ramps and the pool/rate group. Most parameters come as a `(base,
//! variance)` pair; at spawn time each is sampled once as
//! `base + variance * U(-1, 1)`.
//!
//! Configuration is all-or-nothing: [`EmitterConfig::from_table`] either
//! maps every required key onto a fresh config or fails without touching
//! anything. The two clamped setters (`set_max_particles`,
//! `set_particle_life_span`) keep the spawn-cadence formula
//! `life_span / max_particles` well defined.

use glam::{Vec2, Vec4};

use crate::blend::BlendMode;
use crate::error::LoadError;
use crate::params::ParamTable;
use crate::sprite::{Sprite, SpriteResolver};

/// The kinematic rule family particles obey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterKind {
    /// Free flight under gravity plus radial/tangential acceleration.
    #[default]
    Gravity,
    /// Parametric orbit decay around the source position.
    Radial,
}

impl EmitterKind {
    /// Decode the `emitterType` field of the legacy format.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => EmitterKind::Radial,
            _ => EmitterKind::Gravity,
        }
    }
}

/// Complete emitter parameter set.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    duration: f32,
    kind: EmitterKind,
    source_position: Vec2,
    source_position_variance: Vec2,

    max_particles: i32,
    particle_life_span: f32,
    particle_life_span_variance: f32,
    start_particle_size: f32,
    start_particle_size_variance: f32,
    end_particle_size: f32,
    end_particle_size_variance: f32,
    emit_angle: f32,
    emit_angle_variance: f32,

    speed: f32,
    speed_variance: f32,
    gravity: Vec2,
    radial_acceleration: f32,
    radial_acceleration_variance: f32,
    tangential_acceleration: f32,
    tangential_acceleration_variance: f32,

    max_radius: f32,
    max_radius_variance: f32,
    min_radius: f32,
    rotate_per_second: f32,
    rotate_per_second_variance: f32,

    start_color: Vec4,
    start_color_variance: Vec4,
    end_color: Vec4,
    end_color_variance: Vec4,

    blend_func_source: i32,
    blend_func_destination: i32,
    blend_mode: BlendMode,

    sprite: Option<Sprite>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            duration: -1.0,
            kind: EmitterKind::Gravity,
            source_position: Vec2::ZERO,
            source_position_variance: Vec2::ZERO,
            max_particles: 32,
            particle_life_span: 1.0,
            particle_life_span_variance: 0.0,
            start_particle_size: 1.0,
            start_particle_size_variance: 0.0,
            end_particle_size: 0.0,
            end_particle_size_variance: 0.0,
            emit_angle: 0.0,
            emit_angle_variance: 0.0,
            speed: 100.0,
            speed_variance: 0.0,
            gravity: Vec2::ZERO,
            radial_acceleration: 0.0,
            radial_acceleration_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_acceleration_variance: 0.0,
            max_radius: 100.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            rotate_per_second: 100.0,
            rotate_per_second_variance: 100.0,
            start_color: Vec4::ONE,
            start_color_variance: Vec4::ZERO,
            end_color: Vec4::ONE,
            end_color_variance: Vec4::ZERO,
            blend_func_source: 770,
            blend_func_destination: 1,
            blend_mode: BlendMode::AddAlpha,
            sprite: None,
        }
    }
}

impl EmitterConfig {
    /// Map a flat parameter table onto a fresh configuration.
    ///
    /// Every key of the legacy format is required; the first missing one
    /// rejects the load with [`LoadError::MissingParameter`]. The sprite
    /// named by `textureFileName` is resolved through `resolver`, failing
    /// with [`LoadError::ResourceNotFound`].
    pub fn from_table<R: SpriteResolver>(
        table: &ParamTable,
        resolver: &R,
    ) -> Result<Self, LoadError> {
        let sprite_name = table.require_str("textureFileName")?;
        let sprite = resolver
            .resolve(sprite_name)
            .ok_or_else(|| LoadError::ResourceNotFound(sprite_name.to_string()))?;

        let mut config = Self::default();
        config.set_sprite(sprite);
        config.set_duration(table.require_f32("duration")?);
        config.set_emitter_kind(EmitterKind::from_i32(table.require_f32("emitterType")? as i32));
        config.set_source_position(Vec2::new(
            table.require_f32("sourcePositionx")?,
            table.require_f32("sourcePositiony")?,
        ));
        config.set_source_position_variance(Vec2::new(
            table.require_f32("sourcePositionVariancex")?,
            table.require_f32("sourcePositionVariancey")?,
        ));

        config.set_max_particles(table.require_f32("maxParticles")? as i32);
        config.set_particle_life_span(table.require_f32("particleLifespan")?);
        config.set_particle_life_span_variance(table.require_f32("particleLifespanVariance")?);
        config.set_start_particle_size(table.require_f32("startParticleSize")?);
        config.set_start_particle_size_variance(table.require_f32("startParticleSizeVariance")?);
        config.set_end_particle_size(table.require_f32("finishParticleSize")?);
        config.set_end_particle_size_variance(table.require_f32("finishParticleSizeVariance")?);
        config.set_emit_angle(table.require_f32("angle")?);
        config.set_emit_angle_variance(table.require_f32("angleVariance")?);

        config.set_speed(table.require_f32("speed")?);
        config.set_speed_variance(table.require_f32("speedVariance")?);
        config.set_gravity(Vec2::new(
            table.require_f32("gravityx")?,
            table.require_f32("gravityy")?,
        ));

        config.set_radial_acceleration(table.require_f32("radialAcceleration")?);
        // The legacy files abbreviate the variance keys for the accelerations.
        config.set_radial_acceleration_variance(table.require_f32("radialAccelVariance")?);
        config.set_tangential_acceleration(table.require_f32("tangentialAcceleration")?);
        config.set_tangential_acceleration_variance(table.require_f32("tangentialAccelVariance")?);

        config.set_max_radius(table.require_f32("maxRadius")?);
        config.set_max_radius_variance(table.require_f32("maxRadiusVariance")?);
        config.set_min_radius(table.require_f32("minRadius")?);
        config.set_rotate_per_second(table.require_f32("rotatePerSecond")?);
        config.set_rotate_per_second_variance(table.require_f32("rotatePerSecondVariance")?);

        config.set_start_color(read_color(table, "startColor")?);
        config.set_start_color_variance(read_color(table, "startColorVariance")?);
        config.set_end_color(read_color(table, "finishColor")?);
        config.set_end_color_variance(read_color(table, "finishColorVariance")?);

        config.set_blend_function(
            table.require_i32("blendFuncSource")?,
            table.require_i32("blendFuncDestination")?,
        );

        log::debug!(
            "emitter config loaded: sprite {}, {} particles max, {:?} model",
            sprite_name,
            config.max_particles,
            config.kind,
        );
        Ok(config)
    }

    // =========================================================================
    // SETTERS
    // =========================================================================

    /// Set the emission duration: negative is infinite, zero is terminal,
    /// positive counts down.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    /// Select the emitter model.
    pub fn set_emitter_kind(&mut self, kind: EmitterKind) {
        self.kind = kind;
    }

    /// Set the spawn center.
    pub fn set_source_position(&mut self, position: Vec2) {
        self.source_position = position;
    }

    /// Set the spawn position variance.
    pub fn set_source_position_variance(&mut self, variance: Vec2) {
        self.source_position_variance = variance;
    }

    /// Set the pool capacity, clamped to `>= 0`.
    ///
    /// The emitter owning this config resizes its pool to match; see
    /// [`ParticleEmitter::set_max_particles`](crate::ParticleEmitter::set_max_particles).
    pub fn set_max_particles(&mut self, max_particles: i32) {
        self.max_particles = max_particles.max(0);
    }

    /// Set the base particle lifespan, clamped to `>= 0.01`.
    ///
    /// The spawn cadence divides by this value, so zero must never reach it.
    pub fn set_particle_life_span(&mut self, life_span: f32) {
        self.particle_life_span = life_span.max(0.01);
    }

    /// Set the lifespan variance.
    pub fn set_particle_life_span_variance(&mut self, variance: f32) {
        self.particle_life_span_variance = variance;
    }

    /// Set the spawn-time sprite size.
    pub fn set_start_particle_size(&mut self, size: f32) {
        self.start_particle_size = size;
    }

    /// Set the spawn-time size variance.
    pub fn set_start_particle_size_variance(&mut self, variance: f32) {
        self.start_particle_size_variance = variance;
    }

    /// Set the end-of-life sprite size.
    pub fn set_end_particle_size(&mut self, size: f32) {
        self.end_particle_size = size;
    }

    /// Set the end-of-life size variance.
    pub fn set_end_particle_size_variance(&mut self, variance: f32) {
        self.end_particle_size_variance = variance;
    }

    /// Set the emission angle.
    pub fn set_emit_angle(&mut self, angle: f32) {
        self.emit_angle = angle;
    }

    /// Set the emission angle variance.
    pub fn set_emit_angle_variance(&mut self, variance: f32) {
        self.emit_angle_variance = variance;
    }

    /// Set the initial particle speed (gravity model).
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Set the speed variance.
    pub fn set_speed_variance(&mut self, variance: f32) {
        self.speed_variance = variance;
    }

    /// Set the gravity vector (gravity model).
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Set the radial acceleration (gravity model).
    pub fn set_radial_acceleration(&mut self, accel: f32) {
        self.radial_acceleration = accel;
    }

    /// Set the radial acceleration variance.
    pub fn set_radial_acceleration_variance(&mut self, variance: f32) {
        self.radial_acceleration_variance = variance;
    }

    /// Set the tangential acceleration (gravity model).
    pub fn set_tangential_acceleration(&mut self, accel: f32) {
        self.tangential_acceleration = accel;
    }

    /// Set the tangential acceleration variance.
    pub fn set_tangential_acceleration_variance(&mut self, variance: f32) {
        self.tangential_acceleration_variance = variance;
    }

    /// Set the starting orbit radius (radial model).
    pub fn set_max_radius(&mut self, radius: f32) {
        self.max_radius = radius;
    }

    /// Set the orbit radius variance.
    pub fn set_max_radius_variance(&mut self, variance: f32) {
        self.max_radius_variance = variance;
    }

    /// Set the orbit radius below which particles retire (radial model).
    pub fn set_min_radius(&mut self, radius: f32) {
        self.min_radius = radius;
    }

    /// Set the orbit angular rate (radial model).
    pub fn set_rotate_per_second(&mut self, rate: f32) {
        self.rotate_per_second = rate;
    }

    /// Set the orbit angular rate variance.
    pub fn set_rotate_per_second_variance(&mut self, variance: f32) {
        self.rotate_per_second_variance = variance;
    }

    /// Set the spawn-time color.
    pub fn set_start_color(&mut self, color: Vec4) {
        self.start_color = color;
    }

    /// Set the spawn-time color variance.
    pub fn set_start_color_variance(&mut self, variance: Vec4) {
        self.start_color_variance = variance;
    }

    /// Set the end-of-life color.
    pub fn set_end_color(&mut self, color: Vec4) {
        self.end_color = color;
    }

    /// Set the end-of-life color variance.
    pub fn set_end_color_variance(&mut self, variance: Vec4) {
        self.end_color_variance = variance;
    }

    /// Set the raw blend factor pair and derive the semantic blend mode.
    ///
    /// Unknown factor pairs fall back to [`BlendMode::Alpha`].
    pub fn set_blend_function(&mut self, source: i32, destination: i32) {
        self.blend_func_source = source;
        self.blend_func_destination = destination;
        self.blend_mode = BlendMode::from_factors(source, destination);
    }

    /// Set the sprite rendered for each particle.
    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = Some(sprite);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Emission duration.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Emitter model.
    pub fn emitter_kind(&self) -> EmitterKind {
        self.kind
    }

    /// Spawn center.
    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// Spawn position variance.
    pub fn source_position_variance(&self) -> Vec2 {
        self.source_position_variance
    }

    /// Pool capacity.
    pub fn max_particles(&self) -> i32 {
        self.max_particles
    }

    /// Base particle lifespan.
    pub fn particle_life_span(&self) -> f32 {
        self.particle_life_span
    }

    /// Lifespan variance.
    pub fn particle_life_span_variance(&self) -> f32 {
        self.particle_life_span_variance
    }

    /// Spawn-time sprite size.
    pub fn start_particle_size(&self) -> f32 {
        self.start_particle_size
    }

    /// Spawn-time size variance.
    pub fn start_particle_size_variance(&self) -> f32 {
        self.start_particle_size_variance
    }

    /// End-of-life sprite size.
    pub fn end_particle_size(&self) -> f32 {
        self.end_particle_size
    }

    /// End-of-life size variance.
    pub fn end_particle_size_variance(&self) -> f32 {
        self.end_particle_size_variance
    }

    /// Emission angle.
    pub fn emit_angle(&self) -> f32 {
        self.emit_angle
    }

    /// Emission angle variance.
    pub fn emit_angle_variance(&self) -> f32 {
        self.emit_angle_variance
    }

    /// Initial particle speed.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed variance.
    pub fn speed_variance(&self) -> f32 {
        self.speed_variance
    }

    /// Gravity vector.
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Radial acceleration.
    pub fn radial_acceleration(&self) -> f32 {
        self.radial_acceleration
    }

    /// Radial acceleration variance.
    pub fn radial_acceleration_variance(&self) -> f32 {
        self.radial_acceleration_variance
    }

    /// Tangential acceleration.
    pub fn tangential_acceleration(&self) -> f32 {
        self.tangential_acceleration
    }

    /// Tangential acceleration variance.
    pub fn tangential_acceleration_variance(&self) -> f32 {
        self.tangential_acceleration_variance
    }

    /// Starting orbit radius.
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Orbit radius variance.
    pub fn max_radius_variance(&self) -> f32 {
        self.max_radius_variance
    }

    /// Retirement orbit radius.
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Orbit angular rate.
    pub fn rotate_per_second(&self) -> f32 {
        self.rotate_per_second
    }

    /// Orbit angular rate variance.
    pub fn rotate_per_second_variance(&self) -> f32 {
        self.rotate_per_second_variance
    }

    /// Spawn-time color.
    pub fn start_color(&self) -> Vec4 {
        self.start_color
    }

    /// Spawn-time color variance.
    pub fn start_color_variance(&self) -> Vec4 {
        self.start_color_variance
    }

    /// End-of-life color.
    pub fn end_color(&self) -> Vec4 {
        self.end_color
    }

    /// End-of-life color variance.
    pub fn end_color_variance(&self) -> Vec4 {
        self.end_color_variance
    }

    /// Raw source blend factor.
    pub fn blend_func_source(&self) -> i32 {
        self.blend_func_source
    }

    /// Raw destination blend factor.
    pub fn blend_func_destination(&self) -> i32 {
        self.blend_func_destination
    }

    /// Semantic blend mode derived from the factor pair.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// The resolved sprite, if any.
    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }
}

/// Read a `{prefix}Red/Green/Blue/Alpha` quad from the table.
fn read_color(table: &ParamTable, prefix: &str) -> Result<Vec4, LoadError> {
    Ok(Vec4::new(
        table.require_f32(&format!("{}Red", prefix))?,
        table.require_f32(&format!("{}Green", prefix))?,
        table.require_f32(&format!("{}Blue", prefix))?,
        table.require_f32(&format!("{}Alpha", prefix))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Value;

    #[test]
    fn test_max_particles_clamps_negative() {
        let mut config = EmitterConfig::default();
        config.set_max_particles(-5);
        assert_eq!(config.max_particles(), 0);
    }

    #[test]
    fn test_life_span_clamps_to_cadence_floor() {
        let mut config = EmitterConfig::default();
        config.set_particle_life_span(0.0);
        assert_eq!(config.particle_life_span(), 0.01);
        config.set_particle_life_span(2.0);
        assert_eq!(config.particle_life_span(), 2.0);
    }

    #[test]
    fn test_blend_function_maps_to_mode() {
        let mut config = EmitterConfig::default();
        config.set_blend_function(1, 1);
        assert_eq!(config.blend_mode(), BlendMode::Add);
        assert_eq!(config.blend_func_source(), 1);
        assert_eq!(config.blend_func_destination(), 1);

        config.set_blend_function(12345, 678);
        assert_eq!(config.blend_mode(), BlendMode::Alpha);
    }

    #[test]
    fn test_emitter_kind_decoding() {
        assert_eq!(EmitterKind::from_i32(0), EmitterKind::Gravity);
        assert_eq!(EmitterKind::from_i32(1), EmitterKind::Radial);
        assert_eq!(EmitterKind::from_i32(7), EmitterKind::Gravity);
    }

    #[test]
    fn test_from_table_names_the_missing_key() {
        let mut table = ParamTable::new();
        table.insert("textureFileName", Value::Str("fire.png".to_string()));
        let resolver = |name: &str| Some(Sprite::new(name, 8, 8));

        let err = EmitterConfig::from_table(&table, &resolver).unwrap_err();
        assert_eq!(err, LoadError::MissingParameter("duration".to_string()));
    }

    #[test]
    fn test_from_table_reports_unresolved_sprite() {
        let mut table = ParamTable::new();
        table.insert("textureFileName", Value::Str("gone.png".to_string()));
        let resolver = |_: &str| None;

        let err = EmitterConfig::from_table(&table, &resolver).unwrap_err();
        assert_eq!(err, LoadError::ResourceNotFound("gone.png".to_string()));
    }
}
