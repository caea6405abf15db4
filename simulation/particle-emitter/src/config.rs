//! Runtime emitter configuration
//!
//! [`SimulationConfig`] holds every parameter in the units the simulation
//! works in: milliseconds for durations, radians for angles and fractions for
//! variances and friction. Editor-facing units live in
//! [`EmitterSettings`](crate::settings::EmitterSettings).

use glam::Vec3;
use thiserror::Error;

use crate::variance::Varied;

/// Coordinate frame particles move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Space {
    /// Particles are parented to the emitter node and follow its transform
    #[default]
    Local,
    /// Particles are parented to the scene root and keep a snapshot of the
    /// emitter's orientation taken when they spawn
    World,
}

/// Geometry new particles spawn from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Shape {
    /// Every particle spawns at the emitter origin
    #[default]
    Point,
    /// Particles spawn on the XZ plane around the emitter origin
    Plane {
        /// Extent along X
        width: f32,
        /// Extent along Z
        height: f32,
    },
}

/// Non-fatal configuration problems
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Fade windows cannot both complete within the shortest possible lifetime
    #[error(
        "total fade in/out time ({fade_ms} ms) exceeds minimum lifetime value ({min_lifetime_ms} ms)"
    )]
    FadeExceedsLifetime {
        /// Sum of fade-in and fade-out durations
        fade_ms: f32,
        /// Shortest lifetime the variance can produce
        min_lifetime_ms: f32,
    },
}

/// Immutable parameters for a single emitter run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimulationConfig {
    /// Frame particles move in
    pub space: Space,
    /// Spawn geometry
    pub shape: Shape,
    /// Particles per second
    pub birth_rate: Varied,
    /// Particle lifetime in milliseconds
    pub lifetime_ms: Varied,
    /// Fade-in duration in milliseconds
    pub fade_in_ms: f32,
    /// Fade-out duration in milliseconds
    pub fade_out_ms: f32,
    /// Initial speed in units per second
    pub speed: Varied,
    /// Half-angle of the spray cone in radians, `0..=PI`
    pub spray_angle: f32,
    /// Constant acceleration in units per second squared
    pub acceleration: Vec3,
    /// Start each particle at a random orientation
    pub random_initial_rotation: bool,
    /// Angular velocity in radians per second, per Euler axis
    pub rotation_rate: Vec3,
    /// Variance fraction applied uniformly to all rotation axes
    pub rotation_variance: f32,
    /// Randomly flip the sign of each rotation axis per particle
    pub rotation_mirrored: bool,
    /// Scale at spawn
    pub scale_start: Varied,
    /// Scale at the end of life
    pub scale_end: Varied,
    /// Clamp world-space particles to the ground plane `y = 0`
    pub collision_enabled: bool,
    /// Velocity lost per tick of ground contact, `0..=1`
    pub friction_factor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            space: Space::Local,
            shape: Shape::Point,
            birth_rate: Varied::fixed(10.0),
            lifetime_ms: Varied::fixed(2000.0),
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
            speed: Varied::fixed(10.0),
            spray_angle: 0.0,
            acceleration: Vec3::ZERO,
            random_initial_rotation: false,
            rotation_rate: Vec3::ZERO,
            rotation_variance: 0.0,
            rotation_mirrored: true,
            scale_start: Varied::fixed(1.0),
            scale_end: Varied::fixed(1.0),
            collision_enabled: false,
            friction_factor: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Shortest lifetime the configured variance can produce, before the
    /// hard floor is applied
    pub fn minimum_lifetime_ms(&self) -> f32 {
        self.lifetime_ms.base * (1.0 - self.lifetime_ms.variance / 2.0)
    }

    /// Whether spawned particles need their materials cloned for fading
    pub fn fade_enabled(&self) -> bool {
        self.fade_in_ms > 0.0 || self.fade_out_ms > 0.0
    }

    /// Whether particles are clamped to the ground plane (world space only)
    pub fn ground_collision(&self) -> bool {
        self.space == Space::World && self.collision_enabled
    }

    /// Collect non-fatal configuration problems
    pub fn diagnostics(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let fade_ms = self.fade_in_ms + self.fade_out_ms;
        let min_lifetime_ms = self.minimum_lifetime_ms();
        if fade_ms > min_lifetime_ms {
            warnings.push(ConfigWarning::FadeExceedsLifetime {
                fade_ms,
                min_lifetime_ms,
            });
        }

        warnings
    }
}
