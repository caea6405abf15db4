//! Individual particle representation

use glam::{Quat, Vec3};

/// Start and end scale sampled once at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    /// Uniform scale at spawn
    pub start: f32,
    /// Uniform scale at the end of life
    pub end: f32,
}

impl ScaleRange {
    /// Create a new scale range
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Scale at the given fraction of life
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        (self.end - self.start) * t + self.start
    }
}

/// A single live particle
///
/// `O` is the host's handle to the instantiated visual object and `M` the
/// handle to a cloned material.
#[derive(Debug, Clone)]
pub struct Particle<O, M> {
    pub(crate) object: O,
    pub(crate) local_position: Vec3,
    pub(crate) base_velocity: Vec3,
    pub(crate) rotational_velocity: Vec3,
    pub(crate) spawn_rotation_basis: Quat,
    pub(crate) rotation: Quat,
    pub(crate) scale: ScaleRange,
    pub(crate) spawn_time: f64,
    pub(crate) lifetime_ms: f32,
    pub(crate) ground_contact_ticks: u32,
    pub(crate) materials: Vec<M>,
}

impl<O, M> Particle<O, M> {
    /// Handle to the visual object in the host scene
    pub fn object(&self) -> &O {
        &self.object
    }

    /// Last local position written to the host
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    /// Velocity sampled at spawn, before any basis rotation or acceleration
    pub fn base_velocity(&self) -> Vec3 {
        self.base_velocity
    }

    /// Angular velocity in radians per second per Euler axis
    pub fn rotational_velocity(&self) -> Vec3 {
        self.rotational_velocity
    }

    /// Parent orientation captured when the particle spawned
    pub fn spawn_rotation_basis(&self) -> Quat {
        self.spawn_rotation_basis
    }

    /// Last local rotation written to the host
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Start and end scale
    pub fn scale_range(&self) -> ScaleRange {
        self.scale
    }

    /// Wall-clock spawn time in milliseconds
    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    /// Lifetime in milliseconds
    pub fn lifetime_ms(&self) -> f32 {
        self.lifetime_ms
    }

    /// Number of ticks this particle has rested on the ground plane
    pub fn ground_contact_ticks(&self) -> u32 {
        self.ground_contact_ticks
    }

    /// Cloned materials driven by the fade
    pub fn materials(&self) -> &[M] {
        &self.materials
    }

    /// Milliseconds since spawn at wall-clock `now`
    #[inline]
    pub fn time_alive(&self, now: f64) -> f32 {
        (now - self.spawn_time) as f32
    }

    /// Whether the particle has outlived its lifetime at `now`
    ///
    /// Compared at wall-clock precision, before any narrowing to `f32`.
    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawn_time >= f64::from(self.lifetime_ms)
    }
}
