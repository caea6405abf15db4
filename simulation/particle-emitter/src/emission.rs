//! Particle emission
//!
//! Each tick the scheduler turns a real-valued birth rate into a whole number
//! of particles by stochastic rounding, decides which scene node new
//! particles hang off, and instantiates them through the host.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::config::{SimulationConfig, Space};
use crate::host::{SceneHost, TransformAccess};
use crate::kinematics::{
    initial_rotational_velocity, initial_velocity, random_orientation, sampled_lifetime,
    sampled_scale, spawn_position,
};
use crate::particle::Particle;
use crate::variance::{Varied, with_variance};

/// Number of particles to spawn this tick
///
/// The fractional part of `rate * dt` becomes the probability of one extra
/// particle. Nothing carries over between ticks, so the count is unbiased per
/// tick and converges to the configured rate over many ticks.
pub fn spawn_count<R: Rng + ?Sized>(rng: &mut R, birth_rate: Varied, dt: f32) -> u32 {
    let raw = with_variance(rng, birth_rate) * dt;
    if raw <= 0.0 {
        return 0;
    }
    let extra = u32::from(rng.random::<f32>() < raw.fract());
    raw.floor() as u32 + extra
}

/// Where and in which frame new particles are created this tick
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnBasis<N> {
    /// Node new objects are instantiated under
    pub target: N,
    /// Added to every spawn position
    pub offset: Vec3,
    /// Parent orientation snapshot handed to new particles
    pub rotation: Quat,
}

impl<N> SpawnBasis<N> {
    /// Resolve the spawn basis for the configured space
    ///
    /// Local space spawns under `parent` with no offset and keeps the
    /// `previous` rotation snapshot. World space spawns under the scene root,
    /// offset to the parent's world position, and captures the parent's
    /// current world rotation.
    pub fn resolve<H>(host: &H, space: Space, parent: &N, previous: Quat) -> Self
    where
        H: TransformAccess<Node = N>,
        N: Clone,
    {
        match space {
            Space::Local => Self {
                target: parent.clone(),
                offset: Vec3::ZERO,
                rotation: previous,
            },
            Space::World => {
                let root = host.root_node();
                let offset = host.world_position(parent) - host.world_position(&root);
                Self {
                    target: root,
                    offset,
                    rotation: host.world_rotation(parent),
                }
            }
        }
    }
}

/// A freshly instantiated particle
#[derive(Debug)]
pub struct Spawned<O, M> {
    /// The particle, ready to be registered
    pub particle: Particle<O, M>,
    /// Fading was requested but the object carried no materials
    pub missing_materials: bool,
}

/// Sample a new particle, instantiate its visual object and apply its
/// initial transform and opacity
pub fn spawn_particle<H, R>(
    config: &SimulationConfig,
    prefab: &H::Prefab,
    basis: &SpawnBasis<H::Node>,
    now: f64,
    host: &mut H,
    rng: &mut R,
) -> Result<Spawned<H::Object, H::Material>, H::Error>
where
    H: SceneHost,
    R: Rng + ?Sized,
{
    let local_position = spawn_position(config.shape, rng) + basis.offset;
    let base_velocity = initial_velocity(config, rng);
    let rotational_velocity = initial_rotational_velocity(config, rng);
    let scale = sampled_scale(config, rng);
    let lifetime_ms = sampled_lifetime(config, rng);

    let object = host.instantiate(prefab, &basis.target)?;

    host.set_local_position(&object, local_position);
    let rotation = if config.random_initial_rotation {
        let rotation = random_orientation(rng);
        host.set_local_rotation(&object, rotation);
        rotation
    } else {
        host.local_rotation(&object)
    };
    host.set_local_scale(&object, Vec3::splat(scale.start));

    let mut missing_materials = false;
    let materials = if config.fade_enabled() {
        let materials = host.clone_materials_recursive(&object);
        if config.fade_in_ms > 0.0 {
            for material in &materials {
                host.set_alpha(material, 0.0);
            }
        }
        if materials.is_empty() {
            log::warn!("No materials found - cannot fade in/out");
            missing_materials = true;
        }
        materials
    } else {
        Vec::new()
    };

    Ok(Spawned {
        particle: Particle {
            object,
            local_position,
            base_velocity,
            rotational_velocity,
            spawn_rotation_basis: basis.rotation,
            rotation,
            scale,
            spawn_time: now,
            lifetime_ms,
            ground_contact_ticks: 0,
            materials,
        },
        missing_materials,
    })
}
