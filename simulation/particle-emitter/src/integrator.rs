//! Per-tick particle integration
//!
//! Advances every live particle by one frame and evicts the ones that have
//! outlived their lifetime. Runs before emission so a particle's final frame
//! on screen is its true final state, and a freshly spawned particle never
//! receives the integration step of the tick it was born in.

use glam::Vec3;

use crate::config::{SimulationConfig, Space};
use crate::host::SceneHost;
use crate::particle::Particle;
use crate::registry::ParticleRegistry;
use crate::rotation::{rotate_vec_by_quat, rotation_from_euler};

/// Counts produced by one integration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationOutcome {
    /// Particles destroyed because they expired
    pub evicted: usize,
    /// Particles whose ground contact counter advanced
    pub grounded: usize,
}

/// Velocity multiplier after `ground_contact_ticks` ticks on the ground
#[inline]
pub fn friction_damping(friction_factor: f32, ground_contact_ticks: u32) -> f32 {
    (1.0 - friction_factor * ground_contact_ticks as f32).max(0.0)
}

/// Opacity to write this tick, if any
///
/// Inside the fade-in window the alpha ramps up from 0, inside the fade-out
/// window it ramps down to 0. Between the two nothing is written and the last
/// fade-in value persists.
pub fn fade_alpha(
    time_alive: f32,
    lifetime_ms: f32,
    fade_in_ms: f32,
    fade_out_ms: f32,
) -> Option<f32> {
    if time_alive < fade_in_ms {
        Some(time_alive / fade_in_ms)
    } else if lifetime_ms - time_alive < fade_out_ms {
        Some((lifetime_ms - time_alive) / fade_out_ms)
    } else {
        None
    }
}

/// Clamp a position onto or above the ground plane
///
/// Returns the clamped position and whether it rests exactly on the plane.
#[inline]
pub fn ground_clamp(mut position: Vec3) -> (Vec3, bool) {
    position.y = position.y.max(0.0);
    (position, position.y == 0.0)
}

/// Advance or evict every particle in `registry`
///
/// `now` is the wall clock in milliseconds and `dt` the frame delta in
/// seconds. Host failures propagate immediately; a particle whose
/// destruction fails has already left the registry.
pub fn integrate<H: SceneHost>(
    config: &SimulationConfig,
    registry: &mut ParticleRegistry<Particle<H::Object, H::Material>>,
    host: &mut H,
    now: f64,
    dt: f32,
) -> Result<IntegrationOutcome, H::Error> {
    let mut outcome = IntegrationOutcome::default();

    for index in (0..registry.len()).rev() {
        let expired = registry.get(index).is_some_and(|p| p.is_expired(now));
        if expired {
            if let Some(particle) = registry.swap_remove(index) {
                host.destroy(particle.object)?;
                outcome.evicted += 1;
            }
            continue;
        }

        if let Some(particle) = registry.get_mut(index)
            && advance(config, particle, host, now, dt)
        {
            outcome.grounded += 1;
        }
    }

    Ok(outcome)
}

/// Integrate one live particle; returns whether it touched the ground
fn advance<H: SceneHost>(
    config: &SimulationConfig,
    particle: &mut Particle<H::Object, H::Material>,
    host: &mut H,
    now: f64,
    dt: f32,
) -> bool {
    let time_alive = particle.time_alive(now);
    let damping = friction_damping(config.friction_factor, particle.ground_contact_ticks);

    // Position
    let base_velocity = match config.space {
        Space::World => rotate_vec_by_quat(particle.base_velocity, particle.spawn_rotation_basis),
        Space::Local => particle.base_velocity,
    };
    let velocity = (base_velocity + config.acceleration * (time_alive / 1000.0)) * damping;
    let mut position = host.local_position(&particle.object) + velocity * dt;

    let mut grounded = false;
    if config.ground_collision() {
        let (clamped, on_ground) = ground_clamp(position);
        position = clamped;
        if on_ground {
            particle.ground_contact_ticks += 1;
            grounded = true;
        }
    }
    host.set_local_position(&particle.object, position);
    particle.local_position = position;

    // Rotation, in the particle's own frame
    let spin = rotation_from_euler(particle.rotational_velocity * damping * dt);
    let rotation = host.local_rotation(&particle.object) * spin;
    host.set_local_rotation(&particle.object, rotation);
    particle.rotation = rotation;

    // Scale
    let scale = particle.scale.at(time_alive / particle.lifetime_ms);
    host.set_local_scale(&particle.object, Vec3::splat(scale));

    // Fade
    if let Some(alpha) = fade_alpha(
        time_alive,
        particle.lifetime_ms,
        config.fade_in_ms,
        config.fade_out_ms,
    ) {
        for material in &particle.materials {
            host.set_alpha(material, alpha);
        }
    }

    grounded
}
