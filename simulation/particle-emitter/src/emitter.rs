//! Particle emitter runtime state

use glam::Quat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::emission::{SpawnBasis, spawn_count, spawn_particle};
use crate::host::SceneHost;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::registry::ParticleRegistry;

/// Counts observed during one [`ParticleEmitter::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Particles created this tick
    pub spawned: usize,
    /// Particles destroyed because they expired
    pub evicted: usize,
    /// Live particles after the tick
    pub alive: usize,
    /// Particles whose ground contact counter advanced
    pub grounded: usize,
    /// Spawned particles that should fade but carried no materials
    pub missing_materials: usize,
}

/// Runtime particle emitter
///
/// Owns the live particles of one emitter and drives them through the host
/// once per frame. The embedding application calls [`tick`](Self::tick) from
/// its own frame loop.
pub struct ParticleEmitter<H: SceneHost, R: Rng = StdRng> {
    config: SimulationConfig,
    prefab: H::Prefab,
    parent: H::Node,
    particles: ParticleRegistry<Particle<H::Object, H::Material>>,
    rng: R,
    enabled: bool,
    /// Parent world rotation captured by the last world-space emission
    parent_rotation: Quat,
    elapsed_seconds: f64,
}

impl<H: SceneHost> ParticleEmitter<H> {
    /// Create an emitter seeded from the operating system
    ///
    /// Configuration problems are logged once as warnings; none of them
    /// prevent the emitter from running.
    pub fn new(config: SimulationConfig, prefab: H::Prefab, parent: H::Node) -> Self {
        Self::with_rng(config, prefab, parent, StdRng::from_os_rng())
    }
}

impl<H: SceneHost, R: Rng> ParticleEmitter<H, R> {
    /// Create an emitter drawing from a caller-supplied random source
    pub fn with_rng(config: SimulationConfig, prefab: H::Prefab, parent: H::Node, rng: R) -> Self {
        for warning in config.diagnostics() {
            log::warn!("{warning}");
        }

        Self {
            config,
            prefab,
            parent,
            particles: ParticleRegistry::new(),
            rng,
            enabled: true,
            parent_rotation: Quat::IDENTITY,
            elapsed_seconds: 0.0,
        }
    }

    /// Advance the simulation by one frame
    ///
    /// `dt` is the frame delta in seconds and `now` the wall clock in
    /// milliseconds. Every live particle is integrated or evicted before any
    /// new particle is spawned. A host failure aborts the tick; particles
    /// spawned before the failure stay registered.
    pub fn tick(&mut self, host: &mut H, dt: f32, now: f64) -> Result<TickStats, H::Error> {
        self.elapsed_seconds += f64::from(dt);

        let outcome = integrate(&self.config, &mut self.particles, host, now, dt)?;
        let mut stats = TickStats {
            evicted: outcome.evicted,
            grounded: outcome.grounded,
            ..TickStats::default()
        };

        if self.enabled {
            let basis = SpawnBasis::resolve(
                &*host,
                self.config.space,
                &self.parent,
                self.parent_rotation,
            );
            self.parent_rotation = basis.rotation;

            let count = spawn_count(&mut self.rng, self.config.birth_rate, dt);
            for _ in 0..count {
                let spawned = spawn_particle(
                    &self.config,
                    &self.prefab,
                    &basis,
                    now,
                    host,
                    &mut self.rng,
                )?;
                if spawned.missing_materials {
                    stats.missing_materials += 1;
                }
                self.particles.insert(spawned.particle);
                stats.spawned += 1;
            }
        }

        stats.alive = self.particles.len();
        log::trace!(
            "tick dt={dt:.4}s: spawned {}, evicted {}, alive {}",
            stats.spawned,
            stats.evicted,
            stats.alive
        );

        Ok(stats)
    }

    /// Destroy every live particle immediately
    ///
    /// Leaves the enabled flag untouched. Returns the number of particles
    /// destroyed. A host failure stops the sweep: the particle whose
    /// destruction failed has left the registry, every particle not yet
    /// visited stays registered.
    pub fn evict_all(&mut self, host: &mut H) -> Result<usize, H::Error> {
        let mut evicted = 0;
        while let Some(particle) = self.particles.pop() {
            host.destroy(particle.object)?;
            evicted += 1;
        }
        log::debug!("evicted all {evicted} particles");
        Ok(evicted)
    }

    /// Start or stop emission; live particles keep aging either way
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether new particles are emitted
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runtime configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Node particles are emitted from
    pub fn parent(&self) -> &H::Node {
        &self.parent
    }

    /// Get the current number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Iterate over live particles
    pub fn particles(&self) -> impl Iterator<Item = &Particle<H::Object, H::Material>> {
        self.particles.iter()
    }

    /// Sum of all frame deltas passed to [`tick`](Self::tick), in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}

impl<H, R> std::fmt::Debug for ParticleEmitter<H, R>
where
    H: SceneHost,
    R: Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEmitter")
            .field("config", &self.config)
            .field("particles", &self.particles.len())
            .field("enabled", &self.enabled)
            .field("parent_rotation", &self.parent_rotation)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .finish_non_exhaustive()
    }
}
