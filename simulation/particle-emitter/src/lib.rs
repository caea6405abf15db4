//! Frame-driven particle emission simulator
//!
//! Spawns particles at a stochastic rate, integrates their position, rotation,
//! scale and opacity each frame, and evicts them when their lifetime runs out.
//! Visual objects belong to the embedding scene, reached through the
//! capability traits in [`host`]; an in-memory implementation lives in
//! [`headless`].
//!
//! # Example
//!
//! ```
//! use particle_emitter::headless::{HeadlessPrefab, HeadlessScene};
//! use particle_emitter::{ParticleEmitter, SimulationConfig};
//! use glam::{Quat, Vec3};
//!
//! let mut scene = HeadlessScene::new();
//! let parent = scene.add_node(Vec3::ZERO, Quat::IDENTITY);
//! let mut emitter: ParticleEmitter<HeadlessScene> = ParticleEmitter::new(
//!     SimulationConfig::default(),
//!     HeadlessPrefab::with_materials(&["spark"]),
//!     parent,
//! );
//!
//! let mut now = 0.0;
//! for _ in 0..60 {
//!     now += 1000.0 / 60.0;
//!     emitter.tick(&mut scene, 1.0 / 60.0, now)?;
//! }
//! assert!(emitter.particle_count() > 0);
//! # Ok::<(), particle_emitter::headless::HeadlessError>(())
//! ```

pub mod config;
pub mod emission;
pub mod emitter;
pub mod error;
pub mod headless;
pub mod host;
pub mod integrator;
pub mod kinematics;
pub mod particle;
pub mod registry;
pub mod rotation;
pub mod settings;
pub mod variance;

// Re-export common types
pub use config::{ConfigWarning, Shape, SimulationConfig, Space};
pub use emitter::{ParticleEmitter, TickStats};
pub use error::{EmitterError, Result};
pub use host::{MaterialAccess, ObjectLifecycle, SceneHost, SceneTypes, TransformAccess};
pub use particle::{Particle, ScaleRange};
pub use registry::ParticleRegistry;
pub use settings::EmitterSettings;
pub use variance::Varied;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
