//! Authoring-unit emitter settings
//!
//! [`EmitterSettings`] mirrors the parameters an editor exposes for an
//! emitter: seconds instead of milliseconds, degrees instead of radians and
//! percentages instead of fractions. [`EmitterSettings::to_config`] converts
//! them into the [`SimulationConfig`] the runtime works with.
//!
//! With the `serde-support` feature, settings load from and save to JSON or
//! YAML files, chosen by extension. Missing fields take their defaults.

use glam::Vec3;

use crate::config::{Shape, SimulationConfig, Space};
use crate::variance::Varied;

#[cfg(feature = "serde-support")]
use std::path::Path;

#[cfg(feature = "serde-support")]
use crate::error::{EmitterError, Result};

/// Emitter parameters in editor units
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EmitterSettings {
    /// Emit particles from the first tick
    pub enabled: bool,
    /// Frame particles move in
    pub space: Space,
    /// Spawn geometry
    pub shape: Shape,
    /// Particles per second
    pub birth_rate: u32,
    /// Birth rate variance in percent
    pub birth_rate_variance: f32,
    /// Particle lifetime in seconds
    pub lifetime: f32,
    /// Lifetime variance in percent
    pub lifetime_variance: f32,
    /// Fade-in duration in seconds
    pub fade_in: f32,
    /// Fade-out duration in seconds
    pub fade_out: f32,
    /// Initial speed in units per second
    pub speed: f32,
    /// Speed variance in percent
    pub speed_variance: f32,
    /// Spray cone half-angle in degrees, `0..=180`
    pub spray_angle: f32,
    /// Constant acceleration in units per second squared
    pub acceleration: Vec3,
    /// Start each particle at a random orientation
    pub random_initial_rotation: bool,
    /// Angular velocity in degrees per second, per Euler axis
    pub rotation_rate: Vec3,
    /// Rotation variance in percent
    pub rotation_variance: f32,
    /// Randomly flip the sign of each rotation axis per particle
    pub rotation_mirrored: bool,
    /// Scale at spawn
    pub scale_start: f32,
    /// Scale at the end of life
    pub scale_end: f32,
    /// Scale variance in percent, shared by both ends
    pub scale_variance: f32,
    /// Clamp world-space particles to the ground plane
    pub collision: bool,
    /// Velocity lost per tick of ground contact in percent, `0..=100`
    pub friction: f32,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            space: Space::Local,
            shape: Shape::Point,
            birth_rate: 10,
            birth_rate_variance: 0.0,
            lifetime: 2.0,
            lifetime_variance: 0.0,
            fade_in: 0.0,
            fade_out: 0.0,
            speed: 10.0,
            speed_variance: 0.0,
            spray_angle: 0.0,
            acceleration: Vec3::ZERO,
            random_initial_rotation: false,
            rotation_rate: Vec3::ZERO,
            rotation_variance: 0.0,
            rotation_mirrored: true,
            scale_start: 1.0,
            scale_end: 1.0,
            scale_variance: 0.0,
            collision: false,
            friction: 0.0,
        }
    }
}

#[inline]
fn percent(value: f32) -> f32 {
    value / 100.0
}

impl EmitterSettings {
    /// Convert to runtime units
    pub fn to_config(&self) -> SimulationConfig {
        let scale_variance = percent(self.scale_variance);

        SimulationConfig {
            space: self.space,
            shape: self.shape,
            birth_rate: Varied::new(self.birth_rate as f32, percent(self.birth_rate_variance)),
            lifetime_ms: Varied::new(self.lifetime * 1000.0, percent(self.lifetime_variance)),
            fade_in_ms: self.fade_in * 1000.0,
            fade_out_ms: self.fade_out * 1000.0,
            speed: Varied::new(self.speed, percent(self.speed_variance)),
            spray_angle: self.spray_angle.to_radians(),
            acceleration: self.acceleration,
            random_initial_rotation: self.random_initial_rotation,
            rotation_rate: Vec3::new(
                self.rotation_rate.x.to_radians(),
                self.rotation_rate.y.to_radians(),
                self.rotation_rate.z.to_radians(),
            ),
            rotation_variance: percent(self.rotation_variance),
            rotation_mirrored: self.rotation_mirrored,
            scale_start: Varied::new(self.scale_start, scale_variance),
            scale_end: Varied::new(self.scale_end, scale_variance),
            collision_enabled: self.collision,
            friction_factor: percent(self.friction),
        }
    }
}

/// On-disk settings format
#[cfg(feature = "serde-support")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

#[cfg(feature = "serde-support")]
impl SettingsFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(EmitterError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(feature = "serde-support")]
impl EmitterSettings {
    /// Parse settings from a JSON document
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Serialize settings in the given format
    pub fn to_string(&self, format: SettingsFormat) -> Result<String> {
        match format {
            SettingsFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            SettingsFormat::Yaml => Ok(serde_yaml_ng::to_string(self)?),
        }
    }

    /// Load settings from a `.json`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)?;
        let source = std::fs::read_to_string(path)?;
        match format {
            SettingsFormat::Json => Self::from_json_str(&source),
            SettingsFormat::Yaml => Self::from_yaml_str(&source),
        }
    }

    /// Write settings to a `.json`, `.yaml` or `.yml` file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)?;
        std::fs::write(path, self.to_string(format)?)?;
        Ok(())
    }
}
