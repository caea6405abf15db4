//! Initial particle state sampling
//!
//! Pure functions turning a [`SimulationConfig`] and an entropy source into the
//! starting kinematics of a particle. The angular formulas are intentionally
//! not uniform over a sphere cap: a full `PI` spray sweeps the incline over a
//! whole turn, which concentrates particles near the poles.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};
use rand::Rng;

use crate::config::{Shape, SimulationConfig};
use crate::particle::ScaleRange;
use crate::rotation::rotation_from_euler;
use crate::variance::{Varied, random_sign, uniform, with_variance};

/// Hard lower bound on a sampled lifetime, in milliseconds
pub const MIN_LIFETIME_MS: f32 = 30.0;

/// Spawn offset relative to the emitter origin for the given shape
pub fn spawn_position<R: Rng + ?Sized>(shape: Shape, rng: &mut R) -> Vec3 {
    match shape {
        Shape::Point => Vec3::ZERO,
        Shape::Plane { width, height } => {
            let x = uniform(rng, 0.0, width);
            let z = uniform(rng, 0.0, height);
            Vec3::new(x, 0.0, z)
        }
    }
}

/// Initial velocity inside the spray cone around +Y
pub fn initial_velocity<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Vec3 {
    let speed = with_variance(rng, config.speed);
    let incline = uniform(rng, 0.0, 2.0 * config.spray_angle);
    let azimuth = uniform(rng, 0.0, 2.0 * PI);

    let xz = speed * incline.sin();
    Vec3::new(xz * azimuth.sin(), speed * incline.cos(), xz * azimuth.cos())
}

/// Initial angular velocity in radians per second per Euler axis
///
/// One variance draw scales all three axes. With mirroring enabled each axis
/// then independently flips sign.
pub fn initial_rotational_velocity<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec3 {
    let scale = with_variance(rng, Varied::new(1.0, config.rotation_variance));
    let rate = config.rotation_rate * scale;

    if config.rotation_mirrored {
        let signs = Vec3::new(random_sign(rng), random_sign(rng), random_sign(rng));
        rate * signs
    } else {
        rate
    }
}

/// Sampled lifetime in milliseconds, never below [`MIN_LIFETIME_MS`]
pub fn sampled_lifetime<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> f32 {
    with_variance(rng, config.lifetime_ms).max(MIN_LIFETIME_MS)
}

/// Independently sampled start and end scale
pub fn sampled_scale<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> ScaleRange {
    let start = with_variance(rng, config.scale_start);
    let end = with_variance(rng, config.scale_end);
    ScaleRange::new(start, end)
}

/// Random orientation from three independent Euler draws over a full turn
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let x = uniform(rng, 0.0, TAU);
    let y = uniform(rng, 0.0, TAU);
    let z = uniform(rng, 0.0, TAU);
    rotation_from_euler(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use test_case::test_case;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_point_spawns_at_origin() {
        let mut rng = rng();
        assert_eq!(spawn_position(Shape::Point, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_plane_spawn_bounds() {
        let mut rng = rng();
        let shape = Shape::Plane {
            width: 4.0,
            height: 2.0,
        };
        for _ in 0..500 {
            let p = spawn_position(shape, &mut rng);
            assert!((-2.0..2.0).contains(&p.x), "x = {}", p.x);
            assert_eq!(p.y, 0.0);
            assert!((-1.0..1.0).contains(&p.z), "z = {}", p.z);
        }
    }

    #[test]
    fn test_zero_spray_goes_straight_up() {
        let mut rng = rng();
        let config = SimulationConfig {
            speed: Varied::fixed(5.0),
            spray_angle: 0.0,
            ..Default::default()
        };
        for _ in 0..20 {
            let v = initial_velocity(&config, &mut rng);
            assert!(v.x.abs() < 1e-6);
            assert!((v.y - 5.0).abs() < 1e-6);
            assert!(v.z.abs() < 1e-6);
        }
    }

    #[test]
    fn test_velocity_magnitude_matches_speed() {
        let mut rng = rng();
        let config = SimulationConfig {
            speed: Varied::new(8.0, 0.5),
            spray_angle: PI,
            ..Default::default()
        };
        for _ in 0..200 {
            let v = initial_velocity(&config, &mut rng);
            let len = v.length();
            assert!((6.0 - 1e-4..=10.0 + 1e-4).contains(&len), "len = {len}");
        }
    }

    #[test]
    fn test_spray_cone_limits_incline() {
        let mut rng = rng();
        let spray = 0.4;
        let config = SimulationConfig {
            speed: Varied::fixed(1.0),
            spray_angle: spray,
            ..Default::default()
        };
        for _ in 0..500 {
            let v = initial_velocity(&config, &mut rng);
            assert!(v.y >= spray.cos() - 1e-5, "v.y = {}", v.y);
        }
    }

    #[test]
    fn test_zero_speed_is_zero_velocity() {
        let mut rng = rng();
        let config = SimulationConfig {
            speed: Varied::new(0.0, 0.5),
            spray_angle: 1.0,
            ..Default::default()
        };
        assert_eq!(initial_velocity(&config, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_rotational_velocity_unmirrored() {
        let mut rng = rng();
        let config = SimulationConfig {
            rotation_rate: Vec3::new(1.0, 2.0, 3.0),
            rotation_variance: 0.0,
            rotation_mirrored: false,
            ..Default::default()
        };
        assert_eq!(
            initial_rotational_velocity(&config, &mut rng),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_rotational_velocity_mirrored_keeps_magnitude() {
        let mut rng = rng();
        let config = SimulationConfig {
            rotation_rate: Vec3::new(1.0, 2.0, 3.0),
            rotation_variance: 0.0,
            rotation_mirrored: true,
            ..Default::default()
        };
        let mut saw_negative = false;
        for _ in 0..100 {
            let r = initial_rotational_velocity(&config, &mut rng);
            assert_eq!(r.abs(), Vec3::new(1.0, 2.0, 3.0));
            saw_negative |= r.min_element() < 0.0;
        }
        assert!(saw_negative);
    }

    #[test]
    fn test_rotational_variance_scales_all_axes_together() {
        let mut rng = rng();
        let config = SimulationConfig {
            rotation_rate: Vec3::new(1.0, 2.0, 4.0),
            rotation_variance: 1.0,
            rotation_mirrored: false,
            ..Default::default()
        };
        for _ in 0..50 {
            let r = initial_rotational_velocity(&config, &mut rng);
            assert!((r.y - 2.0 * r.x).abs() < 1e-5);
            assert!((r.z - 4.0 * r.x).abs() < 1e-5);
            assert!((0.5..=1.5).contains(&r.x));
        }
    }

    #[test_case(2000.0, 0.0 ; "fixed lifetime")]
    #[test_case(10.0, 2.0 ; "tiny lifetime with full variance")]
    #[test_case(0.0, 0.0 ; "zero lifetime")]
    #[test_case(35.0, 1.5 ; "near the floor")]
    fn test_lifetime_floor(base: f32, variance: f32) {
        let mut rng = rng();
        let config = SimulationConfig {
            lifetime_ms: Varied::new(base, variance),
            ..Default::default()
        };
        for _ in 0..200 {
            assert!(sampled_lifetime(&config, &mut rng) >= MIN_LIFETIME_MS);
        }
    }

    #[test]
    fn test_scale_endpoints_sampled_independently() {
        let mut rng = rng();
        let config = SimulationConfig {
            scale_start: Varied::new(1.0, 0.5),
            scale_end: Varied::new(1.0, 0.5),
            ..Default::default()
        };
        let differs = (0..20).any(|_| {
            let range = sampled_scale(&config, &mut rng);
            (range.start - range.end).abs() > 1e-6
        });
        assert!(differs);
    }

    #[test]
    fn test_random_orientation_is_unit() {
        let mut rng = rng();
        for _ in 0..50 {
            assert!(random_orientation(&mut rng).is_normalized());
        }
    }
}
