//! Variance sampling
//!
//! Every randomized quantity in the emitter is described as a base value plus
//! a proportional jitter. A value `(base, variance)` samples uniformly from
//! `[base * (1 - variance / 2), base * (1 + variance / 2)]`.

use rand::Rng;

/// A base value with a proportional variance fraction
///
/// A variance of `0.5` lets samples drift 25% either side of `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Varied {
    /// Midpoint of the sampled range
    pub base: f32,
    /// Width of the sampled range as a fraction of `base`
    pub variance: f32,
}

impl Varied {
    /// Create a value with the given variance fraction
    pub const fn new(base: f32, variance: f32) -> Self {
        Self { base, variance }
    }

    /// Create a value that always samples to `base`
    pub const fn fixed(base: f32) -> Self {
        Self {
            base,
            variance: 0.0,
        }
    }

    /// Smallest value a sample can take
    pub fn min(&self) -> f32 {
        self.base * (1.0 - self.variance / 2.0)
    }

    /// Largest value a sample can take
    pub fn max(&self) -> f32 {
        self.base * (1.0 + self.variance / 2.0)
    }

    /// Draw a sample
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        with_variance(rng, *self)
    }
}

impl Default for Varied {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

/// Sample uniformly around `mid`, spanning `range` in total
///
/// `mid + (U - 0.5) * range` with `U` drawn from `[0, 1)`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, mid: f32, range: f32) -> f32 {
    mid + (rng.random::<f32>() - 0.5) * range
}

/// Sample a value with its proportional variance applied
///
/// Zero variance short-circuits to `base` without consuming entropy.
#[inline]
pub fn with_variance<R: Rng + ?Sized>(rng: &mut R, value: Varied) -> f32 {
    if value.variance == 0.0 {
        value.base
    } else {
        uniform(rng, value.base, value.base * value.variance)
    }
}

/// Either `-1.0` or `1.0` with equal probability
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.random::<f32>().round() - 0.5) * 2.0
}
