//! Quaternion helpers

use glam::{EulerRot, Quat, Vec3};

/// Euler convention shared by random spawn orientations and per-tick spin
pub const EULER_ORDER: EulerRot = EulerRot::YXZ;

/// Rotate `v` by the unit quaternion `q`
///
/// Expanded form of `q * v * q⁻¹`:
/// `2(u·v)u + (s² - u·u)v + 2s(u × v)` where `u` is the vector part of `q`
/// and `s` its scalar part.
pub fn rotate_vec_by_quat(v: Vec3, q: Quat) -> Vec3 {
    let u = Vec3::new(q.x, q.y, q.z);
    let s = q.w;
    u * (2.0 * u.dot(v)) + v * (s * s - u.dot(u)) + u.cross(v) * (2.0 * s)
}

/// Build a rotation from per-axis Euler angles in radians
#[inline]
pub fn rotation_from_euler(angles: Vec3) -> Quat {
    Quat::from_euler(EULER_ORDER, angles.y, angles.x, angles.z)
}
