//! Formatting utilities

use glam::Vec3;
use particle_emitter::{Shape, Space, Varied};

/// Format a varied value as `base ±half%`
pub fn format_varied(value: Varied, unit: &str) -> String {
    let spread = value.variance * 50.0;
    if spread == 0.0 {
        format!("{}{unit}", format_number(value.base))
    } else {
        format!(
            "{}{unit} ±{}% ({}..{})",
            format_number(value.base),
            format_number(spread),
            format_number(value.min()),
            format_number(value.max())
        )
    }
}

/// Format a vector as `(x, y, z)`
pub fn format_vec3(v: Vec3) -> String {
    format!(
        "({}, {}, {})",
        format_number(v.x),
        format_number(v.y),
        format_number(v.z)
    )
}

/// Format a number with at most three decimals and no trailing zeros
pub fn format_number(value: f32) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Format a space name
pub fn format_space(space: Space) -> &'static str {
    match space {
        Space::Local => "local",
        Space::World => "world",
    }
}

/// Format a spawn shape
pub fn format_shape(shape: Shape) -> String {
    match shape {
        Shape::Point => "point".to_string(),
        Shape::Plane { width, height } => {
            format!("plane {} x {}", format_number(width), format_number(height))
        }
    }
}

/// Format a yes/no flag
pub const fn format_flag(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
