//! Settings file validation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use particle_emitter::{ConfigWarning, EmitterSettings, SimulationConfig};
use std::path::PathBuf;

use crate::utils::{
    format_flag, format_number, format_shape, format_space, format_varied, format_vec3,
    key_value_table,
};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Settings file (.json, .yaml or .yml)
    pub settings: PathBuf,

    /// Print the runtime configuration as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &ValidateArgs) -> Result<()> {
    let settings = EmitterSettings::load(&args.settings)
        .with_context(|| format!("Failed to load settings: {}", args.settings.display()))?;
    let config = settings.to_config();
    let warnings = config.diagnostics();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", style("Emitter Settings").bold().cyan());
        println!("{}", style("================").cyan());
        println!("{}: {}", style("File").bold(), args.settings.display());
        println!("{}: {}", style("Enabled").bold(), format_flag(settings.enabled));
        println!();
        config_table(&config).printstd();
    }

    report_warnings(&warnings);
    Ok(())
}

/// Rows describing a runtime configuration
pub fn config_rows(config: &SimulationConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Space", format_space(config.space).to_string()),
        ("Shape", format_shape(config.shape)),
        ("Birth rate", format_varied(config.birth_rate, "/s")),
        ("Lifetime", format_varied(config.lifetime_ms, " ms")),
        (
            "Minimum lifetime",
            format!("{} ms", format_number(config.minimum_lifetime_ms())),
        ),
        ("Fade in", format!("{} ms", format_number(config.fade_in_ms))),
        ("Fade out", format!("{} ms", format_number(config.fade_out_ms))),
        ("Speed", format_varied(config.speed, " u/s")),
        (
            "Spray angle",
            format!(
                "{} rad ({}°)",
                format_number(config.spray_angle),
                format_number(config.spray_angle.to_degrees())
            ),
        ),
        ("Acceleration", format_vec3(config.acceleration)),
        (
            "Random initial rotation",
            format_flag(config.random_initial_rotation).to_string(),
        ),
        ("Rotation rate (rad/s)", format_vec3(config.rotation_rate)),
        (
            "Rotation variance",
            format!("{}%", format_number(config.rotation_variance * 100.0)),
        ),
        (
            "Rotation mirrored",
            format_flag(config.rotation_mirrored).to_string(),
        ),
        ("Scale start", format_varied(config.scale_start, "")),
        ("Scale end", format_varied(config.scale_end, "")),
        (
            "Ground collision",
            format_flag(config.ground_collision()).to_string(),
        ),
        (
            "Friction",
            format!("{}% per tick", format_number(config.friction_factor * 100.0)),
        ),
    ]
}

fn config_table(config: &SimulationConfig) -> prettytable::Table {
    key_value_table(("Parameter", "Value"), &config_rows(config))
}

fn report_warnings(warnings: &[ConfigWarning]) {
    if warnings.is_empty() {
        println!("{}", style("✓ No problems found").green());
        return;
    }

    println!(
        "{}",
        style(format!("⚠ {} warning(s)", warnings.len())).yellow().bold()
    );
    for warning in warnings {
        println!("  - {warning}");
    }
}
