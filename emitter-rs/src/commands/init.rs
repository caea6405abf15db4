//! Settings file scaffolding

use anyhow::{Context, Result, bail};
use clap::Args;
use console::style;
use particle_emitter::EmitterSettings;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Output file; the extension picks JSON (.json) or YAML (.yaml, .yml)
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    EmitterSettings::default()
        .save(&args.output)
        .with_context(|| format!("Failed to write settings: {}", args.output.display()))?;

    log::info!("Wrote default settings to {}", args.output.display());
    println!(
        "{} {}",
        style("Created").green().bold(),
        args.output.display()
    );
    Ok(())
}
