//! Headless emitter runs

use anyhow::{Context, Result, bail};
use clap::Args;
use console::style;
use glam::{Quat, Vec3};
use particle_emitter::headless::{HeadlessPrefab, HeadlessScene};
use particle_emitter::{EmitterSettings, ParticleEmitter, TickStats};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

use crate::utils::{format_number, key_value_table};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Settings file (.json, .yaml or .yml)
    pub settings: PathBuf,

    /// Simulated duration in seconds
    #[arg(long, default_value = "5")]
    pub seconds: f32,

    /// Frames per second
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds between status lines (0 disables them)
    #[arg(long, default_value = "1")]
    pub report_every: f32,

    /// Height of the emitter above the ground plane
    #[arg(long, default_value = "0")]
    pub height: f32,
}

/// Totals gathered over a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub seconds: f64,
    pub spawned: u64,
    pub evicted: u64,
    pub peak_alive: usize,
    pub final_alive: usize,
    pub grounded: u64,
    pub missing_materials: u64,
}

impl RunSummary {
    fn record(&mut self, stats: &TickStats) {
        self.frames += 1;
        self.spawned += stats.spawned as u64;
        self.evicted += stats.evicted as u64;
        self.grounded += stats.grounded as u64;
        self.missing_materials += stats.missing_materials as u64;
        self.peak_alive = self.peak_alive.max(stats.alive);
        self.final_alive = stats.alive;
    }

    /// Particles spawned per simulated second
    pub fn mean_spawn_rate(&self) -> f64 {
        if self.seconds > 0.0 {
            self.spawned as f64 / self.seconds
        } else {
            0.0
        }
    }
}

pub fn execute(args: &SimulateArgs) -> Result<()> {
    let settings = EmitterSettings::load(&args.settings)
        .with_context(|| format!("Failed to load settings: {}", args.settings.display()))?;

    println!(
        "{} {} for {}s at {} fps",
        style("Simulating").bold().cyan(),
        args.settings.display(),
        format_number(args.seconds),
        args.fps
    );

    let summary = run(&settings, args)?;
    print_summary(&summary, settings.birth_rate);
    Ok(())
}

/// Drive an emitter built from `settings` with a fixed frame delta
///
/// The wall clock advances by exactly one frame delta per tick.
pub fn run(settings: &EmitterSettings, args: &SimulateArgs) -> Result<RunSummary> {
    if args.fps == 0 {
        bail!("Frame rate must be at least 1 fps");
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("Duration must be a non-negative number of seconds");
    }

    let dt = 1.0 / args.fps as f32;
    let frame_ms = 1000.0 / f64::from(args.fps);
    let frames = (f64::from(args.seconds) * f64::from(args.fps)).round() as u64;
    let report_frames = if args.report_every > 0.0 {
        Some(((args.report_every * args.fps as f32).round() as u64).max(1))
    } else {
        None
    };

    let mut scene = HeadlessScene::new();
    let parent = scene.add_node(Vec3::new(0.0, args.height, 0.0), Quat::IDENTITY);
    let rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut emitter = ParticleEmitter::with_rng(
        settings.to_config(),
        HeadlessPrefab::with_materials(&["particle"]),
        parent,
        rng,
    );
    emitter.set_enabled(settings.enabled);

    let mut summary = RunSummary::default();
    let mut now = 0.0;
    for frame in 1..=frames {
        now += frame_ms;
        let stats = emitter
            .tick(&mut scene, dt, now)
            .with_context(|| format!("Simulation failed at frame {frame}"))?;
        summary.record(&stats);

        if report_frames.is_some_and(|every| frame % every == 0) {
            println!(
                "  t={:>7.2}s  alive {:>6}  spawned {:>8}  evicted {:>8}",
                now / 1000.0,
                stats.alive,
                summary.spawned,
                summary.evicted
            );
        }
    }
    summary.seconds = emitter.elapsed_seconds();

    log::debug!(
        "{} objects instantiated, {} destroyed",
        scene.instantiated_count(),
        scene.destroyed_count()
    );

    Ok(summary)
}

fn print_summary(summary: &RunSummary, configured_rate: u32) {
    println!();
    println!("{}", style("Summary").bold().cyan());

    let mut rows = vec![
        ("Frames", summary.frames.to_string()),
        ("Simulated time", format!("{:.2} s", summary.seconds)),
        ("Spawned", summary.spawned.to_string()),
        ("Evicted", summary.evicted.to_string()),
        ("Peak alive", summary.peak_alive.to_string()),
        ("Final alive", summary.final_alive.to_string()),
        ("Ground contacts", summary.grounded.to_string()),
        (
            "Mean spawn rate",
            format!(
                "{:.2}/s (configured {configured_rate}/s)",
                summary.mean_spawn_rate()
            ),
        ),
    ];
    if summary.missing_materials > 0 {
        rows.push(("Missing materials", summary.missing_materials.to_string()));
    }

    key_value_table(("Metric", "Value"), &rows).printstd();
}
