//! Offline catalogue runner: classifies every planet in a catalogue JSON,
//! prints a summary table (or JSON), and optionally simulates motion.
//!
//!   exoscape --input catalog.json
//!   exoscape --input catalog.json --json > visuals.json
//!   exoscape --input catalog.json --simulate 3600 --time-acceleration 200

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use exoscape_core::pipeline::compute_visual_batch;
use exoscape_core::{
    load_catalog_json, KinematicsArena, PipelineConfig, PlanetRecord, SimulationClock,
    VisualDescriptor,
};

/// Frame step used by `--simulate`.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "exoscape", about = "Classify and describe exoplanets from a catalogue file")]
struct Args {
    /// Catalogue JSON: an array of records or `{"planets": [...]}`.
    #[arg(short, long)]
    input: String,

    /// Pipeline config JSON; missing fields take defaults.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the texture edge length.
    #[arg(long)]
    texture_size: Option<u32>,

    /// Time-acceleration factor for `--simulate` (clamped to the config range).
    #[arg(long, default_value_t = 1.0)]
    time_acceleration: f64,

    /// Simulate this many seconds of real time and report final angles.
    #[arg(long)]
    simulate: Option<f64>,

    /// Emit descriptors as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    #[serde(flatten)]
    visual: &'a VisualDescriptor,
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            PipelineConfig::from_json(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(size) = args.texture_size {
        config.texture_size = size;
    }
    config.validate().context("invalid pipeline config")?;
    Ok(config)
}

fn print_table(records: &[PlanetRecord], visuals: &[VisualDescriptor]) {
    println!(
        "{:<24} {:<13} {:<34} {:>6} {:>7} {:>6}",
        "Name", "Type", "Subtype", "Hab", "Radius", "Rings"
    );
    println!("{}", "-".repeat(95));
    for (rec, v) in records.iter().zip(visuals) {
        let c = &v.classification;
        println!(
            "{:<24} {:<13} {:<34} {:>6.3} {:>7.2} {:>6}",
            rec.name,
            c.planet_type.as_str(),
            c.subtype,
            c.habitability_index,
            v.size.render_radius,
            if v.material.ring_system { "yes" } else { "no" }
        );
    }
}

fn simulate(
    records: &[PlanetRecord],
    visuals: &[VisualDescriptor],
    config: &PipelineConfig,
    seconds: f64,
    accel: f64,
) {
    let mut clock = SimulationClock::from_config(config, accel);
    let mut arena = KinematicsArena::new();
    let ids: Vec<_> = visuals.iter().map(|v| arena.spawn(v.kinematics)).collect();

    let frames = (seconds.max(0.0) / FRAME_SECONDS).round() as u64;
    for _ in 0..frames {
        let dt = clock.advance(FRAME_SECONDS);
        arena.tick_all(dt, clock.time_acceleration());
    }
    info!(
        "simulated {frames} frames ({:.1} s real, {:.1} s simulated)",
        clock.elapsed(),
        clock.simulated()
    );

    println!("\n{:<24} {:>12} {:>12}", "Name", "Rotation", "Orbit");
    for (rec, id) in records.iter().zip(ids) {
        if let Some(state) = arena.get(id) {
            let (rot, orb) = state.wrapped();
            println!("{:<24} {:>12.6} {:>12.6}", rec.name, rot, orb);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let records = load_catalog_json(&args.input)
        .with_context(|| format!("loading catalogue {}", args.input))?;
    if records.is_empty() {
        warn!("catalogue {} is empty", args.input);
    }

    let batch: Vec<_> = records.iter().map(|r| (r.params.clone(), r.seed())).collect();
    let visuals = compute_visual_batch(&batch, &config);
    info!("computed {} visual descriptors", visuals.len());

    if args.json {
        let entries: Vec<Entry> = records
            .iter()
            .zip(&visuals)
            .map(|(r, v)| Entry { name: &r.name, visual: v })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_table(&records, &visuals);
    }

    if let Some(seconds) = args.simulate {
        simulate(&records, &visuals, &config, seconds, args.time_acceleration);
    }

    Ok(())
}
