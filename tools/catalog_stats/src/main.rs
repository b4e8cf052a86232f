//! Catalogue statistics: classifies a whole catalogue in parallel and
//! aggregates per-type habitability, render radius and ring counts.
//! Output: a summary table on stderr and `{output}` as JSON.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use exoscape_core::{compute_visual, load_catalog_json, PipelineConfig, VisualDescriptor};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "catalog_stats", about = "Per-type statistics over a planet catalogue")]
struct Args {
    /// Catalogue JSON file.
    #[arg(short, long)]
    input: String,

    /// Output JSON path.
    #[arg(short, long, default_value = "data/catalog_stats.json")]
    output: String,

    /// Pipeline config JSON.
    #[arg(short, long)]
    config: Option<String>,
}

// ── Output types ──────────────────────────────────────────────────────────────

#[derive(Serialize, Clone, Copy, Debug)]
struct Stats1 {
    mean: f64,
    std: f64,
    p10: f64,
    p90: f64,
}

#[derive(Serialize, Debug)]
struct TypeStats {
    count: usize,
    habitability: Stats1,
    render_radius: Stats1,
    earth_radii: Stats1,
    with_rings: usize,
}

#[derive(Serialize, Debug)]
struct Report {
    planets: usize,
    by_type: BTreeMap<String, TypeStats>,
}

fn scalar_stats(vals: &[f64]) -> Option<Stats1> {
    let mut valid: Vec<f64> = vals.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        return None;
    }
    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let std = (valid.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    valid.sort_by(f64::total_cmp);
    let p10 = valid[((valid.len() - 1) as f64 * 0.1) as usize];
    let p90 = valid[((valid.len() - 1) as f64 * 0.9) as usize];
    Some(Stats1 { mean, std, p10, p90 })
}

fn summarize(visuals: &[VisualDescriptor]) -> Report {
    let mut groups: BTreeMap<String, Vec<&VisualDescriptor>> = BTreeMap::new();
    for v in visuals {
        groups.entry(v.classification.planet_type.as_str().to_string()).or_default().push(v);
    }

    let by_type = groups
        .into_iter()
        .filter_map(|(ty, members)| {
            let hab: Vec<f64> = members.iter().map(|v| v.classification.habitability_index).collect();
            let rr: Vec<f64> = members.iter().map(|v| v.size.render_radius).collect();
            let er: Vec<f64> = members.iter().map(|v| v.size.earth_radii).collect();
            let stats = TypeStats {
                count: members.len(),
                habitability: scalar_stats(&hab)?,
                render_radius: scalar_stats(&rr)?,
                earth_radii: scalar_stats(&er)?,
                with_rings: members.iter().filter(|v| v.material.ring_system).count(),
            };
            Some((ty, stats))
        })
        .collect();

    Report { planets: visuals.len(), by_type }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            PipelineConfig::from_json(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => PipelineConfig::default(),
    };

    let records = load_catalog_json(&args.input)
        .with_context(|| format!("loading catalogue {}", args.input))?;
    info!("classifying {} planets", records.len());

    let visuals: Vec<VisualDescriptor> = records
        .par_iter()
        .map(|r| compute_visual(&r.params, r.seed(), &config))
        .collect();
    let report = summarize(&visuals);

    eprintln!(
        "\n{:<14} {:>6} {:>8} {:>8} {:>9} {:>6}",
        "Type", "N", "HabMean", "HabP90", "RadiusMean", "Rings"
    );
    eprintln!("{}", "-".repeat(58));
    for (ty, s) in &report.by_type {
        eprintln!(
            "{:<14} {:>6} {:>8.3} {:>8.3} {:>9.2} {:>6}",
            ty, s.count, s.habitability.mean, s.habitability.p90, s.render_radius.mean, s.with_rings
        );
    }

    if let Some(parent) = std::path::Path::new(&args.output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {}", args.output))?;
    eprintln!("\nWrote {}", args.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exoscape_core::PhysicalParams;

    #[test]
    fn scalar_stats_basic() {
        let vals: Vec<f64> = (1..=10).map(f64::from).collect();
        let s = scalar_stats(&vals).unwrap();
        assert!((s.mean - 5.5).abs() < 1e-9);
        assert!(s.p10 <= s.mean);
        assert!(s.p90 >= s.mean);
    }

    #[test]
    fn scalar_stats_empty() {
        assert!(scalar_stats(&[]).is_none());
        assert!(scalar_stats(&[f64::NAN]).is_none());
    }

    #[test]
    fn summary_groups_by_type() {
        let cfg = PipelineConfig::default();
        let visuals: Vec<_> = [(11.0, 1500.0), (10.0, 1400.0), (1.0, 100.0)]
            .iter()
            .map(|&(r, t)| compute_visual(&PhysicalParams::with_radius_temp(r, t), 1, &cfg))
            .collect();
        let report = summarize(&visuals);
        assert_eq!(report.planets, 3);
        assert_eq!(report.by_type["hot-jupiter"].count, 2);
        assert_eq!(report.by_type["icy"].count, 1);
        assert_eq!(report.by_type["hot-jupiter"].with_rings, 0);
    }
}
