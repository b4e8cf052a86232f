//! Texture atlas: writes every texture layer of every planet type as PNG,
//! plus a 3×3 contact sheet of the diffuse layers, for eyeballing recipes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use log::info;

use exoscape_core::texture::{synthesize, Raster};
use exoscape_core::{seed_from_name, PlanetType};

#[derive(Parser, Debug)]
#[command(name = "texture_atlas", about = "Render procedural planet textures to PNG")]
struct Args {
    /// Output directory.
    #[arg(short, long, default_value = "data/atlas")]
    output: String,

    /// Texture edge length in pixels.
    #[arg(short, long, default_value_t = 256)]
    size: u32,

    /// Numeric seed; overridden by `--name`.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Derive the seed from a planet name instead.
    #[arg(long)]
    name: Option<String>,

    /// Render only this type (kebab-case, e.g. `hot-jupiter`).
    #[arg(short = 't', long = "type")]
    planet_type: Option<String>,
}

fn to_image(raster: &Raster) -> Result<RgbaImage> {
    RgbaImage::from_raw(raster.width as u32, raster.height as u32, raster.to_rgba_bytes())
        .context("raster buffer does not match its dimensions")
}

fn save(raster: &Raster, path: &Path) -> Result<()> {
    to_image(raster)?.save(path).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Top-left corner of tile `i` in a sheet `cols` tiles wide.
fn tile_origin(i: usize, cols: usize, tile: u32) -> (u32, u32) {
    ((i % cols) as u32 * tile, (i / cols) as u32 * tile)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let types: Vec<PlanetType> = match &args.planet_type {
        Some(tag) => vec![PlanetType::parse(tag)
            .with_context(|| format!("unknown planet type {tag:?}"))?],
        None => PlanetType::ALL.to_vec(),
    };
    let seed = args.name.as_deref().map(seed_from_name).unwrap_or(args.seed);

    let out_dir = PathBuf::from(&args.output);
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let cols = 3usize;
    let rows = types.len().div_ceil(cols) as u32;
    let mut sheet = RgbaImage::new(cols as u32 * args.size, rows * args.size);

    for (i, &t) in types.iter().enumerate() {
        let asset = synthesize(t, args.size as usize, seed);
        let stem = t.as_str();
        save(&asset.diffuse, &out_dir.join(format!("{stem}_diffuse.png")))?;
        save(&asset.normal, &out_dir.join(format!("{stem}_normal.png")))?;
        if let Some(emissive) = &asset.emissive {
            save(emissive, &out_dir.join(format!("{stem}_emissive.png")))?;
        }

        let tile = to_image(&asset.diffuse)?;
        let (x, y) = tile_origin(i, cols, args.size);
        image::imageops::replace(&mut sheet, &tile, x as i64, y as i64);
    }

    let sheet_path = out_dir.join("atlas.png");
    sheet.save(&sheet_path).with_context(|| format!("writing {}", sheet_path.display()))?;
    println!("Wrote {} textures (seed {seed:#x}) to {}", types.len(), out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_fill_rows_left_to_right() {
        assert_eq!(tile_origin(0, 3, 64), (0, 0));
        assert_eq!(tile_origin(2, 3, 64), (128, 0));
        assert_eq!(tile_origin(3, 3, 64), (0, 64));
        assert_eq!(tile_origin(8, 3, 64), (128, 128));
    }

    #[test]
    fn raster_converts_to_image() {
        let asset = synthesize(PlanetType::Icy, 8, 1);
        let img = to_image(&asset.diffuse).unwrap();
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(0, 0).0, asset.diffuse.get(0, 0));
    }
}
