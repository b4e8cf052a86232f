//! Per-type surface recipes.
//!
//! Every recipe paints at a 512 px reference scale; feature sizes and offsets
//! are multiplied by `size / 512` so a texture reads the same at any
//! resolution. Randomness comes only from the caller's `StdRng`.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::Rng;

use super::fbm::Grain;
use super::raster::Raster;
use crate::classify::PlanetType;
use crate::color::{hsl, Rgb};

/// Reference edge length the feature constants are tuned for.
pub const REFERENCE_SIZE: f64 = 512.0;

pub const CRATER_COUNT: usize = 20;
pub const STORM_COUNT: usize = 15;
pub const CRACK_COUNT: usize = 30;
pub const LAVA_FLOW_COUNT: usize = 10;
pub const LAVA_FLOW_VERTICES: usize = 20;
pub const VENT_COUNT: usize = 8;
pub const CONTINENT_COUNT: usize = 5;
pub const CLOUD_COUNT: usize = 15;
pub const GRID_SPACING: f64 = 20.0;
pub const BAND_HEIGHT: f64 = 20.0;

/// Output of one recipe before normal-map derivation.
pub struct Painted {
    pub diffuse: Raster,
    pub emissive: Option<Raster>,
    /// Slope multiplier handed to the normal-map pass.
    pub relief: f64,
    pub grain: Grain,
}

/// Paint the surface for `planet_type` on a `size × size` canvas.
pub fn paint(planet_type: PlanetType, size: usize, rng: &mut StdRng) -> Painted {
    match planet_type {
        PlanetType::Rocky => rocky(size, rng),
        PlanetType::Gaseous => banded(size, rng, &GASEOUS_BANDS),
        PlanetType::HotJupiter => banded(size, rng, &HOT_JUPITER_BANDS),
        PlanetType::MiniNeptune => banded(size, rng, &MINI_NEPTUNE_BANDS),
        PlanetType::Icy => icy(size, rng),
        PlanetType::Volcanic => volcanic(size, rng),
        PlanetType::Oceanic => oceanic(size, rng, &OCEAN_WORLD),
        PlanetType::SuperEarth => oceanic(size, rng, &SUPER_EARTH),
        PlanetType::Candidate => candidate(size),
    }
}

#[inline]
fn scale_of(size: usize) -> f64 {
    size as f64 / REFERENCE_SIZE
}

// ── Rocky ────────────────────────────────────────────────────────────────────

fn rocky(size: usize, rng: &mut StdRng) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let mut diffuse = Raster::black(size, size);
    diffuse.fill_radial_gradient(
        n / 2.0,
        n / 2.0,
        n / 2.0,
        &[
            (0.0, Rgb::from_u32(0xcd853f)),
            (0.5, Rgb::from_u32(0x8b4513)),
            (1.0, Rgb::from_u32(0x654321)),
        ],
    );
    for _ in 0..CRATER_COUNT {
        let x = rng.gen::<f64>() * n;
        let y = rng.gen::<f64>() * n;
        let r = (rng.gen::<f64>() * 30.0 + 5.0) * s;
        let alpha = rng.gen::<f64>() * 0.3;
        diffuse.fill_disc(x, y, r, Rgb::new(0, 0, 0), alpha);
    }
    Painted {
        diffuse,
        emissive: None,
        relief: 2.0,
        grain: Grain { strength: 0.10, frequency: 12.0, stretch: 1.0 },
    }
}

// ── Banded gas envelopes ─────────────────────────────────────────────────────

struct BandStyle {
    hue_start: f64,
    hue_span: f64,
    saturation: f64,
    storm: Rgb,
    storm_alpha: f64,
    /// Bands glow in the emissive layer (irradiated day side).
    emissive: bool,
}

const GASEOUS_BANDS: BandStyle = BandStyle {
    hue_start: 20.0,
    hue_span: 40.0,
    saturation: 0.70,
    storm: Rgb::new(255, 100, 0),
    storm_alpha: 0.4,
    emissive: false,
};

const HOT_JUPITER_BANDS: BandStyle = BandStyle {
    hue_start: 0.0,
    hue_span: 30.0,
    saturation: 0.85,
    storm: Rgb::new(255, 220, 120),
    storm_alpha: 0.5,
    emissive: true,
};

const MINI_NEPTUNE_BANDS: BandStyle = BandStyle {
    hue_start: 190.0,
    hue_span: 40.0,
    saturation: 0.55,
    storm: Rgb::new(220, 240, 255),
    storm_alpha: 0.3,
    emissive: false,
};

fn banded(size: usize, rng: &mut StdRng, style: &BandStyle) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let band_h = (BAND_HEIGHT * s).max(1.0);
    let mut diffuse = Raster::black(size, size);

    let mut y = 0.0;
    while y < n {
        // Lightness oscillates on the reference-scale row index.
        let lightness = 0.40 + (y / s * 0.1).sin() * 0.20;
        let hue = style.hue_start + (y / n) * style.hue_span;
        diffuse.fill_rect(0.0, y, n, band_h, hsl(hue, style.saturation, lightness), 1.0);
        y += band_h;
    }

    for _ in 0..STORM_COUNT {
        let x = rng.gen::<f64>() * n;
        let y = rng.gen::<f64>() * n;
        let w = (rng.gen::<f64>() * 100.0 + 50.0) * s;
        let h = (rng.gen::<f64>() * 30.0 + 10.0) * s;
        let alpha = rng.gen::<f64>() * style.storm_alpha;
        diffuse.fill_rect(x, y, w, h, style.storm, alpha);
    }

    let emissive = style.emissive.then(|| {
        let mut glow = diffuse.clone();
        for px in glow.data.iter_mut() {
            let heat = px[0] as f64 / 255.0;
            *px = [
                (px[0] as f64 * 0.8).round() as u8,
                (px[1] as f64 * 0.35 * heat).round() as u8,
                0,
                255,
            ];
        }
        glow
    });

    Painted {
        diffuse,
        emissive,
        relief: 0.3,
        grain: Grain { strength: 0.06, frequency: 6.0, stretch: 8.0 },
    }
}

// ── Icy ──────────────────────────────────────────────────────────────────────

fn icy(size: usize, rng: &mut StdRng) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let mut diffuse = Raster::black(size, size);
    diffuse.fill_linear_gradient(
        0.0,
        0.0,
        n,
        n,
        &[
            (0.0, Rgb::from_u32(0xe0f6ff)),
            (0.5, Rgb::from_u32(0xb0e0e6)),
            (1.0, Rgb::from_u32(0x87ceeb)),
        ],
    );
    let crack = Rgb::new(70, 130, 180);
    for _ in 0..CRACK_COUNT {
        let x0 = rng.gen::<f64>() * n;
        let y0 = rng.gen::<f64>() * n;
        let x1 = rng.gen::<f64>() * n;
        let y1 = rng.gen::<f64>() * n;
        diffuse.stroke_segment(x0, y0, x1, y1, 2.0 * s, crack, 0.7);
    }
    Painted {
        diffuse,
        emissive: None,
        relief: 1.0,
        grain: Grain { strength: 0.04, frequency: 10.0, stretch: 1.0 },
    }
}

// ── Volcanic ─────────────────────────────────────────────────────────────────

fn volcanic(size: usize, rng: &mut StdRng) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let lava = Rgb::from_u32(0xff4500);
    let vent_core = Rgb::from_u32(0xffff00);

    let mut diffuse = Raster::black(size, size);
    diffuse.fill(Rgb::from_u32(0x8b0000));
    let mut emissive = Raster::black(size, size);

    for _ in 0..LAVA_FLOW_COUNT {
        let mut flow = Vec::with_capacity(LAVA_FLOW_VERTICES + 1);
        flow.push((rng.gen::<f64>() * n, 0.0));
        for j in 0..LAVA_FLOW_VERTICES {
            let x = rng.gen::<f64>() * n;
            let y = (j as f64 / LAVA_FLOW_VERTICES as f64) * n + (j as f64).sin() * 30.0 * s;
            flow.push((x, y));
        }
        diffuse.stroke_polyline(&flow, 5.0 * s, lava, 1.0);
        emissive.stroke_polyline(&flow, 5.0 * s, lava, 1.0);
    }

    for _ in 0..VENT_COUNT {
        let x = rng.gen::<f64>() * n;
        let y = rng.gen::<f64>() * n;
        let r = 15.0 * s;
        diffuse.fill_glow(x, y, r, vent_core, lava);
        emissive.fill_glow(x, y, r, vent_core, lava);
    }

    Painted {
        diffuse,
        emissive: Some(emissive),
        relief: 2.5,
        grain: Grain { strength: 0.12, frequency: 14.0, stretch: 1.0 },
    }
}

// ── Oceans and habitable super-earths ────────────────────────────────────────

struct OceanStyle {
    continents: usize,
    land: Rgb,
    cloud_alpha: f64,
}

const OCEAN_WORLD: OceanStyle = OceanStyle {
    continents: CONTINENT_COUNT,
    land: Rgb::new(0x22, 0x8b, 0x22),
    cloud_alpha: 0.4,
};

/// Larger, drier land masses under a thicker cloud deck.
const SUPER_EARTH: OceanStyle = OceanStyle {
    continents: CONTINENT_COUNT + 3,
    land: Rgb::new(0x55, 0x6b, 0x2f),
    cloud_alpha: 0.5,
};

fn oceanic(size: usize, rng: &mut StdRng, style: &OceanStyle) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let mut diffuse = Raster::black(size, size);
    diffuse.fill_radial_gradient(
        n / 2.0,
        n / 2.0,
        n / 2.0,
        &[
            (0.0, Rgb::from_u32(0x4682b4)),
            (0.6, Rgb::from_u32(0x1e90ff)),
            (1.0, Rgb::from_u32(0x000080)),
        ],
    );

    for _ in 0..style.continents {
        let x = rng.gen::<f64>() * n;
        let y = rng.gen::<f64>() * n;
        let rx = (rng.gen::<f64>() * 80.0 + 20.0) * s;
        let ry = (rng.gen::<f64>() * 60.0 + 15.0) * s;
        let rot = rng.gen::<f64>() * PI;
        diffuse.fill_ellipse(x, y, rx, ry, rot, style.land, 1.0);
    }

    for _ in 0..CLOUD_COUNT {
        let x = rng.gen::<f64>() * n;
        let y = rng.gen::<f64>() * n;
        let r = (rng.gen::<f64>() * 40.0 + 10.0) * s;
        diffuse.fill_disc(x, y, r, Rgb::new(255, 255, 255), style.cloud_alpha);
    }

    Painted {
        diffuse,
        emissive: None,
        relief: 0.8,
        grain: Grain { strength: 0.05, frequency: 8.0, stretch: 1.0 },
    }
}

// ── Candidate ────────────────────────────────────────────────────────────────

/// Neutral placeholder with a survey grid; draws nothing random.
fn candidate(size: usize) -> Painted {
    let s = scale_of(size);
    let n = size as f64;
    let mut diffuse = Raster::black(size, size);
    diffuse.fill_radial_gradient(
        n / 2.0,
        n / 2.0,
        n / 2.0,
        &[
            (0.0, Rgb::from_u32(0xffffff)),
            (0.8, Rgb::from_u32(0xf0f0f0)),
            (1.0, Rgb::from_u32(0xd3d3d3)),
        ],
    );
    let spacing = (GRID_SPACING * s).round().max(2.0) as usize;
    diffuse.grid(spacing, 1, Rgb::new(128, 128, 128), 0.3);
    Painted {
        diffuse,
        emissive: None,
        relief: 0.2,
        grain: Grain { strength: 0.0, frequency: 1.0, stretch: 1.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn paint_with(t: PlanetType, size: usize, seed: u64) -> Painted {
        paint(t, size, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn every_type_fills_the_canvas() {
        for t in PlanetType::ALL {
            let p = paint_with(t, 64, 1);
            assert_eq!(p.diffuse.width, 64, "{t}");
            assert_eq!(p.diffuse.data.len(), 64 * 64, "{t}");
            assert!(p.diffuse.data.iter().all(|px| px[3] == 255), "{t} left transparent pixels");
        }
    }

    #[test]
    fn only_volcanic_and_hot_jupiter_glow() {
        for t in PlanetType::ALL {
            let glows = paint_with(t, 32, 9).emissive.is_some();
            let expected = matches!(t, PlanetType::Volcanic | PlanetType::HotJupiter);
            assert_eq!(glows, expected, "{t}");
        }
    }

    #[test]
    fn candidate_ignores_rng() {
        let a = paint_with(PlanetType::Candidate, 64, 1).diffuse;
        let b = paint_with(PlanetType::Candidate, 64, 2).diffuse;
        assert_eq!(a, b);
    }

    #[test]
    fn hot_jupiter_top_band_is_warm() {
        let p = paint_with(PlanetType::HotJupiter, 128, 3).diffuse;
        let top = p.get(0, 0);
        assert!(top[0] >= top[2], "hot jupiter top band should be warm, got {top:?}");
    }

    #[test]
    fn volcanic_emissive_has_lava() {
        let p = paint_with(PlanetType::Volcanic, 128, 5);
        let emissive = p.emissive.expect("volcanic glows");
        assert!(emissive.data.iter().any(|px| px[0] > 200), "no bright lava in emissive layer");
    }
}
