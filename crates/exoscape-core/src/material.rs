//! Classification → renderer material parameters.
//!
//! Each classification branch owns a fixed base palette. A single
//! temperature-correction pass then shifts the base colour by temperature
//! band; it is applied exactly once, after classification.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::classify::{Branch, Classification, PlanetType};
use crate::color::Rgb;

/// Reference hues for the temperature-correction bands.
pub const COLD_BLUE: Rgb = Rgb::from_u32(0x5b8cff);
pub const WARM_ORANGE: Rgb = Rgb::from_u32(0xff8c00);
pub const WHITE_HOT: Rgb = Rgb::from_u32(0xfff4e0);

/// Seed decorrelation for the ring draw, so rings do not track texture layout.
const RING_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialParams {
    pub base_color: Rgb,
    pub emissive_color: Rgb,
    pub atmosphere_color: Rgb,
    /// All four scalars are in [0, 1].
    pub roughness: f64,
    pub metalness: f64,
    pub emissive_intensity: f64,
    pub cloud_density: f64,
    pub ring_system: bool,
}

struct Palette {
    base: u32,
    emissive: u32,
    atmosphere: u32,
    roughness: f64,
    metalness: f64,
    emissive_intensity: f64,
    cloud_density: f64,
}

fn palette(branch: Branch, temp_k: f64) -> Palette {
    match branch {
        Branch::Candidate => Palette {
            base: 0xb8b8b8, emissive: 0xffffff, atmosphere: 0xe6e6e6,
            roughness: 0.6, metalness: 0.1, emissive_intensity: 0.1, cloud_density: 0.2,
        },
        Branch::HotJupiter => Palette {
            base: 0xff6b35, emissive: 0xff4500, atmosphere: 0xffa500,
            roughness: 0.1, metalness: 0.0, emissive_intensity: 0.8, cloud_density: 0.9,
        },
        Branch::WarmGiant => Palette {
            base: 0xd2691e, emissive: 0xff8c00, atmosphere: 0xffa500,
            roughness: 0.2, metalness: 0.0, emissive_intensity: 0.4, cloud_density: 0.8,
        },
        Branch::ColdGiant => Palette {
            base: 0xdaa520, emissive: 0xb8860b, atmosphere: 0xf0e68c,
            roughness: 0.2, metalness: 0.0, emissive_intensity: 0.2, cloud_density: 0.8,
        },
        Branch::HabitableSuperEarth => Palette {
            base: 0x228b22, emissive: 0x32cd32, atmosphere: 0x4682b4,
            roughness: 0.7, metalness: 0.1, emissive_intensity: 0.3, cloud_density: 0.6,
        },
        Branch::RockySuperEarth => Palette {
            base: 0x8b4513, emissive: 0xcd853f, atmosphere: 0xd2691e,
            roughness: 0.9, metalness: 0.2,
            emissive_intensity: if temp_k > 500.0 { 0.6 } else { 0.1 },
            cloud_density: 0.3,
        },
        Branch::MiniNeptune => Palette {
            base: 0x4169e1, emissive: 0x6495ed, atmosphere: 0x87ceeb,
            roughness: 0.3, metalness: 0.0, emissive_intensity: 0.3, cloud_density: 0.7,
        },
        Branch::FrozenIce | Branch::ColdRocky => Palette {
            base: 0xb0e0e6, emissive: 0xe0f6ff, atmosphere: 0xb0c4de,
            roughness: 0.4, metalness: 0.3, emissive_intensity: 0.2, cloud_density: 0.4,
        },
        Branch::Volcanic => Palette {
            base: 0x8b0000, emissive: 0xff4500, atmosphere: 0xff6347,
            roughness: 0.8, metalness: 0.4, emissive_intensity: 0.9, cloud_density: 0.5,
        },
        Branch::Oceanic => Palette {
            base: 0x1f4e8c, emissive: 0x5f9ea0, atmosphere: 0x87ceeb,
            roughness: 0.5, metalness: 0.1, emissive_intensity: 0.3, cloud_density: 0.7,
        },
        Branch::Terrestrial => Palette {
            base: 0xa0522d, emissive: 0xd2691e, atmosphere: 0xdaa520,
            roughness: 0.8, metalness: 0.3,
            emissive_intensity: if temp_k > 400.0 { 0.4 } else { 0.1 },
            cloud_density: 0.3,
        },
    }
}

/// Shift a base colour by temperature band:
///
/// | band (K)   | correction                 |
/// |------------|----------------------------|
/// | < 100      | 30 % toward cold blue      |
/// | 100 – 200  | darken by 20 %             |
/// | 200 – 400  | unchanged                  |
/// | 400 – 800  | 20 % toward warm orange    |
/// | > 800      | 40 % toward white-hot      |
///
/// Band lower edges are inclusive; 400 K and 800 K fall in the lower band.
pub fn temperature_shift(base: Rgb, temp_k: f64) -> Rgb {
    if temp_k < 100.0 {
        base.lerp(COLD_BLUE, 0.3)
    } else if temp_k < 200.0 {
        base.scale(0.8)
    } else if temp_k <= 400.0 {
        base
    } else if temp_k <= 800.0 {
        base.lerp(WARM_ORANGE, 0.2)
    } else {
        base.lerp(WHITE_HOT, 0.4)
    }
}

/// Build material parameters from a classification and the normalised
/// equilibrium temperature. `rings` is only honoured for gaseous planets.
pub fn map_material(classification: &Classification, temp_k: f64, rings: bool) -> MaterialParams {
    let p = palette(classification.branch, temp_k);
    MaterialParams {
        base_color: temperature_shift(Rgb::from_u32(p.base), temp_k),
        emissive_color: Rgb::from_u32(p.emissive),
        atmosphere_color: Rgb::from_u32(p.atmosphere),
        roughness: p.roughness.clamp(0.0, 1.0),
        metalness: p.metalness.clamp(0.0, 1.0),
        emissive_intensity: p.emissive_intensity.clamp(0.0, 1.0),
        cloud_density: p.cloud_density.clamp(0.0, 1.0),
        ring_system: rings && classification.planet_type == PlanetType::Gaseous,
    }
}

/// Cosmetic ring draw for gas giants from an explicit seed, so the same planet
/// always gets the same answer. Non-gaseous planets never have rings, and a
/// non-finite probability counts as 0.
pub fn draw_rings(classification: &Classification, seed: u64, probability: f64) -> bool {
    if classification.planet_type != PlanetType::Gaseous || !probability.is_finite() {
        return false;
    }
    let mut rng = StdRng::seed_from_u64(seed ^ RING_SEED_MIX);
    rng.gen_bool(probability.clamp(0.0, 1.0))
}
