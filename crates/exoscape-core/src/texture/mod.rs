//! Procedural surface textures.
//!
//! `synthesize` is a pure function of `(planet_type, size, seed)`: the same
//! triple always yields byte-identical layers. Assets are cheap enough to
//! regenerate on demand and are never cached here.
//!
//! Layers:
//!   diffuse:  painted by the per-type recipe, then fBm grain
//!   normal:   Sobel gradient of diffuse luminance
//!   emissive: only for types whose surface glows (volcanic, hot-jupiter)

pub mod fbm;
pub mod normal;
pub mod raster;
pub mod recipes;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::classify::PlanetType;
use crate::config::MAX_TEXTURE_SIZE;
use fbm::{apply_grain, Fbm};
pub use raster::Raster;

/// Decorrelates the recipe stream from other consumers of the same seed.
const RECIPE_SEED_MIX: u64 = 0x5DEE_CE66_D1CE_4E5B;
const GRAIN_HURST: f32 = 0.75;
const GRAIN_OCTAVES: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    pub planet_type: PlanetType,
    pub seed: u64,
    pub diffuse: Raster,
    pub normal: Raster,
    pub emissive: Option<Raster>,
}

impl TextureAsset {
    /// Edge length in pixels; textures are square.
    pub fn size(&self) -> usize {
        self.diffuse.width
    }
}

/// Build the texture set for `planet_type`. `size` is clamped to
/// `[1, MAX_TEXTURE_SIZE]`.
pub fn synthesize(planet_type: PlanetType, size: usize, seed: u64) -> TextureAsset {
    let size = size.clamp(1, MAX_TEXTURE_SIZE as usize);
    let mut rng = StdRng::seed_from_u64(seed ^ RECIPE_SEED_MIX);
    let mut painted = recipes::paint(planet_type, size, &mut rng);

    let fbm = Fbm::new(fold_seed(seed), GRAIN_HURST, GRAIN_OCTAVES);
    apply_grain(&mut painted.diffuse, &fbm, painted.grain);

    let normal = normal::normal_map(&painted.diffuse, painted.relief);
    log::debug!(
        "synthesized {planet_type} texture {size}x{size} seed={seed:#x} emissive={}",
        painted.emissive.is_some()
    );

    TextureAsset {
        planet_type,
        seed,
        diffuse: painted.diffuse,
        normal,
        emissive: painted.emissive,
    }
}

/// Stable 64-bit seed from a planet name (FNV-1a), so a catalogue entry keeps
/// its look across runs and machines.
pub fn seed_from_name(name: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    name.bytes().fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

#[inline]
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
