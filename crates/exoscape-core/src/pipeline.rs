//! End-to-end stage wiring: one planet's physical parameters in, everything
//! the renderer needs out.
//!
//! The descriptor carries the texture seed and size rather than the rasters
//! themselves; call [`VisualDescriptor::texture`] to build them on demand.

use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification};
use crate::config::PipelineConfig;
use crate::kinematics::KinematicState;
use crate::material::{draw_rings, map_material, MaterialParams};
use crate::params::PhysicalParams;
use crate::size::VisualSize;
use crate::texture::{synthesize, TextureAsset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualDescriptor {
    /// The normalised record everything else was derived from.
    pub params: PhysicalParams,
    pub classification: Classification,
    pub material: MaterialParams,
    pub size: VisualSize,
    /// Initial motion state for a newly spawned scene entity.
    pub kinematics: KinematicState,
    pub texture_seed: u64,
    pub texture_size: u32,
}

impl VisualDescriptor {
    /// Synthesize the surface texture for this planet.
    pub fn texture(&self) -> TextureAsset {
        synthesize(
            self.classification.planet_type,
            self.texture_size as usize,
            self.texture_seed,
        )
    }
}

/// Run every stage for one planet. Pure: identical inputs give identical
/// descriptors, and so identical textures.
pub fn compute_visual(params: &PhysicalParams, seed: u64, config: &PipelineConfig) -> VisualDescriptor {
    let params = params.normalized();
    let classification = classify(&params);
    let texture_seed = seed ^ config.texture_seed_salt;
    let rings = draw_rings(&classification, texture_seed, config.ring_probability);
    let material = map_material(&classification, params.eq_temp(), rings);
    let size = VisualSize::from_earth_radii(params.radius());
    let kinematics = KinematicState::for_planet(&params);

    log::debug!(
        "visual: {} r={:.2} T={:.0}K -> render radius {:.2}, rings={}",
        classification.planet_type,
        size.earth_radii,
        params.eq_temp(),
        size.render_radius,
        material.ring_system
    );

    VisualDescriptor {
        params,
        classification,
        material,
        size,
        kinematics,
        texture_seed,
        texture_size: config.texture_size,
    }
}

/// [`compute_visual`] over `(params, seed)` pairs, order preserved. Parallel
/// under the `threading` feature.
pub fn compute_visual_batch(
    planets: &[(PhysicalParams, u64)],
    config: &PipelineConfig,
) -> Vec<VisualDescriptor> {
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        planets.par_iter().map(|(p, seed)| compute_visual(p, *seed, config)).collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        planets.iter().map(|(p, seed)| compute_visual(p, *seed, config)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PlanetType;

    #[test]
    fn descriptor_is_deterministic() {
        let p = PhysicalParams::with_radius_temp(11.0, 150.0);
        let cfg = PipelineConfig::default();
        assert_eq!(compute_visual(&p, 99, &cfg), compute_visual(&p, 99, &cfg));
    }

    #[test]
    fn salt_changes_texture_seed() {
        let p = PhysicalParams::with_radius_temp(1.0, 288.0);
        let salted = PipelineConfig { texture_seed_salt: 0xABCD, ..Default::default() };
        let a = compute_visual(&p, 5, &PipelineConfig::default());
        let b = compute_visual(&p, 5, &salted);
        assert_eq!(a.texture_seed, 5);
        assert_eq!(b.texture_seed, 5 ^ 0xABCD);
        assert_eq!(a.classification, b.classification);
    }

    #[test]
    fn rings_follow_probability_extremes() {
        let giant = PhysicalParams::with_radius_temp(11.0, 150.0);
        let always = PipelineConfig { ring_probability: 1.0, ..Default::default() };
        let never = PipelineConfig { ring_probability: 0.0, ..Default::default() };
        for seed in 0..16 {
            assert!(compute_visual(&giant, seed, &always).material.ring_system);
            assert!(!compute_visual(&giant, seed, &never).material.ring_system);
        }
        let rock = PhysicalParams::with_radius_temp(0.5, 250.0);
        assert!(!compute_visual(&rock, 1, &always).material.ring_system);
    }

    #[test]
    fn unvalidated_nan_ring_probability_does_not_panic() {
        let giant = PhysicalParams::with_radius_temp(11.0, 150.0);
        let cfg = PipelineConfig { ring_probability: f64::NAN, ..Default::default() };
        let d = compute_visual(&giant, 1, &cfg);
        assert_eq!(d.classification.planet_type, PlanetType::Gaseous);
        assert!(!d.material.ring_system);
    }

    #[test]
    fn texture_matches_descriptor() {
        let p = PhysicalParams::with_radius_temp(1.0, 900.0);
        let cfg = PipelineConfig { texture_size: 32, ..Default::default() };
        let d = compute_visual(&p, 3, &cfg);
        assert_eq!(d.classification.planet_type, PlanetType::Volcanic);
        let tex = d.texture();
        assert_eq!(tex.size(), 32);
        assert_eq!(tex.planet_type, PlanetType::Volcanic);
        assert!(tex.emissive.is_some());
    }

    #[test]
    fn batch_preserves_order() {
        let cfg = PipelineConfig::default();
        let planets = vec![
            (PhysicalParams::with_radius_temp(11.0, 1500.0), 1),
            (PhysicalParams::with_radius_temp(1.0, 120.0), 2),
            (PhysicalParams::with_radius_temp(3.0, 300.0), 3),
        ];
        let out = compute_visual_batch(&planets, &cfg);
        let types: Vec<_> = out.iter().map(|d| d.classification.planet_type).collect();
        assert_eq!(types, vec![PlanetType::HotJupiter, PlanetType::Icy, PlanetType::MiniNeptune]);
    }
}
