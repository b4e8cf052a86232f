//! Mass–radius relation and Earth Similarity Index.
//!
//! Mass is never measured in the catalog, so it is estimated from radius with
//! a three-regime power law (rocky / sub-Neptune / giant).

/// Earth reference values for the ESI.
pub const EARTH_RADIUS: f64 = 1.0;
pub const EARTH_TEMP_K: f64 = 288.0;
pub const EARTH_MASS: f64 = 1.0;

/// Radius (R⊕) below which the rocky M ∝ R^3.7 law applies.
pub const ROCKY_REGIME_MAX: f64 = 1.5;
/// Radius (R⊕) below which the sub-Neptune M ∝ R^2.06 law applies.
pub const SUB_NEPTUNE_REGIME_MAX: f64 = 4.0;
/// Giant-regime prefactor, calibrated so ~11 R⊕ lands near one Jupiter mass.
const GIANT_MASS_SCALE: f64 = 95.0;

/// Estimated mass in Earth masses for a radius in Earth radii.
pub fn estimate_mass(radius_earth: f64) -> f64 {
    if radius_earth < ROCKY_REGIME_MAX {
        radius_earth.powf(3.7)
    } else if radius_earth < SUB_NEPTUNE_REGIME_MAX {
        radius_earth.powf(2.06)
    } else {
        GIANT_MASS_SCALE * radius_earth.powf(0.881)
    }
}

/// One ESI factor: `1 − |x − ref| / (x + ref)`. Equals 1 at `x == ref`.
#[inline]
pub fn similarity_factor(x: f64, reference: f64) -> f64 {
    1.0 - ((x - reference) / (x + reference)).abs()
}

/// Earth Similarity Index: geometric mean of radius, temperature and mass
/// factors, clamped to [0, 1]. Degenerate inputs (NaN, non-positive) yield 0.
pub fn earth_similarity_index(radius_earth: f64, temp_k: f64, mass_earth: f64) -> f64 {
    let product = similarity_factor(radius_earth, EARTH_RADIUS)
        * similarity_factor(temp_k, EARTH_TEMP_K)
        * similarity_factor(mass_earth, EARTH_MASS);
    if !product.is_finite() || product <= 0.0 {
        return 0.0;
    }
    product.cbrt().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn earth_scores_one() {
        assert_abs_diff_eq!(earth_similarity_index(1.0, 288.0, 1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mass_regimes() {
        assert_abs_diff_eq!(estimate_mass(1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate_mass(2.0), 2.0_f64.powf(2.06), epsilon = 1e-12);
        assert_abs_diff_eq!(estimate_mass(11.2), 95.0 * 11.2_f64.powf(0.881), epsilon = 1e-9);
        // Regime switch happens at exactly 1.5 and 4.0.
        assert_abs_diff_eq!(estimate_mass(1.5), 1.5_f64.powf(2.06), epsilon = 1e-12);
        assert_abs_diff_eq!(estimate_mass(4.0), 95.0 * 4.0_f64.powf(0.881), epsilon = 1e-9);
    }

    #[test]
    fn esi_bounded_over_plausible_grid() {
        let radii = [0.1, 0.5, 1.0, 1.6, 3.0, 8.0, 20.0, 50.0];
        let temps = [10.0, 150.0, 288.0, 600.0, 2500.0, 5000.0];
        for &r in &radii {
            for &t in &temps {
                let esi = earth_similarity_index(r, t, estimate_mass(r));
                assert!((-1e-9..=1.0 + 1e-9).contains(&esi), "ESI({r}, {t}) = {esi}");
            }
        }
    }

    #[test]
    fn degenerate_inputs_clamp_to_zero() {
        assert_eq!(earth_similarity_index(1.0, 0.0, 1.0), 0.0);
        assert_eq!(earth_similarity_index(1.0, f64::NAN, 1.0), 0.0);
        assert_eq!(earth_similarity_index(-1.0, 288.0, 1.0), 0.0);
    }

    #[test]
    fn kepler_452b_like_esi() {
        let esi = earth_similarity_index(1.6, 265.0, estimate_mass(1.6));
        assert_abs_diff_eq!(esi, 0.740, epsilon = 0.005);
    }
}
