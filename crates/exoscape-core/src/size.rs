//! Earth radii → renderer radius.
//!
//! Seven contiguous bands, each a linear law in `r` (the last is
//! logarithmic). The band value is multiplied by `SCALE_FACTOR` and clamped
//! to [`MIN_RENDER_RADIUS`, `MAX_RENDER_RADIUS`]. Bands are not required to
//! join continuously at their edges.

use serde::{Deserialize, Serialize};

use crate::params::{MAX_RADIUS_EARTH, MIN_RADIUS_EARTH};

pub const SCALE_FACTOR: f64 = 2.5;
pub const MIN_RENDER_RADIUS: f64 = 2.0;
pub const MAX_RENDER_RADIUS: f64 = 20.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Size band, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeBand {
    /// r < 0.3
    Dwarf,
    /// 0.3 ≤ r < 0.8
    SmallTerrestrial,
    /// 0.8 ≤ r < 1.3
    Terrestrial,
    /// 1.3 ≤ r < 2.5
    SuperEarth,
    /// 2.5 ≤ r < 6
    MiniNeptune,
    /// 6 ≤ r < 15
    IceGiant,
    /// r ≥ 15
    GasGiant,
}

impl SizeBand {
    pub fn of(earth_radii: f64) -> Self {
        match earth_radii {
            r if r < 0.3 => Self::Dwarf,
            r if r < 0.8 => Self::SmallTerrestrial,
            r if r < 1.3 => Self::Terrestrial,
            r if r < 2.5 => Self::SuperEarth,
            r if r < 6.0 => Self::MiniNeptune,
            r if r < 15.0 => Self::IceGiant,
            _ => Self::GasGiant,
        }
    }

    /// Pre-scale band law.
    fn raw(self, r: f64) -> f64 {
        match self {
            Self::Dwarf => 3.0 + 8.0 * r,
            Self::SmallTerrestrial => 4.0 + 6.0 * r,
            Self::Terrestrial => 5.0 + 5.0 * r,
            Self::SuperEarth => 6.0 + 4.0 * r,
            Self::MiniNeptune => 8.0 + 3.0 * r,
            Self::IceGiant => 10.0 + 2.0 * r,
            Self::GasGiant => 15.0 + 8.0 * (r / 10.0).log10(),
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::Dwarf => "Dwarf planet",
            Self::SmallTerrestrial => "Small terrestrial planet",
            Self::Terrestrial => "Terrestrial planet",
            Self::SuperEarth => "Super-Earth",
            Self::MiniNeptune => "Mini-Neptune",
            Self::IceGiant => "Ice giant",
            Self::GasGiant => "Gas giant",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Dwarf => "Very small planetary body",
            Self::SmallTerrestrial => "Compact rocky planet",
            Self::Terrestrial => "Earth-like rocky planet",
            Self::SuperEarth => "Rocky planet larger than Earth",
            Self::MiniNeptune => "Planet with a thick atmosphere",
            Self::IceGiant => "Neptune-like gaseous planet",
            Self::GasGiant => "Massive Jupiter-like planet",
        }
    }
}

/// Real-world comparison for legends and info panels.
pub fn comparison(earth_radii: f64) -> &'static str {
    match SizeBand::of(earth_radii) {
        SizeBand::Dwarf => "Smaller than Mercury",
        SizeBand::SmallTerrestrial => "Similar to Mars (0.53 R⊕)",
        SizeBand::Terrestrial if earth_radii > 1.0 => "Slightly larger than Earth",
        SizeBand::Terrestrial => "Similar to Earth or Venus (0.95 R⊕)",
        SizeBand::SuperEarth => "Massive rocky planet",
        SizeBand::MiniNeptune => "Small gaseous planet, Neptune is 3.88 R⊕",
        SizeBand::IceGiant => "Larger than Neptune, smaller than Jupiter",
        SizeBand::GasGiant if earth_radii > 20.0 => "Larger than Jupiter (11.2 R⊕)",
        SizeBand::GasGiant => "Similar to Jupiter",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSize {
    /// Clamped to [0.1, 50].
    pub earth_radii: f64,
    /// Clamped to [2, 20].
    pub render_radius: f64,
    pub band: SizeBand,
}

impl VisualSize {
    pub fn from_earth_radii(earth_radii: f64) -> Self {
        let r = clamp_earth_radii(earth_radii);
        Self { earth_radii: r, render_radius: render_radius(r), band: SizeBand::of(r) }
    }

    pub fn radius_km(&self) -> f64 {
        earth_radii_to_km(self.earth_radii)
    }
}

fn clamp_earth_radii(r: f64) -> f64 {
    if r.is_nan() {
        return 1.0;
    }
    r.clamp(MIN_RADIUS_EARTH, MAX_RADIUS_EARTH)
}

/// Band value before scaling and clamping. Strictly increasing within a band.
pub fn band_radius(earth_radii: f64) -> f64 {
    let r = clamp_earth_radii(earth_radii);
    SizeBand::of(r).raw(r)
}

/// Renderer radius: `band_radius × 2.5`, clamped to [2, 20].
pub fn render_radius(earth_radii: f64) -> f64 {
    (band_radius(earth_radii) * SCALE_FACTOR).clamp(MIN_RENDER_RADIUS, MAX_RENDER_RADIUS)
}

pub fn earth_radii_to_km(earth_radii: f64) -> f64 {
    earth_radii * EARTH_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const BANDS: [(f64, f64); 7] = [
        (0.1, 0.3),
        (0.3, 0.8),
        (0.8, 1.3),
        (1.3, 2.5),
        (2.5, 6.0),
        (6.0, 15.0),
        (15.0, 50.0),
    ];

    #[test]
    fn band_laws() {
        assert_abs_diff_eq!(band_radius(0.2), 4.6, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(0.5), 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(1.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(2.0), 14.0, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(4.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(10.0), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(band_radius(20.0), 15.0 + 8.0 * 2.0_f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn band_value_strictly_increasing_within_band() {
        for &(lo, hi) in &BANDS {
            let steps = 200;
            let mut prev = band_radius(lo);
            for i in 1..steps {
                let r = lo + (hi - lo) * i as f64 / steps as f64;
                let v = band_radius(r);
                assert!(v > prev, "band [{lo}, {hi}): f({r}) = {v} <= {prev}");
                prev = v;
            }
        }
    }

    #[test]
    fn render_radius_non_decreasing_within_band() {
        for &(lo, hi) in &BANDS {
            let mut prev = render_radius(lo);
            for i in 1..100 {
                let v = render_radius(lo + (hi - lo) * i as f64 / 100.0);
                assert!(v >= prev);
                prev = v;
            }
        }
    }

    #[test]
    fn render_radius_clamped() {
        for i in 0..=500 {
            let r = 0.1 + 49.9 * i as f64 / 500.0;
            let v = render_radius(r);
            assert!((MIN_RENDER_RADIUS..=MAX_RENDER_RADIUS).contains(&v), "r={r}: {v}");
        }
        assert_eq!(render_radius(50.0), MAX_RENDER_RADIUS);
    }

    #[test]
    fn small_bodies_scale_visibly() {
        assert_abs_diff_eq!(render_radius(0.1), 9.5, epsilon = 1e-12);
        assert!(render_radius(0.25) > render_radius(0.1));
    }

    #[test]
    fn out_of_range_input_clamped() {
        assert_eq!(VisualSize::from_earth_radii(120.0).earth_radii, 50.0);
        assert_eq!(VisualSize::from_earth_radii(0.0).earth_radii, 0.1);
        assert_eq!(VisualSize::from_earth_radii(f64::NAN).earth_radii, 1.0);
    }

    #[test]
    fn band_edges_are_lower_inclusive() {
        assert_eq!(SizeBand::of(0.3), SizeBand::SmallTerrestrial);
        assert_eq!(SizeBand::of(1.3), SizeBand::SuperEarth);
        assert_eq!(SizeBand::of(15.0), SizeBand::GasGiant);
        assert_eq!(SizeBand::of(14.99), SizeBand::IceGiant);
    }

    #[test]
    fn km_conversion() {
        assert_abs_diff_eq!(earth_radii_to_km(1.0), 6371.0);
        assert_abs_diff_eq!(VisualSize::from_earth_radii(11.2).radius_km(), 71_355.2, epsilon = 1e-6);
    }
}
