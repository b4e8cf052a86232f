//! Physical parameter record and the normaliser that makes it total.
//!
//! Catalog rows arrive sparse: any field may be missing, NaN, or negative.
//! `PhysicalParams::normalized` fills every gap with a documented fallback and
//! clamps radius, so every downstream stage can assume a complete record.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback radius when the catalog has none (R⊕).
pub const DEFAULT_RADIUS_EARTH: f64 = 1.0;
/// Fallback equilibrium temperature (K).
pub const DEFAULT_EQ_TEMP_K: f64 = 300.0;
/// Fallback host-star temperature: the Sun (K).
pub const DEFAULT_STAR_TEMP_K: f64 = 5778.0;
/// Fallback orbital period: one Earth year (days).
pub const DEFAULT_PERIOD_DAYS: f64 = 365.0;

/// Radius clamp range (R⊕).
pub const MIN_RADIUS_EARTH: f64 = 0.1;
pub const MAX_RADIUS_EARTH: f64 = 50.0;

/// Catalog confirmation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    Confirmed,
    Candidate,
    FalsePositive,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Disposition {
    /// Lenient parse: case-insensitive, spaces and dashes treated as `_`,
    /// anything unrecognised is `Unknown`.
    pub fn parse_lenient(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_uppercase() })
            .collect();
        match key.as_str() {
            "CONFIRMED" => Self::Confirmed,
            "CANDIDATE" => Self::Candidate,
            "FALSE_POSITIVE" => Self::FalsePositive,
            _ => Self::Unknown,
        }
    }
}

fn lenient_disposition<'de, D: Deserializer<'de>>(d: D) -> Result<Disposition, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().map(Disposition::parse_lenient).unwrap_or_default())
}

/// Observational parameters of one planet. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicalParams {
    #[serde(default, alias = "radius")]
    pub radius_earth_radii: Option<f64>,
    #[serde(default, alias = "eq_temp")]
    pub equilibrium_temp_kelvin: Option<f64>,
    #[serde(default, alias = "star_temp")]
    pub star_temp_kelvin: Option<f64>,
    #[serde(default, alias = "period")]
    pub orbital_period_days: Option<f64>,
    #[serde(default, alias = "koi_disposition", deserialize_with = "lenient_disposition")]
    pub disposition: Disposition,
    #[serde(default, alias = "ra")]
    pub right_ascension: Option<f64>,
    #[serde(default, alias = "dec")]
    pub declination: Option<f64>,
}

impl PhysicalParams {
    /// Shorthand for the two fields the classifier cares about most.
    pub fn with_radius_temp(radius: f64, temp: f64) -> Self {
        Self {
            radius_earth_radii: Some(radius),
            equilibrium_temp_kelvin: Some(temp),
            ..Self::default()
        }
    }

    /// Return a fully-populated copy: fallbacks substituted, radius clamped to
    /// [0.1, 50], non-positive period replaced, RA wrapped into [0, 360) and
    /// Dec clamped to [−90, 90]. Never fails; idempotent.
    pub fn normalized(&self) -> Self {
        let radius = positive_or("radius_earth_radii", self.radius_earth_radii, DEFAULT_RADIUS_EARTH);
        let clamped = radius.clamp(MIN_RADIUS_EARTH, MAX_RADIUS_EARTH);
        if clamped != radius {
            debug!("normalise: radius_earth_radii {radius} clamped to {clamped}");
        }

        Self {
            radius_earth_radii: Some(clamped),
            equilibrium_temp_kelvin: Some(positive_or(
                "equilibrium_temp_kelvin",
                self.equilibrium_temp_kelvin,
                DEFAULT_EQ_TEMP_K,
            )),
            star_temp_kelvin: Some(positive_or(
                "star_temp_kelvin",
                self.star_temp_kelvin,
                DEFAULT_STAR_TEMP_K,
            )),
            orbital_period_days: Some(positive_or(
                "orbital_period_days",
                self.orbital_period_days,
                DEFAULT_PERIOD_DAYS,
            )),
            disposition: self.disposition,
            right_ascension: self
                .right_ascension
                .filter(|v| v.is_finite())
                .map(|v| v.rem_euclid(360.0)),
            declination: self
                .declination
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(-90.0, 90.0)),
        }
    }

    // Accessors return the fallback when a field is absent, so they are safe
    // on raw records too. Prefer calling them on a normalised record.

    pub fn radius(&self) -> f64 {
        self.radius_earth_radii.unwrap_or(DEFAULT_RADIUS_EARTH)
    }

    pub fn eq_temp(&self) -> f64 {
        self.equilibrium_temp_kelvin.unwrap_or(DEFAULT_EQ_TEMP_K)
    }

    pub fn star_temp(&self) -> f64 {
        self.star_temp_kelvin.unwrap_or(DEFAULT_STAR_TEMP_K)
    }

    pub fn period_days(&self) -> f64 {
        self.orbital_period_days.unwrap_or(DEFAULT_PERIOD_DAYS)
    }
}

/// Keep `value` if it is finite and > 0, otherwise substitute `fallback`.
fn positive_or(field: &str, value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            debug!("normalise: {field} = {v} is invalid, using fallback {fallback}");
            fallback
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_gets_all_fallbacks() {
        let n = PhysicalParams::default().normalized();
        assert_eq!(n.radius_earth_radii, Some(1.0));
        assert_eq!(n.equilibrium_temp_kelvin, Some(300.0));
        assert_eq!(n.star_temp_kelvin, Some(5778.0));
        assert_eq!(n.orbital_period_days, Some(365.0));
        assert_eq!(n.disposition, Disposition::Unknown);
        assert!(n.right_ascension.is_none() && n.declination.is_none());
    }

    #[test]
    fn radius_clamped_to_range() {
        let big = PhysicalParams { radius_earth_radii: Some(120.0), ..Default::default() };
        let tiny = PhysicalParams { radius_earth_radii: Some(0.01), ..Default::default() };
        assert_eq!(big.normalized().radius(), 50.0);
        assert_eq!(tiny.normalized().radius(), 0.1);
    }

    #[test]
    fn invalid_values_replaced() {
        let p = PhysicalParams {
            radius_earth_radii: Some(f64::NAN),
            equilibrium_temp_kelvin: Some(-40.0),
            star_temp_kelvin: Some(f64::INFINITY),
            orbital_period_days: Some(0.0),
            ..Default::default()
        };
        let n = p.normalized();
        assert_eq!(n.radius(), 1.0);
        assert_eq!(n.eq_temp(), 300.0);
        assert_eq!(n.star_temp(), 5778.0);
        assert_eq!(n.period_days(), 365.0);
    }

    #[test]
    fn negative_period_replaced_by_default() {
        let p = PhysicalParams { orbital_period_days: Some(-3.5), ..Default::default() };
        assert_eq!(p.normalized().period_days(), 365.0);
    }

    #[test]
    fn sky_coordinates_wrapped_and_clamped() {
        let p = PhysicalParams {
            right_ascension: Some(-30.0),
            declination: Some(120.0),
            ..Default::default()
        };
        let n = p.normalized();
        assert_eq!(n.right_ascension, Some(330.0));
        assert_eq!(n.declination, Some(90.0));
    }

    #[test]
    fn normalisation_is_idempotent() {
        let samples = [
            PhysicalParams::default(),
            PhysicalParams::with_radius_temp(73.0, -5.0),
            PhysicalParams {
                radius_earth_radii: Some(2.2),
                equilibrium_temp_kelvin: Some(410.0),
                star_temp_kelvin: Some(3100.0),
                orbital_period_days: Some(12.5),
                disposition: Disposition::Confirmed,
                right_ascension: Some(725.0),
                declination: Some(-12.0),
            },
        ];
        for p in &samples {
            let once = p.normalized();
            assert_eq!(once.normalized(), once);
        }
    }

    #[test]
    fn catalog_field_names_deserialize() {
        let json = r#"{
            "radius": 1.6, "eq_temp": 265, "star_temp": 5757,
            "period": 384.8, "koi_disposition": "CONFIRMED", "ra": 295.0, "dec": 44.3
        }"#;
        let p: PhysicalParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.radius_earth_radii, Some(1.6));
        assert_eq!(p.equilibrium_temp_kelvin, Some(265.0));
        assert_eq!(p.disposition, Disposition::Confirmed);
        assert_eq!(p.declination, Some(44.3));
    }

    #[test]
    fn unknown_or_null_disposition_is_unknown() {
        let a: PhysicalParams = serde_json::from_str(r#"{ "koi_disposition": "REFUTED" }"#).unwrap();
        let b: PhysicalParams = serde_json::from_str(r#"{ "koi_disposition": null }"#).unwrap();
        let c: PhysicalParams = serde_json::from_str(r#"{ "koi_disposition": "false positive" }"#).unwrap();
        assert_eq!(a.disposition, Disposition::Unknown);
        assert_eq!(b.disposition, Disposition::Unknown);
        assert_eq!(c.disposition, Disposition::FalsePositive);
    }
}
