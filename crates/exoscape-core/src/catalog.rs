//! Catalogue records: a planet name plus its observational parameters.
//!
//! Accepts either a bare JSON array of records or an object with a `planets`
//! array. Field aliases follow the common archive column names
//! (`pl_name`, `koi_disposition`, `ra`, `dec`, ...).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExoscapeError;
use crate::params::PhysicalParams;
use crate::texture::seed_from_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    #[serde(alias = "pl_name", alias = "kepler_name")]
    pub name: String,
    #[serde(flatten)]
    pub params: PhysicalParams,
}

impl PlanetRecord {
    /// Per-planet seed derived from the name, stable across runs.
    pub fn seed(&self) -> u64 {
        seed_from_name(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<PlanetRecord>),
    Wrapped { planets: Vec<PlanetRecord> },
}

pub fn parse_catalog_json(json: &str) -> Result<Vec<PlanetRecord>, ExoscapeError> {
    let records = match serde_json::from_str(json)? {
        CatalogFile::List(r) | CatalogFile::Wrapped { planets: r } => r,
    };
    log::debug!("parsed {} catalogue records", records.len());
    Ok(records)
}

pub fn load_catalog_json(path: impl AsRef<Path>) -> Result<Vec<PlanetRecord>, ExoscapeError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let records = parse_catalog_json(&text)?;
    log::info!("loaded {} planets from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Disposition;

    #[test]
    fn parses_bare_array_with_aliases() {
        let json = r#"[
            {"pl_name": "Kepler-452 b", "radius": 1.6, "eq_temp": 265, "koi_disposition": "CONFIRMED"},
            {"name": "KOI-9999.01", "koi_disposition": "candidate", "period": 3.2}
        ]"#;
        let records = parse_catalog_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Kepler-452 b");
        assert_eq!(records[0].params.radius_earth_radii, Some(1.6));
        assert_eq!(records[0].params.disposition, Disposition::Confirmed);
        assert_eq!(records[1].params.disposition, Disposition::Candidate);
        assert_eq!(records[1].params.orbital_period_days, Some(3.2));
        assert_eq!(records[1].params.radius_earth_radii, None);
    }

    #[test]
    fn parses_wrapped_object() {
        let json = r#"{"planets": [{"name": "Earth-ish", "radius_earth_radii": 1.0}]}"#;
        let records = parse_catalog_json(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].params.radius(), 1.0);
    }

    #[test]
    fn null_fields_become_absent() {
        let json = r#"[{"name": "Sparse", "radius": null, "eq_temp": null}]"#;
        let records = parse_catalog_json(json).unwrap();
        assert_eq!(records[0].params.radius_earth_radii, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_catalog_json("[{"), Err(ExoscapeError::Json(_))));
        assert!(matches!(
            load_catalog_json("/definitely/not/here.json"),
            Err(ExoscapeError::Io(_))
        ));
    }

    #[test]
    fn seed_is_name_derived() {
        let a = PlanetRecord { name: "HD 209458 b".into(), params: PhysicalParams::default() };
        let b = PlanetRecord { name: "HD 209458 b".into(), params: PhysicalParams::with_radius_temp(9.0, 1400.0) };
        assert_eq!(a.seed(), b.seed());
    }
}
