//! Scientific classification of a planet from its physical parameters.
//!
//! `classify` is a pure, total function: rules are evaluated in priority
//! order and the first match wins, with a terrestrial catch-all at the end.
//!
//! | # | condition                          | type         |
//! |---|------------------------------------|--------------|
//! | 1 | disposition == CANDIDATE           | candidate    |
//! | 2 | r > 8 and T > 1000                 | hot-jupiter  |
//! | 3 | r ≥ 4                              | gaseous      |
//! | 4 | 1.25 < r ≤ 2.0                     | super-earth / rocky |
//! | 5 | 2.0 < r < 4.0                      | mini-neptune |
//! | 6 | T < 273                            | icy          |
//! | 7 | T > 800                            | volcanic     |
//! | 8 | 273 ≤ T ≤ 373 and 0.8 ≤ r ≤ 1.5    | oceanic      |
//! | 9 | otherwise                          | rocky        |

pub mod esi;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::params::{Disposition, PhysicalParams};
use esi::{earth_similarity_index, estimate_mass};

/// Classification thresholds (Kelvin and Earth radii).
pub mod thresholds {
    pub const HOT_JUPITER_RADIUS: f64 = 8.0;
    pub const HOT_JUPITER_TEMP: f64 = 1000.0;
    pub const GIANT_RADIUS: f64 = 4.0;
    pub const SUPER_EARTH_MIN_RADIUS: f64 = 1.25;
    pub const SUPER_EARTH_MAX_RADIUS: f64 = 2.0;
    /// Liquid-water window.
    pub const WATER_FREEZE: f64 = 273.0;
    pub const WATER_BOIL: f64 = 373.0;
    /// Thick super-earth atmospheres keep the surface above freezing a little
    /// below the equilibrium freezing point.
    pub const SUPER_EARTH_GREENHOUSE: f64 = 10.0;
    pub const WARM_GIANT: f64 = 150.0;
    pub const FROZEN: f64 = 150.0;
    pub const COLD_ROCKY_HABITABLE: f64 = 200.0;
    pub const VOLCANIC: f64 = 800.0;
    pub const OCEAN_MIN_RADIUS: f64 = 0.8;
    pub const OCEAN_MAX_RADIUS: f64 = 1.5;
    pub const ROCKY_STEAM_SUPER_EARTH: f64 = 500.0;
    pub const ROCKY_STEAM_TERRESTRIAL: f64 = 400.0;
}

use thresholds::*;

/// Coarse planet type used for palette and texture selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanetType {
    Rocky,
    Gaseous,
    Icy,
    Volcanic,
    Oceanic,
    Candidate,
    SuperEarth,
    HotJupiter,
    MiniNeptune,
}

impl PlanetType {
    pub const ALL: [PlanetType; 9] = [
        Self::Rocky,
        Self::Gaseous,
        Self::Icy,
        Self::Volcanic,
        Self::Oceanic,
        Self::Candidate,
        Self::SuperEarth,
        Self::HotJupiter,
        Self::MiniNeptune,
    ];

    /// Kebab-case tag, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rocky => "rocky",
            Self::Gaseous => "gaseous",
            Self::Icy => "icy",
            Self::Volcanic => "volcanic",
            Self::Oceanic => "oceanic",
            Self::Candidate => "candidate",
            Self::SuperEarth => "super-earth",
            Self::HotJupiter => "hot-jupiter",
            Self::MiniNeptune => "mini-neptune",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// Human-readable name for legends.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rocky => "Rocky Planet",
            Self::Gaseous => "Gas Giant",
            Self::Icy => "Ice World",
            Self::Volcanic => "Volcanic World",
            Self::Oceanic => "Ocean World",
            Self::Candidate => "Unconfirmed Candidate",
            Self::SuperEarth => "Super-Earth",
            Self::HotJupiter => "Hot Jupiter",
            Self::MiniNeptune => "Mini-Neptune",
        }
    }

    /// Types whose habitable branch can host surface liquid water.
    pub fn is_potentially_habitable(self) -> bool {
        matches!(self, Self::Oceanic | Self::SuperEarth)
    }
}

impl std::fmt::Display for PlanetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtmosphereType {
    None,
    Thin,
    Thick,
    Hydrogen,
    Steam,
    Methane,
}

/// Which rule produced the classification. Finer than `PlanetType`: the
/// material palette differs between e.g. warm and cold giants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Candidate,
    HotJupiter,
    WarmGiant,
    ColdGiant,
    HabitableSuperEarth,
    RockySuperEarth,
    MiniNeptune,
    FrozenIce,
    ColdRocky,
    Volcanic,
    Oceanic,
    Terrestrial,
}

/// Derived scientific classification. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    pub branch: Branch,
    pub subtype: String,
    /// 0–1; the ESI on habitable branches, a fixed score elsewhere.
    pub habitability_index: f64,
    pub atmosphere_type: AtmosphereType,
    pub surface_conditions: Vec<String>,
    pub scientific_basis: String,
    /// Estimated mass (M⊕) used for the ESI.
    pub mass_earth: f64,
}

/// Outcome of the rule that fired, before it is stamped into a `Classification`.
struct Verdict {
    planet_type: PlanetType,
    branch: Branch,
    subtype: &'static str,
    habitability: f64,
    atmosphere: AtmosphereType,
    surface: &'static [&'static str],
    basis: &'static str,
}

/// Classify a planet. Normalises `params` first, so any record is accepted.
pub fn classify(params: &PhysicalParams) -> Classification {
    let p = params.normalized();
    let radius = p.radius();
    let temp = p.eq_temp();
    let mass = estimate_mass(radius);

    let v = evaluate_rules(p.disposition, radius, temp, mass);
    trace!("classify: r={radius} T={temp} -> {:?}", v.branch);

    Classification {
        planet_type: v.planet_type,
        branch: v.branch,
        subtype: v.subtype.to_string(),
        habitability_index: v.habitability.clamp(0.0, 1.0),
        atmosphere_type: v.atmosphere,
        surface_conditions: v.surface.iter().map(|s| s.to_string()).collect(),
        scientific_basis: v.basis.to_string(),
        mass_earth: mass,
    }
}

fn evaluate_rules(disposition: Disposition, radius: f64, temp: f64, mass: f64) -> Verdict {
    let esi = || earth_similarity_index(radius, temp, mass);

    // 1. Unconfirmed candidates.
    if disposition == Disposition::Candidate {
        return Verdict {
            planet_type: PlanetType::Candidate,
            branch: Branch::Candidate,
            subtype: "Unconfirmed Exoplanet Candidate",
            habitability: 0.1,
            atmosphere: AtmosphereType::None,
            surface: &["Unknown composition", "Awaiting confirmation"],
            basis: "Transit or radial-velocity detection pending verification",
        };
    }

    // 2. Hot Jupiters: strict on both bounds.
    if radius > HOT_JUPITER_RADIUS && temp > HOT_JUPITER_TEMP {
        return Verdict {
            planet_type: PlanetType::HotJupiter,
            branch: Branch::HotJupiter,
            subtype: "Ultra-Hot Gas Giant",
            habitability: 0.0,
            atmosphere: AtmosphereType::Hydrogen,
            surface: &["Hydrogen/helium atmosphere", "Extreme winds", "Tidally locked"],
            basis: "Modelled on HD 209458b and WASP-12b observations",
        };
    }

    // 3. Gas giants.
    if radius >= GIANT_RADIUS {
        let (branch, subtype) = if temp > WARM_GIANT {
            (Branch::WarmGiant, "Warm Gas Giant")
        } else {
            (Branch::ColdGiant, "Cold Gas Giant")
        };
        return Verdict {
            planet_type: PlanetType::Gaseous,
            branch,
            subtype,
            habitability: 0.0,
            atmosphere: AtmosphereType::Hydrogen,
            surface: &["Dense hydrogen atmosphere", "Possible methane bands", "Storm systems"],
            basis: "Based on Jupiter and Saturn atmospheric models",
        };
    }

    // 4. Super-Earths.
    if radius > SUPER_EARTH_MIN_RADIUS && radius <= SUPER_EARTH_MAX_RADIUS {
        let habitable = temp >= WATER_FREEZE - SUPER_EARTH_GREENHOUSE && temp <= WATER_BOIL;
        if habitable {
            return Verdict {
                planet_type: PlanetType::SuperEarth,
                branch: Branch::HabitableSuperEarth,
                subtype: "Potentially Habitable Super-Earth",
                habitability: esi(),
                atmosphere: AtmosphereType::Thick,
                surface: &["Possible liquid water", "Enhanced greenhouse effect", "High gravity"],
                basis: "Modelled on Kepler-452b and K2-18b observations",
            };
        }
        return Verdict {
            planet_type: PlanetType::Rocky,
            branch: Branch::RockySuperEarth,
            subtype: "Rocky Super-Earth",
            habitability: 0.2,
            atmosphere: if temp > ROCKY_STEAM_SUPER_EARTH {
                AtmosphereType::Steam
            } else {
                AtmosphereType::Thin
            },
            surface: &["Rocky surface", "High gravity", "Possible volcanism"],
            basis: "Based on 55 Cancri e and CoRoT-7b analysis",
        };
    }

    // 5. Mini-Neptunes.
    if radius > SUPER_EARTH_MAX_RADIUS && radius < GIANT_RADIUS {
        return Verdict {
            planet_type: PlanetType::MiniNeptune,
            branch: Branch::MiniNeptune,
            subtype: "Sub-Neptune with Hydrogen Envelope",
            habitability: 0.1,
            atmosphere: AtmosphereType::Hydrogen,
            surface: &["Thick hydrogen atmosphere", "Possible water ice core", "High pressure"],
            basis: "Based on GJ 1214b and K2-18b atmospheric studies",
        };
    }

    // 6. Ice worlds.
    if temp < WATER_FREEZE {
        let (branch, subtype, atmosphere) = if temp < FROZEN {
            (Branch::FrozenIce, "Frozen Ice World", AtmosphereType::None)
        } else {
            (Branch::ColdRocky, "Cold Rocky Planet", AtmosphereType::Thin)
        };
        return Verdict {
            planet_type: PlanetType::Icy,
            branch,
            subtype,
            habitability: if temp > COLD_ROCKY_HABITABLE { 0.3 } else { 0.1 },
            atmosphere,
            surface: &["Frozen surface", "Possible subsurface ocean", "Ice composition"],
            basis: "Modelled on TRAPPIST-1e and Proxima Centauri b",
        };
    }

    // 7. Lava worlds.
    if temp > VOLCANIC {
        return Verdict {
            planet_type: PlanetType::Volcanic,
            branch: Branch::Volcanic,
            subtype: "Volcanic Lava World",
            habitability: 0.0,
            atmosphere: AtmosphereType::Steam,
            surface: &["Active volcanism", "Lava flows", "Extreme surface temperature"],
            basis: "Based on 55 Cancri e and CoRoT-7b thermal observations",
        };
    }

    // 8. Earth-sized ocean worlds.
    if (WATER_FREEZE..=WATER_BOIL).contains(&temp)
        && (OCEAN_MIN_RADIUS..=OCEAN_MAX_RADIUS).contains(&radius)
    {
        return Verdict {
            planet_type: PlanetType::Oceanic,
            branch: Branch::Oceanic,
            subtype: "Earth-like Ocean World",
            habitability: esi(),
            atmosphere: AtmosphereType::Thick,
            surface: &["Liquid water oceans", "Continents", "Weather systems"],
            basis: "Modelled on Kepler-452b and TOI-715b simulations",
        };
    }

    // 9. Catch-all.
    Verdict {
        planet_type: PlanetType::Rocky,
        branch: Branch::Terrestrial,
        subtype: "Terrestrial Rocky Planet",
        habitability: esi(),
        atmosphere: if temp > ROCKY_STEAM_TERRESTRIAL {
            AtmosphereType::Steam
        } else {
            AtmosphereType::Thin
        },
        surface: &["Rocky surface", "Possible atmosphere", "Metal core"],
        basis: "Based on Mars and Venus atmospheric models",
    }
}

/// Classify many planets. Parallel under the `threading` feature; the result
/// order always matches the input order.
pub fn classify_batch(params: &[PhysicalParams]) -> Vec<Classification> {
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        params.par_iter().map(classify).collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        params.iter().map(classify).collect()
    }
}
