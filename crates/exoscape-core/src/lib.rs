//! Exoscape core: physical-to-visual pipeline for exoplanet rendering.
//!
//! Stage order:
//!   params (normalise) → classify → material / size / texture,
//!   with kinematics ticking independently every frame.
//!
//! Nothing in this crate performs I/O beyond `catalog::load_catalog_json`,
//! and nothing initialises a logger.

pub mod catalog;
pub mod classify;
pub mod color;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod material;
pub mod params;
pub mod pipeline;
pub mod size;
pub mod texture;

pub use catalog::{load_catalog_json, PlanetRecord};
pub use classify::{classify, AtmosphereType, Classification, PlanetType};
pub use color::Rgb;
pub use config::PipelineConfig;
pub use error::{ConfigError, ExoscapeError};
pub use kinematics::{EntityId, KinematicState, KinematicsArena, SimulationClock};
pub use material::MaterialParams;
pub use params::{Disposition, PhysicalParams};
pub use pipeline::{compute_visual, VisualDescriptor};
pub use size::{SizeBand, VisualSize};
pub use texture::{seed_from_name, TextureAsset};
