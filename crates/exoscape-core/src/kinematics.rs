//! Rotation and revolution, advanced once per rendered frame.
//!
//!   rotation += accel · dt / (rotation_period_hours · 3600)     · 0.1
//!   orbit    += accel · dt / (orbital_period_days · 24 · 3600)  · 0.05
//!
//! The 0.1 / 0.05 factors damp real astronomical rates into something
//! visible. Angles accumulate unbounded; wrap them when rendering if needed.
//!
//! Nothing here reads a wall clock. Callers pass elapsed seconds explicitly,
//! either straight into `tick` or through a [`SimulationClock`].

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key, KeyData, SlotMap};

use crate::classify::PlanetType;
use crate::config::{PipelineConfig, TIME_ACCELERATION_MAX, TIME_ACCELERATION_MIN};
use crate::params::PhysicalParams;

pub const ROTATION_DAMPING: f64 = 0.1;
pub const ORBIT_DAMPING: f64 = 0.05;

/// Default spin for planets not assumed tidally locked.
pub const DEFAULT_ROTATION_HOURS: f64 = 24.0;
/// Orbits shorter than this are treated as tidally locked.
pub const TIDAL_LOCK_PERIOD_DAYS: f64 = 10.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;

/// Clamp an acceleration factor into the slider domain; NaN maps to 1×.
#[inline]
pub fn clamp_acceleration(accel: f64) -> f64 {
    if accel.is_nan() {
        TIME_ACCELERATION_MIN
    } else {
        accel.clamp(TIME_ACCELERATION_MIN, TIME_ACCELERATION_MAX)
    }
}

/// Rotation period guess from the orbit: short orbits are tidally locked
/// (one spin per orbit), everything else spins once a day.
pub fn estimate_rotation_hours(orbital_period_days: f64) -> f64 {
    if orbital_period_days.is_finite()
        && orbital_period_days > 0.0
        && orbital_period_days < TIDAL_LOCK_PERIOD_DAYS
    {
        orbital_period_days * 24.0
    } else {
        DEFAULT_ROTATION_HOURS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinematicState {
    pub rotation_angle: f64,
    pub orbital_angle: f64,
    pub rotation_period_hours: f64,
    pub orbital_period_days: f64,
}

impl KinematicState {
    /// Fresh state at zero angles. Non-positive or non-finite periods fall
    /// back to 24 h and 365 d.
    pub fn new(rotation_period_hours: f64, orbital_period_days: f64) -> Self {
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            rotation_angle: 0.0,
            orbital_angle: 0.0,
            rotation_period_hours: positive(rotation_period_hours, DEFAULT_ROTATION_HOURS),
            orbital_period_days: positive(orbital_period_days, crate::params::DEFAULT_PERIOD_DAYS),
        }
    }

    /// State for a planet entering the scene.
    pub fn for_planet(params: &PhysicalParams) -> Self {
        let period = params.normalized().period_days();
        Self::new(estimate_rotation_hours(period), period)
    }

    /// Advance both angles by `dt_seconds` of real time at `time_acceleration`.
    /// Negative or non-finite `dt_seconds` leaves the state untouched.
    pub fn tick(&mut self, dt_seconds: f64, time_acceleration: f64) {
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return;
        }
        let scaled = clamp_acceleration(time_acceleration) * dt_seconds;
        self.rotation_angle +=
            scaled / (self.rotation_period_hours * SECONDS_PER_HOUR) * ROTATION_DAMPING;
        self.orbital_angle += scaled / (self.orbital_period_days * SECONDS_PER_DAY) * ORBIT_DAMPING;
    }

    /// Angles reduced to [0, 2π).
    pub fn wrapped(&self) -> (f64, f64) {
        let tau = std::f64::consts::TAU;
        (self.rotation_angle.rem_euclid(tau), self.orbital_angle.rem_euclid(tau))
    }
}

// ── Simulation clock ─────────────────────────────────────────────────────────

/// Explicit time source for animated effects. `elapsed` is real seconds since
/// scene start; `simulated` integrates the acceleration on top. The
/// acceleration stays inside `[min, max]`, itself a sub-range of [1, 200].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    simulated: f64,
    time_acceleration: f64,
    min_acceleration: f64,
    max_acceleration: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(TIME_ACCELERATION_MIN)
    }
}

impl SimulationClock {
    pub fn new(time_acceleration: f64) -> Self {
        Self::with_range(time_acceleration, TIME_ACCELERATION_MIN, TIME_ACCELERATION_MAX)
    }

    /// Clock honouring the configured acceleration range.
    pub fn from_config(config: &PipelineConfig, time_acceleration: f64) -> Self {
        Self::with_range(
            time_acceleration,
            config.min_time_acceleration,
            config.max_time_acceleration,
        )
    }

    fn with_range(time_acceleration: f64, min: f64, max: f64) -> Self {
        let min = clamp_acceleration(min);
        let max = clamp_acceleration(max).max(min);
        let mut clock = Self {
            elapsed: 0.0,
            simulated: 0.0,
            time_acceleration: min,
            min_acceleration: min,
            max_acceleration: max,
        };
        clock.set_time_acceleration(time_acceleration);
        clock
    }

    /// Set the slider value; clamped to the clock's range, NaN maps to the minimum.
    pub fn set_time_acceleration(&mut self, accel: f64) {
        self.time_acceleration = if accel.is_nan() {
            self.min_acceleration
        } else {
            accel.clamp(self.min_acceleration, self.max_acceleration)
        };
    }

    pub fn time_acceleration(&self) -> f64 {
        self.time_acceleration
    }

    pub fn acceleration_range(&self) -> (f64, f64) {
        (self.min_acceleration, self.max_acceleration)
    }

    /// Move the clock forward; returns the `dt` actually applied (0 when
    /// `dt_seconds` is negative or non-finite).
    pub fn advance(&mut self, dt_seconds: f64) -> f64 {
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return 0.0;
        }
        self.elapsed += dt_seconds;
        self.simulated += dt_seconds * self.time_acceleration;
        dt_seconds
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn simulated(&self) -> f64 {
        self.simulated
    }
}

/// Surface scale pulse: volcanic worlds breathe by ±5 %, others are static.
pub fn surface_pulse(planet_type: PlanetType, clock: &SimulationClock) -> f64 {
    match planet_type {
        PlanetType::Volcanic => 1.0 + 0.05 * (clock.elapsed() * 2.0).sin(),
        _ => 1.0,
    }
}

/// Atmosphere shell pulse: gas envelopes swell by ±2 %, others are static.
pub fn atmosphere_pulse(planet_type: PlanetType, clock: &SimulationClock) -> f64 {
    match planet_type {
        PlanetType::Gaseous | PlanetType::HotJupiter | PlanetType::MiniNeptune => {
            1.0 + 0.02 * clock.elapsed().sin()
        }
        _ => 1.0,
    }
}

// ── Arena ────────────────────────────────────────────────────────────────────

new_key_type! {
    /// Handle to a scene entity. Handles to removed entities go stale instead
    /// of aliasing whatever later reuses the slot.
    pub struct EntityId;
}

impl EntityId {
    /// Pack into a single integer, e.g. to hand across the wasm boundary.
    pub fn to_bits(self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_bits(bits: u64) -> Self {
        KeyData::from_ffi(bits).into()
    }
}

/// Per-scene store of kinematic states, ticked in one tight loop per frame.
#[derive(Debug, Clone, Default)]
pub struct KinematicsArena {
    states: SlotMap<EntityId, KinematicState>,
}

impl KinematicsArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, state: KinematicState) -> EntityId {
        self.states.insert(state)
    }

    /// Remove an entity, returning its final state. Stale ids return `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<KinematicState> {
        self.states.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&KinematicState> {
        self.states.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut KinematicState> {
        self.states.get_mut(id)
    }

    /// Tick every live entity with the same `dt` and acceleration.
    pub fn tick_all(&mut self, dt_seconds: f64, time_acceleration: f64) {
        for state in self.states.values_mut() {
            state.tick(dt_seconds, time_acceleration);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &KinematicState)> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
