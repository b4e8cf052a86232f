//! Browser bindings. Inputs arrive as JSON strings, results go back as JS
//! values (u64 fields become BigInt). Texture layers are returned as flat
//! RGBA `Uint8ClampedArray`s ready for `ImageData`.

use exoscape_core::kinematics::{atmosphere_pulse, surface_pulse};
use exoscape_core::texture::synthesize;
use exoscape_core::{
    seed_from_name, EntityId, KinematicState, KinematicsArena, PhysicalParams, PipelineConfig,
    PlanetType, SimulationClock,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer =
        serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

fn parse_params(params_json: &str) -> Result<PhysicalParams, JsValue> {
    serde_json::from_str(params_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid params: {e}")))
}

fn parse_config(config_json: Option<String>) -> Result<PipelineConfig, JsValue> {
    match config_json {
        Some(json) => PipelineConfig::from_json(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}"))),
        None => Ok(PipelineConfig::default()),
    }
}

fn parse_type(planet_type: &str) -> Result<PlanetType, JsValue> {
    PlanetType::parse(planet_type)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown planet type: {planet_type}")))
}

/// Classify one planet from a PhysicalParams JSON object.
#[wasm_bindgen]
pub fn classify(params_json: &str) -> Result<JsValue, JsValue> {
    let params = parse_params(params_json)?;
    to_js(&exoscape_core::classify(&params))
}

/// Full visual descriptor. `config_json` is optional; missing fields default.
#[wasm_bindgen(js_name = computeVisual)]
pub fn compute_visual(
    params_json: &str,
    seed: u64,
    config_json: Option<String>,
) -> Result<JsValue, JsValue> {
    let params = parse_params(params_json)?;
    let config = parse_config(config_json)?;
    to_js(&exoscape_core::compute_visual(&params, seed, &config))
}

#[wasm_bindgen(js_name = seedFromName)]
pub fn seed_from_planet_name(name: &str) -> u64 {
    seed_from_name(name)
}

/// One texture layer as RGBA bytes: `"diffuse"`, `"normal"` or `"emissive"`.
/// Emissive is all-black for types that do not glow.
#[wasm_bindgen(js_name = textureRgba)]
pub fn texture_rgba(
    planet_type: &str,
    size: u32,
    seed: u64,
    layer: Option<String>,
) -> Result<js_sys::Uint8ClampedArray, JsValue> {
    let asset = synthesize(parse_type(planet_type)?, size as usize, seed);
    let bytes = match layer.as_deref().unwrap_or("diffuse") {
        "diffuse" => asset.diffuse.to_rgba_bytes(),
        "normal" => asset.normal.to_rgba_bytes(),
        "emissive" => match &asset.emissive {
            Some(e) => e.to_rgba_bytes(),
            None => [0u8, 0, 0, 255].repeat(asset.size() * asset.size()),
        },
        other => return Err(JsValue::from_str(&format!("Unknown texture layer: {other}"))),
    };
    Ok(js_sys::Uint8ClampedArray::from(bytes.as_slice()))
}

// ── Scene ────────────────────────────────────────────────────────────────────

/// Kinematic state for every planet in the scene plus the shared clock.
/// Entity ids cross the boundary as BigInt.
#[wasm_bindgen]
pub struct WasmScene {
    arena: KinematicsArena,
    clock: SimulationClock,
}

#[wasm_bindgen]
impl WasmScene {
    /// `config_json` is optional; its time-acceleration range bounds the
    /// scene's slider.
    #[wasm_bindgen(constructor)]
    pub fn new(time_acceleration: f64, config_json: Option<String>) -> Result<WasmScene, JsValue> {
        let config = parse_config(config_json)?;
        Ok(WasmScene {
            arena: KinematicsArena::new(),
            clock: SimulationClock::from_config(&config, time_acceleration),
        })
    }

    /// Add a planet; returns its entity id.
    pub fn spawn(&mut self, params_json: &str) -> Result<u64, JsValue> {
        let params = parse_params(params_json)?;
        Ok(self.arena.spawn(KinematicState::for_planet(&params)).to_bits())
    }

    /// Returns false if the id was unknown or already removed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.arena.remove(EntityId::from_bits(id)).is_some()
    }

    /// Advance the clock and every planet by `dt_seconds` of real time.
    pub fn tick(&mut self, dt_seconds: f64) {
        let dt = self.clock.advance(dt_seconds);
        self.arena.tick_all(dt, self.clock.time_acceleration());
    }

    #[wasm_bindgen(js_name = setTimeAcceleration)]
    pub fn set_time_acceleration(&mut self, accel: f64) {
        self.clock.set_time_acceleration(accel);
    }

    #[wasm_bindgen(getter, js_name = timeAcceleration)]
    pub fn time_acceleration(&self) -> f64 {
        self.clock.time_acceleration()
    }

    /// `[rotation, orbit]` in radians, or undefined for an unknown id.
    pub fn angles(&self, id: u64) -> Option<Vec<f64>> {
        self.arena
            .get(EntityId::from_bits(id))
            .map(|s| vec![s.rotation_angle, s.orbital_angle])
    }

    /// `[surface, atmosphere]` scale factors for the current clock.
    pub fn pulse(&self, planet_type: &str) -> Result<Vec<f64>, JsValue> {
        let t = parse_type(planet_type)?;
        Ok(vec![surface_pulse(t, &self.clock), atmosphere_pulse(t, &self.clock)])
    }

    /// Live entity count.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.arena.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsValue-free paths only; the bindings themselves run under wasm-bindgen-test.

    #[test]
    fn scene_spawn_tick_remove() {
        let mut scene = WasmScene::new(200.0, None).unwrap();
        let id = scene.spawn(r#"{"radius": 1.0, "period": 365}"#).unwrap();
        scene.tick(1.0);
        let angles = scene.angles(id).unwrap();
        assert!((angles[0] - 200.0 / 86_400.0 * 0.1).abs() < 1e-12);
        assert_eq!(scene.count(), 1);
        assert!(scene.remove(id));
        assert!(!scene.remove(id));
        assert!(scene.angles(id).is_none());
    }

    #[test]
    fn negative_dt_does_not_move_scene() {
        let mut scene = WasmScene::new(10.0, None).unwrap();
        let id = scene.spawn("{}").unwrap();
        scene.tick(-5.0);
        assert_eq!(scene.angles(id), Some(vec![0.0, 0.0]));
    }

    #[test]
    fn scene_respects_configured_acceleration_range() {
        let cfg = r#"{"min_time_acceleration": 2.0, "max_time_acceleration": 20.0}"#;
        let mut scene = WasmScene::new(200.0, Some(cfg.to_string())).unwrap();
        assert_eq!(scene.time_acceleration(), 20.0);
        scene.set_time_acceleration(0.5);
        assert_eq!(scene.time_acceleration(), 2.0);
    }
}
