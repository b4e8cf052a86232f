//! Perlin fBm surface grain. Recipes modulate diffuse brightness with it so
//! flat gradients pick up low-contrast structure.
use noise::{NoiseFn, Perlin};

use super::raster::Raster;

const LACUNARITY: f64 = 2.0;

/// Octave sum over Perlin noise with per-octave amplitude `2^(−hurst)`.
pub struct Fbm {
    perlin: Perlin,
    octaves: u32,
    amplitude_decay: f64,
}

impl Fbm {
    pub fn new(seed: u32, hurst: f32, octaves: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            octaves,
            amplitude_decay: LACUNARITY.powf(-(hurst as f64)),
        }
    }

    /// Roughly ±1 for the hurst/octave values the recipes use.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        (0..self.octaves)
            .fold((0.0, 1.0, 1.0), |(sum, amp, freq), _| {
                let n = self.perlin.get([x * freq, y * freq]);
                (sum + amp * n, amp * self.amplitude_decay, freq * LACUNARITY)
            })
            .0
    }
}

/// How grain is laid over a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grain {
    /// Peak brightness deviation, e.g. 0.08 for ±8 %.
    pub strength: f64,
    /// Features per texture width.
    pub frequency: f64,
    /// Horizontal stretch; >1 smears grain along latitude bands.
    pub stretch: f64,
}

/// Modulate RGB brightness of every pixel by `1 + strength · fbm`.
/// Alpha is left alone.
pub fn apply_grain(raster: &mut Raster, fbm: &Fbm, grain: Grain) {
    if grain.strength <= 0.0 || raster.width == 0 {
        return;
    }
    let scale = grain.frequency / raster.width as f64;
    let stretch = grain.stretch.max(f64::EPSILON);
    for y in 0..raster.height {
        for x in 0..raster.width {
            let n = fbm.sample(x as f64 * scale / stretch, y as f64 * scale);
            let factor = 1.0 + grain.strength * n.clamp(-1.0, 1.0);
            let px = &mut raster.data[y * raster.width + x];
            for c in px.iter_mut().take(3) {
                *c = (*c as f64 * factor).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fbm_produces_non_constant_output() {
        let fbm = Fbm::new(42, 0.75, 6);
        let values: Vec<f64> = (0..64).map(|i| fbm.sample(i as f64 * 0.173, 0.37)).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01, "fbm range {min}..{max} is flat");
    }

    #[test]
    fn same_seed_same_field() {
        let a = Fbm::new(7, 0.75, 5);
        let b = Fbm::new(7, 0.75, 5);
        for i in 0..32 {
            let (x, y) = (i as f64 * 0.31, i as f64 * 0.17);
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn zero_strength_grain_is_identity() {
        let mut r = Raster::new(8, 8, [100, 150, 200, 255]);
        let before = r.clone();
        apply_grain(&mut r, &Fbm::new(1, 0.75, 4), Grain { strength: 0.0, frequency: 8.0, stretch: 1.0 });
        assert_eq!(r, before);
    }

    #[test]
    fn grain_keeps_alpha() {
        let mut r = Raster::new(16, 16, [100, 150, 200, 255]);
        apply_grain(&mut r, &Fbm::new(3, 0.75, 4), Grain { strength: 0.5, frequency: 8.0, stretch: 1.0 });
        assert!(r.data.iter().all(|px| px[3] == 255));
    }
}
