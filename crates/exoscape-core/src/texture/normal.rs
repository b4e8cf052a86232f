//! Tangent-space normal map derived from diffuse luminance.
//!
//! Luminance stands in for height. Gradients use a 3×3 Sobel kernel that wraps
//! in x (the texture is an equirectangular wrap) and clamps in y (poles).

use super::raster::Raster;

/// Encode a normal map from `diffuse`. `strength` scales the slope; 0 yields
/// a flat map of `(128, 128, 255)`.
pub fn normal_map(diffuse: &Raster, strength: f64) -> Raster {
    let (w, h) = (diffuse.width, diffuse.height);
    let mut out = Raster::new(w, h, [128, 128, 255, 255]);
    if w == 0 || h == 0 {
        return out;
    }

    let height: Vec<f64> = diffuse
        .data
        .iter()
        .map(|px| (0.2126 * px[0] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[2] as f64) / 255.0)
        .collect();
    let at = |x: isize, y: isize| -> f64 {
        let xx = x.rem_euclid(w as isize) as usize;
        let yy = y.clamp(0, h as isize - 1) as usize;
        height[yy * w + xx]
    };

    for y in 0..h as isize {
        for x in 0..w as isize {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));

            let (nx, ny, nz) = (-gx * strength, -gy * strength, 1.0);
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let enc = |v: f64| ((v / len * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8;
            out.set(x as usize, y as usize, [enc(nx), enc(ny), enc(nz), 255]);
        }
    }
    out
}
