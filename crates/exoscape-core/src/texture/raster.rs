//! RGBA8 raster with the handful of 2D compositing primitives the surface
//! recipes need. Row-major, origin top-left, pixel centres at `+0.5`.
//!
//! All drawing is "source over" alpha blending with a float alpha in [0, 1];
//! shapes are evaluated per pixel centre inside their bounding box.

use crate::color::Rgb;

/// Gradient stop: offset in [0, 1] and colour. Stops must be sorted by offset.
pub type Stop = (f64, Rgb);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    /// Row-major RGBA.
    pub data: Vec<[u8; 4]>,
}

impl Raster {
    pub fn new(width: usize, height: usize, fill: [u8; 4]) -> Self {
        Self { width, height, data: vec![fill; width * height] }
    }

    /// Opaque black canvas.
    pub fn black(width: usize, height: usize) -> Self {
        Self::new(width, height, [0, 0, 0, 255])
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 4]) {
        self.data[y * self.width + x] = px;
    }

    /// Flat RGBA byte buffer, e.g. for PNG encoding or a GPU upload.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.iter().copied()).collect()
    }

    /// Blend `color` over the pixel at `(x, y)` with opacity `alpha`.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, color: Rgb, alpha: f64) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = &mut self.data[y * self.width + x];
        let mix = |d: u8, s: u8| (d as f64 + (s as f64 - d as f64) * a).round() as u8;
        dst[0] = mix(dst[0], color.r);
        dst[1] = mix(dst[1], color.g);
        dst[2] = mix(dst[2], color.b);
        dst[3] = (dst[3] as f64 + (255.0 - dst[3] as f64) * a).round() as u8;
    }

    /// Pixel index range covering `[lo, hi]` in continuous coordinates,
    /// clipped to `[0, limit)`.
    fn span(lo: f64, hi: f64, limit: usize) -> std::ops::Range<usize> {
        let start = lo.floor().max(0.0) as usize;
        let end = (hi.ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }

    /// Apply `shade` to every pixel in a bounding box; `shade` returns the
    /// coverage alpha for a pixel centre, or `None` to skip it.
    fn shade_box<F>(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb, mut shade: F)
    where
        F: FnMut(f64, f64) -> Option<f64>,
    {
        for y in Self::span(y0, y1, self.height) {
            for x in Self::span(x0, x1, self.width) {
                if let Some(a) = shade(x as f64 + 0.5, y as f64 + 0.5) {
                    self.blend(x, y, color, a);
                }
            }
        }
    }

    // ── Fills ────────────────────────────────────────────────────────────────

    /// Overwrite the whole raster with a solid colour.
    pub fn fill(&mut self, color: Rgb) {
        self.data.fill(color.with_alpha(255));
    }

    /// Linear gradient along `(x0, y0) → (x1, y1)`, extended flat beyond the ends.
    pub fn fill_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stops: &[Stop]) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len2 = (dx * dx + dy * dy).max(f64::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let t = ((px - x0) * dx + (py - y0) * dy) / len2;
                self.set(x, y, gradient_at(stops, t).with_alpha(255));
            }
        }
    }

    /// Radial gradient centred on `(cx, cy)` reaching its last stop at `radius`.
    pub fn fill_radial_gradient(&mut self, cx: f64, cy: f64, radius: f64, stops: &[Stop]) {
        let r = radius.max(f64::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let d = (x as f64 + 0.5 - cx).hypot(y as f64 + 0.5 - cy);
                self.set(x, y, gradient_at(stops, d / r).with_alpha(255));
            }
        }
    }

    // ── Shapes ───────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f64) {
        self.shade_box(x, y, x + w, y + h, color, |_, _| Some(alpha));
    }

    pub fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
        let r2 = radius * radius;
        self.shade_box(cx - radius, cy - radius, cx + radius, cy + radius, color, |px, py| {
            let d2 = (px - cx).powi(2) + (py - cy).powi(2);
            (d2 <= r2).then_some(alpha)
        });
    }

    /// Filled ellipse with semi-axes `(rx, ry)` rotated by `rotation` radians.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        color: Rgb,
        alpha: f64,
    ) {
        let (sin, cos) = rotation.sin_cos();
        let reach = rx.max(ry);
        let (rx, ry) = (rx.max(f64::EPSILON), ry.max(f64::EPSILON));
        self.shade_box(cx - reach, cy - reach, cx + reach, cy + reach, color, |px, py| {
            let (dx, dy) = (px - cx, py - cy);
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            ((u / rx).powi(2) + (v / ry).powi(2) <= 1.0).then_some(alpha)
        });
    }

    /// Radial glow disc: `inner` at the centre fading to `outer` at `radius`.
    pub fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, inner: Rgb, outer: Rgb) {
        let r = radius.max(f64::EPSILON);
        for y in Self::span(cy - r, cy + r, self.height) {
            for x in Self::span(cx - r, cx + r, self.width) {
                let d = (x as f64 + 0.5 - cx).hypot(y as f64 + 0.5 - cy);
                if d <= r {
                    self.blend(x, y, inner.lerp(outer, d / r), 1.0);
                }
            }
        }
    }

    // ── Strokes ──────────────────────────────────────────────────────────────

    /// Line segment of the given stroke width with flat-capped ends.
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_segment(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width: f64,
        color: Rgb,
        alpha: f64,
    ) {
        let half = (width * 0.5).max(0.5);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len2 = dx * dx + dy * dy;
        self.shade_box(
            x0.min(x1) - half,
            y0.min(y1) - half,
            x0.max(x1) + half,
            y0.max(y1) + half,
            color,
            |px, py| {
                let t = if len2 > 0.0 {
                    (((px - x0) * dx + (py - y0) * dy) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = (px - (x0 + t * dx)).hypot(py - (y0 + t * dy));
                (d <= half).then_some(alpha)
            },
        );
    }

    /// Connected segments through `points`. Joints are drawn once per
    /// segment, so overlapping translucent joints darken slightly.
    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Rgb, alpha: f64) {
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            self.stroke_segment(x0, y0, x1, y1, width, color, alpha);
        }
    }

    /// Horizontal and vertical lines every `spacing` pixels, starting at 0.
    pub fn grid(&mut self, spacing: usize, line_width: usize, color: Rgb, alpha: f64) {
        if spacing == 0 {
            return;
        }
        let lw = line_width.max(1);
        for y in 0..self.height {
            for x in 0..self.width {
                if x % spacing < lw || y % spacing < lw {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }
}

/// Evaluate a sorted stop list at `t` (clamped to [0, 1]).
pub fn gradient_at(stops: &[Stop], t: f64) -> Rgb {
    let Some(&(first_at, first)) = stops.first() else {
        return Rgb::new(0, 0, 0);
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first_at {
        return first;
    }
    for pair in stops.windows(2) {
        let ((a_at, a), (b_at, b)) = (pair[0], pair[1]);
        if t <= b_at {
            let span = (b_at - a_at).max(f64::EPSILON);
            return a.lerp(b, (t - a_at) / span);
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn gradient_stops_hit_exact_colours() {
        let stops = [(0.0, RED), (1.0, BLUE)];
        assert_eq!(gradient_at(&stops, 0.0), RED);
        assert_eq!(gradient_at(&stops, 1.0), BLUE);
        assert_eq!(gradient_at(&stops, 2.0), BLUE);
        assert_eq!(gradient_at(&stops, 0.5), Rgb::new(128, 0, 128));
        assert_eq!(gradient_at(&[], 0.5), Rgb::new(0, 0, 0));
    }

    #[test]
    fn opaque_disc_covers_centre_only() {
        let mut r = Raster::black(32, 32);
        r.fill_disc(16.0, 16.0, 4.0, RED, 1.0);
        assert_eq!(r.get(16, 16), [255, 0, 0, 255]);
        assert_eq!(r.get(0, 0), [0, 0, 0, 255]);
        assert_eq!(r.get(25, 16), [0, 0, 0, 255]);
    }

    #[test]
    fn half_alpha_blends_halfway() {
        let mut r = Raster::black(4, 4);
        r.fill_rect(0.0, 0.0, 4.0, 4.0, Rgb::new(200, 100, 50), 0.5);
        assert_eq!(r.get(2, 2), [100, 50, 25, 255]);
    }

    #[test]
    fn shapes_clip_at_edges() {
        let mut r = Raster::black(8, 8);
        r.fill_disc(-3.0, -3.0, 5.0, RED, 1.0);
        r.fill_rect(6.0, 6.0, 50.0, 50.0, BLUE, 1.0);
        r.stroke_segment(-10.0, 4.0, 20.0, 4.0, 1.0, BLUE, 1.0);
        assert_eq!(r.get(0, 0), [255, 0, 0, 255]);
        assert_eq!(r.get(7, 7), [0, 0, 255, 255]);
        assert_eq!(r.get(3, 4), [0, 0, 255, 255]);
    }

    #[test]
    fn rotated_ellipse_follows_major_axis() {
        let mut r = Raster::black(64, 64);
        r.fill_ellipse(32.0, 32.0, 20.0, 3.0, std::f64::consts::FRAC_PI_2, RED, 1.0);
        // Rotated 90°: long axis is vertical.
        assert_eq!(r.get(32, 48), [255, 0, 0, 255]);
        assert_eq!(r.get(48, 32), [0, 0, 0, 255]);
    }

    #[test]
    fn grid_marks_lines() {
        let mut r = Raster::black(10, 10);
        r.grid(5, 1, RED, 1.0);
        assert_eq!(r.get(5, 3), [255, 0, 0, 255]);
        assert_eq!(r.get(3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn glow_is_inner_colour_at_centre() {
        let mut r = Raster::black(21, 21);
        r.fill_glow(10.5, 10.5, 8.0, Rgb::new(255, 255, 0), RED);
        assert_eq!(r.get(10, 10), [255, 255, 0, 255]);
    }

    #[test]
    fn rgba_bytes_layout() {
        let r = Raster::new(2, 1, [1, 2, 3, 4]);
        assert_eq!(r.to_rgba_bytes(), vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
