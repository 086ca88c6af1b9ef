//! Deep zoom into the Mandelbrot set near Seahorse Valley.
//!
//! Escape-time iteration with smooth coloring, row-parallel via rayon.
//! The window shrinks by a constant per-frame factor so the zoom speed
//! looks uniform, and the iteration limit grows with depth to keep the
//! boundary detailed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{Rgba, RgbaImage};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::text;
use crate::video::VideoSink;

/// Zoom target and render parameters.
#[derive(Debug, Clone)]
pub struct MandelbrotParams {
    /// Zoom center (real, imaginary)
    pub center: (f64, f64),
    /// Complex-plane width of the first frame
    pub initial_width: f64,
    /// Complex-plane width of the last frame
    pub final_width: f64,
    pub duration_s: f64,
    pub fps: u32,
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            // A seahorse-valley point that stays interesting at depth.
            center: (-0.743643887037151, 0.131825904205330),
            initial_width: 3.0,
            final_width: 1e-9,
            duration_s: 30.0,
            fps: 30,
            width_px: 540,
            height_px: 960,
        }
    }
}

impl MandelbrotParams {
    /// Frames handed to the video sink over the full clip.
    pub fn frame_count(&self) -> usize {
        (self.duration_s * self.fps as f64) as usize
    }
}

/// Iteration limit at `depth` decades of magnification. Starts at 100 and
/// grows as deeper frames need more iterations to resolve the boundary.
pub fn iter_limit(depth: f64) -> u32 {
    100 + (depth * 60.0) as u32
}

/// Smooth escape-time value for one point; None means inside the set.
fn escape_time(c: Complex64, max_iter: u32) -> Option<f64> {
    let mut z = Complex64::new(0.0, 0.0);
    for i in 0..max_iter {
        z = z * z + c;
        let n2 = z.norm_sqr();
        if n2 > 4.0 {
            // Standard smoothing term, keeps the bands continuous.
            let nu = (n2.ln() / 2.0).ln() / std::f64::consts::LN_2;
            return Some(i as f64 + 1.0 - nu);
        }
    }
    None
}

/// Render one frame into `img`. `view_width` is the complex-plane width.
fn render_frame(img: &mut RgbaImage, p: &MandelbrotParams, view_width: f64, max_iter: u32, lut: &[Rgba<u8>]) {
    let (w, h) = (p.width_px as usize, p.height_px as usize);
    let view_height = view_width * h as f64 / w as f64;
    let (cx, cy) = p.center;
    let x0 = cx - view_width / 2.0;
    let y0 = cy - view_height / 2.0;
    let inside = Rgba([0, 0, 0, 255]);

    let raw: &mut [u8] = img;
    raw.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(row, chunk)| {
            let im = y0 + (row as f64 + 0.5) / h as f64 * view_height;
            for col in 0..w {
                let re = x0 + (col as f64 + 0.5) / w as f64 * view_width;
                let c = Complex64::new(re, im);
                let px = match escape_time(c, max_iter) {
                    None => inside,
                    Some(v) => {
                        let idx = ((v * 16.0) as usize) % lut.len();
                        lut[idx]
                    }
                };
                chunk[col * 4..col * 4 + 4].copy_from_slice(&px.0);
            }
        });
}

// Color stops cycled over escape time; interpolated into a 2048-entry LUT.
const STOPS: [[u8; 3]; 16] = [
    [66, 30, 15],
    [25, 7, 26],
    [9, 1, 47],
    [4, 4, 73],
    [0, 7, 100],
    [12, 44, 138],
    [24, 82, 177],
    [57, 125, 209],
    [134, 181, 229],
    [211, 236, 248],
    [241, 233, 191],
    [248, 201, 95],
    [255, 170, 0],
    [204, 128, 0],
    [153, 87, 0],
    [106, 52, 3],
];

fn build_lut() -> Vec<Rgba<u8>> {
    const SIZE: usize = 2048;
    let mut lut = Vec::with_capacity(SIZE);
    for i in 0..SIZE {
        let t = i as f64 / SIZE as f64 * STOPS.len() as f64;
        let a = t as usize % STOPS.len();
        let b = (a + 1) % STOPS.len();
        let f = t.fract();
        let mix = |x: u8, y: u8| (x as f64 * (1.0 - f) + y as f64 * f).round() as u8;
        lut.push(Rgba([
            mix(STOPS[a][0], STOPS[b][0]),
            mix(STOPS[a][1], STOPS[b][1]),
            mix(STOPS[a][2], STOPS[b][2]),
            255,
        ]));
    }
    lut
}

// Captions cut in at fixed points of the zoom.
const CAPTIONS: [(f64, &str); 5] = [
    (0.1, "THE MANDELBROT SET"),
    (0.3, "ZOOMING DEEPER..."),
    (0.5, "INFINITE COMPLEXITY"),
    (0.7, "SELF-SIMILAR FOREVER"),
    (0.9, "MATH IS BEAUTIFUL"),
];

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = MandelbrotParams::default();
    let frames = params.frame_count();
    // Constant per-frame shrink so the zoom rate looks uniform.
    let zoom_factor = (params.final_width / params.initial_width).powf(1.0 / frames as f64);
    let lut = build_lut();

    let mut img = RgbaImage::new(params.width_px, params.height_px);
    let mut sink = VideoSink::create(output_dir, "mandelbrot_zoom", params.fps)?;
    println!("Rendering {frames} frames, zoom factor {zoom_factor:.6} per frame...");

    let white = Rgba([255, 255, 255, 255]);
    for frame in 0..frames {
        let view_width = params.initial_width * zoom_factor.powi(frame as i32);
        let depth = (params.initial_width / view_width).log10();
        let max_iter = iter_limit(depth);
        render_frame(&mut img, &params, view_width, max_iter, &lut);

        let progress = frame as f64 / frames as f64;
        for &(at, caption) in &CAPTIONS {
            // Each caption holds for a fifth of the clip.
            if progress >= at && progress < at + 0.18 {
                text::draw_text_centered(
                    &mut img,
                    params.width_px as i32 / 2,
                    50,
                    caption,
                    3,
                    white,
                );
            }
        }
        text::draw_text_right(
            &mut img,
            params.width_px as i32 - 12,
            params.height_px as i32 - 30,
            "ScienceInMotion",
            2,
            Rgba([200, 200, 200, 255]),
        );

        sink.add_frame(&img)?;
        if frame % 100 == 0 {
            println!("  frame {frame}/{frames} (width {view_width:.3e}, {max_iter} iters)");
        }
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_limit_starts_at_100_and_grows() {
        assert_eq!(iter_limit(0.0), 100);
        let depths = (0..10).map(|d| iter_limit(d as f64)).collect::<Vec<_>>();
        assert!(depths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_origin_never_escapes() {
        assert!(escape_time(Complex64::new(0.0, 0.0), 500).is_none());
    }

    #[test]
    fn test_far_point_escapes_fast() {
        let v = escape_time(Complex64::new(2.0, 2.0), 500);
        assert!(matches!(v, Some(t) if t < 3.0));
    }

    #[test]
    fn test_escape_time_is_monotone_near_boundary() {
        // A point just outside the main cardioid escapes, one just
        // inside does not.
        assert!(escape_time(Complex64::new(0.26, 0.0), 1000).is_some());
        assert!(escape_time(Complex64::new(0.24, 0.0), 1000).is_none());
    }

    #[test]
    fn test_lut_covers_full_range() {
        let lut = build_lut();
        assert_eq!(lut.len(), 2048);
        assert!(lut.iter().all(|c| c[3] == 255));
    }

    #[test]
    fn test_render_frame_paints_every_pixel() {
        let params = MandelbrotParams {
            width_px: 32,
            height_px: 48,
            ..Default::default()
        };
        let lut = build_lut();
        let mut img = RgbaImage::new(32, 48);
        render_frame(&mut img, &params, 3.0, 100, &lut);
        assert!(img.pixels().all(|p| p[3] == 255));
    }
}
