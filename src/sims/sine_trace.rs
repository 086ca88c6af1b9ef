//! How a sine wave is generated from circular motion.
//!
//! A point runs once around a unit circle over the clip; its y coordinate
//! is projected to the right and traced against the angle, with tick
//! marks at multiples of pi.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 1067;
const FPS: u32 = 30;
const DURATION_S: f64 = 15.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

/// Circle point and traced wave for one animation instant; `t` is the
/// accumulated angle in radians.
pub fn wave_points(t: f64, samples: usize) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|i| {
            let a = t * i as f64 / (samples - 1).max(1) as f64;
            (a, a.sin())
        })
        .collect()
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let gray = Rgba([128, 128, 128, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    // Uniform scale, content band centered in the portrait frame.
    let y_half = 6.0 * HEIGHT as f64 / WIDTH as f64;
    canvas.set_view(View::full(WIDTH, HEIGHT, -6.0, 6.0, -y_half, y_half));

    let frames = frame_count();
    let mut sink = VideoSink::create(output_dir, "sine_circle_trace", FPS)?;

    let pi = std::f64::consts::PI;
    for frame in 0..frames {
        canvas.clear();
        let t = 2.0 * pi * frame as f64 / frames as f64;
        let (x, y) = (t.cos(), t.sin());

        // Axes and pi tick marks.
        let axis = canvas.faded(gray, 0.7);
        canvas.line(-6.0, 0.0, 6.0, 0.0, axis, 1.0);
        canvas.line(0.0, -3.0, 0.0, 3.0, axis, 1.0);
        for (i, label) in ["π", "2π", "3π", "4π"].iter().enumerate() {
            let tx = (i + 1) as f64 * pi;
            canvas.line(tx, -0.1, tx, 0.1, gray, 1.0);
            let (px, py) = canvas.view().to_px(tx, -0.3);
            text::draw_text_centered(canvas.image_mut(), px as i32, py as i32, label, 2, white);
        }

        canvas.circle(0.0, 0.0, 1.0, white, 2.0);

        // Projection lines: point to the axis, then out to the wave.
        let dashed = canvas.faded(cyan, 0.5);
        canvas.dashed_line(x, y, 0.0, y, dashed, 1.0, 5.0);
        canvas.dashed_line(0.0, y, t, y, dashed, 1.0, 5.0);

        canvas.polyline(&wave_points(t, 1000), cyan, 2.0);
        canvas.marker(x, y, 5, cyan);
        canvas.marker(t, y, 5, magenta);

        let (tx, ty) = canvas.view().to_px(0.0, 2.7);
        text::draw_text_centered(canvas.image_mut(), tx as i32, ty as i32, "HOW A SINE WAVE IS GENERATED", 2, white);
        let (sx, sy) = canvas.view().to_px(0.0, 2.3);
        text::draw_text_centered(canvas.image_mut(), sx as i32, sy as i32, "FROM CIRCULAR MOTION", 2, white);
        let (wx, wy) = canvas.view().to_px(0.0, -2.7);
        let wm = canvas.faded(magenta, 0.7);
        text::draw_text_centered(canvas.image_mut(), wx as i32, wy as i32, "@ScienceInMotion", 2, wm);

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wave_follows_sine() {
        let pts = wave_points(2.0 * PI, 1000);
        assert_eq!(pts.len(), 1000);
        for &(a, v) in &pts {
            assert!((v - a.sin()).abs() < 1e-12);
        }
        // Last sample sits at the full angle.
        assert!((pts[999].0 - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_wave_starts_at_origin() {
        let pts = wave_points(1.0, 100);
        assert_eq!(pts[0], (0.0, 0.0));
    }
}
