//! Sine and cosine traced simultaneously from one rotating point.
//!
//! The circle sits left of the origin; the point's y coordinate feeds the
//! sine trace and its x offset from the circle center feeds the cosine
//! trace, both drawn against the angle over two full turns.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 1067;
const FPS: u32 = 60;
const DURATION_S: f64 = 15.0;

/// Circle center; the waves start at x = 0.
const CENTER_X: f64 = -1.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let gray = Rgba([128, 128, 128, 255]);
    let blue = Rgba([0, 170, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let orange = Rgba([255, 149, 0, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    let pi = std::f64::consts::PI;
    let x_min = -2.3;
    let x_max = 4.0 * pi;
    let y_half = (x_max - x_min) / 2.0 * HEIGHT as f64 / WIDTH as f64;
    let y_mid = 0.0;
    canvas.set_view(View::full(
        WIDTH, HEIGHT,
        x_min, x_max,
        y_mid - y_half, y_mid + y_half,
    ));

    let frames = frame_count();
    let mut sink = VideoSink::create(output_dir, "sine_cosine_circle", FPS)?;

    let label_at = |canvas: &mut Canvas, wx: f64, wy: f64, s: &str, scale: i32, color: Rgba<u8>| {
        let (px, py) = canvas.view().to_px(wx, wy);
        text::draw_text_centered(canvas.image_mut(), px as i32, py as i32, s, scale, color);
    };

    for frame in 0..frames {
        canvas.clear();
        let t = 4.0 * pi * frame as f64 / frames as f64;
        let x = CENTER_X + t.cos();
        let y = t.sin();

        let axis = canvas.faded(gray, 0.4);
        canvas.line(x_min, 0.0, x_max, 0.0, axis, 1.0);
        canvas.line(0.0, -3.0, 0.0, 3.0, axis, 1.0);
        for (i, label) in ["π", "2π", "3π", "4π"].iter().enumerate() {
            let tx = (i + 1) as f64 * pi;
            canvas.line(tx, -0.1, tx, 0.1, gray, 1.0);
            label_at(&mut canvas, tx, -0.5, label, 2, white);
        }

        canvas.circle(CENTER_X, 0.0, 1.0, blue, 2.0);

        // Projections: horizontal feeds sine, vertical feeds cosine.
        let sine_dash = canvas.faded(cyan, 0.6);
        let cos_dash = canvas.faded(orange, 0.6);
        canvas.dashed_line(x, y, 0.0, y, sine_dash, 1.5, 5.0);
        canvas.dashed_line(x, y, x, 0.0, cos_dash, 1.5, 5.0);
        canvas.dashed_line(0.0, y, t, y, sine_dash, 1.5, 5.0);
        let cos_v = x - CENTER_X;
        canvas.dashed_line(0.0, cos_v, t, cos_v, cos_dash, 1.5, 5.0);

        // Both traces, up to the current angle.
        let samples = 1000;
        let sine: Vec<(f64, f64)> = (0..samples)
            .map(|i| {
                let a = t * i as f64 / (samples - 1) as f64;
                (a, a.sin())
            })
            .collect();
        let cosine: Vec<(f64, f64)> = sine.iter().map(|&(a, _)| (a, a.cos())).collect();
        canvas.polyline(&sine, cyan, 3.0);
        canvas.polyline(&cosine, orange, 3.0);

        canvas.marker(x, y, 5, white);
        canvas.marker(t, y, 5, cyan);
        canvas.marker(t, cos_v, 5, orange);

        label_at(&mut canvas, 0.8, 1.8, "SINE", 3, cyan);
        label_at(&mut canvas, 0.8, -1.8, "COSINE", 3, orange);
        label_at(&mut canvas, 2.0 * pi, 4.8, "SIN & COS", 4, white);
        label_at(&mut canvas, 2.0 * pi, 4.0, "FROM CIRCLES", 2, white);
        label_at(&mut canvas, 3.0 * pi, 1.5, "y = sin(θ)", 2, cyan);
        label_at(&mut canvas, 3.0 * pi, -1.7, "y = cos(θ)", 2, orange);
        let wm = canvas.faded(magenta, 0.9);
        label_at(&mut canvas, 2.0 * pi, -3.8, "@Science_In_Motion", 2, wm);

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_point_stays_on_circle() {
        for i in 0..100 {
            let t = 4.0 * PI * i as f64 / 100.0;
            let x = CENTER_X + t.cos();
            let y = t.sin();
            let r = ((x - CENTER_X).powi(2) + y * y).sqrt();
            assert!((r - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cosine_projection_matches_offset() {
        let t: f64 = 1.234;
        let x = CENTER_X + t.cos();
        assert!(((x - CENTER_X) - t.cos()).abs() < 1e-15);
    }
}
