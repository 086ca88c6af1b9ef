//! Rotating-triangle trigonometry challenge.
//!
//! A 4x3 triangle spins once around the origin while its live angle
//! measurements and two side lengths are shown; the third side is the
//! "x" the viewer is asked to find. Text fades in at the start, the
//! question appears a fifth of the way in, and everything fades out at
//! the end.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 1067;
const FPS: u32 = 30;
const DURATION_S: f64 = 30.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

/// Base triangle before rotation: 4 wide, 3 tall, centered on origin.
const A: (f64, f64) = (-2.0, -1.5);
const B: (f64, f64) = (2.0, -1.5);
const C: (f64, f64) = (0.0, 1.5);

pub fn rotate(p: (f64, f64), angle: f64) -> (f64, f64) {
    let (c, s) = (angle.cos(), angle.sin());
    (p.0 * c - p.1 * s, p.0 * s + p.1 * c)
}

/// Interior angle at `apex` in degrees.
pub fn angle_at(apex: (f64, f64), p: (f64, f64), q: (f64, f64)) -> f64 {
    let v1 = (p.0 - apex.0, p.1 - apex.1);
    let v2 = (q.0 - apex.0, q.1 - apex.1);
    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let n1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let n2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    (dot / (n1 * n2)).clamp(-1.0, 1.0).acos().to_degrees()
}

fn dist(p: (f64, f64), q: (f64, f64)) -> f64 {
    ((p.0 - q.0).powi(2) + (p.1 - q.1).powi(2)).sqrt()
}

fn mid(p: (f64, f64), q: (f64, f64)) -> (f64, f64) {
    ((p.0 + q.0) / 2.0, (p.1 + q.1) / 2.0)
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let yellow = Rgba([255, 255, 0, 255]);
    let red = Rgba([255, 60, 60, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    let y_half = 6.0 * HEIGHT as f64 / WIDTH as f64;
    canvas.set_view(View::full(WIDTH, HEIGHT, -6.0, 6.0, -y_half, y_half));

    let frames = frame_count();
    let mut sink = VideoSink::create(output_dir, "trig_challenge", FPS)?;

    for frame in 0..frames {
        canvas.clear();
        let fnorm = frame as f64 / frames as f64;
        let rotation = fnorm * std::f64::consts::TAU;

        let a = rotate(A, rotation);
        let b = rotate(B, rotation);
        let c = rotate(C, rotation);

        // Staged text alphas.
        let title_alpha = if fnorm < 0.1 {
            (fnorm / 0.1) as f32
        } else if fnorm > 0.9 {
            (1.0 - (fnorm - 0.9) / 0.1) as f32
        } else {
            1.0
        };
        let question_alpha = if fnorm < 0.2 {
            0.0
        } else if fnorm < 0.3 {
            ((fnorm - 0.2) / 0.1) as f32
        } else if fnorm > 0.9 {
            (1.0 - (fnorm - 0.9) / 0.1) as f32
        } else {
            1.0
        };

        canvas.polyline(&[a, b, c, a], white, 2.0);
        canvas.marker(a.0, a.1, 5, cyan);
        canvas.marker(b.0, b.1, 5, magenta);
        canvas.marker(c.0, c.1, 5, yellow);

        // Angle arcs centered on each vertex, opening toward the
        // opposite side.
        let verts = [(a, b, c, cyan), (b, c, a, magenta), (c, a, b, yellow)];
        for &(apex, p, q, color) in &verts {
            let half = angle_at(apex, p, q).to_radians() / 2.0;
            let bisector = {
                let u = ((p.0 - apex.0), (p.1 - apex.1));
                let v = ((q.0 - apex.0), (q.1 - apex.1));
                let nu = (u.0 * u.0 + u.1 * u.1).sqrt();
                let nv = (v.0 * v.0 + v.1 * v.1).sqrt();
                ((u.0 / nu + v.0 / nv), (u.1 / nu + v.1 / nv))
            };
            let mid_angle = bisector.1.atan2(bisector.0);
            canvas.arc(apex.0, apex.1, 0.5, mid_angle - half, mid_angle + half, color, 2.0);
        }

        // Angle readouts beside the vertices.
        for &(apex, p, q, color) in &verts {
            let deg = angle_at(apex, p, q);
            let away = (apex.0 * 1.35, apex.1 * 1.35);
            let (px, py) = canvas.view().to_px(away.0, away.1);
            let label = format!("{deg:.0}°");
            let faded = canvas.faded(color, title_alpha);
            text::draw_text_centered(canvas.image_mut(), px as i32, py as i32 - 7, &label, 2, faded);
        }

        // Two known sides plus the unknown "x" on the base.
        let labels = [
            (mid(b, c), format!("{:.1}", dist(b, c)), white),
            (mid(a, c), format!("{:.1}", dist(a, c)), white),
            (mid(a, b), "x".to_string(), red),
        ];
        for (pos, label, color) in labels {
            let out = (pos.0 * 1.25, pos.1 * 1.25);
            let (px, py) = canvas.view().to_px(out.0, out.1);
            let faded = canvas.faded(color, title_alpha);
            text::draw_text_centered(canvas.image_mut(), px as i32, py as i32 - 7, &label, 2, faded);
        }

        let title_c = canvas.faded(white, title_alpha);
        let (tx, ty) = canvas.view().to_px(0.0, 7.0);
        text::draw_text_centered(canvas.image_mut(), tx as i32, ty as i32, "TRIGONOMETRY CHALLENGE", 2, title_c);
        let q_c = canvas.faded(white, question_alpha);
        let (qx, qy) = canvas.view().to_px(0.0, 6.0);
        text::draw_text_centered(canvas.image_mut(), qx as i32, qy as i32, "CAN YOU FIND X?", 2, q_c);
        let wm = canvas.faded(magenta, title_alpha * 0.7);
        let (wx, wy) = canvas.view().to_px(0.0, -7.0);
        text::draw_text_centered(canvas.image_mut(), wx as i32, wy as i32, "@ScienceInMotion", 2, wm);

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_preserves_side_lengths() {
        for i in 0..16 {
            let angle = i as f64 * std::f64::consts::TAU / 16.0;
            let a = rotate(A, angle);
            let b = rotate(B, angle);
            assert!((dist(a, b) - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_angles_sum_to_180() {
        let angle = 0.73;
        let a = rotate(A, angle);
        let b = rotate(B, angle);
        let c = rotate(C, angle);
        let total = angle_at(a, b, c) + angle_at(b, c, a) + angle_at(c, a, b);
        assert!((total - 180.0).abs() < 1e-9, "sum {total}");
    }

    #[test]
    fn test_base_triangle_is_isoceles() {
        assert!((dist(A, C) - dist(B, C)).abs() < 1e-12);
        assert!((angle_at(A, B, C) - angle_at(B, A, C)).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle_detection() {
        let apex = (0.0, 0.0);
        assert!((angle_at(apex, (1.0, 0.0), (0.0, 1.0)) - 90.0).abs() < 1e-9);
    }
}
