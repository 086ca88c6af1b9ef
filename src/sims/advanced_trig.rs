//! Secant, cosecant and cotangent traced from circles in three panels.
//!
//! Same layout as the sine/cosine/tangent clip, but for the reciprocal
//! functions with their wider range: values are masked near the
//! asymptotes (|v| >= 10) and the displayed trace is clipped to +/-5.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 2000;
const FPS: u32 = 60;
const DURATION_S: f64 = 15.0;

const CENTER_X: f64 = -1.0;
const MASK: f64 = 10.0;
const CLIP: f64 = 5.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

/// Which reciprocal function a panel traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reciprocal {
    Sec,
    Csc,
    Cot,
}

impl Reciprocal {
    /// Raw value; may be huge near an asymptote.
    pub fn eval(self, t: f64) -> f64 {
        match self {
            Reciprocal::Sec => {
                if t.cos().abs() > 0.01 {
                    1.0 / t.cos()
                } else {
                    t.cos().signum() * 100.0
                }
            }
            Reciprocal::Csc => {
                if t.sin().abs() > 0.01 {
                    1.0 / t.sin()
                } else {
                    t.sin().signum() * 100.0
                }
            }
            Reciprocal::Cot => {
                if t.sin().abs() > 0.01 {
                    t.cos() / t.sin()
                } else {
                    t.cos().signum() * 100.0
                }
            }
        }
    }
}

/// Trace split into runs with asymptote gaps removed, values clipped.
pub fn trace_runs(f: Reciprocal, t: f64, samples: usize) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for i in 0..samples {
        let a = t * i as f64 / (samples - 1).max(1) as f64;
        let v = f.eval(a);
        if v.abs() < MASK {
            current.push((a, v.clamp(-CLIP, CLIP)));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let gray = Rgba([128, 128, 128, 255]);
    let green = Rgba([34, 255, 170, 255]);
    let pink = Rgba([255, 34, 170, 255]);
    let lime = Rgba([170, 255, 34, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    let pi = std::f64::consts::PI;
    let x_min = -2.3;
    let x_max = 4.0 * pi;

    let panels: [(Reciprocal, Rgba<u8>, &str, &str, f32); 3] = [
        (Reciprocal::Sec, green, "SECANT", "y = sec(θ) = 1/cos(θ)", 60.0),
        (Reciprocal::Csc, pink, "COSECANT", "y = csc(θ) = 1/sin(θ)", 680.0),
        (Reciprocal::Cot, lime, "COTANGENT", "y = cot(θ) = 1/tan(θ)", 1300.0),
    ];

    let frames = frame_count();
    let mut sink = VideoSink::create(output_dir, "advanced_trig_functions", FPS)?;
    let samples = 1000;

    for frame in 0..frames {
        canvas.clear();
        let t = 4.0 * pi * frame as f64 / frames as f64;
        let x = CENTER_X + t.cos();
        let y = t.sin();

        for &(func, color, label, equation, top) in &panels {
            canvas.set_view(View::panel(
                0.0, top, WIDTH as f32, 560.0,
                x_min, x_max, -5.5, 5.5,
            ));
            let axis = canvas.faded(gray, 0.4);
            canvas.line(x_min, 0.0, x_max, 0.0, axis, 1.0);
            canvas.line(0.0, -5.0, 0.0, 5.0, axis, 1.0);
            for (i, tick) in ["π", "2π", "3π", "4π"].iter().enumerate() {
                let tx = (i + 1) as f64 * pi;
                canvas.line(tx, -0.15, tx, 0.15, gray, 1.0);
                let (px, py) = canvas.view().to_px(tx, -0.6);
                text::draw_text_centered(canvas.image_mut(), px as i32, py as i32, tick, 2, white);
            }

            canvas.circle(CENTER_X, 0.0, 1.0, color, 2.0);
            canvas.line(CENTER_X, 0.0, x, y, canvas.faded(white, 0.3), 1.0);
            canvas.marker(x, y, 5, white);

            let val = func.eval(t);
            let display = val.clamp(-CLIP, CLIP);
            let dash = canvas.faded(color, 0.6);
            // Geometric construction lines, skipped near the asymptote.
            if val.abs() < MASK {
                match func {
                    Reciprocal::Sec => {
                        canvas.dashed_line(x, y, x, 0.0, dash, 1.5, 5.0);
                        canvas.dashed_line(x, 0.0, CENTER_X + val, 0.0, dash, 1.5, 5.0);
                    }
                    Reciprocal::Csc => {
                        canvas.dashed_line(x, y, 0.0, y, dash, 1.5, 5.0);
                        canvas.dashed_line(0.0, y, 0.0, val, dash, 1.5, 5.0);
                    }
                    Reciprocal::Cot => {
                        canvas.dashed_line(x, y, 0.0, y, dash, 1.5, 5.0);
                        canvas.dashed_line(0.0, y, val, y, dash, 1.5, 5.0);
                    }
                }
                canvas.dashed_line(0.0, display, t, display, dash, 1.5, 5.0);
            }

            for run in trace_runs(func, t, samples) {
                canvas.polyline(&run, color, 3.0);
            }
            canvas.marker(t, display, 5, color);

            let (lx, ly) = canvas.view().to_px(x_max - 0.5, 4.2);
            text::draw_text_right(canvas.image_mut(), lx as i32, ly as i32, label, 3, color);
            let (ex, ey) = canvas.view().to_px(3.0 * pi, -4.5);
            text::draw_text_centered(canvas.image_mut(), ex as i32, ey as i32, equation, 2, color);
        }

        let img = canvas.image_mut();
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 110, "ADVANCED TRIG FUNCTIONS", 4, white);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 65, "FROM CIRCULAR MOTION", 2, white);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 35, "@Science_In_Motion", 2, cyan);

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_reciprocal_identities() {
        let t = 0.7;
        assert!((Reciprocal::Sec.eval(t) * t.cos() - 1.0).abs() < 1e-12);
        assert!((Reciprocal::Csc.eval(t) * t.sin() - 1.0).abs() < 1e-12);
        assert!((Reciprocal::Cot.eval(t) * t.tan() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_asymptote_guard_returns_large_signed_value() {
        let v = Reciprocal::Sec.eval(PI / 2.0);
        assert!(v.abs() >= 100.0 || v.abs() > MASK);
    }

    #[test]
    fn test_runs_are_clipped_and_gapped() {
        for f in [Reciprocal::Sec, Reciprocal::Csc, Reciprocal::Cot] {
            let runs = trace_runs(f, 4.0 * PI, 4000);
            assert!(runs.len() >= 4, "{f:?} produced {} runs", runs.len());
            for run in &runs {
                assert!(run.iter().all(|&(_, v)| v.abs() <= CLIP));
            }
        }
    }
}
