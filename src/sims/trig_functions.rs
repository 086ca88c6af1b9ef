//! Sine, cosine and tangent traced from circles in three stacked panels.
//!
//! Each panel carries its own unit circle at x = -1 and traces one
//! function over two full turns. Tangent samples are masked near the
//! asymptotes (|tan| >= 10) and the displayed value is clipped to +/-3.

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
/// Samples with |tan| beyond this are treated as asymptote gaps.
const TAN_MASK: f64 = 10.0;
/// Display clip for the traced tangent value.
const TAN_CLIP: f64 = 3.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

/// Tangent trace split into runs, with asymptote gaps removed.
pub fn tangent_runs(t: f64, samples: usize) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for i in 0..samples {
        let a = t * i as f64 / (samples - 1).max(1) as f64;
        let v = a.tan();
        if v.abs() < TAN_MASK {
            current.push((a, v.clamp(-TAN_CLIP, TAN_CLIP)));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

struct Panel {
    view: View,
    circle_color: Rgba<u8>,
    label: &'static str,
    equation: &'static str,
}

fn draw_panel_frame(canvas: &mut Canvas, panel: &Panel, x_max: f64, y_lim: f64) {
    let gray = Rgba([128, 128, 128, 255]);
    let white = Rgba([255, 255, 255, 255]);
    canvas.set_view(panel.view);
    let axis = canvas.faded(gray, 0.4);
    canvas.line(-2.3, 0.0, x_max, 0.0, axis, 1.0);
    canvas.line(0.0, -y_lim, 0.0, y_lim, axis, 1.0);
    let pi = std::f64::consts::PI;
    for (i, label) in ["π", "2π", "3π", "4π"].iter().enumerate() {
        let tx = (i + 1) as f64 * pi;
        canvas.line(tx, -0.1, tx, 0.1, gray, 1.0);
        let (px, py) = canvas.view().to_px(tx, -0.35);
        text::draw_text_centered(canvas.image_mut(), px as i32, py as i32, label, 2, white);
    }
    canvas.circle(CENTER_X, 0.0, 1.0, panel.circle_color, 2.0);
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let blue = Rgba([0, 170, 255, 255]);
    let orange = Rgba([255, 149, 0, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    let pi = std::f64::consts::PI;
    let x_min = -2.3;
    let x_max = 4.0 * pi;

    // Three plot panels plus a footer strip for the titles.
    let panel_h = 560.0f32;
    let panels = [
        Panel {
            view: View::panel(0.0, 60.0, WIDTH as f32, panel_h, x_min, x_max, -1.9, 1.9),
            circle_color: blue,
            label: "SINE",
            equation: "y = sin(θ)",
        },
        Panel {
            view: View::panel(0.0, 680.0, WIDTH as f32, panel_h, x_min, x_max, -1.9, 1.9),
            circle_color: orange,
            label: "COSINE",
            equation: "y = cos(θ)",
        },
        Panel {
            view: View::panel(0.0, 1300.0, WIDTH as f32, panel_h, x_min, x_max, -3.4, 3.4),
            circle_color: magenta,
            label: "TANGENT",
            equation: "y = tan(θ)",
        },
    ];

    let frames = frame_count();
    let mut sink = VideoSink::create(output_dir, "trig_functions_circle", FPS)?;
    let samples = 1000;

    for frame in 0..frames {
        canvas.clear();
        let t = 4.0 * pi * frame as f64 / frames as f64;
        let x = CENTER_X + t.cos();
        let y = t.sin();
        let tan_val = t.tan();
        let tan_display = tan_val.clamp(-TAN_CLIP, TAN_CLIP);

        for (idx, panel) in panels.iter().enumerate() {
            let y_lim = if idx == 2 { 3.0 } else { 1.5 };
            draw_panel_frame(&mut canvas, panel, x_max, y_lim);
            let color = panel.circle_color;
            let dash = canvas.faded(color, 0.6);

            match idx {
                0 => {
                    canvas.dashed_line(x, y, 0.0, y, dash, 1.5, 5.0);
                    canvas.dashed_line(0.0, y, t, y, dash, 1.5, 5.0);
                    let wave: Vec<(f64, f64)> = (0..samples)
                        .map(|i| {
                            let a = t * i as f64 / (samples - 1) as f64;
                            (a, a.sin())
                        })
                        .collect();
                    canvas.polyline(&wave, color, 3.0);
                    canvas.marker(t, y, 5, color);
                }
                1 => {
                    let v = x - CENTER_X;
                    canvas.dashed_line(x, y, x, 0.0, dash, 1.5, 5.0);
                    canvas.dashed_line(0.0, v, t, v, dash, 1.5, 5.0);
                    let wave: Vec<(f64, f64)> = (0..samples)
                        .map(|i| {
                            let a = t * i as f64 / (samples - 1) as f64;
                            (a, a.cos())
                        })
                        .collect();
                    canvas.polyline(&wave, color, 3.0);
                    canvas.marker(t, v, 5, color);
                }
                _ => {
                    // Secant construction: ray from the center through the
                    // point meets the vertical tangent of the circle.
                    canvas.dashed_line(x, y, CENTER_X, 0.0, dash, 1.5, 5.0);
                    if t.cos().abs() > 0.01 {
                        let sec_x = CENTER_X + 1.0 / t.cos();
                        canvas.dashed_line(CENTER_X, 0.0, sec_x, 0.0, dash, 1.5, 5.0);
                    }
                    canvas.dashed_line(0.0, tan_display, t, tan_display, dash, 1.5, 5.0);
                    for run in tangent_runs(t, samples) {
                        canvas.polyline(&run, color, 3.0);
                    }
                    canvas.marker(t, tan_display, 5, color);
                }
            }
            canvas.marker(x, y, 5, white);

            let (lx, ly) = canvas.view().to_px(x_max - 0.5, y_lim * 0.8);
            text::draw_text_right(canvas.image_mut(), lx as i32, ly as i32, panel.label, 3, color);
            let (ex, ey) = canvas.view().to_px(3.0 * pi, -y_lim * 0.85);
            text::draw_text_centered(canvas.image_mut(), ex as i32, ey as i32, panel.equation, 2, color);
        }

        let img = canvas.image_mut();
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 110, "TRIGONOMETRIC FUNCTIONS", 4, white);
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
    fn test_tangent_runs_split_at_asymptotes() {
        // Two full turns cross four asymptotes, giving five runs.
        let runs = tangent_runs(4.0 * PI, 4000);
        assert_eq!(runs.len(), 5, "got {} runs", runs.len());
        for run in &runs {
            for &(_, v) in run {
                assert!(v.abs() <= TAN_CLIP);
            }
        }
    }

    #[test]
    fn test_tangent_runs_empty_before_motion() {
        let runs = tangent_runs(0.0, 100);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn test_run_values_match_tan() {
        let runs = tangent_runs(1.0, 500);
        for &(a, v) in &runs[0] {
            assert!((v - a.tan().clamp(-TAN_CLIP, TAN_CLIP)).abs() < 1e-12);
        }
    }
}
