//! Missing-angle geometry challenges on a grid.
//!
//! Three triangle problems rotate every five seconds. Two angles are
//! labeled, the third is "x"; the angle arcs sweep open over the first
//! half of each problem and the answer is revealed in the last fifth.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1000;
const FPS: u32 = 30;
const DURATION_S: f64 = 15.0;
const SECONDS_PER_PROBLEM: f64 = 5.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

pub struct Problem {
    pub points: [(f64, f64); 3],
    /// Known angle labels in degrees; None marks the unknown.
    pub known_angles: [Option<u32>; 3],
    pub label_positions: [(f64, f64); 3],
    pub x_value: u32,
}

pub fn problems() -> [Problem; 3] {
    [
        Problem {
            points: [(-5.0, -5.0), (5.0, -5.0), (0.0, 5.0)],
            known_angles: [Some(40), Some(60), None],
            label_positions: [(0.0, -6.0), (5.5, -4.0), (-0.5, 5.5)],
            x_value: 80,
        },
        Problem {
            points: [(-6.0, -3.0), (6.0, -3.0), (0.0, 6.0)],
            known_angles: [Some(35), None, Some(55)],
            label_positions: [(-6.5, -4.0), (6.5, -4.0), (0.0, 6.5)],
            x_value: 90,
        },
        Problem {
            points: [(-4.0, -4.0), (7.0, -4.0), (2.0, 5.0)],
            known_angles: [None, Some(28), Some(47)],
            label_positions: [(-4.5, -5.0), (7.5, -3.0), (2.5, 5.5)],
            x_value: 105,
        },
    ]
}

/// Interior angle at vertex `i` of a triangle, in degrees, plus the
/// direction of the first edge (radians) for drawing the arc.
pub fn vertex_angle(points: &[(f64, f64); 3], i: usize) -> (f64, f64) {
    let p = points[i];
    let prev = points[(i + 2) % 3];
    let next = points[(i + 1) % 3];
    let v1 = (prev.0 - p.0, prev.1 - p.1);
    let v2 = (next.0 - p.0, next.1 - p.1);
    let n1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let n2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / (n1 * n2)).clamp(-1.0, 1.0);
    let deg = cos.acos().to_degrees();
    (deg, v1.1.atan2(v1.0))
}

/// Signed sweep direction from edge 1 toward edge 2 at vertex `i`.
fn sweep_sign(points: &[(f64, f64); 3], i: usize) -> f64 {
    let p = points[i];
    let prev = points[(i + 2) % 3];
    let next = points[(i + 1) % 3];
    let v1 = (prev.0 - p.0, prev.1 - p.1);
    let v2 = (next.0 - p.0, next.1 - p.1);
    (v1.0 * v2.1 - v1.1 * v2.0).signum()
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let grid = Rgba([51, 51, 51, 255]);
    let red = Rgba([255, 68, 68, 255]);
    let lavender = Rgba([170, 170, 255, 255]);
    let box_fill = Rgba([34, 34, 34, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);
    canvas.set_view(View::full(WIDTH, HEIGHT, -10.0, 10.0, -10.0, 10.0));

    let probs = problems();
    let frames = frame_count();
    let frames_per_problem = (SECONDS_PER_PROBLEM * FPS as f64) as usize;
    let mut sink = VideoSink::create(output_dir, "triangle_angle_challenge", FPS)?;

    for frame in 0..frames {
        canvas.clear();
        let idx = (frame / frames_per_problem) % probs.len();
        let progress = (frame % frames_per_problem) as f64 / frames_per_problem as f64;
        let problem = &probs[idx];

        // Background grid.
        let grid_c = canvas.faded(grid, 0.5);
        for i in -10..=10 {
            canvas.line(i as f64, -10.0, i as f64, 10.0, grid_c, 1.0);
            canvas.line(-10.0, i as f64, 10.0, i as f64, grid_c, 1.0);
        }

        canvas.polyline(
            &[
                problem.points[0],
                problem.points[1],
                problem.points[2],
                problem.points[0],
            ],
            white,
            2.0,
        );
        for &(x, y) in &problem.points {
            canvas.marker(x, y, 4, red);
        }

        // Arcs sweep open over the first half of the problem.
        let sweep_frac = (2.0 * progress).min(1.0);
        for i in 0..3 {
            let (deg, start) = vertex_angle(&problem.points, i);
            let sweep = deg.to_radians() * sweep_frac * sweep_sign(&problem.points, i);
            let (cx, cy) = problem.points[i];
            canvas.arc(cx, cy, 0.75, start, start + sweep, white, 2.0);
        }

        // Angle labels; the unknown is a red "x".
        for i in 0..3 {
            let (lx, ly) = problem.label_positions[i];
            let (px, py) = canvas.view().to_px(lx, ly);
            match problem.known_angles[i] {
                Some(deg) => {
                    let label = format!("{deg}°");
                    text::draw_text_centered(canvas.image_mut(), px as i32, py as i32 - 7, &label, 2, white);
                }
                None => {
                    text::draw_text_centered(canvas.image_mut(), px as i32, py as i32 - 7, "x", 3, red);
                }
            }
        }

        // Solution box along the bottom; answer shows late in the cycle.
        canvas.polygon_fill(
            &[(-3.0, -8.0), (3.0, -8.0), (3.0, -7.0), (-3.0, -7.0)],
            box_fill,
        );
        canvas.polyline(
            &[(-3.0, -8.0), (3.0, -8.0), (3.0, -7.0), (-3.0, -7.0), (-3.0, -8.0)],
            white,
            1.0,
        );
        let answer = if progress > 0.8 {
            format!("x = {}°", problem.x_value)
        } else {
            "x = ?".to_string()
        };
        let (sx, sy) = canvas.view().to_px(0.0, -7.5);
        text::draw_text_centered(canvas.image_mut(), sx as i32, sy as i32 - 7, &answer, 2, white);

        let (tx, ty) = canvas.view().to_px(0.0, 9.0);
        text::draw_text_centered(canvas.image_mut(), tx as i32, ty as i32 - 10, "GEOMETRY CHALLENGE", 3, white);
        let (ix, iy) = canvas.view().to_px(0.0, 7.0);
        text::draw_text_centered(canvas.image_mut(), ix as i32, iy as i32 - 7, "FIND ANGLE X", 2, lavender);

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_problem_angles_sum_to_180() {
        for problem in problems() {
            let total: f64 = (0..3).map(|i| vertex_angle(&problem.points, i).0).sum();
            assert!((total - 180.0).abs() < 1e-9, "sum {total}");
        }
    }

    #[test]
    fn test_stated_answers_match_geometry() {
        // The unknown angle must equal 180 minus the two known labels.
        for problem in problems() {
            let known: u32 = problem.known_angles.iter().flatten().sum();
            assert_eq!(problem.x_value, 180 - known);
        }
    }

    #[test]
    fn test_exactly_one_unknown_per_problem() {
        for problem in problems() {
            let unknowns = problem.known_angles.iter().filter(|a| a.is_none()).count();
            assert_eq!(unknowns, 1);
        }
    }
}
