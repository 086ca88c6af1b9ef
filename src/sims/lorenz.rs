//! Lorenz attractor with a slowly orbiting 3-D camera.
//!
//! Forward Euler at dt = 0.01 over 8000 steps, matching the classic
//! sigma/rho/beta parameters. The clip runs three phases: a short intro
//! that fades the titles in, the main sweep that reveals the path while
//! the camera orbits, and an outro that fades everything back out.

use std::path::{Path, PathBuf};

use anyhow::Result;
use glam::{DMat4, DVec3, DVec4};
use image::Rgba;

use crate::canvas::Canvas;
use crate::text;
use crate::video::VideoSink;

/// Lorenz system and clip parameters.
#[derive(Debug, Clone)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    /// Euler step (seconds of system time)
    pub dt: f64,
    /// Number of integration steps
    pub steps: usize,
    /// Initial point
    pub start: [f64; 3],
    pub duration_s: f64,
    pub fps: u32,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
            steps: 8000,
            start: [0.1, 0.0, 0.0],
            duration_s: 30.0,
            fps: 30,
        }
    }
}

impl LorenzParams {
    /// Frames handed to the video sink over the full clip.
    pub fn frame_count(&self) -> usize {
        (self.duration_s * self.fps as f64) as usize
    }
}

/// Integrate the Lorenz equations with forward Euler.
pub fn simulate(p: &LorenzParams) -> Vec<DVec3> {
    let mut pts = Vec::with_capacity(p.steps);
    let mut v = DVec3::new(p.start[0], p.start[1], p.start[2]);
    pts.push(v);
    for _ in 1..p.steps {
        let dx = p.sigma * (v.y - v.x);
        let dy = v.x * (p.rho - v.z) - v.y;
        let dz = v.x * v.y - p.beta * v.z;
        v += DVec3::new(dx, dy, dz) * p.dt;
        pts.push(v);
    }
    pts
}

const WIDTH: u32 = 540;
const HEIGHT: u32 = 960;

/// Orbiting perspective camera around `center`; angles in degrees.
struct OrbitCamera {
    center: DVec3,
    distance: f64,
}

impl OrbitCamera {
    fn view_proj(&self, elev_deg: f64, azim_deg: f64) -> DMat4 {
        let elev = elev_deg.to_radians();
        let azim = azim_deg.to_radians();
        let eye = self.center
            + DVec3::new(
                self.distance * elev.cos() * azim.cos(),
                self.distance * elev.cos() * azim.sin(),
                self.distance * elev.sin(),
            );
        // Z is "up" for the attractor, matching the usual plots.
        let view = DMat4::look_at_rh(eye, self.center, DVec3::Z);
        let proj = DMat4::perspective_rh(
            35f64.to_radians(),
            WIDTH as f64 / HEIGHT as f64,
            0.1,
            1000.0,
        );
        proj * view
    }
}

fn project(mat: &DMat4, p: DVec3) -> Option<(f32, f32)> {
    let clip: DVec4 = *mat * p.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    Some((
        ((ndc_x + 1.0) * 0.5 * WIDTH as f64) as f32,
        ((1.0 - ndc_y) * 0.5 * HEIGHT as f64) as f32,
    ))
}

// Purple-to-cyan progression used while the path grows.
const PATH_COLORS: [Rgba<u8>; 5] = [
    Rgba([153, 0, 153, 255]),
    Rgba([102, 0, 204, 255]),
    Rgba([0, 128, 255, 255]),
    Rgba([0, 204, 255, 255]),
    Rgba([0, 255, 255, 255]),
];

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = LorenzParams::default();
    println!("Generating Lorenz attractor points...");
    let pts = simulate(&params);
    println!("Generated {} points.", pts.len());

    let center = pts.iter().copied().sum::<DVec3>() / pts.len() as f64;
    let camera = OrbitCamera {
        center,
        distance: 120.0,
    };

    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    let frames = params.frame_count();
    let mut sink = VideoSink::create(output_dir, "lorenz_attractor", params.fps)?;
    println!("Creating animation with {frames} frames at {} fps...", params.fps);

    for frame in 0..frames {
        canvas.clear();
        let progress = frame as f64 / frames as f64;

        // Phase split: 5% intro / 90% reveal / 5% outro.
        let (shown, path_alpha, text_alpha, elev, azim) = if progress < 0.05 {
            let a = (progress / 0.05) as f32;
            (1usize, 1.0f32, a, 20.0, 30.0)
        } else if progress < 0.95 {
            let main = (progress - 0.05) / 0.9;
            let i = ((main * params.steps as f64) as usize).clamp(1, params.steps - 1);
            let elev = 20.0 + 10.0 * (main * 6.0).sin();
            let azim = 30.0 + 180.0 * main;
            (i, 1.0, 1.0, elev, azim)
        } else {
            let fade = (1.0 - (progress - 0.95) / 0.05).max(0.0) as f32;
            (params.steps - 1, fade, fade, 30.0, 210.0)
        };

        let mat = camera.view_proj(elev, azim);

        // Path color steps through the palette as the reveal advances.
        let main = ((progress - 0.05) / 0.9).clamp(0.0, 1.0);
        let color_idx = ((main * (PATH_COLORS.len() - 1) as f64) as usize)
            .min(PATH_COLORS.len() - 1);
        let path_color = canvas.faded(PATH_COLORS[color_idx], path_alpha);

        let mut prev: Option<(f32, f32)> = None;
        for p in pts.iter().take(shown) {
            let screen = project(&mat, *p);
            if let (Some(a), Some(b)) = (prev, screen) {
                canvas.line_px(a, b, path_color, 2.0);
            }
            prev = screen;
        }

        // Current point marker.
        if let Some((px, py)) = project(&mat, pts[shown.saturating_sub(1).max(0)]) {
            let dot = canvas.faded(white, path_alpha);
            imageproc::drawing::draw_filled_circle_mut(
                canvas.image_mut(),
                (px as i32, py as i32),
                4,
                dot,
            );
        }

        // Overlay text with staged fades.
        let title_color = canvas.faded(white, text_alpha);
        text::draw_text_centered(
            canvas.image_mut(),
            WIDTH as i32 / 2,
            40,
            "LORENZ ATTRACTOR",
            3,
            title_color,
        );

        // Subtitle only during the middle of the reveal.
        let subtitle_alpha = if (0.3..0.7).contains(&main) {
            if main > 0.6 {
                ((0.7 - main) * 10.0).max(0.0) as f32
            } else {
                ((main - 0.3) * 5.0).min(1.0) as f32
            }
        } else {
            0.0
        };
        if subtitle_alpha > 0.0 {
            let c = canvas.faded(white, subtitle_alpha);
            text::draw_text_centered(
                canvas.image_mut(),
                WIDTH as i32 / 2,
                90,
                "CHAOS THEORY VISUALIZATION",
                2,
                c,
            );
        }

        let eq_color = canvas.faded(white, text_alpha);
        let eq_y = HEIGHT as i32 - 130;
        text::draw_text_centered(canvas.image_mut(), WIDTH as i32 / 2, eq_y, "x' = 10(y-x)", 2, eq_color);
        text::draw_text_centered(
            canvas.image_mut(),
            WIDTH as i32 / 2,
            eq_y + 24,
            "y' = x(28-z)-y",
            2,
            eq_color,
        );
        text::draw_text_centered(
            canvas.image_mut(),
            WIDTH as i32 / 2,
            eq_y + 48,
            "z' = xy-(8/3)z",
            2,
            eq_color,
        );

        let wm = canvas.faded(white, text_alpha * 0.7);
        text::draw_text_right(
            canvas.image_mut(),
            WIDTH as i32 - 12,
            HEIGHT as i32 - 30,
            "ScienceInMotion",
            2,
            wm,
        );

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_matches_steps() {
        let params = LorenzParams::default();
        let pts = simulate(&params);
        assert_eq!(pts.len(), params.steps);
    }

    #[test]
    fn test_trajectory_stays_bounded() {
        // The attractor lives well inside this box for the classic
        // parameters; Euler at dt=0.01 must not blow up.
        let pts = simulate(&LorenzParams::default());
        for p in &pts {
            assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
            assert!(p.x.abs() < 60.0, "x escaped: {}", p.x);
            assert!(p.y.abs() < 80.0, "y escaped: {}", p.y);
            assert!(p.z > -10.0 && p.z < 80.0, "z escaped: {}", p.z);
        }
    }

    #[test]
    fn test_origin_is_a_fixed_point() {
        let params = LorenzParams {
            start: [0.0, 0.0, 0.0],
            steps: 100,
            ..Default::default()
        };
        let pts = simulate(&params);
        assert!(pts.iter().all(|p| p.length() == 0.0));
    }

    #[test]
    fn test_projection_lands_on_screen() {
        let camera = OrbitCamera {
            center: DVec3::new(0.0, 0.0, 25.0),
            distance: 120.0,
        };
        let mat = camera.view_proj(20.0, 30.0);
        let (x, y) = project(&mat, DVec3::new(0.0, 0.0, 25.0)).unwrap();
        // The look-at center projects to the middle of the frame.
        assert!((x - WIDTH as f32 / 2.0).abs() < 1.0);
        assert!((y - HEIGHT as f32 / 2.0).abs() < 1.0);
    }
}
