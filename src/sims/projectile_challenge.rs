//! Projectile launch-angle challenge on a sloped hill.
//!
//! A launcher fires at 20 m/s from a platform toward a target up the
//! slope. Five candidate angles play in sequence, none of which is the
//! answer; the true angles come from the ballistic equation solved in
//! tan(theta) and are printed for the instructor, never shown on screen.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;
const FPS: u32 = 30;
const DURATION_S: f64 = 10.0;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    (DURATION_S * FPS as f64) as usize
}

/// Physics and scene layout. SI units throughout.
#[derive(Debug, Clone)]
pub struct ChallengeParams {
    pub g: f64,
    pub initial_velocity: f64,
    pub start_height: f64,
    pub target: (f64, f64),
    pub target_size: f64,
    /// Ground is y = ground_base + slope * x
    pub slope: f64,
    pub ground_base: f64,
    /// Launch point x; the platform sits under it
    pub launch_x: f64,
}

impl Default for ChallengeParams {
    fn default() -> Self {
        Self {
            g: 9.8,
            initial_velocity: 20.0,
            start_height: 5.0,
            target: (30.0, 12.0),
            target_size: 2.0,
            slope: 0.3,
            ground_base: 3.0,
            launch_x: 4.0,
        }
    }
}

impl ChallengeParams {
    pub fn ground_height(&self, x: f64) -> f64 {
        self.ground_base + self.slope * x
    }

    /// Launch point, platform top.
    pub fn launch_point(&self) -> (f64, f64) {
        (
            self.launch_x,
            self.ground_height(self.launch_x / 2.0) + self.start_height,
        )
    }

    /// Launch angles (degrees, low and high solution) that hit the
    /// target, from the ballistic equation solved in tan(theta):
    /// dy = dx*u - A*(1 + u^2) with A = g*dx^2 / (2*v^2).
    pub fn solution_angles(&self) -> Option<(f64, f64)> {
        let (lx, ly) = self.launch_point();
        let dx = self.target.0 - lx;
        let dy = self.target.1 - ly;
        let a = self.g * dx * dx / (2.0 * self.initial_velocity.powi(2));
        let disc = dx * dx - 4.0 * a * (dy + a);
        if disc < 0.0 {
            return None;
        }
        let u1 = (dx - disc.sqrt()) / (2.0 * a);
        let u2 = (dx + disc.sqrt()) / (2.0 * a);
        Some((u1.atan().to_degrees(), u2.atan().to_degrees()))
    }

    /// Height of the ballistic arc at horizontal offset `dx` for a
    /// launch angle in degrees.
    pub fn arc_height(&self, angle_deg: f64, dx: f64) -> f64 {
        let u = angle_deg.to_radians().tan();
        let a = self.g / (2.0 * (self.initial_velocity * angle_deg.to_radians().cos()).powi(2));
        let (_, ly) = self.launch_point();
        ly + u * dx - a * dx * dx
    }

    /// Sampled trajectory until it leaves the scene or hits the ground.
    pub fn trajectory(&self, angle_deg: f64, steps: usize) -> Vec<(f64, f64)> {
        let rad = angle_deg.to_radians();
        let vx = self.initial_velocity * rad.cos();
        let vy = self.initial_velocity * rad.sin();
        let (lx, ly) = self.launch_point();
        let max_t = 4.0 * vy.max(1.0) / self.g;
        let mut pts = Vec::new();
        for i in 0..steps {
            let t = max_t * i as f64 / (steps - 1) as f64;
            let x = lx + vx * t;
            let y = ly + vy * t - 0.5 * self.g * t * t;
            if x >= 40.0 {
                break;
            }
            if y < self.ground_height(x) && i > 0 {
                break;
            }
            pts.push((x, y));
        }
        pts
    }
}

/// Candidate angles played in order, one per fifth of the clip.
const CANDIDATE_ANGLES: [f64; 5] = [30.0, 45.0, 20.0, 60.0, 37.0];

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = ChallengeParams::default();

    // Instructor-only solution block, stdout never makes the video.
    println!("--------------------------------------");
    println!("SOLUTION (do not share)");
    println!("  velocity {} m/s, target {:?}", params.initial_velocity, params.target);
    match params.solution_angles() {
        Some((low, high)) => println!("  launch angles: {low:.1}° or {high:.1}°"),
        None => println!("  target not reachable at this velocity"),
    }
    println!("--------------------------------------");

    let background = Rgba([0, 17, 34, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let ground_c = Rgba([53, 85, 34, 255]);
    let platform_c = Rgba([85, 85, 85, 255]);
    let target_c = Rgba([255, 51, 51, 255]);
    let yellow = Rgba([255, 255, 0, 255]);
    let lavender = Rgba([170, 170, 255, 255]);
    let gray_text = Rgba([204, 204, 204, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);
    canvas.set_view(View::full(WIDTH, HEIGHT, 0.0, 40.0, 0.0, 25.0));

    let frames = frame_count();
    let fifth = frames / 5;
    let mut sink = VideoSink::create(output_dir, "projectile_challenge", FPS)?;

    let (lx, ly) = params.launch_point();
    let slope_angle = params.slope.atan().to_degrees();

    for frame in 0..frames {
        canvas.clear();

        // Hill.
        let cols = WIDTH as usize;
        for i in 0..cols {
            let x = 40.0 * i as f64 / cols as f64;
            canvas.fill_column(x, 0.0, params.ground_height(x), ground_c);
        }

        // Platform under the launch point.
        canvas.polygon_fill(
            &[
                (2.0, params.ground_height(1.0)),
                (6.0, params.ground_height(1.0)),
                (6.0, ly),
                (2.0, ly),
            ],
            platform_c,
        );

        // Target square.
        let (tx, ty) = params.target;
        let half = params.target_size / 2.0;
        canvas.polygon_fill(
            &[
                (tx - half, ty - half),
                (tx + half, ty - half),
                (tx + half, ty + half),
                (tx - half, ty + half),
            ],
            target_c,
        );
        let (tpx, tpy) = canvas.view().to_px(tx, ty + 2.0);
        text::draw_text_centered(canvas.image_mut(), tpx as i32, tpy as i32, "TARGET", 2, target_c);

        let angle = CANDIDATE_ANGLES[(frame / fifth).min(4)];

        // Angle indicator arm.
        let ex = lx + 3.0 * angle.to_radians().cos();
        let ey = ly + 3.0 * angle.to_radians().sin();
        canvas.line(lx, ly, ex, ey, canvas.faded(yellow, 0.7), 2.0);
        let (apx, apy) = canvas.view().to_px(lx + 2.0, ly + 2.0);
        let angle_label = format!("{angle:.0}°");
        text::draw_text(canvas.image_mut(), apx as i32, apy as i32, &angle_label, 2, yellow);

        // Trajectory reveal over the first half of each fifth.
        let path = params.trajectory(angle, 200);
        let progress = ((frame % fifth) as f64 / (fifth / 2) as f64).min(1.0);
        let shown = ((path.len() as f64 - 1.0) * progress) as usize + 1;
        canvas.polyline(&path[..shown.min(path.len())], yellow, 2.0);
        if let Some(&(px, py)) = path.get(shown.min(path.len()) - 1) {
            canvas.marker(px, py, 5, white);
        }

        let img = canvas.image_mut();
        text::draw_text_centered(img, WIDTH as i32 / 2, 40, "PROJECTILE CHALLENGE", 4, white);
        text::draw_text_centered(img, WIDTH as i32 / 2, 100, "FIND THE LAUNCH ANGLE TO HIT THE TARGET!", 2, lavender);
        let info = [
            format!("VELOCITY: {} M/S", params.initial_velocity),
            format!("GRAVITY: {} M/S²", params.g),
            format!("SLOPE: {slope_angle:.1}°"),
        ];
        for (i, line) in info.iter().enumerate() {
            text::draw_text(img, 60, 180 + 26 * i as i32, line, 2, gray_text);
        }

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_angles_hit_the_target() {
        let params = ChallengeParams::default();
        let (low, high) = params.solution_angles().expect("target reachable");
        let dx = params.target.0 - params.launch_point().0;
        for angle in [low, high] {
            let y = params.arc_height(angle, dx);
            assert!(
                (y - params.target.1).abs() < 1e-6,
                "angle {angle:.2} lands at {y:.3}"
            );
        }
    }

    #[test]
    fn test_candidates_are_not_the_solution() {
        // The shown angles must not give the answer away exactly.
        let params = ChallengeParams::default();
        let (low, high) = params.solution_angles().expect("target reachable");
        for angle in CANDIDATE_ANGLES {
            assert!((angle - low).abs() > 1.0, "angle {angle} matches {low:.1}");
            assert!((angle - high).abs() > 1.0, "angle {angle} matches {high:.1}");
        }
    }

    #[test]
    fn test_trajectory_starts_at_launch_point() {
        let params = ChallengeParams::default();
        let path = params.trajectory(45.0, 100);
        assert_eq!(path[0], params.launch_point());
    }

    #[test]
    fn test_trajectory_ends_at_or_above_ground() {
        let params = ChallengeParams::default();
        for angle in CANDIDATE_ANGLES {
            let path = params.trajectory(angle, 300);
            for &(x, y) in &path {
                assert!(y >= params.ground_height(x) - 1e-9, "below ground at x={x:.2}");
            }
        }
    }

    #[test]
    fn test_unreachable_target_returns_none() {
        let params = ChallengeParams {
            initial_velocity: 5.0,
            ..Default::default()
        };
        assert!(params.solution_angles().is_none());
    }
}
