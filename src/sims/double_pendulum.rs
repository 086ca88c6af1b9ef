//! Double pendulum: two rods, chaotic swing, cyan trace of the lower bob.
//!
//! The equations of motion are the standard two-rod formulation; they are
//! integrated with fixed-step RK4 (several substeps per output frame keep
//! the energy drift invisible over the 30 second clip).

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

/// Physical and animation parameters.
#[derive(Debug, Clone)]
pub struct PendulumParams {
    /// Rod lengths (meters)
    pub l1: f64,
    pub l2: f64,
    /// Bob masses (kilograms)
    pub m1: f64,
    pub m2: f64,
    /// Gravity (m/s^2)
    pub g: f64,
    /// Initial angles (radians, measured from the downward vertical)
    pub theta1_0: f64,
    pub theta2_0: f64,
    /// Clip length (seconds) and frame rate
    pub duration_s: f64,
    pub fps: u32,
    /// RK4 substeps per output frame
    pub substeps: u32,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            l1: 1.0,
            l2: 1.0,
            m1: 1.0,
            m2: 1.0,
            g: 9.81,
            theta1_0: 120f64.to_radians(),
            theta2_0: 60f64.to_radians(),
            duration_s: 30.0,
            fps: 30,
            substeps: 4,
        }
    }
}

impl PendulumParams {
    /// Frames handed to the video sink over the full clip.
    pub fn frame_count(&self) -> usize {
        (self.duration_s * self.fps as f64) as usize
    }
}

/// State vector [theta1, omega1, theta2, omega2].
pub type State = [f64; 4];

/// Right-hand side of the double pendulum ODE.
pub fn derivatives(y: &State, p: &PendulumParams) -> State {
    let (th1, w1, th2, w2) = (y[0], y[1], y[2], y[3]);
    let delta = th2 - th1;

    let den1 = (p.m1 + p.m2) * p.l1 - p.m2 * p.l1 * delta.cos() * delta.cos();
    let den2 = (p.l2 / p.l1) * den1;

    let dw1 = (p.m2 * p.l1 * w1 * w1 * delta.sin() * delta.cos()
        + p.m2 * p.g * th2.sin() * delta.cos()
        + p.m2 * p.l2 * w2 * w2 * delta.sin()
        - (p.m1 + p.m2) * p.g * th1.sin())
        / den1;

    let dw2 = (-p.m2 * p.l2 * w2 * w2 * delta.sin() * delta.cos()
        + (p.m1 + p.m2) * p.g * th1.sin() * delta.cos()
        - (p.m1 + p.m2) * p.l1 * w1 * w1 * delta.sin()
        - (p.m1 + p.m2) * p.g * th2.sin())
        / den2;

    [w1, dw1, w2, dw2]
}

fn rk4_step(y: &State, dt: f64, p: &PendulumParams) -> State {
    let add = |a: &State, b: &State, s: f64| -> State {
        [a[0] + b[0] * s, a[1] + b[1] * s, a[2] + b[2] * s, a[3] + b[3] * s]
    };
    let k1 = derivatives(y, p);
    let k2 = derivatives(&add(y, &k1, dt / 2.0), p);
    let k3 = derivatives(&add(y, &k2, dt / 2.0), p);
    let k4 = derivatives(&add(y, &k3, dt), p);
    [
        y[0] + dt / 6.0 * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]),
        y[1] + dt / 6.0 * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]),
        y[2] + dt / 6.0 * (k1[2] + 2.0 * k2[2] + 2.0 * k3[2] + k4[2]),
        y[3] + dt / 6.0 * (k1[3] + 2.0 * k2[3] + 2.0 * k3[3] + k4[3]),
    ]
}

/// Total energy (kinetic + potential), used as an integration sanity check.
pub fn total_energy(y: &State, p: &PendulumParams) -> f64 {
    let (th1, w1, th2, w2) = (y[0], y[1], y[2], y[3]);
    let v1sq = p.l1 * p.l1 * w1 * w1;
    let v2sq = v1sq
        + p.l2 * p.l2 * w2 * w2
        + 2.0 * p.l1 * p.l2 * w1 * w2 * (th1 - th2).cos();
    let kinetic = 0.5 * p.m1 * v1sq + 0.5 * p.m2 * v2sq;
    let potential =
        -(p.m1 + p.m2) * p.g * p.l1 * th1.cos() - p.m2 * p.g * p.l2 * th2.cos();
    kinetic + potential
}

/// Integrate the pendulum and return per-frame bob positions
/// (x1, y1, x2, y2), one sample per output frame.
pub fn simulate(p: &PendulumParams) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let frames = p.frame_count();
    let dt = 1.0 / (p.fps as f64 * p.substeps as f64);

    let mut y: State = [p.theta1_0, 0.0, p.theta2_0, 0.0];
    let mut x1 = Vec::with_capacity(frames);
    let mut y1 = Vec::with_capacity(frames);
    let mut x2 = Vec::with_capacity(frames);
    let mut y2 = Vec::with_capacity(frames);

    for _ in 0..frames {
        x1.push(p.l1 * y[0].sin());
        y1.push(-p.l1 * y[0].cos());
        x2.push(p.l1 * y[0].sin() + p.l2 * y[2].sin());
        y2.push(-p.l1 * y[0].cos() - p.l2 * y[2].cos());
        for _ in 0..p.substeps {
            y = rk4_step(&y, dt, p);
        }
    }

    (x1, y1, x2, y2)
}

const WIDTH: u32 = 540;
const HEIGHT: u32 = 960;

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = PendulumParams::default();
    let frames = params.frame_count();

    println!("Integrating double pendulum ({frames} frames)...");
    let (x1, y1, x2, y2) = simulate(&params);

    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);

    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);
    // Square world region centered on the pivot, widened vertically so the
    // 9:16 frame keeps an equal aspect.
    let reach = params.l1 + params.l2 + 0.2;
    let y_reach = reach * HEIGHT as f64 / WIDTH as f64;
    canvas.set_view(View::full(WIDTH, HEIGHT, -reach, reach, -y_reach, y_reach));

    let mut sink = VideoSink::create(output_dir, "double_pendulum", params.fps)?;
    println!("Generating animation... Please wait.");

    for frame in 0..frames {
        canvas.clear();

        // Trace of the second bob up to this frame.
        for i in 1..=frame {
            canvas.line(x2[i - 1], y2[i - 1], x2[i], y2[i], cyan, 1.0);
        }

        // Rods: pivot -> bob1 -> bob2, with markers on both bobs.
        canvas.line(0.0, 0.0, x1[frame], y1[frame], white, 3.0);
        canvas.line(x1[frame], y1[frame], x2[frame], y2[frame], white, 3.0);
        canvas.marker(0.0, 0.0, 4, white);
        canvas.marker(x1[frame], y1[frame], 6, white);
        canvas.marker(x2[frame], y2[frame], 6, white);

        // Title and watermark overlay.
        text::draw_text_centered(
            canvas.image_mut(),
            WIDTH as i32 / 2,
            40,
            "DOUBLE PENDULUM",
            3,
            white,
        );
        let wm = canvas.faded(Rgba([255, 0, 255, 255]), 0.7);
        text::draw_text_centered(
            canvas.image_mut(),
            WIDTH as i32 / 2,
            HEIGHT as i32 - 50,
            "@ScienceInMotion",
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
    fn test_trajectory_arrays_share_length() {
        let params = PendulumParams {
            duration_s: 2.0,
            ..Default::default()
        };
        let (x1, y1, x2, y2) = simulate(&params);
        let frames = (params.duration_s * params.fps as f64) as usize;
        assert_eq!(x1.len(), frames);
        assert_eq!(y1.len(), frames);
        assert_eq!(x2.len(), frames);
        assert_eq!(y2.len(), frames);
    }

    #[test]
    fn test_rk4_energy_drift_is_small() {
        let params = PendulumParams::default();
        let dt = 1.0 / (params.fps as f64 * params.substeps as f64);
        let mut y: State = [params.theta1_0, 0.0, params.theta2_0, 0.0];
        let e0 = total_energy(&y, &params);

        // 30 simulated seconds at the production step size.
        let steps = (params.duration_s / dt) as usize;
        for _ in 0..steps {
            y = rk4_step(&y, dt, &params);
        }
        let e1 = total_energy(&y, &params);

        let scale = e0.abs().max(1.0);
        assert!(
            ((e1 - e0) / scale).abs() < 0.05,
            "energy drifted from {} to {}",
            e0,
            e1
        );
    }

    #[test]
    fn test_bobs_stay_within_reach() {
        let params = PendulumParams::default();
        let (_, _, x2, y2) = simulate(&params);
        let reach = params.l1 + params.l2 + 1e-9;
        for (x, y) in x2.iter().zip(&y2) {
            let r = (x * x + y * y).sqrt();
            assert!(r <= reach + 1e-6, "bob 2 escaped to radius {}", r);
        }
    }

    #[test]
    fn test_rest_state_is_equilibrium() {
        let params = PendulumParams::default();
        let rest: State = [0.0, 0.0, 0.0, 0.0];
        let d = derivatives(&rest, &params);
        for v in d {
            assert!(v.abs() < 1e-12);
        }
    }
}
