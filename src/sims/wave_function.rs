//! Quantum harmonic oscillator: superposition, measurement, collapse.
//!
//! A weighted superposition of the first seven eigenstates evolves under
//! e^{-i E_n t}, gets "measured" twice (collapsing to n=2, then n=4), and
//! re-forms in between. Top panel shows the probability density with
//! sampled measurement dots, bottom panel the real and imaginary parts.
//!
//! Units are the dimensionless oscillator units (hbar = m = omega = 1),
//! so E_n = n + 1/2 and the ground-state width is 1.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

#[derive(Debug, Clone)]
pub struct WaveParams {
    /// Spatial grid extent [-x_max, x_max]
    pub x_max: f64,
    pub grid: usize,
    /// Eigenstates included in the superposition
    pub n_states: usize,
    pub duration_s: f64,
    pub fps: u32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            x_max: 6.0,
            grid: 500,
            n_states: 7,
            duration_s: 30.0,
            fps: 30,
        }
    }
}

impl WaveParams {
    /// Frames handed to the video sink over the full clip.
    pub fn frame_count(&self) -> usize {
        (self.duration_s * self.fps as f64) as usize
    }
}

/// Superposition weights before normalization, low states dominant.
const WEIGHTS: [f64; 7] = [0.5, 0.5, 0.4, 0.3, 0.2, 0.1, 0.05];

/// Physicists' Hermite polynomial H_n(x) by the three-term recurrence.
pub fn hermite(n: usize, x: f64) -> f64 {
    let mut h0 = 1.0;
    if n == 0 {
        return h0;
    }
    let mut h1 = 2.0 * x;
    for k in 1..n {
        let h2 = 2.0 * x * h1 - 2.0 * k as f64 * h0;
        h0 = h1;
        h1 = h2;
    }
    h1
}

/// Normalized oscillator eigenstate psi_n(x).
pub fn eigenstate(n: usize, x: f64) -> f64 {
    let mut fact = 1.0;
    for k in 1..=n {
        fact *= k as f64;
    }
    let norm = 1.0 / ((2f64.powi(n as i32) * fact).sqrt() * std::f64::consts::PI.powf(0.25));
    norm * hermite(n, x) * (-x * x / 2.0).exp()
}

/// psi(x, t) for the given per-state amplitudes.
fn superpose(amps: &[f64], xs: &[f64], t: f64) -> Vec<Complex64> {
    let norm: f64 = amps.iter().map(|a| a * a).sum::<f64>().sqrt();
    xs.iter()
        .map(|&x| {
            let mut psi = Complex64::new(0.0, 0.0);
            for (n, &a) in amps.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let energy = n as f64 + 0.5;
                let phase = Complex64::from_polar(1.0, -energy * t);
                psi += phase * (a / norm * eigenstate(n, x));
            }
            psi
        })
        .collect()
}

/// Sample a position from the density by inverse-CDF over the grid.
fn sample_position(xs: &[f64], density: &[f64], rng: &mut StdRng) -> f64 {
    let total: f64 = density.iter().sum();
    let mut u = rng.gen::<f64>() * total;
    for (i, &d) in density.iter().enumerate() {
        u -= d;
        if u <= 0.0 {
            return xs[i];
        }
    }
    xs[xs.len() - 1]
}

const WIDTH: u32 = 540;
const HEIGHT: u32 = 960;

/// What the wavefunction is doing at a given point in the clip.
enum Stage {
    Superposition { alpha: f32 },
    /// Measurement flash, `t` in [0,1] across the flash
    Collapse { target: usize, t: f64 },
    Eigen { target: usize },
    /// Blend back from an eigenstate to the superposition
    Reform { from: usize, t: f64 },
}

fn stage_at(progress: f64) -> Stage {
    match progress {
        p if p < 0.05 => Stage::Superposition { alpha: (p / 0.05) as f32 },
        p if p < 0.30 => Stage::Superposition { alpha: 1.0 },
        p if p < 0.35 => Stage::Collapse { target: 2, t: (p - 0.30) / 0.05 },
        p if p < 0.50 => Stage::Eigen { target: 2 },
        p if p < 0.58 => Stage::Reform { from: 2, t: (p - 0.50) / 0.08 },
        p if p < 0.62 => Stage::Superposition { alpha: 1.0 },
        p if p < 0.67 => Stage::Collapse { target: 4, t: (p - 0.62) / 0.05 },
        p if p < 0.92 => Stage::Eigen { target: 4 },
        p => Stage::Superposition {
            alpha: (1.0 - (p - 0.92) / 0.08).max(0.0) as f32,
        },
    }
}

/// Amplitudes for a stage: the collapse interpolates the weight vector
/// toward a single eigenstate, which reads as the density "snapping".
fn stage_amps(stage: &Stage, n_states: usize) -> Vec<f64> {
    let base: Vec<f64> = WEIGHTS[..n_states].to_vec();
    let pure = |target: usize| {
        let mut v = vec![0.0; n_states];
        v[target] = 1.0;
        v
    };
    match stage {
        Stage::Superposition { .. } => base,
        Stage::Eigen { target } => pure(*target),
        Stage::Collapse { target, t } => {
            let p = pure(*target);
            base.iter()
                .zip(&p)
                .map(|(b, q)| b * (1.0 - t) + q * t)
                .collect()
        }
        Stage::Reform { from, t } => {
            let p = pure(*from);
            p.iter()
                .zip(&base)
                .map(|(q, b)| q * (1.0 - t) + b * t)
                .collect()
        }
    }
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = WaveParams::default();
    let xs: Vec<f64> = (0..params.grid)
        .map(|i| -params.x_max + 2.0 * params.x_max * i as f64 / (params.grid - 1) as f64)
        .collect();

    let background = Rgba([5, 5, 20, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let yellow = Rgba([255, 220, 60, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    // Two stacked plot panels with margins for the titles.
    let top = View::panel(
        30.0, 140.0, WIDTH as f32 - 60.0, 330.0,
        -params.x_max, params.x_max, 0.0, 0.75,
    );
    let bottom = View::panel(
        30.0, 560.0, WIDTH as f32 - 60.0, 300.0,
        -params.x_max, params.x_max, -0.9, 0.9,
    );

    let frames = params.frame_count();
    let mut sink = VideoSink::create(output_dir, "quantum_wave", params.fps)?;
    let mut rng = StdRng::seed_from_u64(42);
    // Measurement dots persist while an eigenstate holds.
    let mut dots: Vec<f64> = Vec::new();
    let mut last_was_collapse = false;

    for frame in 0..frames {
        canvas.clear();
        let progress = frame as f64 / frames as f64;
        let t = progress * params.duration_s;
        let stage = stage_at(progress);
        let amps = stage_amps(&stage, params.n_states);
        let psi = superpose(&amps, &xs, t);
        let density: Vec<f64> = psi.iter().map(|c| c.norm_sqr()).collect();

        let alpha = match &stage {
            Stage::Superposition { alpha } => *alpha,
            _ => 1.0,
        };

        // Sample fresh dots at the end of each collapse flash.
        let in_collapse = matches!(stage, Stage::Collapse { .. });
        if in_collapse && !last_was_collapse {
            dots.clear();
            for _ in 0..40 {
                dots.push(sample_position(&xs, &density, &mut rng));
            }
        }
        if matches!(stage, Stage::Reform { .. } | Stage::Superposition { .. }) {
            dots.clear();
        }
        last_was_collapse = in_collapse;

        // Top panel: probability density, filled under the curve.
        canvas.set_view(top);
        let fill = canvas.faded(cyan, 0.25 * alpha);
        for (i, &x) in xs.iter().enumerate() {
            canvas.fill_column(x, 0.0, density[i], fill);
        }
        let curve: Vec<(f64, f64)> = xs.iter().zip(&density).map(|(&x, &d)| (x, d)).collect();
        canvas.polyline(&curve, canvas.faded(cyan, alpha), 2.0);
        canvas.line(-params.x_max, 0.0, params.x_max, 0.0, canvas.faded(white, 0.4), 1.0);

        for &x in &dots {
            canvas.marker(x, 0.03, 3, yellow);
        }

        // Bottom panel: Re and Im parts.
        canvas.set_view(bottom);
        canvas.line(-params.x_max, 0.0, params.x_max, 0.0, canvas.faded(white, 0.4), 1.0);
        let re: Vec<(f64, f64)> = xs.iter().zip(&psi).map(|(&x, c)| (x, c.re)).collect();
        let im: Vec<(f64, f64)> = xs.iter().zip(&psi).map(|(&x, c)| (x, c.im)).collect();
        canvas.polyline(&re, canvas.faded(cyan, alpha), 2.0);
        canvas.polyline(&im, canvas.faded(magenta, alpha), 2.0);

        // Measurement flash: brief white wash over the top panel.
        if let Stage::Collapse { t, .. } = stage {
            let flash = ((1.0 - t) * 0.6) as f32;
            if flash > 0.02 {
                canvas.set_view(top);
                let wash = canvas.faded(white, flash);
                for (i, &x) in xs.iter().enumerate() {
                    canvas.fill_column(x, 0.0, density[i], wash);
                }
            }
        }

        let title = canvas.faded(white, alpha.max(0.3));
        text::draw_text_centered(canvas.image_mut(), WIDTH as i32 / 2, 40, "QUANTUM MEASUREMENT", 3, title);
        let caption = match stage {
            Stage::Superposition { .. } => "SUPERPOSITION OF STATES",
            Stage::Collapse { .. } => "MEASUREMENT!",
            Stage::Eigen { target: 2 } => "COLLAPSED TO N=2",
            Stage::Eigen { .. } => "COLLAPSED TO N=4",
            Stage::Reform { .. } => "COHERENCE RETURNS",
        };
        text::draw_text_centered(canvas.image_mut(), WIDTH as i32 / 2, 90, caption, 2, title);
        let density_label = canvas.faded(cyan, alpha);
        text::draw_text_centered(canvas.image_mut(), WIDTH as i32 / 2, 500, "PROBABILITY DENSITY", 2, density_label);
        let parts_label = canvas.faded(magenta, alpha);
        text::draw_text_centered(canvas.image_mut(), WIDTH as i32 / 2, 880, "RE(PSI)  IM(PSI)", 2, parts_label);
        let wm = canvas.faded(white, 0.7 * alpha.max(0.3));
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

    fn grid() -> Vec<f64> {
        (0..2001).map(|i| -8.0 + 16.0 * i as f64 / 2000.0).collect()
    }

    fn integrate(xs: &[f64], f: impl Fn(f64) -> f64) -> f64 {
        let dx = xs[1] - xs[0];
        xs.iter().map(|&x| f(x) * dx).sum()
    }

    #[test]
    fn test_hermite_low_orders() {
        assert_eq!(hermite(0, 1.3), 1.0);
        assert!((hermite(1, 1.3) - 2.6).abs() < 1e-12);
        // H_2(x) = 4x^2 - 2
        assert!((hermite(2, 1.3) - (4.0 * 1.69 - 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_eigenstates_are_normalized() {
        let xs = grid();
        for n in 0..7 {
            let norm = integrate(&xs, |x| eigenstate(n, x).powi(2));
            assert!((norm - 1.0).abs() < 1e-6, "state {n} norm {norm}");
        }
    }

    #[test]
    fn test_eigenstates_are_orthogonal() {
        let xs = grid();
        let overlap = integrate(&xs, |x| eigenstate(0, x) * eigenstate(2, x));
        assert!(overlap.abs() < 1e-8, "overlap {overlap}");
    }

    #[test]
    fn test_superposition_density_normalized_over_time() {
        let xs = grid();
        let dx = xs[1] - xs[0];
        for &t in &[0.0, 1.7, 11.3] {
            let psi = superpose(&WEIGHTS, &xs, t);
            let total: f64 = psi.iter().map(|c| c.norm_sqr() * dx).sum();
            assert!((total - 1.0).abs() < 1e-6, "t={t} total={total}");
        }
    }

    #[test]
    fn test_collapse_stage_ends_pure() {
        let amps = stage_amps(&Stage::Collapse { target: 2, t: 1.0 }, 7);
        assert_eq!(amps[2], 1.0);
        assert!(amps.iter().enumerate().all(|(n, &a)| n == 2 || a == 0.0));
    }

    #[test]
    fn test_sampling_respects_density() {
        // Density concentrated on the right half must not produce
        // left-half samples.
        let xs: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
        let density: Vec<f64> = xs.iter().map(|&x| if x > 0.5 { 1.0 } else { 0.0 }).collect();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(sample_position(&xs, &density, &mut rng) > 0.5);
        }
    }
}
