//! Fourier series of a square wave drawn with stacked epicycles.
//!
//! Odd-harmonic circles (radius 4/(pi*(2k-1))) stack tip-to-center; the
//! tip's horizontal offset is the partial sum, traced downward as a
//! scrolling waveform. Terms are introduced one at a time during the
//! first quarter of the clip so the square wave visibly sharpens.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

#[derive(Debug, Clone)]
pub struct FourierParams {
    pub max_terms: usize,
    /// Signal cycles traced over the clip
    pub cycles: f64,
    pub duration_s: f64,
    pub fps: u32,
}

impl Default for FourierParams {
    fn default() -> Self {
        Self {
            max_terms: 8,
            cycles: 4.0,
            duration_s: 30.0,
            fps: 30,
        }
    }
}

impl FourierParams {
    /// Frames handed to the video sink over the full clip.
    pub fn frame_count(&self) -> usize {
        (self.duration_s * self.fps as f64) as usize
    }
}

/// Radius of the k-th epicycle (k = 1..), square-wave coefficients.
pub fn term_radius(k: usize) -> f64 {
    4.0 / (std::f64::consts::PI * (2.0 * k as f64 - 1.0))
}

/// Epicycle tip after `terms` circles at phase `t`; returns the chain of
/// joint positions, center first, tip last.
pub fn epicycle_chain(center: (f64, f64), terms: usize, t: f64) -> Vec<(f64, f64)> {
    let mut chain = Vec::with_capacity(terms + 1);
    let (mut x, mut y) = center;
    chain.push((x, y));
    for k in 1..=terms {
        let freq = 2.0 * k as f64 - 1.0;
        let r = term_radius(k);
        x += r * (freq * t).sin();
        y += r * (freq * t).cos();
        chain.push((x, y));
    }
    chain
}

/// Partial sum of the square-wave series at phase `t`.
pub fn partial_sum(terms: usize, t: f64) -> f64 {
    (1..=terms)
        .map(|k| term_radius(k) * ((2.0 * k as f64 - 1.0) * t).sin())
        .sum()
}

/// Terms shown at a given clip progress: ramp up over the first quarter.
fn visible_terms(progress: f64, max_terms: usize) -> usize {
    let ramp = (progress / 0.25).min(1.0);
    (1.0 + ramp * (max_terms - 1) as f64).round() as usize
}

const WIDTH: u32 = 600;
const HEIGHT: u32 = 1067;

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let params = FourierParams::default();
    let background = Rgba([10, 10, 25, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let cyan = Rgba([0, 255, 255, 255]);
    let orange = Rgba([255, 160, 40, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);

    // Square world units; portrait canvas gets the extra range in y.
    let y_half = 3.0 * HEIGHT as f64 / WIDTH as f64;
    canvas.set_view(View::full(WIDTH, HEIGHT, -3.0, 3.0, -y_half, y_half));

    let epicenter = (0.0, 2.6);
    let wave_head_y = 0.6;
    let wave_span_y = 4.6;
    let history_len = 300usize;
    let mut history: Vec<f64> = Vec::new();

    let frames = params.frame_count();
    let mut sink = VideoSink::create(output_dir, "fourier_series", params.fps)?;

    for frame in 0..frames {
        canvas.clear();
        let progress = frame as f64 / frames as f64;
        let t = progress * params.cycles * std::f64::consts::TAU;
        let terms = visible_terms(progress, params.max_terms);

        let chain = epicycle_chain(epicenter, terms, t);

        // Circles and radius arms, dimmer for higher harmonics.
        for k in 1..=terms {
            let (cx, cy) = chain[k - 1];
            let fade = 0.55 / (1.0 + 0.25 * (k - 1) as f32);
            let ring = canvas.faded(white, fade);
            canvas.circle(cx, cy, term_radius(k), ring, 1.0);
            canvas.line(cx, cy, chain[k].0, chain[k].1, canvas.faded(cyan, 0.9), 1.0);
        }
        let tip = chain[terms];
        canvas.marker(tip.0, tip.1, 4, orange);

        // Signal history scrolls downward, newest sample at the head.
        history.insert(0, tip.0 - epicenter.0);
        history.truncate(history_len);
        let wave: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                (v, wave_head_y - wave_span_y * i as f64 / history_len as f64)
            })
            .collect();
        canvas.polyline(&wave, cyan, 2.0);

        // Drop line from the tip to the newest sample.
        canvas.dashed_line(
            tip.0, tip.1, tip.0, wave_head_y,
            canvas.faded(white, 0.4), 1.0, 6.0,
        );
        canvas.marker(tip.0, wave_head_y, 3, orange);

        // Zero axis for the waveform.
        canvas.line(
            0.0, wave_head_y, 0.0, wave_head_y - wave_span_y,
            canvas.faded(white, 0.25), 1.0,
        );

        let img = canvas.image_mut();
        text::draw_text_centered(img, WIDTH as i32 / 2, 36, "FOURIER SERIES", 3, white);
        text::draw_text_centered(img, WIDTH as i32 / 2, 80, "SQUARE WAVE FROM CIRCLES", 2, cyan);
        let label = format!("TERMS: {terms}");
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 70, &label, 2, orange);
        text::draw_text_right(
            img,
            WIDTH as i32 - 12,
            HEIGHT as i32 - 30,
            "ScienceInMotion",
            2,
            Rgba([180, 180, 180, 255]),
        );

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_term_radii_follow_square_wave_coefficients() {
        assert!((term_radius(1) - 4.0 / PI).abs() < 1e-12);
        assert!((term_radius(2) - 4.0 / (3.0 * PI)).abs() < 1e-12);
        assert!((term_radius(5) - 4.0 / (9.0 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_partial_sum_approaches_square_wave() {
        // At quarter period the square wave is 1; the 8-term partial sum
        // should be close (Gibbs overshoot allowed near the jumps only).
        let v = partial_sum(8, PI / 2.0);
        assert!((v - 1.0).abs() < 0.05, "got {v}");
        let v = partial_sum(8, 3.0 * PI / 2.0);
        assert!((v + 1.0).abs() < 0.05, "got {v}");
    }

    #[test]
    fn test_chain_tip_matches_partial_sum() {
        let chain = epicycle_chain((0.0, 0.0), 6, 1.234);
        let tip_x = chain[chain.len() - 1].0;
        assert!((tip_x - partial_sum(6, 1.234)).abs() < 1e-12);
    }

    #[test]
    fn test_visible_terms_ramps_then_holds() {
        assert_eq!(visible_terms(0.0, 8), 1);
        assert_eq!(visible_terms(0.25, 8), 8);
        assert_eq!(visible_terms(0.9, 8), 8);
        let mut last = 0;
        for i in 0..=100 {
            let n = visible_terms(i as f64 / 100.0, 8);
            assert!(n >= last);
            last = n;
        }
    }
}
