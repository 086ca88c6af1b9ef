//! The animation catalogue.
//!
//! Every module is a self-contained generator: it owns its parameters,
//! palette, staging schedule and video-save call, and exposes a single
//! `generate(output_dir) -> Result<PathBuf>`. Nothing here shares state;
//! the only common ground is the canvas/text/video plumbing.

pub mod advanced_trig;
pub mod double_pendulum;
pub mod fourier_series;
pub mod lorenz;
pub mod mandelbrot;
pub mod paraboloid;
pub mod projectile_challenge;
pub mod sine_cosine_trace;
pub mod sine_trace;
pub mod triangle_challenge;
pub mod trig_challenge;
pub mod trig_functions;
pub mod wave_function;

#[cfg(test)]
mod tests {
    use super::*;

    // One row per module: the frame count its generate() hands the sink,
    // and the count its advertised duration and fps imply.
    #[test]
    fn test_clip_lengths_match_advertised_durations() {
        let cases: [(&str, usize, usize); 13] = [
            (
                "double_pendulum",
                double_pendulum::PendulumParams::default().frame_count(),
                30 * 30,
            ),
            (
                "lorenz",
                lorenz::LorenzParams::default().frame_count(),
                30 * 30,
            ),
            (
                "mandelbrot",
                mandelbrot::MandelbrotParams::default().frame_count(),
                30 * 30,
            ),
            (
                "wave_function",
                wave_function::WaveParams::default().frame_count(),
                30 * 30,
            ),
            (
                "fourier_series",
                fourier_series::FourierParams::default().frame_count(),
                30 * 30,
            ),
            ("sine_trace", sine_trace::frame_count(), 15 * 30),
            ("sine_cosine_trace", sine_cosine_trace::frame_count(), 15 * 60),
            ("trig_functions", trig_functions::frame_count(), 15 * 60),
            ("advanced_trig", advanced_trig::frame_count(), 15 * 60),
            ("trig_challenge", trig_challenge::frame_count(), 30 * 30),
            ("triangle_challenge", triangle_challenge::frame_count(), 15 * 30),
            ("projectile_challenge", projectile_challenge::frame_count(), 10 * 30),
            ("paraboloid", paraboloid::frame_count(), 180),
        ];
        for (name, got, want) in cases {
            assert_eq!(got, want, "{name} clip length");
        }
    }
}
