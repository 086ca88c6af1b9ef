//! Command-line argument parsing.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::sims;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "science-in-motion")]
#[command(about = "Generate short-form math/physics animations", long_about = None)]
pub struct Args {
    /// Generate the double pendulum animation
    #[arg(long)]
    pub double_pendulum: bool,

    /// Generate the Lorenz attractor animation
    #[arg(long)]
    pub lorenz: bool,

    /// Generate the Mandelbrot zoom animation
    #[arg(long)]
    pub mandelbrot: bool,

    /// Generate the quantum wave function collapse animation
    #[arg(long)]
    pub quantum: bool,

    /// Generate the Fourier series epicycle animation
    #[arg(long)]
    pub fourier: bool,

    /// Generate the sine-from-circle trace animation
    #[arg(long)]
    pub sine_trace: bool,

    /// Generate the combined sine/cosine circle trace
    #[arg(long)]
    pub sine_cosine: bool,

    /// Generate the sine/cosine/tangent panel animation
    #[arg(long)]
    pub trig_functions: bool,

    /// Generate the secant/cosecant/cotangent panel animation
    #[arg(long)]
    pub advanced_trig: bool,

    /// Generate the rotating-triangle trigonometry challenge
    #[arg(long)]
    pub trig_challenge: bool,

    /// Generate the missing-angle geometry challenge
    #[arg(long)]
    pub triangle_challenge: bool,

    /// Generate the projectile launch-angle challenge
    #[arg(long)]
    pub projectile: bool,

    /// Generate the rotating hyperbolic paraboloid
    #[arg(long)]
    pub paraboloid: bool,

    /// Generate every animation
    #[arg(long)]
    pub all: bool,

    /// Directory to save animations
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,
}

/// One selected animation: display name plus its generator function.
pub struct Job {
    pub name: &'static str,
    pub run: fn(&Path) -> anyhow::Result<PathBuf>,
}

impl Args {
    /// The generators selected by the flags, in catalogue order.
    /// Empty when no animation flag was given.
    pub fn jobs(&self) -> Vec<Job> {
        let table: [(&'static str, bool, fn(&Path) -> anyhow::Result<PathBuf>); 13] = [
            (
                "double pendulum",
                self.double_pendulum,
                sims::double_pendulum::generate,
            ),
            ("Lorenz attractor", self.lorenz, sims::lorenz::generate),
            ("Mandelbrot zoom", self.mandelbrot, sims::mandelbrot::generate),
            (
                "wave function collapse",
                self.quantum,
                sims::wave_function::generate,
            ),
            ("Fourier series", self.fourier, sims::fourier_series::generate),
            ("sine circle trace", self.sine_trace, sims::sine_trace::generate),
            (
                "sine/cosine trace",
                self.sine_cosine,
                sims::sine_cosine_trace::generate,
            ),
            (
                "trig functions",
                self.trig_functions,
                sims::trig_functions::generate,
            ),
            (
                "advanced trig functions",
                self.advanced_trig,
                sims::advanced_trig::generate,
            ),
            (
                "trig challenge",
                self.trig_challenge,
                sims::trig_challenge::generate,
            ),
            (
                "triangle angle challenge",
                self.triangle_challenge,
                sims::triangle_challenge::generate,
            ),
            (
                "projectile challenge",
                self.projectile,
                sims::projectile_challenge::generate,
            ),
            (
                "hyperbolic paraboloid",
                self.paraboloid,
                sims::paraboloid::generate,
            ),
        ];

        table
            .into_iter()
            .filter(|(_, selected, _)| self.all || *selected)
            .map(|(name, _, run)| Job { name, run })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_selects_nothing() {
        let args = Args::parse_from(["science-in-motion"]);
        assert!(args.jobs().is_empty());
        assert_eq!(args.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_all_selects_every_generator() {
        let args = Args::parse_from(["science-in-motion", "--all"]);
        assert_eq!(args.jobs().len(), 13);
    }

    #[test]
    fn test_individual_flags_compose() {
        let args = Args::parse_from(["science-in-motion", "--lorenz", "--mandelbrot"]);
        let jobs = args.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].name, "Lorenz attractor");
        assert_eq!(jobs[1].name, "Mandelbrot zoom");
    }

    #[test]
    fn test_output_dir_override() {
        let args = Args::parse_from(["science-in-motion", "--all", "--output-dir", "clips"]);
        assert_eq!(args.output_dir, PathBuf::from("clips"));
    }
}
