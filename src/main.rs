//! Science in Motion - batch generator for short vertical math videos
//!
//! Each flag selects one self-contained animation; frames are rendered on
//! the CPU and handed to ffmpeg (or a GIF fallback) per clip.

mod canvas;
mod cli;
mod sims;
mod text;
mod video;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let jobs = args.jobs();
    if jobs.is_empty() {
        Args::command().print_help()?;
        println!();
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    println!("Science in Motion - generating {} animation(s)\n", jobs.len());

    for job in jobs {
        println!("Creating {} animation...", job.name);
        let path = (job.run)(&args.output_dir)
            .with_context(|| format!("{} generation failed", job.name))?;
        let size_kb = std::fs::metadata(&path).map(|m| m.len() / 1024).unwrap_or(0);
        println!("Saved {} ({} KB)\n", path.display(), size_kb);
    }

    Ok(())
}
