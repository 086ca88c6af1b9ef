//! Science in Motion - short-form math/physics animation generator

pub mod canvas;
pub mod cli;
pub mod sims;
pub mod text;
pub mod video;
