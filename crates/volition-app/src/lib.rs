//! Volition application crate - composition root and pipeline wiring.

pub mod cli;
pub mod pipeline;

pub use cli::CliArgs;
pub use pipeline::{Pipeline, PipelineOutput};
