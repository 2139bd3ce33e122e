//! Config-driven header generation.
//!
//! `ifacegen.toml` names one schema and any number of targets; [`driver`]
//! renders every target in memory and only then writes the files.

pub mod config;
pub mod driver;

pub use config::{GeneratorConfig, TargetConfig};
pub use driver::{RenderedTarget, assemble, generate, render_targets, write_targets};
