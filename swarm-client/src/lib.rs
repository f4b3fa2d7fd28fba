//! Headless driver for the particle swarm: settings files, command scripts and
//! JSON-lines frame output.

pub mod runner;
pub mod script;
pub mod settings;

pub use runner::{RunSummary, RunnerOptions, SwarmRunner};
pub use script::{load_script, parse_script};
pub use settings::{apply_settings, load_settings};
