//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand.

mod config;
mod diff;

pub use config::{run_config_init, run_config_path, run_config_show};
pub use diff::run_diff;

pub use crate::config::DiffConfig;
