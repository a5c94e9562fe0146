//! CLI commands
//!
//! Command implementation for the `build-bottle-pr` binary.

mod progress;
mod submit;

pub use progress::CliProgress;
pub use submit::{BottlePrArgs, report_fatal, run_build_bottle_pr};
