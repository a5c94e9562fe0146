//! Bottle pull request submission
//!
//! 1. Planning - expand dependencies, load formulae, check remotes
//! 2. Execution - filter and submit each formula in order

mod execute;
mod plan;
mod progress;

pub use execute::{
    DEFAULT_MAINLINE, SubmissionOutcome, SubmitContext, SubmitOptions, bottle_message,
    prepend_marker, submit_formula,
};
pub use plan::{RunSummary, check_remotes, formula_names, load_formulae, run_bottle_prs};
pub use progress::{NoopProgress, Phase, ProgressCallback};
