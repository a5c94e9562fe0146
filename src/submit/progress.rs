//! Progress callback trait for interface-agnostic updates
//!
//! The submission flow reports everything the operator sees through this
//! trait, so the CLI decides how it is rendered and tests can record it.

use crate::eligibility::SkipReason;
use crate::error::Error;
use crate::types::{Formula, PullRequest};
use async_trait::async_trait;
use std::fmt;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Loading formulae and their dependencies
    ResolvingFormulae,
    /// Checking the remotes of every involved tap
    CheckingRemotes,
    /// Filtering and submitting formulae one by one
    Submitting,
    /// Run complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolvingFormulae => write!(f, "Resolving formulae"),
            Self::CheckingRemotes => write!(f, "Checking remotes"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when a formula is skipped
    async fn on_skip(&self, formula: &Formula, reason: &SkipReason);

    /// Called with the `"<n>. <message>"` banner of a formula being submitted
    async fn on_banner(&self, ordinal: usize, message: &str);

    /// Called when a PR is created
    async fn on_pr_created(&self, formula: &Formula, pr: &PullRequest);

    /// Called for non-fatal problems (audit failures, dirty working copies)
    async fn on_warning(&self, message: &str);

    /// Called when an error occurs
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);

    /// Called with details only shown in verbose mode
    async fn on_detail(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_skip(&self, _formula: &Formula, _reason: &SkipReason) {}
    async fn on_banner(&self, _ordinal: usize, _message: &str) {}
    async fn on_pr_created(&self, _formula: &Formula, _pr: &PullRequest) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
    async fn on_detail(&self, _message: &str) {}
}
