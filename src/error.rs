//! Error types for bottle-pr

use crate::types::GitRemote;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, filtering or submitting formulae
#[derive(Debug, Error)]
pub enum Error {
    /// `--remote` named a remote that the working copy does not have
    #[error("No remote '{name}' was found in {}", .dir.display())]
    InvalidRemote {
        /// Requested remote name
        name: String,
        /// Tap directory that was inspected
        dir: PathBuf,
        /// Remotes that do exist, for diagnostics
        available: Vec<GitRemote>,
    },

    /// Neither the login nor the OS user name matched a remote
    #[error("Please provide a valid remote name to use for Pull Requests in {}", .dir.display())]
    NoRemoteFound {
        /// Tap directory that was inspected
        dir: PathBuf,
        /// Remotes that do exist, for diagnostics
        available: Vec<GitRemote>,
    },

    /// Local `bottle-<formula>` branch exists and `--force` was not given
    #[error("Branch {0} already exists")]
    BranchExists(String),

    /// Remote branch exists and `--force` was not given
    #[error("Remote branch {remote}/{branch} already exists")]
    RemoteBranchExists {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },

    /// Required credential variables are not set
    #[error("Missing {0} variables!")]
    MissingCredentials(String),

    /// A required external tool is not installed
    #[error("Please install {0} (brew install {0}) before proceeding")]
    MissingTool(String),

    /// No formula names were passed on the command line
    #[error("No formula has been specified")]
    NoFormulae,

    /// An external command exited unsuccessfully
    #[error("Failure while executing: {command}{}", format_stderr(.stderr))]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Captured standard error, if any
        stderr: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Hosting service error
    #[error("Platform error: {0}")]
    Platform(String),

    /// Parse error (tool output, JSON metadata, URLs)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Octocrab error
    #[error("GitHub error: {0}")]
    Octocrab(#[from] octocrab::Error),
}

impl Error {
    /// Whether this error aborts the whole run rather than a single formula
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidRemote { .. }
                | Self::NoRemoteFound { .. }
                | Self::MissingCredentials(_)
                | Self::MissingTool(_)
                | Self::NoFormulae
        )
    }

    /// Remotes to list after a remote resolution failure
    pub fn available_remotes(&self) -> Option<&[GitRemote]> {
        match self {
            Self::InvalidRemote { available, .. } | Self::NoRemoteFound { available, .. } => {
                Some(available)
            }
            _ => None,
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
