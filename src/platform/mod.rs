//! Hosting service for pull requests
//!
//! Open pull requests are looked up through the GitHub search API and new
//! ones are opened with the `hub` CLI.

mod github;
mod hub;
mod slug;

pub use github::GitHubService;
pub use hub::{
    ASSIGN_AND_LABEL_VERSION, HubCapabilities, HubCli, HubVersion, parse_pull_request_output,
};
pub use slug::tap_slug;

use crate::error::Result;
use crate::types::PullRequest;
use async_trait::async_trait;

/// Label attached to bottle requests
pub const BOTTLE_LABEL: &str = "bottle";

/// Everything needed to open a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest {
    /// Head in `<remote>:<branch>` form
    pub head: String,
    /// Title (and body) of the pull request
    pub message: String,
    /// Account to assign the pull request to
    pub assignee: Option<String>,
    /// Labels to attach
    pub labels: Vec<String>,
    /// Open the new pull request in a browser
    pub browse: bool,
}

/// Platform service trait for pull request operations
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Open pull requests in `slug` matching a search `query`
    async fn find_open_prs(&self, slug: &str, query: &str) -> Result<Vec<PullRequest>>;

    /// Open a new pull request
    async fn create_pr(&self, request: &PrRequest) -> Result<PullRequest>;
}
