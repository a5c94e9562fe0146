//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{HostingService, HubCli, PrRequest};
use crate::types::PullRequest;
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::IssueState;
use tracing::debug;

/// GitHub service: octocrab for searching, hub for creating
pub struct GitHubService {
    client: Octocrab,
    hub: HubCli,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// Without a token the search API is used anonymously, with GitHub's
    /// lower rate limit.
    pub fn new(token: Option<&str>, hub: HubCli) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;
        Ok(Self { client, hub })
    }

    /// The hub CLI used for creating pull requests
    pub const fn hub(&self) -> &HubCli {
        &self.hub
    }
}

/// Search query for open pull requests mentioning `text` in `slug`
pub fn open_pr_query(text: &str, slug: &str) -> String {
    format!("{text} type:pr state:open repo:{slug}")
}

#[async_trait]
impl HostingService for GitHubService {
    async fn find_open_prs(&self, slug: &str, query: &str) -> Result<Vec<PullRequest>> {
        let q = open_pr_query(query, slug);
        debug!("searching GitHub: {q}");

        let page = self
            .client
            .search()
            .issues_and_pull_requests(&q)
            .send()
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|issue| PullRequest {
                number: issue.number,
                html_url: issue.html_url.to_string(),
                title: issue.title,
                state: match issue.state {
                    IssueState::Open => "open",
                    IssueState::Closed => "closed",
                    _ => "unknown",
                }
                .to_string(),
            })
            .collect())
    }

    async fn create_pr(&self, request: &PrRequest) -> Result<PullRequest> {
        self.hub.pull_request(request).await
    }
}
