//! GitHub authentication for the open pull request lookup

use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the gh CLI
    Cli,
    /// Token from an environment variable
    EnvVar,
}

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. `HOMEBREW_GITHUB_API_TOKEN` environment variable
/// 2. gh CLI (`gh auth token`)
/// 3. `GITHUB_TOKEN` environment variable
/// 4. `GH_TOKEN` environment variable
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = env_token("HOMEBREW_GITHUB_API_TOKEN") {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(token) = get_gh_cli_token().await {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Some(token) = env_token(key) {
            return Ok(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    Err(Error::GitHubApi(
        "No GitHub authentication found. Set HOMEBREW_GITHUB_API_TOKEN or run `gh auth login`"
            .to_string(),
    ))
}

fn env_token(key: &str) -> Option<String> {
    env::var(key).ok().filter(|t| !t.trim().is_empty())
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
