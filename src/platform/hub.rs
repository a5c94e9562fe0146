//! `hub` CLI for opening pull requests
//!
//! The argument set depends on the installed hub version; the version is
//! read once and turned into [`HubCapabilities`].

use crate::error::{Error, Result};
use crate::platform::PrRequest;
use crate::process;
use crate::types::PullRequest;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// First hub release supporting `-a` (assignee) and `-l` (labels)
pub const ASSIGN_AND_LABEL_VERSION: HubVersion = HubVersion([2, 3, 0]);

/// A `major.minor.patch` hub version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HubVersion(pub [u64; 3]);

impl HubVersion {
    /// Parse dotted version text; missing components are zero
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = [0_u64; 3];
        for (slot, piece) in parts.iter_mut().zip(text.trim().split('.')) {
            *slot = piece
                .parse()
                .map_err(|_| Error::Parse(format!("invalid hub version: {text}")))?;
        }
        Ok(Self(parts))
    }

    /// Extract the hub version from `hub --version` output
    pub fn from_version_output(output: &str) -> Result<Self> {
        let re = Regex::new(r"hub version ([0-9.]+)").expect("hardcoded regex is valid");
        let version = re
            .captures(output)
            .and_then(|c| c.get(1))
            .ok_or_else(|| Error::Parse(format!("cannot find hub version in: {output}")))?;
        Self::parse(version.as_str().trim_end_matches('.'))
    }
}

impl fmt::Display for HubVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch] = self.0;
        write!(f, "{major}.{minor}.{patch}")
    }
}

/// Features of the installed hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubCapabilities {
    /// `pull-request -a <user> -l <labels>` is supported
    pub assign_and_label: bool,
}

impl HubCapabilities {
    /// Capabilities of a given hub version
    pub fn for_version(version: HubVersion) -> Self {
        Self {
            assign_and_label: version >= ASSIGN_AND_LABEL_VERSION,
        }
    }
}

/// The hub executable and what it can do
#[derive(Debug, Clone)]
pub struct HubCli {
    program: PathBuf,
    version: HubVersion,
    capabilities: HubCapabilities,
}

impl HubCli {
    /// Locate hub on `PATH` and detect its version
    pub async fn detect() -> Result<Self> {
        let program = which::which("hub").map_err(|_| Error::MissingTool("hub".to_string()))?;
        let output = process::read(&program, &["--version"], None).await?;
        let version = HubVersion::from_version_output(&output)?;
        debug!("found hub {version} at {}", program.display());
        Ok(Self::with_version(program, version))
    }

    /// Use a known hub executable and version
    pub fn with_version(program: PathBuf, version: HubVersion) -> Self {
        Self {
            program,
            version,
            capabilities: HubCapabilities::for_version(version),
        }
    }

    /// Detected hub version
    pub const fn version(&self) -> HubVersion {
        self.version
    }

    /// Detected capabilities
    pub const fn capabilities(&self) -> HubCapabilities {
        self.capabilities
    }

    /// Arguments for `hub pull-request`
    pub fn pull_request_args(&self, request: &PrRequest) -> Vec<String> {
        let mut args = vec![
            "pull-request".to_string(),
            "-h".to_string(),
            request.head.clone(),
            "-m".to_string(),
            request.message.clone(),
        ];

        if self.capabilities.assign_and_label {
            if let Some(assignee) = &request.assignee {
                args.push("-a".to_string());
                args.push(assignee.clone());
            }
            if !request.labels.is_empty() {
                args.push("-l".to_string());
                args.push(request.labels.join(","));
            }
        }

        if request.browse {
            args.push("--browse".to_string());
        }
        args
    }

    /// Open a pull request and parse the URL hub prints
    pub async fn pull_request(&self, request: &PrRequest) -> Result<PullRequest> {
        let args = self.pull_request_args(request);
        let output = process::read(&self.program, &args, None)
            .await
            .map_err(pull_request_failed)?;
        Ok(parse_pull_request_output(&output, &request.message))
    }
}

/// Report a failed `hub pull-request` as a hosting error
fn pull_request_failed(err: Error) -> Error {
    match err {
        Error::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => {
            Error::Platform(format!("hub pull-request failed: {}", stderr.trim()))
        }
        Error::CommandFailed { command, .. } => {
            Error::Platform(format!("hub pull-request failed: {command}"))
        }
        other => other,
    }
}

/// Build a `PullRequest` from hub's output (the new PR's URL)
pub fn parse_pull_request_output(output: &str, message: &str) -> PullRequest {
    let url = output
        .lines()
        .map(str::trim)
        .filter_map(|line| url::Url::parse(line).ok())
        .last();

    let number = url
        .as_ref()
        .and_then(|u| u.path_segments())
        .and_then(|mut segments| segments.next_back().map(ToString::to_string))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);

    PullRequest {
        number,
        html_url: url.map(String::from).unwrap_or_default(),
        title: message.lines().next().unwrap_or_default().to_string(),
        state: "open".to_string(),
    }
}
