//! Remote resolution
//!
//! Picks the remote of a tap checkout that bottle branches are pushed to:
//! an explicit `--remote`, else a remote named after the GitHub login, else
//! one named after the OS user.

use crate::error::{Error, Result};
use crate::repo::RepoOps;
use crate::types::GitRemote;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Width the remote name is padded to in diagnostics
const NAME_WIDTH: usize = 16;

/// Resolve the push remote from the available remotes
///
/// `env_login` (the configured GitHub account) is tried before `env_user`
/// (the OS user name). The result depends only on the arguments.
pub fn resolve_remote(
    explicit: Option<&str>,
    available: &[GitRemote],
    dir: &Path,
    env_user: Option<&str>,
    env_login: Option<&str>,
) -> Result<String> {
    let has = |name: &str| available.iter().any(|r| r.name == name);

    if let Some(name) = explicit {
        if has(name) {
            return Ok(name.to_string());
        }
        return Err(Error::InvalidRemote {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            available: available.to_vec(),
        });
    }

    [env_login, env_user]
        .into_iter()
        .flatten()
        .find(|candidate| has(candidate))
        .map(ToString::to_string)
        .ok_or_else(|| Error::NoRemoteFound {
            dir: dir.to_path_buf(),
            available: available.to_vec(),
        })
}

/// Lines listing the available remotes, `* <name> <url>`
pub fn remote_diagnostics(available: &[GitRemote]) -> Vec<String> {
    available
        .iter()
        .map(|r| format!("* {:<NAME_WIDTH$} {}", r.name, r.url))
        .collect()
}

/// Hints printed when no remote could be guessed
pub const NO_REMOTE_HINTS: &[&str] = &[
    "You can do so:",
    " * on the command line via --remote=NAME",
    " * by setting HOMEBREW_GITHUB_USER env. variable",
    " * or by having a remote named as your USER env. variable",
];

/// Resolves remotes once per tap directory for the duration of a run
#[derive(Debug, Default)]
pub struct RemoteResolver {
    explicit: Option<String>,
    env_user: Option<String>,
    env_login: Option<String>,
    resolved: HashMap<PathBuf, String>,
}

impl RemoteResolver {
    /// Create a resolver for the given inputs
    pub fn new(
        explicit: Option<String>,
        env_user: Option<String>,
        env_login: Option<String>,
    ) -> Self {
        Self {
            explicit,
            env_user,
            env_login,
            resolved: HashMap::new(),
        }
    }

    /// Resolve the remote for `dir`, listing remotes on first use
    pub async fn resolve(&mut self, repo: &dyn RepoOps, dir: &Path) -> Result<String> {
        if let Some(remote) = self.resolved.get(dir) {
            return Ok(remote.clone());
        }

        let available = repo.remotes(dir).await?;
        let remote = resolve_remote(
            self.explicit.as_deref(),
            &available,
            dir,
            self.env_user.as_deref(),
            self.env_login.as_deref(),
        )?;

        debug!("resolved remote '{remote}' for {}", dir.display());
        self.resolved.insert(dir.to_path_buf(), remote.clone());
        Ok(remote)
    }
}
