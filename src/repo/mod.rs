//! Repository operations on tap working copies
//!
//! Every method takes the directory to operate in, replacing the
//! change-directory blocks a shell script would use.

mod git;

pub use git::GitCli;

use crate::error::Result;
use crate::types::GitRemote;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Version-control operations the submission flow needs
#[async_trait]
pub trait RepoOps: Send + Sync {
    /// List remotes with their URLs
    async fn remotes(&self, dir: &Path) -> Result<Vec<GitRemote>>;

    /// Whether the working copy has no uncommitted changes
    async fn is_clean(&self, dir: &Path) -> Result<bool>;

    /// Root of the working copy containing `dir`
    async fn toplevel(&self, dir: &Path) -> Result<PathBuf>;

    /// Whether a local branch exists
    async fn branch_exists(&self, dir: &Path, branch: &str) -> Result<bool>;

    /// Whether `<remote>/<branch>` is known locally
    async fn remote_branch_exists(&self, dir: &Path, remote: &str, branch: &str) -> Result<bool>;

    /// Create `branch` from `base` and check it out
    async fn create_branch(&self, dir: &Path, branch: &str, base: &str) -> Result<()>;

    /// Check out an existing branch
    async fn checkout(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Force-delete a local branch
    async fn delete_branch(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Commit the given paths with a message
    async fn commit(&self, dir: &Path, paths: &[&Path], message: &str) -> Result<()>;

    /// Push a branch to a remote
    async fn push(&self, dir: &Path, remote: &str, branch: &str) -> Result<()>;

    /// Delete a branch on a remote
    async fn delete_remote_branch(&self, dir: &Path, remote: &str, branch: &str) -> Result<()>;
}
