//! Mock repository operations for testing

#![allow(dead_code)]

use async_trait::async_trait;
use bottle_pr::error::{Error, Result};
use bottle_pr::repo::RepoOps;
use bottle_pr::types::GitRemote;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory working copy
///
/// Every mutating call is recorded as a git-like command line so tests can
/// assert on the exact sequence of operations.
pub struct MockRepo {
    remotes: Vec<GitRemote>,
    toplevel: PathBuf,
    dirty: Mutex<bool>,
    branches: Mutex<HashSet<String>>,
    remote_branches: Mutex<HashSet<String>>,
    // Call tracking
    calls: Mutex<Vec<String>>,
    commits: Mutex<Vec<(Vec<PathBuf>, String)>>,
    // Error injection
    error_on_push: Mutex<Option<String>>,
    error_on_commit: Mutex<Option<String>>,
}

impl MockRepo {
    /// A clean working copy rooted at `toplevel` with the given remotes
    pub fn new(toplevel: &Path, remotes: &[&str]) -> Self {
        Self {
            remotes: remotes
                .iter()
                .map(|name| GitRemote {
                    name: (*name).to_string(),
                    url: format!("https://github.com/{name}/homebrew-core.git"),
                })
                .collect(),
            toplevel: toplevel.to_path_buf(),
            dirty: Mutex::new(false),
            branches: Mutex::new(HashSet::from(["master".to_string()])),
            remote_branches: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
            error_on_push: Mutex::new(None),
            error_on_commit: Mutex::new(None),
        }
    }

    /// Mark the working copy as having uncommitted changes
    pub fn set_dirty(&self) {
        *self.dirty.lock().unwrap() = true;
    }

    /// Add a local branch
    pub fn add_branch(&self, branch: &str) {
        self.branches.lock().unwrap().insert(branch.to_string());
    }

    /// Add a remote-tracking branch (`remote/branch`)
    pub fn add_remote_branch(&self, remote: &str, branch: &str) {
        self.remote_branches
            .lock()
            .unwrap()
            .insert(format!("{remote}/{branch}"));
    }

    // === Error injection methods ===

    /// Make `push` return an error
    pub fn fail_push(&self, msg: &str) {
        *self.error_on_push.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `commit` return an error
    pub fn fail_commit(&self, msg: &str) {
        *self.error_on_commit.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Recorded mutating calls, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded commits: paths and message
    pub fn commits(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.commits.lock().unwrap().clone()
    }

    /// Whether a local branch currently exists
    pub fn has_branch(&self, branch: &str) -> bool {
        self.branches.lock().unwrap().contains(branch)
    }

    /// Whether any recorded call starts with `prefix`
    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(slot: &Mutex<Option<String>>, command: &str) -> Result<()> {
        match slot.lock().unwrap().clone() {
            Some(stderr) => Err(Error::CommandFailed {
                command: command.to_string(),
                stderr,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RepoOps for MockRepo {
    async fn remotes(&self, _dir: &Path) -> Result<Vec<GitRemote>> {
        Ok(self.remotes.clone())
    }

    async fn is_clean(&self, _dir: &Path) -> Result<bool> {
        Ok(!*self.dirty.lock().unwrap())
    }

    async fn toplevel(&self, _dir: &Path) -> Result<PathBuf> {
        Ok(self.toplevel.clone())
    }

    async fn branch_exists(&self, _dir: &Path, branch: &str) -> Result<bool> {
        Ok(self.has_branch(branch))
    }

    async fn remote_branch_exists(&self, _dir: &Path, remote: &str, branch: &str) -> Result<bool> {
        Ok(self
            .remote_branches
            .lock()
            .unwrap()
            .contains(&format!("{remote}/{branch}")))
    }

    async fn create_branch(&self, _dir: &Path, branch: &str, base: &str) -> Result<()> {
        self.record(format!("checkout -b {branch} {base}"));
        self.branches.lock().unwrap().insert(branch.to_string());
        Ok(())
    }

    async fn checkout(&self, _dir: &Path, branch: &str) -> Result<()> {
        self.record(format!("checkout {branch}"));
        Ok(())
    }

    async fn delete_branch(&self, _dir: &Path, branch: &str) -> Result<()> {
        self.record(format!("branch -D {branch}"));
        self.branches.lock().unwrap().remove(branch);
        Ok(())
    }

    async fn commit(&self, _dir: &Path, paths: &[&Path], message: &str) -> Result<()> {
        self.record(format!("commit -m {message}"));
        Self::injected(&self.error_on_commit, "git commit")?;
        self.commits.lock().unwrap().push((
            paths.iter().map(|p| p.to_path_buf()).collect(),
            message.to_string(),
        ));
        Ok(())
    }

    async fn push(&self, _dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {remote} {branch}"));
        Self::injected(&self.error_on_push, &format!("git push {remote} {branch}"))
    }

    async fn delete_remote_branch(&self, _dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push --delete {remote} {branch}"));
        self.remote_branches
            .lock()
            .unwrap()
            .remove(&format!("{remote}/{branch}"));
        Ok(())
    }
}
