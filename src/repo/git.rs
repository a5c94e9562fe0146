//! `RepoOps` backed by the git CLI

use crate::error::Result;
use crate::process;
use crate::repo::RepoOps;
use crate::types::GitRemote;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Runs `git` in the requested directory
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    async fn git(dir: &Path, args: &[&str]) -> Result<String> {
        process::read("git", args, Some(dir)).await
    }
}

#[async_trait]
impl RepoOps for GitCli {
    async fn remotes(&self, dir: &Path) -> Result<Vec<GitRemote>> {
        let names = Self::git(dir, &["remote"]).await?;
        let mut remotes = Vec::new();
        for name in names.split_whitespace() {
            // A remote without a URL is still a valid push target name
            let url = Self::git(dir, &["remote", "get-url", name])
                .await
                .map(|u| u.trim().to_string())
                .unwrap_or_default();
            remotes.push(GitRemote {
                name: name.to_string(),
                url,
            });
        }
        Ok(remotes)
    }

    async fn is_clean(&self, dir: &Path) -> Result<bool> {
        let status = Self::git(dir, &["status", "--porcelain"]).await?;
        Ok(status.trim().is_empty())
    }

    async fn toplevel(&self, dir: &Path) -> Result<PathBuf> {
        let root = Self::git(dir, &["rev-parse", "--show-toplevel"]).await?;
        Ok(PathBuf::from(root.trim()))
    }

    async fn branch_exists(&self, dir: &Path, branch: &str) -> Result<bool> {
        let listed = Self::git(dir, &["branch", "--list", branch]).await?;
        Ok(!listed.trim().is_empty())
    }

    async fn remote_branch_exists(&self, dir: &Path, remote: &str, branch: &str) -> Result<bool> {
        let pattern = format!("{remote}/{branch}");
        let listed = Self::git(dir, &["branch", "-r", "--list", pattern.as_str()]).await?;
        Ok(!listed.trim().is_empty())
    }

    async fn create_branch(&self, dir: &Path, branch: &str, base: &str) -> Result<()> {
        Self::git(dir, &["checkout", "-b", branch, base]).await?;
        Ok(())
    }

    async fn checkout(&self, dir: &Path, branch: &str) -> Result<()> {
        Self::git(dir, &["checkout", branch]).await?;
        Ok(())
    }

    async fn delete_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        Self::git(dir, &["branch", "-D", branch]).await?;
        Ok(())
    }

    async fn commit(&self, dir: &Path, paths: &[&Path], message: &str) -> Result<()> {
        let mut args: Vec<OsString> = vec!["commit".into()];
        args.extend(paths.iter().map(|p| p.as_os_str().to_owned()));
        args.push("-m".into());
        args.push(message.into());
        process::read("git", &args, Some(dir)).await?;
        Ok(())
    }

    async fn push(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        Self::git(dir, &["push", remote, branch]).await?;
        Ok(())
    }

    async fn delete_remote_branch(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        Self::git(dir, &["push", "--delete", remote, branch]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    /// Initialise a throwaway repository with one commit on `master`
    fn init_repo() -> Option<TempDir> {
        let dir = TempDir::new().ok()?;
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(dir.path())
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        };
        let ok = run(&["init", "-q", "-b", "master"])
            && run(&["config", "user.email", "test@example.com"])
            && run(&["config", "user.name", "Test"])
            && run(&["commit", "-q", "--allow-empty", "-m", "initial"])
            && run(&["remote", "add", "origin", "https://github.com/octocat/homebrew-core.git"]);
        ok.then_some(dir)
    }

    #[tokio::test]
    async fn test_branch_lifecycle() {
        // Skip quietly where git is unavailable
        let Some(repo) = init_repo() else { return };
        let git = GitCli;
        let dir = repo.path();

        assert!(!git.branch_exists(dir, "bottle-foo").await.unwrap());
        git.create_branch(dir, "bottle-foo", "master").await.unwrap();
        assert!(git.branch_exists(dir, "bottle-foo").await.unwrap());

        git.checkout(dir, "master").await.unwrap();
        git.delete_branch(dir, "bottle-foo").await.unwrap();
        assert!(!git.branch_exists(dir, "bottle-foo").await.unwrap());
    }

    #[tokio::test]
    async fn test_remotes_and_status() {
        let Some(repo) = init_repo() else { return };
        let git = GitCli;
        let dir = repo.path();

        let remotes = git.remotes(dir).await.unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].name, "origin");
        assert_eq!(remotes[0].url, "https://github.com/octocat/homebrew-core.git");

        assert!(git.is_clean(dir).await.unwrap());
        std::fs::write(dir.join("foo.rb"), "class Foo < Formula\nend\n").unwrap();
        assert!(!git.is_clean(dir).await.unwrap());
        assert!(
            !git.remote_branch_exists(dir, "origin", "bottle-foo")
                .await
                .unwrap()
        );
    }
}
