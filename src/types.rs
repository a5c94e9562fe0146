//! Core types for bottle-pr

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default bottle tag when `--tag` is not given
pub const DEFAULT_TAG: &str = "x86_64_linux";

/// Requirement name brew reports for `depends_on :macos`
pub const MACOS_REQUIREMENT: &str = "macos";

/// A tap: a repository of formula definitions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tap {
    /// Full tap name (e.g., "homebrew/core")
    pub name: String,
    /// Owning user or organization
    pub user: String,
    /// Repository name without the `homebrew-` prefix
    pub repo: String,
    /// Whether this is an official Homebrew tap
    pub official: bool,
    /// Remote URL of the tap checkout, if any
    pub remote: Option<String>,
    /// Local checkout path
    pub path: PathBuf,
}

impl fmt::Display for Tap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Bottle block of a formula
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BottleSpec {
    /// Platform tags that already have a bottle
    pub tags: BTreeSet<String>,
    /// `bottle :unneeded`
    pub unneeded: bool,
    /// `bottle :disable`
    pub disabled: bool,
}

impl BottleSpec {
    /// Whether a bottle for `tag` is already recorded
    pub fn has_tag(&self, tag: &BottleTag) -> bool {
        self.tags.contains(tag.as_str())
    }
}

/// A formula: a named package definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Formula {
    /// Short formula name
    pub name: String,
    /// Path to the formula's Ruby definition
    pub path: PathBuf,
    /// Names of declared requirements
    pub requirements: Vec<String>,
    /// Bottle specification
    pub bottle: BottleSpec,
    /// Owning tap
    pub tap: Tap,
}

impl Formula {
    /// Whether the formula declares a macOS requirement
    pub fn depends_on_macos(&self) -> bool {
        self.requirements.iter().any(|r| r == MACOS_REQUIREMENT)
    }

    /// Directory git commands run in for this formula
    pub fn formula_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.tap.path)
    }

    /// Name of the working branch for this formula's bottle request
    pub fn branch_name(&self) -> String {
        format!("bottle-{}", self.name)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A bottle platform tag (e.g., `x86_64_linux`, `catalina`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BottleTag(String);

impl BottleTag {
    /// Create a tag from its string form
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag targets Linux
    pub fn is_linux(&self) -> bool {
        self.0.ends_with("_linux")
    }
}

impl Default for BottleTag {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl fmt::Display for BottleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pull request on the hosting service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number (0 when the hosting tool did not report one)
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// PR title
    pub title: String,
    /// PR state ("open", "closed")
    pub state: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}
