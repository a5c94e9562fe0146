//! Access to the formula database through the `brew` executable

mod cli;
mod info;

pub use cli::BrewCli;
pub use info::{FormulaInfo, bottle_flags_from_source, parse_formula_info, parse_tap_info};

use crate::error::Result;
use crate::types::Formula;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Package-build tool operations
#[async_trait]
pub trait BrewOps: Send + Sync {
    /// Load a formula with its bottle specification and tap
    async fn formula(&self, name: &str) -> Result<Formula>;

    /// Union of the dependencies of `names`, in install order
    async fn deps_union(&self, names: &[String]) -> Result<Vec<String>>;

    /// Run `brew audit --online`; `Ok(false)` when the audit reports problems
    async fn audit_online(&self, path: &Path) -> Result<bool>;

    /// Merge bottle JSON files in `dir` into the formulae (`--merge --write`)
    async fn merge_bottles(&self, dir: &Path, json_files: &[PathBuf]) -> Result<()>;
}
