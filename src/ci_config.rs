//! `--keep-old` support for the CircleCI configuration of a tap

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// CI configuration file, relative to the repository root
pub const CIRCLECI_CONFIG: &str = ".circleci/config.yml";

/// Commit message for the keep-old change
pub const KEEP_OLD_MESSAGE: &str = "drop! CircleCI: Add --keep-old [Linux]";

/// Apply both keep-old substitutions to CI configuration text
///
/// Only the first line ending in `brew test-bot` and the first line ending
/// in `ci-upload` are rewritten. Fails when either line is missing.
pub fn add_keep_old(config: &str) -> Result<String> {
    let test_bot = Regex::new(r"(?m)brew test-bot$").expect("hardcoded regex is valid");
    let upload = Regex::new(r"(?m)ci-upload$").expect("hardcoded regex is valid");

    if !test_bot.is_match(config) {
        return Err(Error::Parse(format!(
            "{CIRCLECI_CONFIG}: no line ends with `brew test-bot`"
        )));
    }
    let config = test_bot.replace(config, "brew test-bot --keep-old");

    if !upload.is_match(&config) {
        return Err(Error::Parse(format!(
            "{CIRCLECI_CONFIG}: no line ends with `ci-upload`"
        )));
    }
    Ok(upload.replace(&config, "ci-upload?keep-old=1").into_owned())
}

/// Rewrite the CI configuration under `repo_root`, returning its path
pub async fn write_keep_old(repo_root: &Path) -> Result<PathBuf> {
    let path = repo_root.join(CIRCLECI_CONFIG);
    let config = tokio::fs::read_to_string(&path).await?;
    tokio::fs::write(&path, add_keep_old(&config)?).await?;
    Ok(path)
}
