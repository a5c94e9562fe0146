//! `BrewOps` backed by the brew executable

use crate::brew::{BrewOps, bottle_flags_from_source, parse_formula_info, parse_tap_info};
use crate::error::{Error, Result};
use crate::process;
use crate::types::{BottleSpec, Formula};
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runs the configured brew executable
#[derive(Debug, Clone)]
pub struct BrewCli {
    brew_file: PathBuf,
}

impl BrewCli {
    /// Use the brew executable at `brew_file`
    pub const fn new(brew_file: PathBuf) -> Self {
        Self { brew_file }
    }

    async fn brew(&self, args: &[&str]) -> Result<String> {
        process::read(&self.brew_file, args, None).await
    }
}

#[async_trait]
impl BrewOps for BrewCli {
    async fn formula(&self, name: &str) -> Result<Formula> {
        let info = parse_formula_info(&self.brew(&["info", "--json=v1", name]).await?)?;
        let path = PathBuf::from(self.brew(&["formula", name]).await?.trim());

        let tap_name = info
            .tap
            .clone()
            .ok_or_else(|| Error::Parse(format!("{name} does not belong to a tap")))?;
        let tap = parse_tap_info(&self.brew(&["tap-info", "--json=v1", tap_name.as_str()]).await?)?;

        let source = tokio::fs::read_to_string(&path).await?;
        let (unneeded, disabled) = bottle_flags_from_source(&source);
        debug!("{name}: loaded from {}", path.display());

        Ok(Formula {
            name: info.name.clone(),
            path,
            requirements: info.requirement_names(),
            bottle: BottleSpec {
                tags: info.bottle_tags(),
                unneeded,
                disabled: disabled || info.bottle_disabled,
            },
            tap,
        })
    }

    async fn deps_union(&self, names: &[String]) -> Result<Vec<String>> {
        let mut args = vec!["deps", "-n", "--union"];
        args.extend(names.iter().map(String::as_str));
        let output = self.brew(&args).await?;
        Ok(output.split_whitespace().map(ToString::to_string).collect())
    }

    async fn audit_online(&self, path: &Path) -> Result<bool> {
        let args = [OsStr::new("audit"), OsStr::new("--online"), path.as_os_str()];
        process::status(&self.brew_file, &args, None).await
    }

    async fn merge_bottles(&self, dir: &Path, json_files: &[PathBuf]) -> Result<()> {
        let mut args: Vec<OsString> = vec!["bottle".into(), "--merge".into(), "--write".into()];
        args.extend(json_files.iter().map(|p| p.as_os_str().to_owned()));
        process::run(&self.brew_file, &args, Some(dir)).await
    }
}
