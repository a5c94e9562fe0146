//! Parsing of `brew info` / `brew tap-info` JSON and formula sources

use crate::error::{Error, Result};
use crate::types::Tap;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::OnceLock;

/// The subset of `brew info --json=v1` this crate uses
#[derive(Debug, Clone, Deserialize)]
pub struct FormulaInfo {
    /// Short name
    pub name: String,
    /// Owning tap name
    #[serde(default)]
    pub tap: Option<String>,
    /// Declared requirements
    #[serde(default)]
    pub requirements: Vec<RequirementInfo>,
    /// Bottle block
    #[serde(default)]
    pub bottle: BottleInfo,
    /// `bottle :disable`
    #[serde(default)]
    pub bottle_disabled: bool,
}

/// A requirement entry
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementInfo {
    /// Requirement name ("macos", "linux", "xcode", ...)
    pub name: String,
}

/// Bottle block as reported by `brew info`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BottleInfo {
    /// Bottle for the stable version
    #[serde(default)]
    pub stable: Option<BottleFiles>,
}

/// Per-tag bottle files
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BottleFiles {
    /// Tag -> file metadata
    #[serde(default)]
    pub files: HashMap<String, serde_json::Value>,
}

impl FormulaInfo {
    /// Tags that already have a stable bottle
    pub fn bottle_tags(&self) -> BTreeSet<String> {
        self.bottle
            .stable
            .as_ref()
            .map(|s| s.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Requirement names
    pub fn requirement_names(&self) -> Vec<String> {
        self.requirements.iter().map(|r| r.name.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct TapInfo {
    name: String,
    user: String,
    repo: String,
    path: PathBuf,
    #[serde(default)]
    official: bool,
    #[serde(default)]
    remote: Option<String>,
}

/// Parse `brew info --json=v1 <formula>` output
pub fn parse_formula_info(json: &str) -> Result<FormulaInfo> {
    let infos: Vec<FormulaInfo> = serde_json::from_str(json)?;
    infos
        .into_iter()
        .next()
        .ok_or_else(|| Error::Parse("brew info returned no formula".to_string()))
}

/// Parse `brew tap-info --json=v1 <tap>` output
pub fn parse_tap_info(json: &str) -> Result<Tap> {
    let infos: Vec<TapInfo> = serde_json::from_str(json)?;
    let info = infos
        .into_iter()
        .next()
        .ok_or_else(|| Error::Parse("brew tap-info returned no tap".to_string()))?;

    Ok(Tap {
        name: info.name,
        user: info.user,
        repo: info.repo,
        official: info.official,
        remote: info.remote.filter(|r| !r.is_empty()),
        path: info.path,
    })
}

fn bottle_directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*bottle\s+:(unneeded|disable)\b").expect("hardcoded regex is valid")
    })
}

/// `(unneeded, disabled)` bottle flags declared in a formula's source
pub fn bottle_flags_from_source(source: &str) -> (bool, bool) {
    let mut unneeded = false;
    let mut disabled = false;
    for caps in bottle_directive_re().captures_iter(source) {
        match &caps[1] {
            "unneeded" => unneeded = true,
            _ => disabled = true,
        }
    }
    (unneeded, disabled)
}
