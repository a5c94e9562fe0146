//! Mock brew for testing

#![allow(dead_code)]

use async_trait::async_trait;
use bottle_pr::brew::BrewOps;
use bottle_pr::error::{Error, Result};
use bottle_pr::types::Formula;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Call record for `merge_bottles`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub dir: PathBuf,
    pub json_files: Vec<PathBuf>,
}

/// In-memory formula database
pub struct MockBrew {
    formulae: Mutex<HashMap<String, Formula>>,
    deps: Mutex<Vec<String>>,
    audit_ok: Mutex<bool>,
    // Call tracking
    deps_calls: Mutex<Vec<Vec<String>>>,
    audit_calls: Mutex<Vec<PathBuf>>,
    merge_calls: Mutex<Vec<MergeCall>>,
}

impl Default for MockBrew {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBrew {
    pub fn new() -> Self {
        Self {
            formulae: Mutex::new(HashMap::new()),
            deps: Mutex::new(Vec::new()),
            audit_ok: Mutex::new(true),
            deps_calls: Mutex::new(Vec::new()),
            audit_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
        }
    }

    /// Make a formula loadable by name
    pub fn add_formula(&self, formula: Formula) {
        self.formulae
            .lock()
            .unwrap()
            .insert(formula.name.clone(), formula);
    }

    /// Dependency union returned for any request
    pub fn set_deps(&self, deps: &[&str]) {
        *self.deps.lock().unwrap() = deps.iter().map(ToString::to_string).collect();
    }

    /// Make every audit report problems
    pub fn fail_audit(&self) {
        *self.audit_ok.lock().unwrap() = false;
    }

    pub fn deps_calls(&self) -> Vec<Vec<String>> {
        self.deps_calls.lock().unwrap().clone()
    }

    pub fn audit_calls(&self) -> Vec<PathBuf> {
        self.audit_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrewOps for MockBrew {
    async fn formula(&self, name: &str) -> Result<Formula> {
        self.formulae
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CommandFailed {
                command: format!("brew info --json=v1 {name}"),
                stderr: format!("Error: No available formula with the name \"{name}\""),
            })
    }

    async fn deps_union(&self, names: &[String]) -> Result<Vec<String>> {
        self.deps_calls.lock().unwrap().push(names.to_vec());
        Ok(self.deps.lock().unwrap().clone())
    }

    async fn audit_online(&self, path: &Path) -> Result<bool> {
        self.audit_calls.lock().unwrap().push(path.to_path_buf());
        Ok(*self.audit_ok.lock().unwrap())
    }

    async fn merge_bottles(&self, dir: &Path, json_files: &[PathBuf]) -> Result<()> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            dir: dir.to_path_buf(),
            json_files: json_files.to_vec(),
        });
        Ok(())
    }
}
