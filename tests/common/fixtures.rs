//! Test data factories for bottle-pr types

#![allow(dead_code)]

use bottle_pr::types::{BottleSpec, Formula, PullRequest, Tap};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tap checkout on disk with a `Formula/` directory
pub struct TapDir {
    pub dir: TempDir,
}

impl TapDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Formula")).unwrap();
        Self { dir }
    }

    /// Root of the tap checkout
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory formula files live in
    pub fn formula_dir(&self) -> PathBuf {
        self.root().join("Formula")
    }

    /// The `homebrew/core` tap, hosted at Linuxbrew/homebrew-core
    pub fn tap(&self) -> Tap {
        make_tap(self.root(), Some("https://github.com/Linuxbrew/homebrew-core"))
    }

    /// Write `Formula/<name>.rb` and return a formula pointing at it
    pub fn formula(&self, name: &str) -> Formula {
        let path = self.formula_dir().join(format!("{name}.rb"));
        fs::write(&path, formula_source(name)).unwrap();
        make_formula(name, path, self.tap())
    }

    /// Write the CircleCI configuration at the tap root
    pub fn write_circleci_config(&self) -> PathBuf {
        let dir = self.root().join(".circleci");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yml");
        fs::write(
            &path,
            "jobs:\n  build:\n    steps:\n      - run: brew test-bot\n      \
             - run: curl https://example.com/ci-upload\n",
        )
        .unwrap();
        path
    }
}

/// Ruby source of a minimal formula
pub fn formula_source(name: &str) -> String {
    let class = name[..1].to_uppercase() + &name[1..];
    format!("class {class} < Formula\n  url \"https://example.com/{name}-1.0.tar.gz\"\nend\n")
}

/// Create a tap with the given remote
pub fn make_tap(path: &Path, remote: Option<&str>) -> Tap {
    Tap {
        name: "homebrew/core".to_string(),
        user: "homebrew".to_string(),
        repo: "core".to_string(),
        official: true,
        remote: remote.map(ToString::to_string),
        path: path.to_path_buf(),
    }
}

/// Create a formula with no requirements and no bottles
pub fn make_formula(name: &str, path: PathBuf, tap: Tap) -> Formula {
    Formula {
        name: name.to_string(),
        path,
        requirements: vec![],
        bottle: BottleSpec::default(),
        tap,
    }
}

/// Create an open pull request
pub fn make_pr(number: u64, title: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/Linuxbrew/homebrew-core/pull/{number}"),
        title: title.to_string(),
        state: "open".to_string(),
    }
}
