//! Process configuration read once from the environment

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Organization whose taps do not accept Linux bottle requests
pub const DEFAULT_RESTRICTED_ORG: &str = "Homebrew";

/// Tap repo exempt from the organization restriction
pub const DEFAULT_EXCEPTION_REPO: &str = "science";

/// Which taps may receive bottle requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapPolicy {
    /// Slug prefix of the restricted organization
    pub restricted_org: String,
    /// Tap repo that is allowed despite the restriction
    pub exception_repo: Option<String>,
}

impl Default for TapPolicy {
    fn default() -> Self {
        Self {
            restricted_org: DEFAULT_RESTRICTED_ORG.to_string(),
            exception_repo: Some(DEFAULT_EXCEPTION_REPO.to_string()),
        }
    }
}

/// Bintray upload credentials for the container build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BintrayCredentials {
    /// `HOMEBREW_BINTRAY_USER`
    pub user: String,
    /// `HOMEBREW_BINTRAY_KEY`
    pub key: String,
}

/// Environment-derived settings shared by both commands
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `HOMEBREW_GITHUB_USER`: account login for remote guessing and PR assignment
    pub github_user: Option<String>,
    /// `USER`: OS user name fallback
    pub user: Option<String>,
    /// Path of the `brew` executable
    pub brew_file: PathBuf,
    /// Bintray credentials, when both variables are set
    pub bintray: Option<BintrayCredentials>,
    /// Tap restriction policy
    pub tap_policy: TapPolicy,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let brew_file = get("HOMEBREW_BREW_FILE")
            .map(PathBuf::from)
            .or_else(|| get("HOMEBREW_PREFIX").map(|p| PathBuf::from(p).join("bin").join("brew")))
            .unwrap_or_else(|| PathBuf::from("brew"));

        let bintray = match (get("HOMEBREW_BINTRAY_USER"), get("HOMEBREW_BINTRAY_KEY")) {
            (Some(user), Some(key)) => Some(BintrayCredentials { user, key }),
            _ => None,
        };

        let mut tap_policy = TapPolicy::default();
        if let Some(org) = get("BOTTLE_PR_RESTRICTED_ORG") {
            tap_policy.restricted_org = org;
        }
        if let Some(repo) = get("BOTTLE_PR_EXCEPTION_REPO") {
            tap_policy.exception_repo = Some(repo);
        }

        Self {
            github_user: get("HOMEBREW_GITHUB_USER"),
            user: get("USER"),
            brew_file,
            bintray,
            tap_policy,
        }
    }

    /// Account that new pull requests are assigned to
    pub fn assignee(&self) -> Option<&str> {
        self.github_user.as_deref().or(self.user.as_deref())
    }

    /// Bintray credentials, or `MissingCredentials`
    pub fn bintray_credentials(&self) -> Result<&BintrayCredentials> {
        self.bintray.as_ref().ok_or_else(|| {
            Error::MissingCredentials("HOMEBREW_BINTRAY_USER or HOMEBREW_BINTRAY_KEY".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_brew_file_precedence() {
        let config = config_from(&[
            ("HOMEBREW_BREW_FILE", "/opt/brew/bin/brew"),
            ("HOMEBREW_PREFIX", "/home/linuxbrew/.linuxbrew"),
        ]);
        assert_eq!(config.brew_file, PathBuf::from("/opt/brew/bin/brew"));

        let config = config_from(&[("HOMEBREW_PREFIX", "/home/linuxbrew/.linuxbrew")]);
        assert_eq!(
            config.brew_file,
            PathBuf::from("/home/linuxbrew/.linuxbrew/bin/brew")
        );

        assert_eq!(config_from(&[]).brew_file, PathBuf::from("brew"));
    }

    #[test]
    fn test_assignee_prefers_github_user() {
        let config = config_from(&[("HOMEBREW_GITHUB_USER", "octocat"), ("USER", "root")]);
        assert_eq!(config.assignee(), Some("octocat"));

        let config = config_from(&[("USER", "root")]);
        assert_eq!(config.assignee(), Some("root"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("HOMEBREW_GITHUB_USER", ""), ("USER", "root")]);
        assert_eq!(config.github_user, None);
        assert_eq!(config.assignee(), Some("root"));
    }

    #[test]
    fn test_bintray_requires_both_variables() {
        let config = config_from(&[("HOMEBREW_BINTRAY_USER", "bot")]);
        assert!(matches!(
            config.bintray_credentials(),
            Err(Error::MissingCredentials(_))
        ));

        let config = config_from(&[
            ("HOMEBREW_BINTRAY_USER", "bot"),
            ("HOMEBREW_BINTRAY_KEY", "secret"),
        ]);
        assert_eq!(config.bintray_credentials().unwrap().user, "bot");
    }

    #[test]
    fn test_empty_bintray_key_is_missing() {
        let config = config_from(&[
            ("HOMEBREW_BINTRAY_USER", "bot"),
            ("HOMEBREW_BINTRAY_KEY", ""),
        ]);
        assert!(matches!(
            config.bintray_credentials(),
            Err(Error::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_tap_policy_overrides() {
        let config = config_from(&[
            ("BOTTLE_PR_RESTRICTED_ORG", "Acme"),
            ("BOTTLE_PR_EXCEPTION_REPO", "extras"),
        ]);
        assert_eq!(config.tap_policy.restricted_org, "Acme");
        assert_eq!(config.tap_policy.exception_repo.as_deref(), Some("extras"));
        assert_eq!(config_from(&[]).tap_policy, TapPolicy::default());
    }
}
