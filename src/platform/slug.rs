//! Tap slug detection from remote URLs

use crate::types::Tap;
use regex::Regex;
use std::sync::OnceLock;

fn github_remote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://github\.com/([^.]+)(\.git)?$").expect("hardcoded regex is valid")
    })
}

/// The GitHub `owner/repo` slug of a tap
///
/// Not simply `<user>/homebrew-<repo>`: the slug of an official tap follows
/// its remote, so `homebrew/core` may be `Homebrew/homebrew-core` or
/// `Linuxbrew/homebrew-core`. Returns `None` when the remote is not a
/// github.com HTTPS URL.
pub fn tap_slug(tap: &Tap) -> Option<String> {
    let Some(remote) = tap.remote.as_deref() else {
        return Some(format!("{}/homebrew-{}", tap.user, tap.repo));
    };

    let path = github_remote_re()
        .captures(remote)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())?;

    Some(if tap.official {
        capitalize(path)
    } else {
        path.to_string()
    })
}

/// Upper-case the first character and lower-case the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
