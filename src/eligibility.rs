//! Bottle request eligibility
//!
//! Decides whether a formula gets a bottle pull request. Checks run in a
//! fixed order and the first match wins; the open pull request lookup and
//! the rate-limit counter come last because they are the expensive and the
//! stateful checks.

use crate::config::TapPolicy;
use crate::error::Result;
use crate::platform::{HostingService, tap_slug};
use crate::types::{BottleTag, Formula, PullRequest, Tap};
use std::fmt;
use tracing::debug;

/// Default maximum number of pull requests opened per run
pub const DEFAULT_LIMIT: usize = 10;

/// Why a formula does not get a bottle pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Formula requires macOS and the tag is a Linux tag
    DependsOnMacos,
    /// `bottle :unneeded`
    BottleUnneeded,
    /// `bottle :disable`
    BottleDisabled,
    /// A bottle for the tag is already recorded
    AlreadyBottled,
    /// The tap does not accept Linux bottle requests
    TapUnsupported {
        /// Tap name
        tap: String,
    },
    /// Pull requests for this formula are already open
    OpenPullRequest(Vec<PullRequest>),
    /// More formulae were considered than the run limit allows
    RateLimited {
        /// The configured limit
        limit: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependsOnMacos => write!(f, "it depends on macOS"),
            Self::BottleUnneeded => write!(f, "a bottle is not needed"),
            Self::BottleDisabled => write!(f, "bottles are disabled"),
            Self::AlreadyBottled => write!(f, "it has a bottle already"),
            Self::TapUnsupported { tap } => write!(f, "{tap} does not support Linux"),
            Self::OpenPullRequest(_) => write!(f, "a PR is open"),
            Self::RateLimited { limit } => {
                write!(f, "GitHub rate limits pull requests (limit = {limit}).")
            }
        }
    }
}

/// Outcome of the eligibility checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Do not request a bottle
    Skip(SkipReason),
    /// Request a bottle; `ordinal` is the run counter value for this formula
    Proceed {
        /// Position among formulae that reached the rate-limit check
        ordinal: usize,
    },
}

/// Counts formulae that reached the rate-limit check in this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCounter {
    count: usize,
    limit: usize,
}

impl RunCounter {
    /// Start a counter at zero
    pub const fn new(limit: usize) -> Self {
        Self { count: 0, limit }
    }

    /// Start a counter at an arbitrary value
    pub const fn starting_at(count: usize, limit: usize) -> Self {
        Self { count, limit }
    }

    /// Current count
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Configured limit
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Increment and return the new count
    pub const fn increment(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    /// Whether the count is above the limit
    pub const fn exceeded(&self) -> bool {
        self.count > self.limit
    }
}

/// Whether the tap policy rejects bottle requests for `tap`
pub fn tap_is_restricted(tap: &Tap, policy: &TapPolicy) -> bool {
    let restricted = tap_slug(tap).is_some_and(|slug| slug.starts_with(&policy.restricted_org));
    restricted && policy.exception_repo.as_deref() != Some(tap.repo.as_str())
}

/// Checks that need nothing beyond the formula itself
pub fn static_skip_reason(
    formula: &Formula,
    tag: &BottleTag,
    policy: &TapPolicy,
) -> Option<SkipReason> {
    if tag.is_linux() && formula.depends_on_macos() {
        return Some(SkipReason::DependsOnMacos);
    }
    if formula.bottle.unneeded {
        return Some(SkipReason::BottleUnneeded);
    }
    if formula.bottle.disabled {
        return Some(SkipReason::BottleDisabled);
    }
    if formula.bottle.has_tag(tag) {
        return Some(SkipReason::AlreadyBottled);
    }
    if tap_is_restricted(&formula.tap, policy) {
        return Some(SkipReason::TapUnsupported {
            tap: formula.tap.name.clone(),
        });
    }
    None
}

/// Open pull requests whose title is `"<formula>: ..."`
pub async fn open_pull_requests(
    formula: &Formula,
    hosting: &dyn HostingService,
) -> Result<Vec<PullRequest>> {
    // An unparseable remote falls back to the conventional slug
    let slug = tap_slug(&formula.tap)
        .unwrap_or_else(|| format!("{}/homebrew-{}", formula.tap.user, formula.tap.repo));
    let prefix = format!("{}: ", formula.name);

    let prs = hosting.find_open_prs(&slug, &formula.name).await?;
    Ok(prs
        .into_iter()
        .filter(|pr| pr.title.starts_with(&prefix))
        .collect())
}

/// Decide whether `formula` should be skipped for `tag`
///
/// The counter is incremented exactly once for every formula that passes the
/// preceding checks, including the one that trips the limit. Once the limit
/// has tripped, every later formula is rate limited without any other check
/// and without touching the counter.
pub async fn should_skip(
    formula: &Formula,
    tag: &BottleTag,
    policy: &TapPolicy,
    hosting: &dyn HostingService,
    counter: &mut RunCounter,
) -> Result<Eligibility> {
    if counter.exceeded() {
        debug!("{formula}: limit of {} already reached", counter.limit());
        return Ok(Eligibility::Skip(SkipReason::RateLimited {
            limit: counter.limit(),
        }));
    }

    if let Some(reason) = static_skip_reason(formula, tag, policy) {
        debug!("{formula}: static skip: {reason}");
        return Ok(Eligibility::Skip(reason));
    }

    let open = open_pull_requests(formula, hosting).await?;
    if !open.is_empty() {
        return Ok(Eligibility::Skip(SkipReason::OpenPullRequest(open)));
    }

    let ordinal = counter.increment();
    if counter.exceeded() {
        return Ok(Eligibility::Skip(SkipReason::RateLimited {
            limit: counter.limit(),
        }));
    }

    Ok(Eligibility::Proceed { ordinal })
}
