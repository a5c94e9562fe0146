//! Per-formula submission
//!
//! Resolves the remote, runs the eligibility checks, then creates the
//! `bottle-<formula>` branch, commits the marker line, pushes and opens the
//! pull request. Once the branch is checked out, returning to the mainline
//! and deleting the branch happen whether or not the rest succeeded. Files
//! edited but not yet committed are put back before leaving the branch.

use crate::brew::BrewOps;
use crate::ci_config::{self, CIRCLECI_CONFIG, KEEP_OLD_MESSAGE};
use crate::config::Config;
use crate::eligibility::{Eligibility, RunCounter, SkipReason, should_skip};
use crate::error::{Error, Result};
use crate::platform::{BOTTLE_LABEL, HostingService, PrRequest};
use crate::remote::RemoteResolver;
use crate::repo::RepoOps;
use crate::submit::ProgressCallback;
use crate::types::{BottleTag, Formula, PullRequest};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Branch bottle branches are created from and return to
pub const DEFAULT_MAINLINE: &str = "master";

/// Flags controlling a submission run
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Bottle tag to request
    pub tag: BottleTag,
    /// Verify only: no file change, commit, push or pull request
    pub dry_run: bool,
    /// Delete existing local and remote `bottle-<formula>` branches
    pub force: bool,
    /// Open the new pull request in a browser
    pub browse: bool,
    /// Also commit the CircleCI `--keep-old` change
    pub keep_old: bool,
    /// Mainline branch name
    pub mainline: String,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            tag: BottleTag::default(),
            dry_run: false,
            force: false,
            browse: false,
            keep_old: false,
            mainline: DEFAULT_MAINLINE.to_string(),
        }
    }
}

/// Collaborators and settings shared by every formula of a run
pub struct SubmitContext<'a> {
    /// Version control
    pub repo: &'a dyn RepoOps,
    /// Pull request hosting
    pub hosting: &'a dyn HostingService,
    /// Formula database
    pub brew: &'a dyn BrewOps,
    /// Progress reporting
    pub progress: &'a dyn ProgressCallback,
    /// Environment configuration
    pub config: &'a Config,
    /// Command-line flags
    pub options: &'a SubmitOptions,
}

/// How a formula's submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A pull request was opened
    Submitted(PullRequest),
    /// Dry run: everything up to the branch checkout was verified
    DryRun,
    /// An eligibility check skipped the formula
    Skipped(SkipReason),
    /// The local branch already exists and `--force` was not given
    SkippedExistingBranch(String),
}

/// Commit message and pull request title for a formula
pub fn bottle_message(formula: &Formula) -> String {
    format!("{}: Build a bottle for Linuxbrew", formula.name)
}

/// Formula source with the marker comment prepended
pub fn prepend_marker(source: &str, message: &str) -> String {
    format!("# {message}\n{source}")
}

/// Run the whole per-formula flow
pub async fn submit_formula(
    ctx: &SubmitContext<'_>,
    formula: &Formula,
    remotes: &mut RemoteResolver,
    counter: &mut RunCounter,
) -> Result<SubmissionOutcome> {
    let dir = formula.formula_dir();
    let remote = remotes.resolve(ctx.repo, dir).await?;

    let eligibility = should_skip(
        formula,
        &ctx.options.tag,
        &ctx.config.tap_policy,
        ctx.hosting,
        counter,
    )
    .await?;

    let ordinal = match eligibility {
        Eligibility::Skip(reason) => {
            ctx.progress.on_skip(formula, &reason).await;
            return Ok(SubmissionOutcome::Skipped(reason));
        }
        Eligibility::Proceed { ordinal } => ordinal,
    };

    let audited = ctx
        .brew
        .audit_online(&formula.path)
        .await
        .unwrap_or_else(|e| {
            debug!("{formula}: audit could not run: {e}");
            false
        });
    if !audited {
        ctx.progress
            .on_warning(&format!("Please fix audit failure for {formula}"))
            .await;
    }

    let message = bottle_message(formula);
    ctx.progress.on_banner(ordinal, &message).await;

    let branch = formula.branch_name();
    if ctx.repo.branch_exists(dir, &branch).await? {
        if !ctx.options.force {
            ctx.progress
                .on_error(&Error::BranchExists(branch.clone()))
                .await;
            return Ok(SubmissionOutcome::SkippedExistingBranch(branch));
        }
        ctx.progress
            .on_detail(&format!(
                "{formula}: Removing branch {branch} in {}",
                dir.display()
            ))
            .await;
        ctx.repo.delete_branch(dir, &branch).await?;
    }

    ctx.repo
        .create_branch(dir, &branch, &ctx.options.mainline)
        .await?;

    let mut edits = UncommittedEdits::default();
    let published = publish(ctx, formula, dir, &remote, &branch, &message, &mut edits).await;
    if published.is_err() {
        let restored = edits.restore().await;
        if let Err(e) = restored {
            ctx.progress.on_error(&e).await;
        }
    }
    let cleaned = cleanup(ctx, dir, &branch).await;

    match (published, cleaned) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            ctx.progress.on_error(&cleanup_err).await;
            Err(e)
        }
    }
}

/// Steps between the branch checkout and the cleanup
async fn publish(
    ctx: &SubmitContext<'_>,
    formula: &Formula,
    dir: &Path,
    remote: &str,
    branch: &str,
    message: &str,
    edits: &mut UncommittedEdits,
) -> Result<SubmissionOutcome> {
    if ctx.options.dry_run {
        // Only check that the formula file is readable
        tokio::fs::read_to_string(&formula.path).await?;
        return Ok(SubmissionOutcome::DryRun);
    }

    let source = tokio::fs::read_to_string(&formula.path).await?;
    let marked = prepend_marker(&source, message);
    edits.record(&formula.path, source);
    tokio::fs::write(&formula.path, marked).await?;

    if ctx.options.keep_old {
        let root = ctx.repo.toplevel(dir).await?;
        let ci_path = root.join(CIRCLECI_CONFIG);
        edits.record(&ci_path, tokio::fs::read_to_string(&ci_path).await?);
        ci_config::write_keep_old(&root).await?;
        ctx.repo
            .commit(&root, &[Path::new(CIRCLECI_CONFIG)], KEEP_OLD_MESSAGE)
            .await?;
        edits.committed(&ci_path);
    }

    ctx.repo.commit(dir, &[formula.path.as_path()], message).await?;
    edits.committed(&formula.path);

    if ctx.repo.remote_branch_exists(dir, remote, branch).await? {
        if !ctx.options.force {
            return Err(Error::RemoteBranchExists {
                remote: remote.to_string(),
                branch: branch.to_string(),
            });
        }
        ctx.progress
            .on_detail(&format!("{formula}: Removing branch {branch} from {remote}"))
            .await;
        ctx.repo.delete_remote_branch(dir, remote, branch).await?;
    }

    ctx.progress
        .on_detail(&format!(
            "{formula}: Using remote '{remote}' to submit Pull Request"
        ))
        .await;
    ctx.repo.push(dir, remote, branch).await?;

    let request = PrRequest {
        head: format!("{remote}:{branch}"),
        message: message.to_string(),
        assignee: ctx.config.assignee().map(ToString::to_string),
        labels: vec![BOTTLE_LABEL.to_string()],
        browse: ctx.options.browse,
    };
    let pr = ctx.hosting.create_pr(&request).await?;
    ctx.progress.on_pr_created(formula, &pr).await;

    Ok(SubmissionOutcome::Submitted(pr))
}

/// Original contents of files written on the branch and not yet committed
#[derive(Debug, Default)]
struct UncommittedEdits {
    originals: Vec<(PathBuf, String)>,
}

impl UncommittedEdits {
    fn record(&mut self, path: &Path, original: String) {
        self.originals.push((path.to_path_buf(), original));
    }

    fn committed(&mut self, path: &Path) {
        self.originals.retain(|(p, _)| p != path);
    }

    /// Write every recorded original back, newest first
    async fn restore(&mut self) -> Result<()> {
        while let Some((path, original)) = self.originals.pop() {
            debug!("restoring {}", path.display());
            tokio::fs::write(&path, original).await?;
        }
        Ok(())
    }
}

/// Return to the mainline and drop the working branch
async fn cleanup(ctx: &SubmitContext<'_>, dir: &Path, branch: &str) -> Result<()> {
    ctx.repo.checkout(dir, &ctx.options.mainline).await?;
    ctx.repo.delete_branch(dir, branch).await
}
