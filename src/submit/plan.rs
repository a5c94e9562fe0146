//! Run planning
//!
//! Turns the formula names from the command line into the ordered list of
//! formulae to process, validates the remotes of every tap involved, and
//! drives the per-formula submissions.

use crate::brew::BrewOps;
use crate::eligibility::RunCounter;
use crate::error::{Error, Result};
use crate::remote::RemoteResolver;
use crate::repo::RepoOps;
use crate::submit::{Phase, ProgressCallback, SubmissionOutcome, SubmitContext, submit_formula};
use crate::types::{Formula, PullRequest};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// What happened to every formula of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Pull requests opened
    pub submitted: Vec<PullRequest>,
    /// Formulae verified in dry-run mode
    pub verified: Vec<String>,
    /// Formulae skipped, with the reason
    pub skipped: Vec<(String, String)>,
    /// Formulae whose submission failed
    pub failed: Vec<String>,
}

impl RunSummary {
    /// Whether every formula was submitted, verified or skipped
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Formula names to process, dependencies first
///
/// Unless exactly one formula is given or `include_deps` is false, the
/// dependency union is prepended. Repeated names keep their first position.
pub async fn formula_names(
    names: &[String],
    include_deps: bool,
    brew: &dyn BrewOps,
    progress: &dyn ProgressCallback,
) -> Result<Vec<String>> {
    if names.is_empty() {
        return Err(Error::NoFormulae);
    }

    let mut ordered = Vec::new();
    if include_deps && names.len() != 1 {
        let deps = brew.deps_union(names).await?;
        if !deps.is_empty() {
            progress
                .on_detail(&format!(
                    "Adding following dependencies: {}",
                    deps.join(", ")
                ))
                .await;
        }
        ordered.extend(deps);
    }
    ordered.extend(names.iter().cloned());

    let mut seen = HashSet::new();
    ordered.retain(|name| seen.insert(name.clone()));
    Ok(ordered)
}

/// Load every formula, in order
pub async fn load_formulae(names: &[String], brew: &dyn BrewOps) -> Result<Vec<Formula>> {
    let mut formulae = Vec::with_capacity(names.len());
    for name in names {
        formulae.push(brew.formula(name).await?);
    }
    Ok(formulae)
}

/// Resolve the remote of every tap directory and warn about dirty checkouts
///
/// Remote failures abort the run. Only the first dirty checkout is reported.
pub async fn check_remotes(
    formulae: &[Formula],
    repo: &dyn RepoOps,
    remotes: &mut RemoteResolver,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    let mut dirs: Vec<&Path> = Vec::new();
    for formula in formulae {
        let dir = formula.formula_dir();
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    for dir in dirs {
        progress
            .on_detail(&format!(
                "Checking that specified remote exists in {}",
                dir.display()
            ))
            .await;
        remotes.resolve(repo, dir).await?;

        if !repo.is_clean(dir).await? {
            progress
                .on_warning(&format!(
                    "You have uncommitted changes to {}",
                    dir.display()
                ))
                .await;
            break;
        }
    }
    Ok(())
}

/// Process every requested formula
///
/// Configuration errors abort the run; any other error ends only the
/// formula it happened in.
pub async fn run_bottle_prs(
    ctx: &SubmitContext<'_>,
    names: &[String],
    include_deps: bool,
    remotes: &mut RemoteResolver,
    counter: &mut RunCounter,
) -> Result<RunSummary> {
    ctx.progress.on_phase(Phase::ResolvingFormulae).await;
    let names = formula_names(names, include_deps, ctx.brew, ctx.progress).await?;
    let formulae = load_formulae(&names, ctx.brew).await?;

    ctx.progress.on_phase(Phase::CheckingRemotes).await;
    check_remotes(&formulae, ctx.repo, remotes, ctx.progress).await?;

    ctx.progress.on_phase(Phase::Submitting).await;
    let mut summary = RunSummary::default();
    for formula in &formulae {
        match submit_formula(ctx, formula, remotes, counter).await {
            Ok(SubmissionOutcome::Submitted(pr)) => summary.submitted.push(pr),
            Ok(SubmissionOutcome::DryRun) => summary.verified.push(formula.name.clone()),
            Ok(SubmissionOutcome::Skipped(reason)) => {
                summary
                    .skipped
                    .push((formula.name.clone(), reason.to_string()));
            }
            Ok(SubmissionOutcome::SkippedExistingBranch(branch)) => {
                summary
                    .skipped
                    .push((formula.name.clone(), format!("branch {branch} exists")));
            }
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => {
                debug!("{formula}: submission failed: {e}");
                ctx.progress.on_error(&e).await;
                summary.failed.push(formula.name.clone());
            }
        }
    }

    ctx.progress.on_phase(Phase::Complete).await;
    Ok(summary)
}
