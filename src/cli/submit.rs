//! Submit command - open bottle pull requests for formulae

use crate::cli::CliProgress;
use anstream::eprintln;
use bottle_pr::auth::get_github_auth;
use bottle_pr::brew::BrewCli;
use bottle_pr::config::Config;
use bottle_pr::eligibility::RunCounter;
use bottle_pr::error::{Error, Result};
use bottle_pr::platform::{GitHubService, HubCli};
use bottle_pr::remote::{NO_REMOTE_HINTS, RemoteResolver, remote_diagnostics};
use bottle_pr::repo::GitCli;
use bottle_pr::style::{Stylize, error_label};
use bottle_pr::submit::{ProgressCallback, RunSummary, SubmitContext, SubmitOptions, run_bottle_prs};
use tracing::debug;

/// Inputs of a `build-bottle-pr` run
pub struct BottlePrArgs {
    /// Formulae named on the command line
    pub formulae: Vec<String>,
    /// `--remote`
    pub remote: Option<String>,
    /// `--limit`
    pub limit: usize,
    /// Skip the dependency expansion
    pub no_deps: bool,
    /// Submission flags
    pub options: SubmitOptions,
    /// `--verbose`
    pub verbose: bool,
}

/// Run the build-bottle-pr command
pub async fn run_build_bottle_pr(args: BottlePrArgs) -> Result<RunSummary> {
    let config = Config::from_env();
    let progress = CliProgress::new(args.verbose);

    let hub = HubCli::detect().await?;

    let token = match get_github_auth().await {
        Ok(auth) => {
            debug!("using GitHub token from {:?}", auth.source);
            Some(auth.token)
        }
        Err(e) => {
            debug!("searching pull requests anonymously: {e}");
            None
        }
    };
    let hosting = GitHubService::new(token.as_deref(), hub)?;
    if !hosting.hub().capabilities().assign_and_label {
        progress
            .on_warning("Please upgrade hub\n  brew upgrade --devel hub")
            .await;
    }
    let brew = BrewCli::new(config.brew_file.clone());
    let repo = GitCli;

    let ctx = SubmitContext {
        repo: &repo,
        hosting: &hosting,
        brew: &brew,
        progress: &progress,
        config: &config,
        options: &args.options,
    };
    let mut remotes = RemoteResolver::new(
        args.remote,
        config.user.clone(),
        config.github_user.clone(),
    );
    let mut counter = RunCounter::new(args.limit);

    let summary = run_bottle_prs(
        &ctx,
        &args.formulae,
        !args.no_deps,
        &mut remotes,
        &mut counter,
    )
    .await?;

    if !summary.submitted.is_empty() || !summary.verified.is_empty() {
        let done = format!(
            "{} opened, {} verified, {} skipped",
            summary.submitted.len(),
            summary.verified.len(),
            summary.skipped.len()
        );
        progress.on_message(&done.muted().to_string()).await;
    }
    Ok(summary)
}

/// Print the diagnostics that go with a fatal error
pub fn report_fatal(error: &Error) {
    eprintln!("{} {error}", error_label());

    if matches!(error, Error::NoRemoteFound { .. }) {
        for hint in NO_REMOTE_HINTS {
            eprintln!("{} {hint}", error_label());
        }
    }
    if let Some(available) = error.available_remotes() {
        eprintln!("{} Available remotes:", error_label());
        for line in remote_diagnostics(available) {
            eprintln!("{} {line}", error_label());
        }
    }
}
