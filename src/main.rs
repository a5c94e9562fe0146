//! build-bottle-pr - request Linux bottle builds via pull requests
//!
//! CLI binary that opens one `bottle-<formula>` pull request per eligible
//! formula in its tap.

use anyhow::{Result, bail};
use bottle_pr::eligibility::DEFAULT_LIMIT;
use bottle_pr::submit::{DEFAULT_MAINLINE, SubmitOptions};
use bottle_pr::types::{BottleTag, DEFAULT_TAG};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "build-bottle-pr")]
#[command(about = "Submit a pull request to build a bottle for a formula")]
#[command(version)]
struct Cli {
    /// GitHub remote to push to (defaults to $HOMEBREW_GITHUB_USER, then $USER)
    #[arg(long)]
    remote: Option<String>,

    /// Bottle tag to request
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,

    /// Open at most this many pull requests
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Do not actually make any pull requests
    #[arg(long)]
    dry_run: bool,

    /// Print extra information
    #[arg(short, long)]
    verbose: bool,

    /// Delete local and remote bottle-<name> branches if they exist
    #[arg(long)]
    force: bool,

    /// Open a web browser for each new pull request
    #[arg(long)]
    browse: bool,

    /// Also commit `--keep-old` into the tap's CircleCI configuration
    #[arg(long)]
    keep_old: bool,

    /// Do not add the dependencies of the named formulae
    #[arg(long)]
    no_deps: bool,

    /// Formulae to request bottles for
    #[arg(value_name = "FORMULA")]
    formulae: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bottle_pr=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = cli::BottlePrArgs {
        formulae: cli.formulae,
        remote: cli.remote,
        limit: cli.limit,
        no_deps: cli.no_deps,
        options: SubmitOptions {
            tag: BottleTag::new(cli.tag),
            dry_run: cli.dry_run,
            force: cli.force,
            browse: cli.browse,
            keep_old: cli.keep_old,
            mainline: DEFAULT_MAINLINE.to_string(),
        },
        verbose: cli.verbose,
    };

    let summary = match cli::run_build_bottle_pr(args).await {
        Ok(summary) => summary,
        Err(e) => {
            cli::report_fatal(&e);
            std::process::exit(1);
        }
    };

    if !summary.success() {
        bail!(
            "{} formula(e) failed: {}",
            summary.failed.len(),
            summary.failed.join(", ")
        );
    }
    Ok(())
}
