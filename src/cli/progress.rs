//! CLI progress callback with brew-style output

use anstream::{eprintln, println};
use async_trait::async_trait;
use bottle_pr::eligibility::SkipReason;
use bottle_pr::error::Error;
use bottle_pr::style::{Stream, Stylize, check, error_label, header, hyperlink_url, warning_label};
use bottle_pr::submit::{Phase, ProgressCallback};
use bottle_pr::types::{Formula, PullRequest};

/// CLI progress callback
///
/// Status lines go to stdout with a `==>` header, warnings and errors to
/// stderr. Phases and details are only shown in verbose mode.
pub struct CliProgress {
    /// Show phases and detail lines
    pub verbose: bool,
}

impl CliProgress {
    /// Create a progress printer
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if self.verbose {
            println!("{} {}...", header(), phase.to_string().emphasis());
        }
    }

    async fn on_skip(&self, formula: &Formula, reason: &SkipReason) {
        let line = format!("{formula}: Skipping because {reason}");
        match reason {
            SkipReason::OpenPullRequest(prs) => {
                eprintln!("{} {line}", warning_label());
                for pr in prs {
                    println!(
                        "{} ({})",
                        pr.title,
                        hyperlink_url(Stream::Stdout, &pr.html_url)
                    );
                }
            }
            _ => println!("{} {line}", header()),
        }
    }

    async fn on_banner(&self, ordinal: usize, message: &str) {
        let banner = format!("{ordinal}. {message}");
        println!("{} {}", header(), banner.emphasis());
    }

    async fn on_pr_created(&self, formula: &Formula, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Opened PR {} for {}",
            check(),
            pr_num.accent(),
            formula.name.emphasis()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_warning(&self, message: &str) {
        eprintln!("{} {message}", warning_label());
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("{} {error}", error_label());
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }

    async fn on_detail(&self, message: &str) {
        if self.verbose {
            println!("{} {}", header(), message.muted());
        }
    }
}
