//! test-bot-docker - build bottles in a Linuxbrew container
//!
//! Runs `brew test-bot` with the given arguments inside the
//! `linuxbrew/linuxbrew` image, uploads the bottles, copies them back and
//! merges their metadata into the local formulae.

use anstream::{eprintln, println};
use anyhow::Result;
use bottle_pr::brew::BrewCli;
use bottle_pr::config::Config;
use bottle_pr::container::{DockerCli, cleanup_instructions, run_containerized_build};
use bottle_pr::style::{Stylize, error_label, header};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "test-bot-docker")]
#[command(about = "Build a bottle for the specified formulae using a Docker container")]
#[command(version)]
struct Cli {
    /// Formulae and `brew test-bot` options, passed through unchanged
    #[arg(
        value_name = "ARGS",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

async fn run(args: &[String]) -> bottle_pr::error::Result<()> {
    let config = Config::from_env();
    config.bintray_credentials()?;

    let docker = DockerCli::detect()?;
    let brew = BrewCli::new(config.brew_file.clone());
    run_containerized_build(args, &config, &docker, &brew, Path::new(".")).await?;

    println!("{} {}", header(), "Done!".emphasis());
    println!("{}", cleanup_instructions());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(&cli.args).await {
        eprintln!("{} {e}", error_label());
        std::process::exit(1);
    }
    Ok(())
}
