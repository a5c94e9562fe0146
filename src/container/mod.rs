//! Containerized bottle build
//!
//! Runs `brew test-bot` inside a Linuxbrew container, copies the produced
//! bottles and JSON metadata out, and merges the metadata into the local
//! formulae. The container and the copied directory are left in place for
//! inspection.

mod docker;

pub use docker::DockerCli;

use crate::brew::BrewOps;
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Container name
pub const CONTAINER_NAME: &str = "linuxbrew-test-bot";

/// Image the build runs in
pub const IMAGE: &str = "linuxbrew/linuxbrew";

/// Directory the build writes into, inside the container's home
pub const WORK_DIR: &str = "linuxbrew-test-bot";

/// Home directory of the container user
pub const CONTAINER_HOME: &str = "/home/linuxbrew";

/// Credential variables forwarded into the container
pub const CREDENTIAL_VARS: [&str; 2] = ["HOMEBREW_BINTRAY_USER", "HOMEBREW_BINTRAY_KEY"];

/// A `docker run` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRun {
    /// `--name`
    pub name: String,
    /// Variables passed through with `-e`
    pub env: Vec<String>,
    /// Image to run
    pub image: String,
    /// Shell script run with `sh -c`
    pub script: String,
}

/// Container runtime operations
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Run a container to completion; fails when the script exits non-zero
    async fn run(&self, run: &ContainerRun) -> Result<()>;

    /// Copy `src` out of a (possibly stopped) container into `dest`
    async fn copy_out(&self, container: &str, src: &str, dest: &Path) -> Result<()>;
}

/// Shell script run inside the container
///
/// The script exits with the status of `brew test-bot`, not of the upload,
/// so a failed upload never hides a failed build and vice versa.
pub fn build_script(args: &[String]) -> Result<String> {
    let args = shlex::try_join(args.iter().map(String::as_str))
        .map_err(|e| Error::Parse(format!("cannot quote test-bot arguments: {e}")))?;

    Ok(format!(
        "\
git config --global user.name LinuxbrewTestBot
git config --global user.email testbot@linuxbrew.sh
sudo apt-get install -y python
brew tap linuxbrew/xorg
mkdir {WORK_DIR}
cd {WORK_DIR}
brew test-bot {args}
status=$?
ls
brew test-bot --ci-upload
head *.json
exit $status
"
    ))
}

/// JSON metadata files in `dir`, sorted by name
pub fn bottle_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Instructions printed once the build is done
pub fn cleanup_instructions() -> String {
    format!("To clean up, run\n  docker rm {CONTAINER_NAME}\n  rm -rf {WORK_DIR}")
}

/// Build bottles for `args` in a container and merge the results
///
/// `dest` is the directory the artifacts are copied into; the merged JSON
/// files are returned.
pub async fn run_containerized_build(
    args: &[String],
    config: &Config,
    runtime: &dyn ContainerRuntime,
    brew: &dyn BrewOps,
    dest: &Path,
) -> Result<Vec<PathBuf>> {
    config.bintray_credentials()?;

    let run = ContainerRun {
        name: CONTAINER_NAME.to_string(),
        env: CREDENTIAL_VARS.iter().map(ToString::to_string).collect(),
        image: IMAGE.to_string(),
        script: build_script(args)?,
    };
    runtime.run(&run).await?;

    let src = format!("{CONTAINER_HOME}/{WORK_DIR}");
    runtime.copy_out(CONTAINER_NAME, &src, dest).await?;

    let artifacts = dest.join(WORK_DIR);
    let json_files = bottle_json_files(&artifacts)?;
    if json_files.is_empty() {
        return Err(Error::Parse(format!(
            "no bottle JSON files in {}",
            artifacts.display()
        )));
    }
    debug!("merging {} bottle JSON files", json_files.len());

    let names: Vec<PathBuf> = json_files
        .iter()
        .filter_map(|p| p.file_name().map(PathBuf::from))
        .collect();
    brew.merge_bottles(&artifacts, &names).await?;

    Ok(json_files)
}
