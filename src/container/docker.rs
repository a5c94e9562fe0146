//! `ContainerRuntime` backed by the docker CLI

use crate::container::{ContainerRun, ContainerRuntime};
use crate::error::{Error, Result};
use crate::process;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Runs the docker executable found on `PATH`
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: PathBuf,
}

impl DockerCli {
    /// Locate docker on `PATH`
    pub fn detect() -> Result<Self> {
        let program =
            which::which("docker").map_err(|_| Error::MissingTool("docker".to_string()))?;
        Ok(Self { program })
    }

    /// Arguments for `docker run`
    pub fn run_args(run: &ContainerRun) -> Vec<String> {
        let mut args = vec!["run".to_string(), format!("--name={}", run.name)];
        for var in &run.env {
            args.push("-e".to_string());
            args.push(var.clone());
        }
        args.push(run.image.clone());
        args.push("sh".to_string());
        args.push("-c".to_string());
        args.push(run.script.clone());
        args
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn run(&self, run: &ContainerRun) -> Result<()> {
        process::run(&self.program, &Self::run_args(run), None).await
    }

    async fn copy_out(&self, container: &str, src: &str, dest: &Path) -> Result<()> {
        let args: Vec<OsString> = vec![
            "cp".into(),
            format!("{container}:{src}").into(),
            dest.as_os_str().to_owned(),
        ];
        process::run(&self.program, &args, None).await
    }
}
