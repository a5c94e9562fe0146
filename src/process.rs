//! Thin wrappers around `tokio::process::Command`
//!
//! Every external tool (git, hub, brew, docker) is invoked through these
//! helpers so failures surface as [`Error::CommandFailed`] with the command
//! line attached.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Render a command line for logs and error messages
pub fn display_command<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

fn command<S: AsRef<OsStr>>(program: &OsStr, args: &[S], dir: Option<&Path>) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// Run a command, capture its output and fail on a non-zero exit
pub async fn read<P, S>(program: P, args: &[S], dir: Option<&Path>) -> Result<String>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let line = display_command(program, args);
    debug!(dir = ?dir, "running {line}");

    let output = command(program, args, dir).output().await?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: line,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a command with inherited stdio and fail on a non-zero exit
pub async fn run<P, S>(program: P, args: &[S], dir: Option<&Path>) -> Result<()>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    if status(program.as_ref(), args, dir).await? {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: display_command(program.as_ref(), args),
            stderr: String::new(),
        })
    }
}

/// Run a command with inherited stdio and report whether it succeeded
pub async fn status<P, S>(program: P, args: &[S], dir: Option<&Path>) -> Result<bool>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    debug!(dir = ?dir, "running {}", display_command(program, args));

    let status = command(program, args, dir).status().await?;
    Ok(status.success())
}
