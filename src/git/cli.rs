use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::git::{TagLister, TagWriter};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Drives the `git` executable found on `PATH`.
///
/// All invocations share one deadline, `timeout` after construction.
#[derive(Debug, Clone)]
pub struct GitCli {
    pub repository: PathBuf,
    pub timeout: Duration,
    deadline: Instant,
}

impl GitCli {
    pub fn new(path: impl AsRef<Path>, timeout: Duration) -> Self {
        GitCli { repository: path.as_ref().to_path_buf(), timeout, deadline: Instant::now() + timeout }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.repository);
        run_until(command, self.deadline, self.timeout).await
    }
}

impl TagLister for GitCli {
    async fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.git(&["tag", "--sort=v:refname"]).await?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

impl TagWriter for GitCli {
    async fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        info!("Creating tag: {}", tag);
        self.git(&["tag", "-a", tag, "-m", message]).await?;
        info!("Created tag: {}", tag);
        Ok(())
    }
}

/// Runs `command` to completion and returns its stdout.
///
/// The child is killed if it is still running at `deadline`; `timeout` is the
/// budget reported in the error.
pub(crate) async fn run_until(mut command: Command, deadline: Instant, timeout: Duration) -> Result<String> {
    let description = describe(&command);
    debug!("Running `{}`", description);

    command.stdin(Stdio::null()).kill_on_drop(true);
    let output = match tokio::time::timeout_at(deadline, command.output()).await {
        Ok(output) => output.map_err(|source| Error::Spawn { command: description.clone(), source })?,
        Err(_) => return Err(Error::Timeout { command: description, timeout }),
    };

    if !output.status.success() {
        return Err(Error::Subprocess {
            command: description,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn describe(command: &Command) -> String {
    let command = command.as_std();
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
