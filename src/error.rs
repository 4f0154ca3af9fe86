use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

use crate::version::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with {status}: {stderr}")]
    Subprocess {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    #[error("Cannot bump {field} of '{tag}' without overflowing")]
    Overflow { tag: String, field: &'static str },
    #[error("Tag '{0}' already exists")]
    TagExists(String),
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
