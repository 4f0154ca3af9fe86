use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

use crate::git::cli::DEFAULT_TIMEOUT;
use crate::release::TagOptions;
use crate::version::BumpLevel;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Print the highest version tag without creating anything
    Current,
    /// Tag the next major version
    Major,
    /// Tag the next minor version
    Minor,
    /// Tag the next patch version
    Patch,
}

impl Action {
    /// The bump this action applies, `None` for a read-only action
    pub fn bump_level(self) -> Option<BumpLevel> {
        match self {
            Action::Current => None,
            Action::Major => Some(BumpLevel::Major),
            Action::Minor => Some(BumpLevel::Minor),
            Action::Patch => Some(BumpLevel::Patch),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum Backend {
    /// Run the `git` executable
    #[default]
    Cli,
    /// Use the bundled libgit2
    Libgit2,
}

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "git-semver")]
pub struct Arguments {
    #[command(subcommand)]
    pub action: Action,
    /// Annotated tag message, defaults to the tag name
    #[arg(long, short, global = true)]
    pub message: Option<String>,
    #[arg(long, short, default_value = "./", global = true)]
    pub path: String,
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Seconds the git invocations of one run may take together before being cancelled
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true)]
    pub timeout: u64,
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = Backend::Cli, global = true)]
    pub backend: Backend,
}

impl Arguments {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn tag_options(&self) -> TagOptions {
        TagOptions { message: self.message.clone() }
    }
}
