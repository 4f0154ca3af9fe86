use anyhow::{Context, Result};
use clap::Parser;
use git_semver::{
    arguments::{Action, Arguments, Backend},
    git::{GitCli, GitTracker, TagLister, TagWriter},
    release::{self, TagOptions},
    version::Version,
};
use log::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    match run(&args).await {
        Ok(version) => println!("current version: {}", version),
        Err(err) => {
            println!("{:#}", err);
            std::process::exit(1);
        }
    }
}

async fn run(args: &Arguments) -> Result<Version> {
    let options = args.tag_options();

    match args.backend {
        Backend::Cli => {
            let git = GitCli::new(&args.path, args.timeout());
            execute(&git, args.action, &options).await
        }
        Backend::Libgit2 => {
            let git = GitTracker::open(&args.path)
                .with_context(|| format!("Failed to find git repository at {:?}", args.path))?;
            execute(&git, args.action, &options).await
        }
    }
}

async fn execute<R>(repo: &R, action: Action, options: &TagOptions) -> Result<Version>
where
    R: TagLister + TagWriter,
{
    let context = match action.bump_level() {
        Some(_) => "Failed to tag the next version",
        None => "Failed to get the current version",
    };
    release::execute(repo, action, options).await.context(context)
}
