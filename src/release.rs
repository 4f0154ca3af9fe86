use log::{debug, warn};

use crate::arguments::Action;
use crate::error::Result;
use crate::git::{TagLister, TagWriter};
use crate::version::{BumpLevel, Version, sort_descending};

/// Settings for the annotated tag that gets written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub message: Option<String>,
}

impl TagOptions {
    pub fn message_for(&self, tag: &str) -> String {
        self.message.clone().unwrap_or_else(|| tag.to_string())
    }
}

/// Picks the highest version among tag listing lines.
///
/// Blank lines are dropped, lines that do not parse are skipped with a warning.
/// Falls back to [`Version::initial`] when nothing parses.
pub fn highest_version<I, S>(lines: I) -> Version
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions: Vec<Version> = lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            if line.is_empty() {
                return None;
            }
            match Version::parse(line) {
                Ok(version) => Some(version),
                Err(err) => {
                    warn!("Ignoring tag '{}': {}", line, err);
                    None
                }
            }
        })
        .collect();

    debug!("Parsed {} version tags", versions.len());
    sort_descending(&mut versions);
    versions.into_iter().next().unwrap_or_else(Version::initial)
}

pub async fn current_version<L: TagLister>(lister: &L) -> Result<Version> {
    let tags = lister.list_tags().await?;
    let version = highest_version(&tags);
    debug!("Current version: {}", version);
    Ok(version)
}

/// Tags the version following the current one and returns it
pub async fn bump_and_tag<R>(repo: &R, level: BumpLevel, options: &TagOptions) -> Result<Version>
where
    R: TagLister + TagWriter,
{
    let mut version = current_version(repo).await?;
    version.bump(level)?;

    let tag = version.to_string();
    repo.create_tag(&tag, &options.message_for(&tag)).await?;
    Ok(version)
}

/// Runs one invocation and returns the version to report
pub async fn execute<R>(repo: &R, action: Action, options: &TagOptions) -> Result<Version>
where
    R: TagLister + TagWriter,
{
    match action.bump_level() {
        Some(level) => bump_and_tag(repo, level, options).await,
        None => current_version(repo).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::MemoryRepository;

    #[test]
    fn test_highest_version_skips_blank_lines() {
        let listing = "\nv0.0.1\t\n2.0.1\n4.0.4rc\n\t";
        assert_eq!(highest_version(listing.lines()).to_string(), "4.0.4rc");
    }

    #[test]
    fn test_highest_version_skips_malformed_tags() {
        let version = highest_version(["latest", "v..9", "v1.2.3", "nightly-build"]);
        assert_eq!(version.to_string(), "v1.2.3");
    }

    #[test]
    fn test_highest_version_defaults_when_empty() {
        assert_eq!(highest_version(Vec::<String>::new()), Version::initial());
        assert_eq!(highest_version(["", "  ", "not-a-version"]).to_string(), "v0.0.0");
    }

    #[test]
    fn test_highest_version_ignores_listing_order() {
        let version = highest_version(["v1.10.0", "v1.9.0", "v1.2.0"]);
        assert_eq!(version.to_string(), "v1.10.0");
    }

    #[test]
    fn test_message_defaults_to_tag() {
        assert_eq!(TagOptions::default().message_for("v1.0.0"), "v1.0.0");
        let options = TagOptions { message: Some("First stable".to_string()) };
        assert_eq!(options.message_for("v1.0.0"), "First stable");
    }

    #[tokio::test]
    async fn test_current_version_of_empty_repository() {
        let repo = MemoryRepository::new();
        assert_eq!(current_version(&repo).await.unwrap().to_string(), "v0.0.0");
    }

    #[tokio::test]
    async fn test_current_action_creates_nothing() {
        let repo = MemoryRepository::with_tags(["v1.4.2"]);
        let version = execute(&repo, Action::Current, &TagOptions::default()).await.unwrap();

        assert_eq!(version.to_string(), "v1.4.2");
        assert_eq!(repo.tags(), vec!["v1.4.2".to_string()]);
    }

    #[tokio::test]
    async fn test_major_twice_from_empty_repository() {
        let repo = MemoryRepository::new();
        let options = TagOptions::default();

        let first = execute(&repo, Action::Major, &options).await.unwrap();
        assert_eq!(first.to_string(), "v1.0.0");
        let second = execute(&repo, Action::Major, &options).await.unwrap();
        assert_eq!(second.to_string(), "v2.0.0");

        assert_eq!(repo.tags(), vec!["v1.0.0".to_string(), "v2.0.0".to_string()]);
        assert_eq!(repo.message("v2.0.0").as_deref(), Some("v2.0.0"));
    }

    #[tokio::test]
    async fn test_bumps_carry_prefix_and_suffix() {
        let repo = MemoryRepository::with_tags(["v0.9.0", "release-1.1.1-ga"]);

        let patch = execute(&repo, Action::Patch, &TagOptions::default()).await.unwrap();
        assert_eq!(patch.to_string(), "release-1.1.2-ga");
        let minor = execute(&repo, Action::Minor, &TagOptions::default()).await.unwrap();
        assert_eq!(minor.to_string(), "release-1.2.0-ga");
    }

    #[tokio::test]
    async fn test_custom_message_is_used() {
        let repo = MemoryRepository::with_tags(["v1.0.0"]);
        let options = TagOptions { message: Some("Bug fixes".to_string()) };

        let version = bump_and_tag(&repo, BumpLevel::Patch, &options).await.unwrap();
        assert_eq!(version.to_string(), "v1.0.1");
        assert_eq!(repo.message("v1.0.1").as_deref(), Some("Bug fixes"));
    }

    #[tokio::test]
    async fn test_overflowing_bump_writes_nothing() {
        let repo = MemoryRepository::with_tags(["v18446744073709551615.0.0"]);

        let err = execute(&repo, Action::Major, &TagOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Overflow { field: "major", .. }), "{err}");
        assert_eq!(repo.tags(), vec!["v18446744073709551615.0.0".to_string()]);
    }

    /// Lists a stale snapshot while writing into a store another tagger already advanced
    struct StaleListing {
        listed: Vec<String>,
        store: MemoryRepository,
    }

    impl TagLister for StaleListing {
        async fn list_tags(&self) -> Result<Vec<String>> {
            Ok(self.listed.clone())
        }
    }

    impl TagWriter for StaleListing {
        async fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
            self.store.create_tag(tag, message).await
        }
    }

    #[tokio::test]
    async fn test_existing_tag_is_fatal() {
        let repo = StaleListing {
            listed: vec!["v2.0.0".to_string()],
            store: MemoryRepository::with_tags(["v2.0.0", "v2.0.1"]),
        };

        let err = execute(&repo, Action::Patch, &TagOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::TagExists(ref tag) if tag == "v2.0.1"), "{err}");
        assert_eq!(repo.store.tags().len(), 2);
    }
}
