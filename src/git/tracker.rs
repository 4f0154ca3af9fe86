use git2::{ErrorCode, ObjectType, Repository, Signature};
use log::{debug, info, warn};
use std::path::Path;

use crate::error::{Error, Result};
use crate::git::{TagLister, TagWriter};

/// In-process repository access through libgit2
pub struct GitTracker {
    pub repository: Repository,
}

impl GitTracker {
    /// Opens an existing repository at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repository = Repository::discover(path.as_ref())?;

        debug!("Opened repository at {:?}", repository.path());

        Ok(GitTracker { repository })
    }

    /// Gets the repository signature from local git config
    fn get_signature(&self) -> Result<Signature<'_>> {
        Ok(self.repository.signature()?)
    }

    /// Gets all tag names from the repository
    pub fn get_tags(&self) -> Result<Vec<String>> {
        let names = self.repository.tag_names(None)?;
        let tags = utf8_tag_names(names.iter_bytes());

        debug!("Found {} tags", tags.len());
        Ok(tags)
    }

    /// Creates an annotated tag pointing at HEAD
    pub fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<()> {
        info!("Creating tag: {}", tag_name);

        let sig = self.get_signature()?;
        let head = self.repository.head()?.peel(ObjectType::Commit)?;

        match self.repository.tag(tag_name, &head, &sig, message, false) {
            Ok(oid) => {
                info!("Created tag: {} ({})", tag_name, oid);
                Ok(())
            }
            Err(err) if err.code() == ErrorCode::Exists => Err(Error::TagExists(tag_name.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the tag names that are valid UTF-8, warning about the rest
fn utf8_tag_names<'a>(names: impl Iterator<Item = &'a [u8]>) -> Vec<String> {
    names
        .filter_map(|name| match std::str::from_utf8(name) {
            Ok(name) => Some(name.to_string()),
            Err(_) => {
                warn!("Ignoring tag '{}': name is not valid UTF-8", String::from_utf8_lossy(name));
                None
            }
        })
        .collect()
}

impl TagLister for GitTracker {
    async fn list_tags(&self) -> Result<Vec<String>> {
        self.get_tags()
    }
}

impl TagWriter for GitTracker {
    async fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.create_annotated_tag(tag, message)
    }
}
