use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::git::{TagLister, TagWriter};

/// Tag store kept in memory, for exercising release logic without a repository
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tags: Mutex<Vec<(String, String)>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with tags whose message is the tag name itself
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| {
                let tag = tag.into();
                (tag.clone(), tag)
            })
            .collect();
        MemoryRepository { tags: Mutex::new(tags) }
    }

    /// Tag names in creation order
    pub fn tags(&self) -> Vec<String> {
        self.lock().iter().map(|(tag, _)| tag.clone()).collect()
    }

    pub fn message(&self, tag: &str) -> Option<String> {
        self.lock().iter().find(|(name, _)| name == tag).map(|(_, message)| message.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.tags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TagLister for MemoryRepository {
    async fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags())
    }
}

impl TagWriter for MemoryRepository {
    async fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        let mut tags = self.lock();
        if tags.iter().any(|(name, _)| name == tag) {
            return Err(Error::TagExists(tag.to_string()));
        }
        tags.push((tag.to_string(), message.to_string()));
        Ok(())
    }
}
