use crate::error::Result;

pub mod cli;
pub mod memory;
pub mod tracker;

pub use cli::GitCli;
pub use memory::MemoryRepository;
pub use tracker::GitTracker;

/// Enumerates the tag names of a repository
#[allow(async_fn_in_trait)]
pub trait TagLister {
    async fn list_tags(&self) -> Result<Vec<String>>;
}

/// Creates annotated tags in a repository
#[allow(async_fn_in_trait)]
pub trait TagWriter {
    async fn create_tag(&self, tag: &str, message: &str) -> Result<()>;
}
