pub mod arguments;
pub mod error;
pub mod git;
pub mod release;
pub mod version;

pub use error::{Error, Result};
pub use version::{BumpLevel, Version};
