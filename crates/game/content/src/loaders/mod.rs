//! Content loaders for reading game data from files.
//!
//! Tables are RON, rules and encounters are TOML. Every loader returns
//! [`LoadResult`] with the offending path in the error message.

pub mod config;
pub mod encounter;
pub mod factory;
pub mod tables;

pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
