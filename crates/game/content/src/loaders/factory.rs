//! Content factory for loading everything a headless run needs.

use std::path::{Path, PathBuf};

use skirmish_core::RulesConfig;

use crate::lineup::EncounterSpec;
use crate::loaders::{ConfigLoader, EncounterLoader, LoadResult, TablesLoader};
use crate::tables::GameTables;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── tables.ron
/// └── encounters/
///     ├── duel.toml
///     └── skirmish.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules from `rules.toml`, or the defaults when the file is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load races, classes and gear from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<GameTables> {
        TablesLoader::load(&self.data_dir.join("tables.ron"))
    }

    /// Load `encounters/{name}.toml`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.toml", name));
        EncounterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
