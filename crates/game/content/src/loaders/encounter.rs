//! Encounter file loader.

use std::path::Path;

use crate::lineup::EncounterSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for encounter lineups from TOML files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        let spec: EncounterSpec = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse encounter TOML {}: {}", path.display(), e)
        })?;
        if spec.team_one.is_empty() && spec.team_two.is_empty() && spec.pool.is_empty() {
            anyhow::bail!("Encounter {} lists no combatants", path.display());
        }
        Ok(spec)
    }
}
