//! Rules tables loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::GameTables;

/// Loader for races, classes, weapons and armor from a RON file.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<GameTables> {
        let content = read_file(path)?;
        let tables: GameTables = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse tables RON {}: {}", path.display(), e)
        })?;
        Self::validate(&tables)?;
        Ok(tables)
    }

    /// Rejects tables a build could not use safely.
    fn validate(tables: &GameTables) -> LoadResult<()> {
        for class in &tables.classes {
            if class.hit_die == 0 {
                anyhow::bail!("Class {} has no hit die", class.name);
            }
        }
        for weapon in &tables.weapons {
            if weapon.damage.count == 0 || weapon.damage.sides == 0 {
                anyhow::bail!("Weapon {} has no damage dice", weapon.name);
            }
        }
        Ok(())
    }
}
