//! Rules configuration loader.

use std::path::Path;

use skirmish_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file. Missing sections and keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_rounds = 12\n\n[grid]\nsize = 16").unwrap();

        let rules = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(rules.max_rounds, 12);
        assert_eq!(rules.grid.size, 16);
        assert_eq!(rules.movement, RulesConfig::default().movement);
        assert_eq!(rules.ai, RulesConfig::default().ai);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_rounds = \"many\"").unwrap();
        let err = ConfigLoader::load(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse rules TOML"));
        assert!(err.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("rules.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
