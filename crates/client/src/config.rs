//! Host configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Data shipped with the content crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Encounter TOML to play.
    pub encounter: PathBuf,
    /// RON rules tables.
    pub tables: PathBuf,
    /// Rules TOML; built-in defaults when unset.
    pub rules: Option<PathBuf>,
    /// Overrides the encounter file's seed.
    pub seed: Option<u64>,
    /// Print an end-of-encounter JSON summary on stdout.
    pub summary_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let data = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            encounter: data.join("encounters").join("duel.toml"),
            tables: data.join("tables.ron"),
            rules: Some(data.join("rules.toml")),
            seed: None,
            summary_json: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_ENCOUNTER` - Encounter file (default: the shipped duel)
    /// - `SKIRMISH_TABLES` - Rules tables (default: the shipped tables)
    /// - `SKIRMISH_RULES` - Rules file, or `default` for built-in rules
    /// - `SKIRMISH_SEED` - Dice seed (default: the encounter's, else random)
    /// - `SKIRMISH_SUMMARY_JSON` - Print a JSON summary (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("SKIRMISH_ENCOUNTER") {
            config.encounter = PathBuf::from(path);
        }
        if let Some(path) = lookup("SKIRMISH_TABLES") {
            config.tables = PathBuf::from(path);
        }
        if let Some(rules) = lookup("SKIRMISH_RULES") {
            config.rules = match rules.as_str() {
                "" | "default" => None,
                path => Some(PathBuf::from(path)),
            };
        }
        config.seed = lookup("SKIRMISH_SEED").and_then(|s| s.trim().parse().ok());

        if let Some(flag) = lookup("SKIRMISH_SUMMARY_JSON") {
            // A bare variable counts as on.
            config.summary_json = flag.is_empty() || flag.parse().unwrap_or(flag == "1");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_shipped_data() {
        let config = config(&[]);
        assert!(config.encounter.ends_with("encounters/duel.toml"));
        assert!(config.tables.ends_with("tables.ron"));
        assert_eq!(config.seed, None);
        assert!(!config.summary_json);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("SKIRMISH_ENCOUNTER", "/tmp/fight.toml"),
            ("SKIRMISH_RULES", "default"),
            ("SKIRMISH_SEED", " 99 "),
            ("SKIRMISH_SUMMARY_JSON", "true"),
        ]);
        assert_eq!(config.encounter, PathBuf::from("/tmp/fight.toml"));
        assert_eq!(config.rules, None);
        assert_eq!(config.seed, Some(99));
        assert!(config.summary_json);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config(&[("SKIRMISH_SEED", "lots"), ("SKIRMISH_SUMMARY_JSON", "no")]);
        assert_eq!(config.seed, None);
        assert!(!config.summary_json);
        assert!(ClientConfig::from_lookup(|_| Some("1".into())).summary_json);
    }
}
