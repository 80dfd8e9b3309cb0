use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the current directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".vespa-yql.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "VESPA_YQL_CONFIG";

/// Loaded configuration plus where it came from
pub struct CliContext {
    /// Path of the config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    /// Loaded configuration (defaults when no file was found)
    pub config: YqlConfig,
}

/// Configuration stored in .vespa-yql.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YqlConfig {
    #[serde(default)]
    pub defaults: QueryDefaults,
}

/// Values applied to every built query unless overridden on the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub select: Vec<String>,
    #[serde(default)]
    pub hits: Option<u64>,
    #[serde(default)]
    pub ranking: Option<String>,
    #[serde(default)]
    pub default_index: Option<String>,
}

impl CliContext {
    /// Resolve config from an explicit path, the environment, or the directory tree
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Self::from_file(PathBuf::from(path));
        }

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        match Self::find_config_file(&current_dir) {
            Some(path) => Self::from_file(path),
            None => Ok(Self {
                config_path: None,
                config: YqlConfig::default(),
            }),
        }
    }

    /// Load a specific config file
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: YqlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Walk up from `start` looking for the config file
    fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = YqlConfig::default();
        assert!(config.defaults.sources.is_empty());
        assert!(config.defaults.select.is_empty());
        assert_eq!(config.defaults.hits, None);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: YqlConfig = toml::from_str(
            r#"
            [defaults]
            sources = ["products"]
            hits = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.sources, vec!["products".to_string()]);
        assert_eq!(config.defaults.hits, Some(25));
        assert_eq!(config.defaults.ranking, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = YqlConfig {
            defaults: QueryDefaults {
                sources: vec!["products".to_string()],
                ranking: Some("hybrid".to_string()),
                ..Default::default()
            },
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: YqlConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[defaults]\nsources = [\"docs\"]\n").unwrap();

        let found = CliContext::find_config_file(&nested).unwrap();
        let ctx = CliContext::from_file(found).unwrap();
        assert_eq!(ctx.config.defaults.sources, vec!["docs".to_string()]);
        assert!(ctx.config_path.is_some());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(CliContext::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[defaults\n").unwrap();
        let err = CliContext::from_file(path).err().unwrap();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
