//! Application configuration.
//!
//! Stored as TOML under the user config directory. Every section has
//! defaults, and `#[serde(default)]` keeps old config files loading
//! after new fields appear.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use scriptforge_highlight::{Theme, Vocabulary};
use scriptforge_provider::ModelTier;

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider settings
    pub provider: ProviderConfig,

    /// History settings
    pub history: HistoryConfig,

    /// Highlighting vocabulary extensions
    pub highlight: HighlightConfig,

    /// Display classes per token kind
    pub theme: Theme,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("scriptforge").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Builds the classification vocabulary: the built-in grammar plus
    /// any user extensions.
    pub fn vocabulary(&self) -> Vocabulary {
        let mut vocab = Vocabulary::revit_python();
        vocab.extend_keywords(self.highlight.extra_keywords.iter().cloned());
        vocab.extend_type_names(self.highlight.extra_type_names.iter().cloned());
        vocab
    }
}

/// Provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Tier used when the CLI does not pass one
    pub default_tier: ModelTier,

    /// Environment variable the API key is read from
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_tier: ModelTier::Flash,
            api_key_env: scriptforge_provider::API_KEY_ENV.to_string(),
        }
    }
}

/// History settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many generations to keep
    pub capacity: usize,

    /// Persist history to disk between runs
    pub persist: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            persist: true,
        }
    }
}

/// Extra vocabulary entries merged into the built-in grammar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Additional reserved words
    pub extra_keywords: Vec<String>,

    /// Additional API type names
    pub extra_type_names: Vec<String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.default_tier, ModelTier::Flash);
        assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.history.capacity, 5);
        assert!(config.history.persist);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.history.capacity, config.history.capacity);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[provider]\ndefault_tier = \"pro\"\n\n[highlight]\nextra_type_names = [\"Grid\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider.default_tier, ModelTier::Pro);
        assert!(config.vocabulary().is_type_name("Grid"));
        // Untouched sections keep their defaults.
        assert_eq!(config.history.capacity, 5);
    }

    #[test]
    fn test_vocabulary_extension() {
        let mut config = Config::default();
        config.highlight.extra_keywords.push("await".to_string());
        let vocab = config.vocabulary();
        assert!(vocab.is_keyword("await"));
        assert!(vocab.is_keyword("def"));
    }
}
