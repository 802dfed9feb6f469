//! Configuration types for extract-require.
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then command-line overrides. Every field carries a serde default so a
//! partial file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{ExtractError, Result};
use crate::lang::common::is_identifier;
use crate::lang::registry::normalize_language_key;

/// Identifier recognized as the require function unless configured otherwise.
pub const DEFAULT_REQUIRE_WORD: &str = "require";

/// Settings for a single extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Grammar used to parse the source text (e.g. "js", "ts")
    #[serde(default = "ExtractConfig::default_language")]
    pub language: String,

    /// Identifier treated as the require function
    #[serde(default = "ExtractConfig::default_word")]
    pub word: String,

    /// Emit `{"strings": [...], "expressions": [...]}` instead of a bare array
    #[serde(default)]
    pub include_expressions: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            language: Self::default_language(),
            word: Self::default_word(),
            include_expressions: false,
        }
    }
}

impl ExtractConfig {
    fn default_language() -> String {
        "js".to_string()
    }

    fn default_word() -> String {
        DEFAULT_REQUIRE_WORD.to_string()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::io(
                format!("Failed to read configuration file: {}", path.display()),
                e,
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| {
            ExtractError::config(format!("Failed to parse YAML configuration: {}", e))
        })
    }

    /// Serialize configuration as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.word.is_empty() {
            return Err(ExtractError::config_field("word must not be empty", "word"));
        }
        if !is_identifier(&self.word) {
            return Err(ExtractError::config_field(
                format!("'{}' is not a valid identifier", self.word),
                "word",
            ));
        }
        if normalize_language_key(&self.language).is_none() {
            return Err(ExtractError::config_field(
                format!("Unsupported language: {}", self.language),
                "language",
            ));
        }
        Ok(())
    }
}

/// Command-line overrides applied on top of file or default configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement language key
    pub language: Option<String>,
    /// Replacement require identifier
    pub word: Option<String>,
    /// Force the expressions payload shape on
    pub include_expressions: bool,
}

impl ExtractConfig {
    /// Apply overrides, with the overrides taking priority
    pub fn merge_with(&mut self, overrides: ConfigOverrides) {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(word) = overrides.word {
            self.word = word;
        }
        if overrides.include_expressions {
            self.include_expressions = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractConfig::default();
        assert_eq!(config.language, "js");
        assert_eq!(config.word, "require");
        assert!(!config.include_expressions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ExtractConfig::from_yaml_str("word: load\n").unwrap();
        assert_eq!(config.word, "load");
        assert_eq!(config.language, "js");
        assert!(!config.include_expressions);

        let config = ExtractConfig::from_yaml_str("").unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = ExtractConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("language: js"));
        assert!(yaml.contains("word: require"));
        assert_eq!(
            ExtractConfig::from_yaml_str(&yaml).unwrap(),
            ExtractConfig::default()
        );
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = ExtractConfig::from_yaml_str("word: [unclosed").unwrap_err();
        assert!(matches!(err, ExtractError::Config { .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "language: ts\ninclude_expressions: true").unwrap();

        let config = ExtractConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.language, "ts");
        assert!(config.include_expressions);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            ExtractConfig::from_yaml_file(Path::new("/nonexistent/extract-require.yml"))
                .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ExtractConfig::default();
        config.word = "not-an-identifier".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ExtractError::Config { field: Some(ref f), .. } if f == "word"));

        let mut config = ExtractConfig::default();
        config.word = String::new();
        assert!(config.validate().is_err());

        let mut config = ExtractConfig::default();
        config.language = "ruby".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ExtractError::Config { field: Some(ref f), .. } if f == "language"));
    }

    #[test]
    fn test_merge_overrides_take_priority() {
        let mut config = ExtractConfig::from_yaml_str("word: load\nlanguage: ts").unwrap();
        config.merge_with(ConfigOverrides {
            language: Some("js".to_string()),
            word: None,
            include_expressions: true,
        });

        assert_eq!(config.language, "js");
        assert_eq!(config.word, "load");
        assert!(config.include_expressions);
    }
}
