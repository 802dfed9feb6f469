//! Configuration layer management: defaults, then an optional YAML file, then
//! command-line overrides.

use extract_require::{ConfigOverrides, ExtractConfig};

use crate::cli::args::ExtractArgs;

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

impl FromCliArgs<ExtractArgs> for ConfigOverrides {
    fn from_cli_args(args: &ExtractArgs) -> Self {
        Self {
            language: args.language.clone(),
            word: args.word.clone(),
            include_expressions: args.expressions,
        }
    }
}

/// Build and validate the effective configuration for a run.
pub fn build_config(args: &ExtractArgs) -> anyhow::Result<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration file");
            ExtractConfig::from_yaml_file(path)?
        }
        None => ExtractConfig::default(),
    };

    config.merge_with(ConfigOverrides::from_cli_args(args));
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = build_config(&ExtractArgs::default()).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "language: ts\nword: load").unwrap();

        let args = ExtractArgs {
            config: Some(file.path().to_path_buf()),
            language: None,
            word: Some("need".to_string()),
            expressions: true,
        };
        let config = build_config(&args).unwrap();

        assert_eq!(config.language, "ts");
        assert_eq!(config.word, "need");
        assert!(config.include_expressions);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = ExtractArgs {
            word: Some("not valid".to_string()),
            ..ExtractArgs::default()
        };
        assert!(build_config(&args).is_err());
    }
}
