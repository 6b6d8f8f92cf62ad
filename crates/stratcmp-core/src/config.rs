//! Session configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stratcmp_model::keys;
use stratcmp_parser::ParserOptions;

/// Session configuration
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// max_selection = 4
/// timestamp_format = "%d.%m.%Y %H:%M"
/// default_parameters = [["Active", "1"], ["FVersion", "12"]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Upper bound on strategies in one comparison
    pub max_selection: usize,
    /// Name given to blocks without a name parameter
    pub placeholder_name: String,
    /// Parameter holding the strategy name
    pub name_key: String,
    /// Required parameters injected at parse time, in order
    pub default_parameters: Vec<(String, String)>,
    /// Store slot holding the history log
    pub history_slot: String,
    /// chrono format for history timestamps
    pub timestamp_format: String,
    /// Default tracing filter for the command-line front end
    pub log_level: String,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a value is unusable
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_selection == 0 {
            return Err(ConfigError::Invalid {
                field: "max_selection",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.name_key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "name_key",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some((key, _)) = self
            .default_parameters
            .iter()
            .find(|(k, _)| k.is_empty() || k.contains('='))
        {
            return Err(ConfigError::Invalid {
                field: "default_parameters",
                reason: format!("unusable key {key:?}"),
            });
        }
        Ok(())
    }

    /// With max selection
    #[inline]
    #[must_use]
    pub fn with_max_selection(mut self, max: usize) -> Self {
        self.max_selection = max;
        self
    }

    /// With placeholder name
    #[inline]
    #[must_use]
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }

    /// With history slot
    #[inline]
    #[must_use]
    pub fn with_history_slot(mut self, slot: impl Into<String>) -> Self {
        self.history_slot = slot.into();
        self
    }

    /// With timestamp format
    #[inline]
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Parser options derived from this configuration
    #[must_use]
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::new()
            .with_name_key(self.name_key.clone())
            .with_placeholder_name(self.placeholder_name.clone())
            .with_default_parameters(self.default_parameters.clone())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_selection: 10,
            placeholder_name: keys::PLACEHOLDER_NAME.to_string(),
            name_key: keys::NAME_KEY.to_string(),
            default_parameters: keys::default_parameters(),
            history_slot: "strategy_comparison_history".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parser_options_match_parser_default() {
        assert_eq!(SessionConfig::default().parser_options(), ParserOptions::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            max_selection = 4
            default_parameters = [["Active", "1"]]
            "#,
        )
        .unwrap();

        assert_eq!(config.max_selection, 4);
        assert_eq!(
            config.default_parameters,
            vec![("Active".to_string(), "1".to_string())]
        );
        assert_eq!(config.history_slot, "strategy_comparison_history");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn toml_roundtrip() {
        let config = SessionConfig::default().with_max_selection(3);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SessionConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(matches!(
            SessionConfig::from_toml_str("max_selection = 0"),
            Err(ConfigError::Invalid { field: "max_selection", .. })
        ));
        assert!(matches!(
            SessionConfig::from_toml_str(r#"default_parameters = [["a=b", "1"]]"#),
            Err(ConfigError::Invalid { field: "default_parameters", .. })
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("max_selection = \"ten\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stratcmp.toml");
        std::fs::write(&path, "history_slot = \"desk_a\"\n").unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.history_slot, "desk_a");

        assert!(matches!(
            SessionConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
