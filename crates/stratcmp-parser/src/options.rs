//! Parser options

use stratcmp_model::keys;

/// Options controlling name resolution and default injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Parameter whose value becomes the strategy name
    pub name_key: String,
    /// Name used when `name_key` is absent or empty
    pub placeholder_name: String,
    /// Required parameters appended when absent, in order
    pub default_parameters: Vec<(String, String)>,
}

impl ParserOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With name key
    #[inline]
    #[must_use]
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    /// With placeholder name
    #[inline]
    #[must_use]
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }

    /// With default parameters
    #[inline]
    #[must_use]
    pub fn with_default_parameters(mut self, defaults: Vec<(String, String)>) -> Self {
        self.default_parameters = defaults;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            name_key: keys::NAME_KEY.to_string(),
            placeholder_name: keys::PLACEHOLDER_NAME.to_string(),
            default_parameters: keys::default_parameters(),
        }
    }
}
