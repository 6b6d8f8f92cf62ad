//! Well-known parameter keys
//!
//! The platform requires a handful of parameters on every strategy. The
//! parser injects them when an export omits them.

/// Parameter holding the display name of a strategy
pub const NAME_KEY: &str = "StrategyName";

/// Name used when a block carries no [`NAME_KEY`] parameter
pub const PLACEHOLDER_NAME: &str = "Unnamed Strategy";

/// Activation flag key
pub const ACTIVE_KEY: &str = "Active";

/// Format version key
pub const FVERSION_KEY: &str = "FVersion";

/// Required fields appended to a block when absent, in injection order
pub const DEFAULT_PARAMETERS: [(&str, &str); 2] = [(ACTIVE_KEY, "0"), (FVERSION_KEY, "12")];

/// Default parameters as owned pairs
#[must_use]
pub fn default_parameters() -> Vec<(String, String)> {
    DEFAULT_PARAMETERS
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
