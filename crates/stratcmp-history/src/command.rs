//! Platform command strings

/// Command verb understood by the platform
pub const SET_PARAM: &str = "SetParam";

/// Format a `SetParam` command
///
/// Key and value are not quoted or escaped; values containing spaces or
/// quotes pass through unchanged.
///
/// # Examples
/// ```
/// # use stratcmp_history::command::set_param;
/// assert_eq!(set_param("B", "Risk", "9"), r#"SetParam "B" Risk 9"#);
/// ```
#[inline]
#[must_use]
pub fn set_param(strategy_name: &str, parameter: &str, value: &str) -> String {
    format!("{SET_PARAM} \"{strategy_name}\" {parameter} {value}")
}
