//! Parameter line helpers
//!
//! A parameter line is any line containing `=`. The key is everything before
//! the first `=` (trimmed), the value everything after it (trimmed, may
//! itself contain `=`).

/// Split a raw line into `(key, value)`
///
/// Returns `None` for lines without `=`.
///
/// # Examples
/// ```
/// # use stratcmp_model::line::split_parameter;
/// assert_eq!(split_parameter(" Risk = 5 "), Some(("Risk", "5")));
/// assert_eq!(split_parameter("Expr=a=b"), Some(("Expr", "a=b")));
/// assert_eq!(split_parameter("// comment"), None);
/// ```
#[inline]
#[must_use]
pub fn split_parameter(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Key of a parameter line, if it is one
#[inline]
#[must_use]
pub fn parameter_key(line: &str) -> Option<&str> {
    split_parameter(line).map(|(key, _)| key)
}

/// Format a fresh `key=value` line
#[inline]
#[must_use]
pub fn format_parameter(key: &str, value: &str) -> String {
    format!("{key}={value}")
}

/// Replace the value of an existing parameter line
///
/// Everything up to and including the first `=` is kept byte for byte, so
/// the key and any spacing before the separator survive the edit. A line
/// without `=` is returned unchanged.
///
/// # Examples
/// ```
/// # use stratcmp_model::line::rewrite_value;
/// assert_eq!(rewrite_value("Risk = 5", "9"), "Risk =9");
/// assert_eq!(rewrite_value("Expr=a=b", "c"), "Expr=c");
/// ```
#[must_use]
pub fn rewrite_value(line: &str, value: &str) -> String {
    match line.find('=') {
        Some(pos) => format!("{}{}", &line[..=pos], value),
        None => line.to_string(),
    }
}
