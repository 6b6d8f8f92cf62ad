//! Block and folder markers
//!
//! Matching is ASCII case-insensitive. Strategy markers may appear anywhere
//! on their line; folder markers must start the (left-trimmed) line.

/// Strategy block start, as written
pub const BEGIN_STRATEGY: &str = "##Begin_Strategy";

/// Strategy block end, as written
pub const END_STRATEGY: &str = "##End_Strategy";

/// Folder start, as written
pub const BEGIN_FOLDER: &str = "#Begin_Folder";

/// Folder end, as written
pub const END_FOLDER: &str = "#End_Folder";

/// Classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    BeginStrategy,
    EndStrategy,
    BeginFolder(&'a str),
    EndFolder,
}

/// Classify a line, `None` for ordinary content
#[must_use]
pub fn classify(line: &str) -> Option<Marker<'_>> {
    if contains_ignore_case(line, BEGIN_STRATEGY) {
        return Some(Marker::BeginStrategy);
    }
    if contains_ignore_case(line, END_STRATEGY) {
        return Some(Marker::EndStrategy);
    }

    let trimmed = line.trim_start();
    if let Some(rest) = strip_prefix_ignore_case(trimmed, BEGIN_FOLDER) {
        return Some(Marker::BeginFolder(rest.trim()));
    }
    if strip_prefix_ignore_case(trimmed, END_FOLDER).is_some() {
        return Some(Marker::EndFolder);
    }
    None
}

/// Whether `line` closes a strategy block
#[inline]
#[must_use]
pub fn is_end_strategy(line: &str) -> bool {
    contains_ignore_case(line, END_STRATEGY)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}
