//! Floor version of a Composer constraint

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

/// Version numbers inside a constraint: `^7.2.5|^8.0` -> `7.2.5`, `8.0`
static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+){0,2}").expect("valid version regex"));

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Lowest version number mentioned by a constraint
///
/// Operators are ignored, so `~10.0`, `^10.0` and `>=10.0` all floor at `10.0.0`.
/// Returns None when the constraint contains no version number.
pub fn floor_version(constraint: &str) -> Option<Version> {
    VERSION_NUMBER
        .find_iter(constraint)
        .filter_map(|m| parse_version(m.as_str()))
        .min()
}
