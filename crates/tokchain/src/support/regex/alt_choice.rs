//! Exact Match Union Patterns

use crate::support::regex::RegexPattern;

/// Create a union pattern of exact matches.
///
/// This will always be a [`RegexPattern::Basic`] variant.
/// Longer alternatives are tried first, so `"..."` wins over `"."`.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
pub fn alternate_choice_regex_pattern<S: AsRef<str>>(alts: &[S]) -> RegexPattern {
    let mut parts = alts
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();
    parts.sort_by(|a, b| b.len().cmp(&a.len()));

    let parts = parts.into_iter().map(regex::escape).collect::<Vec<_>>();
    RegexPattern::Basic(format!("(?:{})", parts.join("|")))
}
