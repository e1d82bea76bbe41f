//! `{{path}}` placeholders in `out` params.
//!
//! A placeholder names a file relative to the inputs directory, usually
//! `<resource>/<file>` as written by an upstream `in`. Interpolation runs in
//! two passes: every placeholder across all values is resolved first, and only
//! if all of them resolve is anything substituted.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::errors::SlackError;

static PLACEHOLDER_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Placeholder names found in `values`, trimmed and deduplicated.
#[must_use]
pub fn collect_placeholders<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|value| PLACEHOLDER_RE.captures_iter(value))
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim().to_string())
        .collect()
}

/// Reads the file behind every placeholder.
///
/// # Errors
///
/// Returns `UnresolvedPlaceholders` listing every name whose file could not be
/// read, not just the first.
pub fn resolve_placeholders(
    inputs: &Path,
    names: &BTreeSet<String>,
) -> Result<BTreeMap<String, String>, SlackError> {
    let mut resolved = BTreeMap::new();
    let mut unresolved = Vec::new();

    for name in names {
        let path = inputs.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                resolved.insert(name.clone(), content);
            }
            Err(e) => {
                warn!("Placeholder {{{{{}}}}} unresolved: {}: {}", name, path.display(), e);
                unresolved.push(format!("{{{{{name}}}}}"));
            }
        }
    }

    if unresolved.is_empty() {
        Ok(resolved)
    } else {
        Err(SlackError::UnresolvedPlaceholders(unresolved))
    }
}

/// Replaces each placeholder in `value` with its resolved content. Names
/// missing from `resolved` are left as written.
#[must_use]
pub fn substitute(value: &str, resolved: &BTreeMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(value, |caps: &regex::Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str().trim());
            resolved
                .get(name)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolves and substitutes placeholders in every value of `params`.
///
/// # Errors
///
/// Returns `UnresolvedPlaceholders` if any referenced file cannot be read; in
/// that case nothing is substituted.
pub fn interpolate_params(
    params: &BTreeMap<String, String>,
    inputs: &Path,
) -> Result<BTreeMap<String, String>, SlackError> {
    let names = collect_placeholders(params.values().map(String::as_str));
    let resolved = resolve_placeholders(inputs, &names)?;

    Ok(params
        .iter()
        .map(|(key, value)| (key.clone(), substitute(value, &resolved)))
        .collect())
}
