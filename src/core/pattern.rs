use regex::Regex;

use super::models::Source;
use crate::errors::SlackError;

/// The compiled `source.regexp`, used to filter messages in `check` and to
/// extract capture groups in `in`.
#[derive(Debug, Clone)]
pub struct MessagePattern {
    regex: Regex,
}

impl MessagePattern {
    /// # Errors
    ///
    /// Returns `PatternError` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self, SlackError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Compiles the source's pattern. An absent or empty `regexp` means no
    /// filtering.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if the expression does not compile.
    pub fn from_source(source: &Source) -> Result<Option<Self>, SlackError> {
        source
            .regexp
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Self::new)
            .transpose()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Unanchored search, like `re.search`.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Capture groups of the first match, excluding the whole-match group.
    /// Groups that did not take part in the match come back empty.
    #[must_use]
    pub fn groups(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(text)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }
}
