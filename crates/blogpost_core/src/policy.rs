//! Content policy configuration.
//!
//! # Responsibility
//! - Hold the product-level content rules (title marker phrases, allowed
//!   categories, length limits) as data instead of hard-coded logic.
//! - Load policy overrides from JSON files on top of compiled defaults.
//!
//! # Invariants
//! - `ContentPolicy::default()` reproduces the launch rule set exactly.
//! - A loaded policy always has at least one title phrase and one category.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
pub const DEFAULT_CATEGORIES: [&str; 2] = ["Fiction", "Non-Fiction"];
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 250;
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 250;
pub const DEFAULT_PHONE_DIGITS: usize = 10;

/// Content rules applied by the validation layer.
///
/// Missing JSON fields fall back to the defaults, so a policy file only
/// needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPolicy {
    /// Case-sensitive substrings; a title must contain at least one.
    pub title_phrases: Vec<String>,
    /// Exact category values a post may carry.
    pub categories: Vec<String>,
    /// Minimum post content length, in characters.
    pub min_content_chars: usize,
    /// Maximum post summary length, in characters.
    pub max_summary_chars: usize,
    /// Exact number of digits in an author phone number.
    pub phone_digits: usize,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            title_phrases: DEFAULT_TITLE_PHRASES.iter().map(|p| p.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            max_summary_chars: DEFAULT_MAX_SUMMARY_CHARS,
            phone_digits: DEFAULT_PHONE_DIGITS,
        }
    }
}

impl ContentPolicy {
    /// Parses a policy from JSON, filling omitted fields with defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(raw).map_err(PolicyError::Parse)?;
        policy.check()?;
        Ok(policy)
    }

    /// Rejects policies no entity could ever satisfy.
    pub fn check(&self) -> Result<(), PolicyError> {
        if self.title_phrases.is_empty() {
            return Err(PolicyError::Invalid(
                "title_phrases must not be empty".to_string(),
            ));
        }
        if self.title_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(PolicyError::Invalid(
                "title_phrases must not contain blank entries".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(PolicyError::Invalid(
                "categories must not be empty".to_string(),
            ));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(PolicyError::Invalid(
                "categories must not contain blank entries".to_string(),
            ));
        }
        if self.phone_digits == 0 {
            return Err(PolicyError::Invalid(
                "phone_digits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn allows_category(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c == value)
    }

    pub fn title_has_marker(&self, value: &str) -> bool {
        self.title_phrases.iter().any(|p| value.contains(p.as_str()))
    }
}

/// Policy loading failure.
#[derive(Debug)]
pub enum PolicyError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read policy `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed policy json: {err}"),
            Self::Invalid(message) => write!(f, "invalid content policy: {message}"),
        }
    }
}

impl Error for PolicyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Loads a policy file from disk.
pub fn load_policy(path: impl AsRef<Path>) -> Result<ContentPolicy, PolicyError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let policy = ContentPolicy::from_json_str(&raw)?;
    log::info!(
        "event=policy_load module=policy status=ok phrases={} categories={}",
        policy.title_phrases.len(),
        policy.categories.len()
    );
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::{ContentPolicy, PolicyError};

    #[test]
    fn default_policy_matches_launch_rules() {
        let policy = ContentPolicy::default();
        assert_eq!(
            policy.title_phrases,
            vec!["Won't Believe", "Secret", "Top", "Guess"]
        );
        assert_eq!(policy.categories, vec!["Fiction", "Non-Fiction"]);
        assert_eq!(policy.min_content_chars, 250);
        assert_eq!(policy.max_summary_chars, 250);
        assert_eq!(policy.phone_digits, 10);
        policy.check().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let policy = ContentPolicy::from_json_str(r#"{"categories":["Poetry"]}"#).unwrap();
        assert_eq!(policy.categories, vec!["Poetry"]);
        assert_eq!(policy.title_phrases.len(), 4);
        assert_eq!(policy.min_content_chars, 250);
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        let err = ContentPolicy::from_json_str(r#"{"title_phrases":[]}"#).unwrap_err();
        assert!(matches!(err, PolicyError::Invalid(_)));
    }

    #[test]
    fn whitespace_only_phrase_is_rejected() {
        let err = ContentPolicy::from_json_str(r#"{"title_phrases":["Top", "  "]}"#).unwrap_err();
        assert!(matches!(err, PolicyError::Invalid(_)));
        assert!(err.to_string().contains("title_phrases"));
    }

    #[test]
    fn zero_phone_digits_is_rejected() {
        let err = ContentPolicy::from_json_str(r#"{"phone_digits":0}"#).unwrap_err();
        assert!(err.to_string().contains("phone_digits"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = ContentPolicy::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, PolicyError::Parse(_)));
    }
}
