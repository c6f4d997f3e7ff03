//! Field validation rules for authors and posts.
//!
//! # Responsibility
//! - Decide acceptance of one candidate field value at a time.
//! - Keep the cross-record name rule explicit: the caller passes in the
//!   result of its own `find_author_by_name` lookup.
//!
//! # Invariants
//! - Every rule is a pure predicate; nothing here touches storage.
//! - Lengths count Unicode scalar values, not bytes.

use crate::model::author::{Author, AuthorId};
use crate::model::invalid::InvalidValue;
use crate::policy::ContentPolicy;

pub type ValidationResult = Result<(), InvalidValue>;

/// Rejects names that are empty or whitespace-only.
///
/// The stored value is not trimmed; uniqueness compares the exact string.
pub fn validate_author_name(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(InvalidValue::BlankAuthorName);
    }
    Ok(())
}

/// Fails when `existing` is a different author already holding the name.
///
/// `self_id` is the author being written; re-saving an author under its
/// own name is not a conflict.
pub fn ensure_author_name_available(
    self_id: AuthorId,
    existing: Option<&Author>,
) -> ValidationResult {
    match existing {
        Some(other) if other.id != self_id => Err(InvalidValue::DuplicateAuthorName),
        _ => Ok(()),
    }
}

/// Accepts numeric characters from any script, not only ASCII `0-9`.
pub fn validate_phone_number(value: &str, policy: &ContentPolicy) -> ValidationResult {
    let digits_only = value.chars().all(char::is_numeric);
    if !digits_only || value.chars().count() != policy.phone_digits {
        return Err(InvalidValue::InvalidPhoneNumber {
            expected_digits: policy.phone_digits,
        });
    }
    Ok(())
}

pub fn validate_post_title(value: &str, policy: &ContentPolicy) -> ValidationResult {
    if !policy.title_has_marker(value) {
        return Err(InvalidValue::TitleMissingPhrase {
            allowed: policy.title_phrases.clone(),
        });
    }
    Ok(())
}

pub fn validate_post_content(value: &str, policy: &ContentPolicy) -> ValidationResult {
    if value.chars().count() < policy.min_content_chars {
        return Err(InvalidValue::ContentTooShort {
            min_chars: policy.min_content_chars,
        });
    }
    Ok(())
}

pub fn validate_post_summary(value: &str, policy: &ContentPolicy) -> ValidationResult {
    if value.chars().count() > policy.max_summary_chars {
        return Err(InvalidValue::SummaryTooLong {
            max_chars: policy.max_summary_chars,
        });
    }
    Ok(())
}

pub fn validate_post_category(value: &str, policy: &ContentPolicy) -> ValidationResult {
    if !policy.allows_category(value) {
        return Err(InvalidValue::InvalidCategory {
            allowed: policy.categories.clone(),
        });
    }
    Ok(())
}
