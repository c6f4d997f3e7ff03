//! Validation error shared by every author/post rule.
//!
//! # Invariants
//! - `Display` output is the user-facing message; callers may show it as-is.
//! - Messages for the default policy are stable and covered by tests.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection of a candidate field value.
///
/// Variants refine the violated rule; the rendered message is what callers
/// surface to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    BlankAuthorName,
    DuplicateAuthorName,
    InvalidPhoneNumber { expected_digits: usize },
    ContentTooShort { min_chars: usize },
    SummaryTooLong { max_chars: usize },
    InvalidCategory { allowed: Vec<String> },
    TitleMissingPhrase { allowed: Vec<String> },
    /// A required field was not supplied on create.
    MissingField(&'static str),
}

impl InvalidValue {
    /// Name of the field whose rule was violated.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankAuthorName | Self::DuplicateAuthorName => "name",
            Self::InvalidPhoneNumber { .. } => "phone_number",
            Self::ContentTooShort { .. } => "content",
            Self::SummaryTooLong { .. } => "summary",
            Self::InvalidCategory { .. } => "category",
            Self::TitleMissingPhrase { .. } => "title",
            Self::MissingField(field) => *field,
        }
    }
}

impl Display for InvalidValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankAuthorName => write!(f, "Author must have a name."),
            Self::DuplicateAuthorName => write!(f, "Author name must be unique."),
            Self::InvalidPhoneNumber { expected_digits } => {
                write!(f, "Phone number must be exactly {expected_digits} digits.")
            }
            Self::ContentTooShort { min_chars } => write!(
                f,
                "Post content must be at least {min_chars} characters long."
            ),
            Self::SummaryTooLong { max_chars } => write!(
                f,
                "Post summary must be at most {max_chars} characters long."
            ),
            Self::InvalidCategory { allowed } => match allowed.as_slice() {
                [only] => write!(f, "Category must be '{only}'."),
                [first, second] => {
                    write!(f, "Category must be either '{first}' or '{second}'.")
                }
                many => {
                    let quoted = many
                        .iter()
                        .map(|c| format!("'{c}'"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "Category must be one of {quoted}.")
                }
            },
            Self::TitleMissingPhrase { allowed } => write!(
                f,
                "Title must be clickbait-y and contain one of the following: {}",
                allowed.join(", ")
            ),
            Self::MissingField(field) => write!(f, "{field} is required."),
        }
    }
}

impl Error for InvalidValue {}

#[cfg(test)]
mod tests {
    use super::InvalidValue;

    #[test]
    fn category_message_adapts_to_list_size() {
        let one = InvalidValue::InvalidCategory {
            allowed: vec!["Poetry".to_string()],
        };
        assert_eq!(one.to_string(), "Category must be 'Poetry'.");

        let three = InvalidValue::InvalidCategory {
            allowed: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };
        assert_eq!(three.to_string(), "Category must be one of 'A', 'B', 'C'.");
    }

    #[test]
    fn field_names_follow_rule() {
        assert_eq!(InvalidValue::DuplicateAuthorName.field(), "name");
        assert_eq!(InvalidValue::MissingField("summary").field(), "summary");
    }
}
