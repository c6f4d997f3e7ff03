//! Author domain model.
//!
//! # Responsibility
//! - Define the author record and its validating constructors/setters.
//!
//! # Invariants
//! - `id` is stable and never reused for another author.
//! - `name` is never blank; `phone_number` matches the policy digit count.
//! - Name uniqueness is checked at persistence time, see `repo::author_repo`.

use crate::model::invalid::InvalidValue;
use crate::policy::ContentPolicy;
use crate::validation::{validate_author_name, validate_phone_number};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for authors.
pub type AuthorId = Uuid;

/// A content creator; owns zero or more posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub phone_number: String,
}

impl Author {
    /// Creates a validated author with a generated id.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<Self, InvalidValue> {
        Self::with_id(Uuid::new_v4(), name, phone_number, policy)
    }

    /// Creates a validated author with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: AuthorId,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<Self, InvalidValue> {
        let author = Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
        };
        author.validate(policy)?;
        Ok(author)
    }

    /// Runs every field rule, stopping at the first violation.
    pub fn validate(&self, policy: &ContentPolicy) -> Result<(), InvalidValue> {
        validate_author_name(&self.name)?;
        validate_phone_number(&self.phone_number, policy)?;
        Ok(())
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_author_name(&value)?;
        self.name = value;
        Ok(())
    }

    pub fn set_phone_number(
        &mut self,
        value: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_phone_number(&value, policy)?;
        self.phone_number = value;
        Ok(())
    }
}
