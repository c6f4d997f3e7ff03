//! Post domain model.
//!
//! # Responsibility
//! - Define the post record and its validating constructors/setters.
//!
//! # Invariants
//! - `new`, `with_id` and the setters accept `content`, `summary`,
//!   `category` and `title` only when they satisfy the given
//!   `ContentPolicy`. Struct literals and deserialization bypass this;
//!   repositories call `validate` before writing.
//! - `author_id` existence is enforced by storage (foreign key), not here.

use crate::model::author::AuthorId;
use crate::model::invalid::InvalidValue;
use crate::policy::ContentPolicy;
use crate::validation::{
    validate_post_category, validate_post_content, validate_post_summary, validate_post_title,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for posts.
pub type PostId = Uuid;

/// Candidate field values for a new post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
    pub author_id: Option<AuthorId>,
}

/// An article, optionally attributed to an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
    /// `None` means the post has no author.
    pub author_id: Option<AuthorId>,
}

impl Post {
    /// Creates a validated post with a generated id.
    pub fn new(draft: PostDraft, policy: &ContentPolicy) -> Result<Self, InvalidValue> {
        Self::with_id(Uuid::new_v4(), draft, policy)
    }

    pub fn with_id(
        id: PostId,
        draft: PostDraft,
        policy: &ContentPolicy,
    ) -> Result<Self, InvalidValue> {
        let post = Self {
            id,
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            category: draft.category,
            author_id: draft.author_id,
        };
        post.validate(policy)?;
        Ok(post)
    }

    /// Runs every field rule in declaration order, stopping at the first
    /// violation.
    pub fn validate(&self, policy: &ContentPolicy) -> Result<(), InvalidValue> {
        validate_post_title(&self.title, policy)?;
        validate_post_content(&self.content, policy)?;
        validate_post_summary(&self.summary, policy)?;
        validate_post_category(&self.category, policy)?;
        Ok(())
    }

    pub fn set_title(
        &mut self,
        value: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_post_title(&value, policy)?;
        self.title = value;
        Ok(())
    }

    pub fn set_content(
        &mut self,
        value: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_post_content(&value, policy)?;
        self.content = value;
        Ok(())
    }

    pub fn set_summary(
        &mut self,
        value: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_post_summary(&value, policy)?;
        self.summary = value;
        Ok(())
    }

    pub fn set_category(
        &mut self,
        value: impl Into<String>,
        policy: &ContentPolicy,
    ) -> Result<(), InvalidValue> {
        let value = value.into();
        validate_post_category(&value, policy)?;
        self.category = value;
        Ok(())
    }

    /// Attributes the post to an author, or detaches it with `None`.
    pub fn set_author(&mut self, author_id: Option<AuthorId>) {
        self.author_id = author_id;
    }
}
