//! Domain model for authors and their posts.
//!
//! # Responsibility
//! - Define the canonical records persisted by core.
//! - Expose validating constructors/setters that check field rules on
//!   every change they make.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - A failed setter leaves the entity unchanged.
//! - Fields are public and `Deserialize` does not validate, so a value
//!   built by hand may break the rules; repositories re-run `validate`
//!   before every write.
//! - Cross-record rules (author name uniqueness) are enforced by the
//!   repository layer, not here.

pub mod author;
pub mod invalid;
pub mod post;
