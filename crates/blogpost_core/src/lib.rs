//! Core domain logic for the blogpost store.
//! This crate is the single source of truth for author/post invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::author::{Author, AuthorId};
pub use model::invalid::InvalidValue;
pub use model::post::{Post, PostDraft, PostId};
pub use policy::{load_policy, ContentPolicy, PolicyError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::blog_service::{
    AuthorFields, BlogService, PostFields, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
