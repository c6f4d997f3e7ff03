//! Author/post use-case service.
//!
//! # Responsibility
//! - Accept candidate field values from callers and turn them into
//!   validated entities (`create_or_update_*`).
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Field values are applied in declaration order and the first violated
//!   rule aborts the whole write.
//! - A rejected write persists nothing.

use crate::model::author::{Author, AuthorId};
use crate::model::invalid::InvalidValue;
use crate::model::post::{Post, PostId};
use crate::policy::ContentPolicy;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for author/post use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A field value was rejected by the validation layer.
    Invalid(InvalidValue),
    AuthorNotFound(AuthorId),
    PostNotFound(PostId),
    /// Post `author_id` does not reference an existing author.
    UnknownAuthor(AuthorId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns the validation failure, if this is one.
    pub fn as_invalid(&self) -> Option<&InvalidValue> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::AuthorNotFound(id) => write!(f, "author not found: {id}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::UnknownAuthor(id) => write!(f, "post references unknown author: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidValue> for ServiceError {
    fn from(value: InvalidValue) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Invalid(err) => Self::Invalid(err),
            RepoError::AuthorNotFound(id) => Self::AuthorNotFound(id),
            RepoError::PostNotFound(id) => Self::PostNotFound(id),
            RepoError::UnknownAuthor(id) => Self::UnknownAuthor(id),
            other => Self::Repo(other),
        }
    }
}

/// Candidate author field values. `None` leaves a field untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFields {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// Candidate post field values. `None` leaves a field untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` detaches the post from its author.
    pub author_id: Option<Option<AuthorId>>,
}

/// Use-case service over author and post repositories.
pub struct BlogService<'p, A: AuthorRepository, P: PostRepository> {
    authors: A,
    posts: P,
    policy: &'p ContentPolicy,
}

impl<'p, A: AuthorRepository, P: PostRepository> BlogService<'p, A, P> {
    pub fn new(authors: A, posts: P, policy: &'p ContentPolicy) -> Self {
        Self {
            authors,
            posts,
            policy,
        }
    }

    /// Creates an author (`id == None`) or updates the given one.
    ///
    /// # Contract
    /// - Create requires `name` and `phone_number`.
    /// - Name uniqueness is checked against persisted authors other than
    ///   the one being written.
    /// - Update is read-modify-write: the author is loaded and patched
    ///   outside the write transaction, so a concurrent update to fields
    ///   not supplied here can be overwritten (last writer wins).
    pub fn create_or_update_author(
        &self,
        id: Option<AuthorId>,
        fields: AuthorFields,
    ) -> ServiceResult<Author> {
        let (mut author, creating) = match id {
            Some(id) => (
                self.authors
                    .get_author(id)?
                    .ok_or(ServiceError::AuthorNotFound(id))?,
                false,
            ),
            None => (
                Author {
                    id: Uuid::new_v4(),
                    name: String::new(),
                    phone_number: String::new(),
                },
                true,
            ),
        };

        if let Err(err) = self.apply_author_fields(&mut author, fields, creating) {
            return Err(reject("author_save", err));
        }

        let persisted = if creating {
            self.authors.create_author(&author).map(|_| ())
        } else {
            self.authors.update_author(&author)
        };
        persisted.map_err(|err| reject("author_save", err))?;

        info!(
            "event=author_save module=service status=ok author_id={} created={creating}",
            author.id
        );
        Ok(author)
    }

    /// Creates a post (`id == None`) or updates the given one.
    ///
    /// # Contract
    /// - Create requires `title`, `content`, `summary` and `category`.
    /// - `author_id` is optional; when set it must name an existing author.
    /// - Update is read-modify-write: the post is loaded and patched
    ///   outside the write transaction, so a concurrent update to fields
    ///   not supplied here can be overwritten (last writer wins).
    pub fn create_or_update_post(
        &self,
        id: Option<PostId>,
        fields: PostFields,
    ) -> ServiceResult<Post> {
        let (mut post, creating) = match id {
            Some(id) => (
                self.posts
                    .get_post(id)?
                    .ok_or(ServiceError::PostNotFound(id))?,
                false,
            ),
            None => (
                Post {
                    id: Uuid::new_v4(),
                    title: String::new(),
                    content: String::new(),
                    summary: String::new(),
                    category: String::new(),
                    author_id: None,
                },
                true,
            ),
        };

        if let Err(err) = self.apply_post_fields(&mut post, fields, creating) {
            return Err(reject("post_save", err));
        }

        let persisted = if creating {
            self.posts.create_post(&post).map(|_| ())
        } else {
            self.posts.update_post(&post)
        };
        persisted.map_err(|err| reject("post_save", err))?;

        info!(
            "event=post_save module=service status=ok post_id={} created={creating}",
            post.id
        );
        Ok(post)
    }

    pub fn get_author(&self, id: AuthorId) -> ServiceResult<Option<Author>> {
        Ok(self.authors.get_author(id)?)
    }

    pub fn find_author_by_name(&self, name: &str) -> ServiceResult<Option<Author>> {
        Ok(self.authors.find_author_by_name(name)?)
    }

    pub fn list_authors(&self) -> ServiceResult<Vec<Author>> {
        Ok(self.authors.list_authors()?)
    }

    pub fn get_post(&self, id: PostId) -> ServiceResult<Option<Post>> {
        Ok(self.posts.get_post(id)?)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.list_posts(query)?)
    }

    /// Posts owned by an existing author, in creation order.
    pub fn author_posts(&self, author_id: AuthorId) -> ServiceResult<Vec<Post>> {
        if self.authors.get_author(author_id)?.is_none() {
            return Err(ServiceError::AuthorNotFound(author_id));
        }
        Ok(self.posts.list_posts_by_author(author_id)?)
    }

    /// Deletes an author; storage detaches its posts.
    pub fn delete_author(&self, id: AuthorId) -> ServiceResult<()> {
        Ok(self.authors.delete_author(id)?)
    }

    pub fn delete_post(&self, id: PostId) -> ServiceResult<()> {
        Ok(self.posts.delete_post(id)?)
    }

    fn apply_author_fields(
        &self,
        author: &mut Author,
        fields: AuthorFields,
        creating: bool,
    ) -> Result<(), InvalidValue> {
        match fields.name {
            Some(name) => author.set_name(name)?,
            None if creating => return Err(InvalidValue::BlankAuthorName),
            None => {}
        }
        match fields.phone_number {
            Some(phone_number) => author.set_phone_number(phone_number, self.policy)?,
            None if creating => return Err(InvalidValue::MissingField("phone_number")),
            None => {}
        }
        Ok(())
    }

    fn apply_post_fields(
        &self,
        post: &mut Post,
        fields: PostFields,
        creating: bool,
    ) -> Result<(), InvalidValue> {
        match fields.title {
            Some(title) => post.set_title(title, self.policy)?,
            None if creating => return Err(InvalidValue::MissingField("title")),
            None => {}
        }
        match fields.content {
            Some(content) => post.set_content(content, self.policy)?,
            None if creating => return Err(InvalidValue::MissingField("content")),
            None => {}
        }
        match fields.summary {
            Some(summary) => post.set_summary(summary, self.policy)?,
            None if creating => return Err(InvalidValue::MissingField("summary")),
            None => {}
        }
        match fields.category {
            Some(category) => post.set_category(category, self.policy)?,
            None if creating => return Err(InvalidValue::MissingField("category")),
            None => {}
        }
        if let Some(author_id) = fields.author_id {
            post.set_author(author_id);
        }
        Ok(())
    }
}

fn reject(event: &str, err: impl Into<ServiceError>) -> ServiceError {
    let err = err.into();
    match &err {
        ServiceError::Invalid(invalid) => warn!(
            "event={event} module=service status=rejected field={}",
            invalid.field()
        ),
        other => warn!("event={event} module=service status=error error={other}"),
    }
    err
}
