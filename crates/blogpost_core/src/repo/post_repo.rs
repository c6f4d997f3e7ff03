//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over `posts` storage.
//! - Map foreign key failures on `author_uuid` to `UnknownAuthor`.
//!
//! # Invariants
//! - Write paths call `Post::validate()` before SQL mutations.
//! - Listings are ordered by creation (`created_at ASC, rowid ASC`).

use crate::model::author::AuthorId;
use crate::model::post::{Post, PostId};
use crate::policy::ContentPolicy;
use crate::repo::author_repo::AUTHOR_COLUMNS;
use crate::repo::{
    constraint_violation, ensure_connection_ready, parse_uuid, ConstraintKind, RepoError,
    RepoResult,
};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const POST_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    summary,
    category,
    author_uuid
FROM posts";

const POST_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "content",
    "summary",
    "category",
    "author_uuid",
    "created_at",
    "updated_at",
];

/// Query options for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub author_id: Option<AuthorId>,
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post operations.
pub trait PostRepository {
    fn create_post(&self, post: &Post) -> RepoResult<PostId>;
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    /// Posts owned by one author, oldest first.
    fn list_posts_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Post>> {
        self.list_posts(&PostListQuery {
            author_id: Some(author_id),
            ..PostListQuery::default()
        })
    }
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'a> {
    conn: &'a Connection,
    policy: &'a ContentPolicy,
}

impl<'a> SqlitePostRepository<'a> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'a Connection, policy: &'a ContentPolicy) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[("authors", AUTHOR_COLUMNS), ("posts", POST_COLUMNS)],
        )?;
        Ok(Self { conn, policy })
    }

    fn ensure_author_exists(&self, author_id: Option<AuthorId>) -> RepoResult<()> {
        let Some(author_id) = author_id else {
            return Ok(());
        };
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE uuid = ?1);",
            [author_id.to_string()],
            |row| row.get(0),
        )?;
        if exists == 1 {
            Ok(())
        } else {
            Err(RepoError::UnknownAuthor(author_id))
        }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &Post) -> RepoResult<PostId> {
        post.validate(self.policy)?;
        self.ensure_author_exists(post.author_id)?;

        self.conn
            .execute(
                "INSERT INTO posts (
                    uuid,
                    title,
                    content,
                    summary,
                    category,
                    author_uuid
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    post.id.to_string(),
                    post.title.as_str(),
                    post.content.as_str(),
                    post.summary.as_str(),
                    post.category.as_str(),
                    post.author_id.map(|id| id.to_string()),
                ],
            )
            .map_err(|err| map_post_write_error(err, post.author_id))?;

        info!(
            "event=post_create module=repo status=ok post_id={} has_author={}",
            post.id,
            post.author_id.is_some()
        );
        Ok(post.id)
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        post.validate(self.policy)?;
        self.ensure_author_exists(post.author_id)?;

        let changed = self
            .conn
            .execute(
                "UPDATE posts
                 SET
                    title = ?1,
                    content = ?2,
                    summary = ?3,
                    category = ?4,
                    author_uuid = ?5,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?6;",
                params![
                    post.title.as_str(),
                    post.content.as_str(),
                    post.summary.as_str(),
                    post.category.as_str(),
                    post.author_id.map(|id| id.to_string()),
                    post.id.to_string(),
                ],
            )
            .map_err(|err| map_post_write_error(err, post.author_id))?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(post.id));
        }

        info!("event=post_update module=repo status=ok post_id={}", post.id);
        Ok(())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let row = self
            .conn
            .query_row(
                &format!("{POST_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_post_row(row)),
            )
            .optional()?;
        row.transpose()
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(author_id) = query.author_id {
            sql.push_str(" AND author_uuid = ?");
            bind_values.push(Value::Text(author_id.to_string()));
        }

        if let Some(category) = &query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }

        info!("event=post_delete module=repo status=ok post_id={id}");
        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "posts.uuid")?;

    let author_id = match row.get::<_, Option<String>>("author_uuid")? {
        Some(value) => Some(parse_uuid(&value, "posts.author_uuid")?),
        None => None,
    };

    Ok(Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        category: row.get("category")?,
        author_id,
    })
}

fn map_post_write_error(err: rusqlite::Error, author_id: Option<AuthorId>) -> RepoError {
    match (constraint_violation(&err), author_id) {
        (Some(ConstraintKind::ForeignKey), Some(author_id)) => RepoError::UnknownAuthor(author_id),
        _ => err.into(),
    }
}
