//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for authors and posts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes run entity `validate()` before any SQL mutation.
//! - Storage constraints (UNIQUE, FOREIGN KEY) are the authoritative
//!   guarantee; their violations are mapped back to semantic errors.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::author::AuthorId;
use crate::model::invalid::InvalidValue;
use crate::model::post::PostId;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for author/post persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Invalid(InvalidValue),
    Db(DbError),
    AuthorNotFound(AuthorId),
    PostNotFound(PostId),
    /// A post references an author that does not exist.
    UnknownAuthor(AuthorId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::AuthorNotFound(id) => write!(f, "author not found: {id}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::UnknownAuthor(id) => write!(f, "post references unknown author: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidValue> for RepoError {
    fn from(value: InvalidValue) -> Self {
        Self::Invalid(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Which storage constraint a failed write tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    Unique,
    ForeignKey,
}

pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<ConstraintKind> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => Some(ConstraintKind::Unique),
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Verifies the connection went through `db::open_db` and carries the
/// given tables/columns.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

pub(crate) fn parse_uuid(value: &str, location: &str) -> RepoResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {location}")))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
