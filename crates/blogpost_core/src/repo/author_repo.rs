//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and name lookup over `authors` storage.
//! - Own the cross-record name uniqueness rule.
//!
//! # Invariants
//! - Write paths call `Author::validate()` before SQL mutations.
//! - Name check and write run inside one IMMEDIATE transaction; the UNIQUE
//!   index still backs the rule if another connection slips in between.

use crate::model::author::{Author, AuthorId};
use crate::model::invalid::InvalidValue;
use crate::policy::ContentPolicy;
use crate::repo::{
    constraint_violation, ensure_connection_ready, parse_uuid, ConstraintKind, RepoError,
    RepoResult,
};
use crate::validation::ensure_author_name_available;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const AUTHOR_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    phone_number
FROM authors";

pub(crate) const AUTHOR_COLUMNS: &[&str] = &["uuid", "name", "phone_number", "updated_at"];

/// Repository interface for author operations.
pub trait AuthorRepository {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive name lookup.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// Lists authors sorted by name.
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    /// Hard-deletes an author; its posts become unattributed.
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'a> {
    conn: &'a Connection,
    policy: &'a ContentPolicy,
}

impl<'a> SqliteAuthorRepository<'a> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'a Connection, policy: &'a ContentPolicy) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[("authors", AUTHOR_COLUMNS)])?;
        Ok(Self { conn, policy })
    }

    fn begin_write(&self) -> RepoResult<Transaction<'a>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate(self.policy)?;

        let tx = self.begin_write()?;
        let existing = select_author_by_name(&tx, &author.name)?;
        ensure_author_name_available(author.id, existing.as_ref())?;

        tx.execute(
            "INSERT INTO authors (uuid, name, phone_number) VALUES (?1, ?2, ?3);",
            params![
                author.id.to_string(),
                author.name.as_str(),
                author.phone_number.as_str(),
            ],
        )
        .map_err(map_author_write_error)?;
        tx.commit()?;

        info!(
            "event=author_create module=repo status=ok author_id={}",
            author.id
        );
        Ok(author.id)
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate(self.policy)?;

        let tx = self.begin_write()?;
        let existing = select_author_by_name(&tx, &author.name)?;
        ensure_author_name_available(author.id, existing.as_ref())?;

        let changed = tx
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?3;",
                params![
                    author.name.as_str(),
                    author.phone_number.as_str(),
                    author.id.to_string(),
                ],
            )
            .map_err(map_author_write_error)?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(author.id));
        }
        tx.commit()?;

        info!(
            "event=author_update module=repo status=ok author_id={}",
            author.id
        );
        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let row = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(read_author_columns(row)),
            )
            .optional()?;
        row.map(|columns| columns.and_then(author_from_columns))
            .transpose()
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        select_author_by_name(self.conn, name)
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY name ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(author_from_columns(read_author_columns(row)?)?);
        }

        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(id));
        }

        info!("event=author_delete module=repo status=ok author_id={id}");
        Ok(())
    }
}

fn select_author_by_name(conn: &Connection, name: &str) -> RepoResult<Option<Author>> {
    let row = conn
        .query_row(
            &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"),
            [name],
            |row| Ok(read_author_columns(row)),
        )
        .optional()?;
    row.map(|columns| columns.and_then(author_from_columns))
        .transpose()
}

struct AuthorColumns {
    uuid: String,
    name: String,
    phone_number: String,
}

fn read_author_columns(row: &Row<'_>) -> RepoResult<AuthorColumns> {
    Ok(AuthorColumns {
        uuid: row.get("uuid")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
    })
}

/// Rebuilds a stored author.
///
/// Only policy-independent structure is checked here; content rules gate
/// writes, so rows written under an older policy stay readable.
fn author_from_columns(columns: AuthorColumns) -> RepoResult<Author> {
    let id = parse_uuid(&columns.uuid, "authors.uuid")?;
    if columns.name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank name for author {id} in authors.name"
        )));
    }
    Ok(Author {
        id,
        name: columns.name,
        phone_number: columns.phone_number,
    })
}

fn map_author_write_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(ConstraintKind::Unique) => {
            warn!("event=author_write module=repo status=rejected reason=unique_name_constraint");
            RepoError::Invalid(InvalidValue::DuplicateAuthorName)
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::map_author_write_error;
    use crate::db::open_db_in_memory;
    use crate::model::invalid::InvalidValue;
    use crate::repo::RepoError;

    #[test]
    fn unique_constraint_maps_to_duplicate_name() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO authors (uuid, name, phone_number) VALUES ('a', 'Jane', '5551234567');",
            [],
        )
        .unwrap();
        let err = conn
            .execute(
                "INSERT INTO authors (uuid, name, phone_number) VALUES ('b', 'Jane', '5551234567');",
                [],
            )
            .unwrap_err();

        assert!(matches!(
            map_author_write_error(err),
            RepoError::Invalid(InvalidValue::DuplicateAuthorName)
        ));
    }

    #[test]
    fn primary_key_collision_is_not_a_name_conflict() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO authors (uuid, name, phone_number) VALUES ('a', 'Jane', '5551234567');",
            [],
        )
        .unwrap();
        let err = conn
            .execute(
                "INSERT INTO authors (uuid, name, phone_number) VALUES ('a', 'John', '5551234567');",
                [],
            )
            .unwrap_err();

        assert!(matches!(map_author_write_error(err), RepoError::Db(_)));
    }
}
