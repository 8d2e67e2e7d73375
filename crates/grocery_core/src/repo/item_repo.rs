//! Item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/list over the `todo_table` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Field contents are stored as given; only `NOT NULL` is enforced.
//! - A read fails only when a column cannot be decoded into an item.
//! - Update and delete of an absent id are no-ops, not errors.
//! - `created_at` is written once by insert and never by update.

use crate::db::DbError;
use crate::model::item::{ItemId, NewTodoItem, TodoItem};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    quantity,
    created_at,
    is_done
FROM todo_table";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
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

/// Repository interface for grocery item CRUD.
pub trait TodoRepository {
    /// Persists a new item and returns the assigned id.
    fn insert_item(&self, item: &NewTodoItem) -> RepoResult<ItemId>;
    /// Replaces the stored record with the same id. Returns whether a row changed.
    fn update_item(&self, item: &TodoItem) -> RepoResult<bool>;
    /// Removes the stored record with the same id. Returns whether a row changed.
    fn delete_item(&self, item: &TodoItem) -> RepoResult<bool>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<TodoItem>>;
    /// Full collection, newest first.
    fn list_items(&self) -> RepoResult<Vec<TodoItem>>;
}

/// SQLite-backed item repository borrowing a migrated connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn insert_item(&self, item: &NewTodoItem) -> RepoResult<ItemId> {
        self.conn.execute(
            "INSERT INTO todo_table (
                name,
                quantity,
                created_at,
                is_done
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                item.name.as_str(),
                item.quantity.as_str(),
                item.created_at,
                bool_to_int(item.is_done),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_item(&self, item: &TodoItem) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE todo_table
             SET
                name = ?1,
                quantity = ?2,
                is_done = ?3
             WHERE id = ?4;",
            params![
                item.name.as_str(),
                item.quantity.as_str(),
                bool_to_int(item.is_done),
                item.id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete_item(&self, item: &TodoItem) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_table WHERE id = ?1;", [item.id])?;
        Ok(changed > 0)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt.query_row([id], read_raw_row).optional()?;
        row.map(RawItemRow::into_item).transpose()
    }

    fn list_items(&self) -> RepoResult<Vec<TodoItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(read_raw_row(row)?.into_item()?);
        }

        Ok(items)
    }
}

struct RawItemRow {
    id: ItemId,
    name: String,
    quantity: String,
    created_at: i64,
    is_done: i64,
}

impl RawItemRow {
    fn into_item(self) -> RepoResult<TodoItem> {
        let is_done = match self.is_done {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid is_done value `{other}` in todo_table.is_done (id={})",
                    self.id
                )));
            }
        };

        Ok(TodoItem {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            created_at: self.created_at,
            is_done,
        })
    }
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawItemRow> {
    Ok(RawItemRow {
        id: row.get("id")?,
        name: row.get("name")?,
        quantity: row.get("quantity")?,
        created_at: row.get("created_at")?,
        is_done: row.get("is_done")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
