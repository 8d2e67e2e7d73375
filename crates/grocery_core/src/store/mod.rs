//! Persistent item store with a live snapshot of the full list.
//!
//! # Responsibility
//! - Own the single SQLite connection and serialize every write through it.
//! - Republish the full newest-first list after each effective mutation.
//!
//! # Invariants
//! - Published snapshots are always ordered `created_at DESC, id DESC`.
//! - A snapshot is published while the write lock is still held, so
//!   subscribers observe mutations in commit order.
//! - No-op update/delete (absent id) publishes nothing.
//! - A committed write is reported as committed even when re-reading the
//!   table fails; the snapshot is then patched in memory instead.

mod live;

pub use live::{LiveList, Snapshot};

use crate::db::{open_db, open_db_in_memory};
use crate::model::item::{ItemId, NewTodoItem, TodoItem};
use crate::repo::item_repo::{RepoResult, SqliteTodoRepository, TodoRepository};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Item store shared between the state layer and hosts.
pub struct TodoStore {
    conn: Mutex<Connection>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl TodoStore {
    /// Opens the store on a database file, creating and migrating it as needed.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection and loads the initial snapshot.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        let items = SqliteTodoRepository::new(&conn).list_items()?;
        info!(
            "event=store_open module=store status=ok item_count={}",
            items.len()
        );
        let (snapshot_tx, _) = watch::channel(Arc::new(items));
        Ok(Self {
            conn: Mutex::new(conn),
            snapshot_tx,
        })
    }

    /// Inserts a new item and returns it with its assigned id.
    pub fn insert(&self, item: &NewTodoItem) -> RepoResult<TodoItem> {
        let conn = self.lock_conn();
        let repo = SqliteTodoRepository::new(&conn);
        let id = repo.insert_item(item)?;
        let created = item.clone().into_item(id);
        self.publish(&repo, "insert", |items| {
            let at = items
                .iter()
                .position(|existing| {
                    (existing.created_at, existing.id) < (created.created_at, created.id)
                })
                .unwrap_or(items.len());
            items.insert(at, created.clone());
        });
        debug!("event=item_insert module=store status=ok id={id}");
        Ok(created)
    }

    /// Replaces the record matching `item.id`. Absent records are left alone.
    pub fn update(&self, item: &TodoItem) -> RepoResult<bool> {
        let conn = self.lock_conn();
        let repo = SqliteTodoRepository::new(&conn);
        let changed = repo.update_item(item)?;
        if changed {
            self.publish(&repo, "update", |items| {
                if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
                    existing.name = item.name.clone();
                    existing.quantity = item.quantity.clone();
                    existing.is_done = item.is_done;
                }
            });
        }
        debug!(
            "event=item_update module=store status=ok id={} changed={changed}",
            item.id
        );
        Ok(changed)
    }

    /// Removes the record matching `item.id`. Absent records are left alone.
    pub fn delete(&self, item: &TodoItem) -> RepoResult<bool> {
        let conn = self.lock_conn();
        let repo = SqliteTodoRepository::new(&conn);
        let changed = repo.delete_item(item)?;
        if changed {
            self.publish(&repo, "delete", |items| {
                items.retain(|existing| existing.id != item.id);
            });
        }
        debug!(
            "event=item_delete module=store status=ok id={} changed={changed}",
            item.id
        );
        Ok(changed)
    }

    pub fn get(&self, id: ItemId) -> RepoResult<Option<TodoItem>> {
        let conn = self.lock_conn();
        SqliteTodoRepository::new(&conn).get_item(id)
    }

    /// Latest published list, newest first.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to the live list. The current snapshot is readable at once.
    pub fn subscribe(&self) -> LiveList {
        LiveList::new(self.snapshot_tx.subscribe())
    }

    /// Republishes the table, or applies `patch` to the last snapshot when
    /// the table cannot be read back.
    fn publish(
        &self,
        repo: &SqliteTodoRepository<'_>,
        cause: &'static str,
        patch: impl FnOnce(&mut Vec<TodoItem>),
    ) {
        match repo.list_items() {
            Ok(items) => {
                self.snapshot_tx.send_replace(Arc::new(items));
            }
            Err(err) => {
                warn!(
                    "event=snapshot_publish module=store status=error cause={cause} fallback=patch error={err}"
                );
                self.snapshot_tx
                    .send_modify(|snapshot| patch(Arc::make_mut(snapshot)));
            }
        }
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite itself consistent.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
