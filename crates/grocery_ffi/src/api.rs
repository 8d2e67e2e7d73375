//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose list/add/toggle/delete as plain calls with envelope results.
//! - Resolve the database location once per process from configuration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in envelopes, never as panics or aborts.
//! - Toggle and delete of an unknown id succeed as no-ops.

use grocery_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, AppConfig, Filter,
    ItemRow, NewTodoItem, TodoItem, TodoStore,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Idempotent for the same pair; conflicting re-init returns an error.
/// - Returns an empty string on success, the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One list row as shown by the mobile shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowDto {
    pub id: i64,
    pub created_label: String,
    pub name: String,
    pub quantity_label: String,
    pub is_done: bool,
}

impl From<ItemRow> for TodoRowDto {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            created_label: row.created_label,
            name: row.name,
            quantity_label: row.quantity_label,
            is_done: row.is_done,
        }
    }
}

/// Snapshot response for list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Rows visible under the requested filter, newest first.
    pub items: Vec<TodoRowDto>,
    pub message: String,
}

/// Result envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Id of the created item for `todo_add`, otherwise the targeted id.
    pub item_id: Option<i64>,
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, item_id: Option<i64>) -> Self {
        Self {
            ok: true,
            item_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Reads the list under `filter` (`all` or `done`; anything else is rejected).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list(filter: String) -> TodoListResponse {
    let filter = match filter.parse::<Filter>() {
        Ok(filter) => filter,
        Err(err) => {
            return TodoListResponse {
                ok: false,
                items: Vec::new(),
                message: err,
            }
        }
    };

    match with_store(|store| Ok(store.snapshot())) {
        Ok(snapshot) => {
            let items: Vec<TodoRowDto> = snapshot
                .iter()
                .filter(|item| filter.matches(item))
                .map(|item| ItemRow::from_item(item).into())
                .collect();
            TodoListResponse {
                ok: true,
                message: format!("{} item(s).", items.len()),
                items,
            }
        }
        Err(err) => TodoListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Adds an item; blank name or quantity is refused without touching storage.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created item id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(name: String, quantity: String) -> TodoActionResponse {
    let (name, quantity) = (name.trim(), quantity.trim());
    if name.is_empty() || quantity.is_empty() {
        return TodoActionResponse::failure("Item name and quantity are required.");
    }

    let item = NewTodoItem::new(name, quantity);
    match with_store(|store| store.insert(&item).map_err(|err| err.to_string())) {
        Ok(created) => TodoActionResponse::success("Item added.", Some(created.id)),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Flips the completion flag of item `id`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids succeed with a no-op message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: i64) -> TodoActionResponse {
    let outcome = with_store(|store| {
        let Some(item) = store.get(id).map_err(|err| err.to_string())? else {
            return Ok(None);
        };
        let toggled = item.toggled();
        store.update(&toggled).map_err(|err| err.to_string())?;
        Ok(Some(toggled))
    });

    match outcome {
        Ok(Some(TodoItem { is_done: true, .. })) => {
            TodoActionResponse::success("Task done", Some(id))
        }
        Ok(Some(_)) => TodoActionResponse::success("Task not done", Some(id)),
        Ok(None) => no_op(id),
        Err(err) => TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    }
}

/// Deletes item `id`. Undo is a plain `todo_add` with the old name and quantity.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids succeed with a no-op message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: i64) -> TodoActionResponse {
    let outcome = with_store(|store| {
        let Some(item) = store.get(id).map_err(|err| err.to_string())? else {
            return Ok(false);
        };
        store.delete(&item).map_err(|err| err.to_string())
    });

    match outcome {
        Ok(true) => TodoActionResponse::success("Item deleted", Some(id)),
        Ok(false) => no_op(id),
        Err(err) => TodoActionResponse::failure(format!("todo_delete failed: {err}")),
    }
}

fn no_op(id: i64) -> TodoActionResponse {
    TodoActionResponse::success(format!("No item with id {id}; nothing changed."), Some(id))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| match AppConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=config_load module=ffi status=error error={err}");
                AppConfig::default().db_path
            }
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&TodoStore) -> Result<T, String>) -> Result<T, String> {
    let store =
        TodoStore::open(resolve_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    f(&store)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, todo_add, todo_delete, todo_list, todo_toggle, DB_PATH,
    };
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Pins this test process to a private database before any store call,
    /// so a user's default list is never touched.
    fn private_db_path() -> PathBuf {
        DB_PATH
            .get_or_init(|| {
                std::env::temp_dir().join(format!(
                    "{}.sqlite3",
                    unique_token(&format!("grocery-ffi-test-{}", std::process::id()))
                ))
            })
            .clone()
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn todo_add_refuses_blank_fields() {
        let response = todo_add("  ".to_string(), "2L".to_string());
        assert!(!response.ok);
        assert_eq!(response.item_id, None);
    }

    #[test]
    fn add_toggle_delete_lifecycle() {
        let db_path = private_db_path();
        assert_ne!(db_path, grocery_core::AppConfig::default().db_path);

        let name = unique_token("ffi-milk");
        let added = todo_add(format!(" {name} "), "2L".to_string());
        assert!(added.ok, "{}", added.message);
        let id = added.item_id.unwrap();

        let listed = todo_list("all".to_string());
        assert!(listed.ok, "{}", listed.message);
        let row = listed.items.iter().find(|row| row.id == id).unwrap();
        assert_eq!(row.name, name);
        assert_eq!(row.quantity_label, "Qty: 2L");

        let toggled = todo_toggle(id);
        assert_eq!(toggled.message, "Task done");
        let done = todo_list("DONE".to_string());
        assert!(done.items.iter().any(|row| row.id == id));
        assert!(done.items.iter().all(|row| row.is_done));

        let deleted = todo_delete(id);
        assert_eq!(deleted.message, "Item deleted");
        assert!(!todo_list("all".to_string())
            .items
            .iter()
            .any(|row| row.id == id));

        let again = todo_delete(id);
        assert!(again.ok);
        assert!(again.message.contains("nothing changed"));

        let _ = std::fs::remove_file(db_path);
    }

    #[test]
    fn todo_list_rejects_unknown_filter() {
        let response = todo_list("pending".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("pending"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
