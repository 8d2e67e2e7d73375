//! Core of the grocery list: storage, live list, state layer and screen model.
//! Frontends (terminal, mobile bridge) only render what this crate exposes.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod screen;
pub mod store;
pub mod viewmodel;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{ItemId, NewTodoItem, TodoItem};
pub use repo::item_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use screen::{AddDialog, Filter, ItemRow, ListScreen, Snackbar, SnackbarAction};
pub use store::{LiveList, Snapshot, TodoStore};
pub use viewmodel::TodoViewModel;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
