//! Headless list screen: filter, add dialog, notifications and row models.
//!
//! # Responsibility
//! - Hold the transient UI state that is never persisted.
//! - Translate user actions into view model intents.
//! - Produce render-ready rows for any frontend (terminal, mobile shell).
//!
//! # Invariants
//! - Filtering is client-side over the live snapshot; the store is unaware.
//! - At most one notification is pending; a new one replaces the old one.
//! - Dismissing a notification never cancels the mutation that raised it.
//! - Undo re-adds name and quantity as a fresh item; id, timestamp and
//!   completion state of the deleted item are not restored.

use crate::model::item::TodoItem;
use crate::viewmodel::TodoViewModel;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const SCREEN_TITLE: &str = "Grocery List";
pub const SCREEN_SUBTITLE: &str = "Click button if you done your task";
pub const DIALOG_TITLE: &str = "Add Grocery Item";
pub const NAME_FIELD_LABEL: &str = "Item Name";
pub const QUANTITY_FIELD_LABEL: &str = "Quantity / Weight";

pub const TOAST_TASK_DONE: &str = "Task done";
pub const TOAST_TASK_NOT_DONE: &str = "Task not done";
pub const TOAST_ITEM_DELETED: &str = "Item deleted";
pub const UNDO_ACTION_LABEL: &str = "Undo";

const CREATED_AT_FORMAT: &str = "%I:%M %p, %d/%m/%y";
const SHORT_NOTIFICATION: Duration = Duration::from_secs(4);

/// Completion filter applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Done,
}

impl Filter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Task",
            Self::Done => "Done Task",
        }
    }

    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Done => item.is_done,
        }
    }

    /// Returns the visible subset, keeping snapshot order.
    pub fn apply(self, items: &[TodoItem]) -> Vec<TodoItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown filter `{other}`; expected all|done")),
        }
    }
}

/// Modal form for entering a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDialog {
    open: bool,
    pub name: String,
    pub quantity: String,
}

impl AddDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the dialog with empty fields.
    pub fn open(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Submit is enabled only when both trimmed fields are non-empty.
    pub fn can_submit(&self) -> bool {
        self.open && !self.name.trim().is_empty() && !self.quantity.trim().is_empty()
    }

    /// Closes the dialog and yields the trimmed pair, or stays open on blank input.
    pub fn submit(&mut self) -> Option<(String, String)> {
        if !self.can_submit() {
            return None;
        }
        let entry = (
            self.name.trim().to_string(),
            self.quantity.trim().to_string(),
        );
        *self = Self::default();
        Some(entry)
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

/// Action offered by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarAction {
    Undo,
}

impl SnackbarAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Undo => UNDO_ACTION_LABEL,
        }
    }
}

/// Transient notification shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub message: &'static str,
    pub action: Option<SnackbarAction>,
    shown_at: Instant,
    deleted: Option<TodoItem>,
}

impl Snackbar {
    fn status(message: &'static str, now: Instant) -> Self {
        Self {
            message,
            action: None,
            shown_at: now,
            deleted: None,
        }
    }

    fn undoable_delete(item: TodoItem, now: Instant) -> Self {
        Self {
            message: TOAST_ITEM_DELETED,
            action: Some(SnackbarAction::Undo),
            shown_at: now,
            deleted: Some(item),
        }
    }

    /// Plain status messages time out; notifications with an action stay
    /// until dismissed or replaced.
    pub fn timeout(&self) -> Option<Duration> {
        match self.action {
            None => Some(SHORT_NOTIFICATION),
            Some(_) => None,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.timeout()
            .is_some_and(|timeout| now.saturating_duration_since(self.shown_at) >= timeout)
    }
}

/// Render model for one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub id: i64,
    /// Local time, e.g. `09:05 PM, 14/02/25`.
    pub created_label: String,
    pub name: String,
    pub quantity_label: String,
    pub is_done: bool,
}

impl ItemRow {
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            created_label: format_created_at(item.created_at),
            name: item.name.clone(),
            quantity_label: format!("Qty: {}", item.quantity),
            is_done: item.is_done,
        }
    }
}

/// Formats epoch milliseconds as `hh:mm AM, dd/MM/yy` in local time.
pub fn format_created_at(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|time| time.format(CREATED_AT_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Screen state bound to a view model.
pub struct ListScreen {
    view_model: TodoViewModel,
    filter: Filter,
    dialog: AddDialog,
    snackbar: Option<Snackbar>,
}

impl ListScreen {
    pub fn new(view_model: TodoViewModel) -> Self {
        Self {
            view_model,
            filter: Filter::default(),
            dialog: AddDialog::default(),
            snackbar: None,
        }
    }

    pub fn view_model(&self) -> &TodoViewModel {
        &self.view_model
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn dialog(&self) -> &AddDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut AddDialog {
        &mut self.dialog
    }

    pub fn open_add_dialog(&mut self) {
        self.dialog.open();
    }

    pub fn cancel_add_dialog(&mut self) {
        self.dialog.cancel();
    }

    /// Submits the dialog. Returns `false` and keeps it open on blank input.
    pub fn submit_add_dialog(&mut self) -> bool {
        match self.dialog.submit() {
            Some((name, quantity)) => {
                self.view_model.add_todo(&name, &quantity);
                true
            }
            None => false,
        }
    }

    /// Flips completion and announces the new state.
    pub fn toggle(&mut self, item: &TodoItem) {
        self.view_model.toggle_done(item);
        let message = if item.is_done {
            TOAST_TASK_NOT_DONE
        } else {
            TOAST_TASK_DONE
        };
        self.snackbar = Some(Snackbar::status(message, Instant::now()));
    }

    /// Deletes the item and offers undo until the notification goes away.
    pub fn delete(&mut self, item: &TodoItem) {
        self.view_model.delete_todo(item);
        self.snackbar = Some(Snackbar::undoable_delete(item.clone(), Instant::now()));
    }

    /// Performs the pending notification action. Returns whether an item was re-added.
    pub fn undo(&mut self) -> bool {
        let Some(deleted) = self
            .snackbar
            .take()
            .and_then(|snackbar| snackbar.deleted)
        else {
            return false;
        };
        self.view_model.add_todo(&deleted.name, &deleted.quantity);
        true
    }

    pub fn snackbar(&self) -> Option<&Snackbar> {
        self.snackbar.as_ref()
    }

    pub fn dismiss_snackbar(&mut self) {
        self.snackbar = None;
    }

    /// Drops a status notification whose display time has elapsed.
    pub fn expire_snackbar(&mut self, now: Instant) {
        if self
            .snackbar
            .as_ref()
            .is_some_and(|snackbar| snackbar.is_expired(now))
        {
            self.snackbar = None;
        }
    }

    /// Items visible under the current filter.
    pub fn visible_items(&self, items: &[TodoItem]) -> Vec<TodoItem> {
        self.filter.apply(items)
    }

    pub fn rows(&self, items: &[TodoItem]) -> Vec<ItemRow> {
        items
            .iter()
            .filter(|item| self.filter.matches(item))
            .map(ItemRow::from_item)
            .collect()
    }
}
