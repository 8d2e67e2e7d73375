//! Grocery item domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the grocery list.
//! - Provide the blank-input check used by the state layer and dialogs.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `created_at` is set once at construction and never rewritten.
//! - Storage only enforces non-null fields; blank input is refused upstream.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned row identifier.
pub type ItemId = i64;

/// Persisted grocery/to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: ItemId,
    pub name: String,
    /// Free-text quantity or weight, e.g. `2L` or `1 loaf`.
    pub quantity: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub is_done: bool,
}

impl TodoItem {
    /// Returns a copy with the completion flag inverted.
    ///
    /// Every other field, `id` and `created_at` included, is carried over.
    pub fn toggled(&self) -> Self {
        Self {
            is_done: !self.is_done,
            ..self.clone()
        }
    }
}

/// Item payload for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoItem {
    pub name: String,
    pub quantity: String,
    pub created_at: i64,
    pub is_done: bool,
}

impl NewTodoItem {
    /// Creates a not-done item stamped with the current time.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self::with_timestamp(name, quantity, now_epoch_ms())
    }

    /// Creates a not-done item with a caller-provided creation time.
    pub fn with_timestamp(
        name: impl Into<String>,
        quantity: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            created_at,
            is_done: false,
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_item(self, id: ItemId) -> TodoItem {
        TodoItem {
            id,
            name: self.name,
            quantity: self.quantity,
            created_at: self.created_at,
            is_done: self.is_done,
        }
    }
}

/// Returns `true` when the value is empty after trimming whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{is_blank, NewTodoItem};

    #[test]
    fn new_item_starts_not_done() {
        let item = NewTodoItem::new("Milk", "2L");
        assert!(!item.is_done);
        assert!(item.created_at > 0);
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn toggled_only_flips_done_flag() {
        let item = NewTodoItem::with_timestamp("Bread", "1 loaf", 42).into_item(7);
        let flipped = item.toggled();
        assert!(flipped.is_done);
        assert_eq!(flipped.id, 7);
        assert_eq!(flipped.created_at, 42);
        assert_eq!(flipped.name, item.name);
        assert_eq!(flipped.quantity, item.quantity);
        assert_eq!(flipped.toggled(), item);
    }
}
