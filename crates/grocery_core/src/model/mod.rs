//! Domain model for the grocery list.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `ItemId`.
//! - Deletion is a hard delete; undo re-creates a fresh item.

pub mod item;
