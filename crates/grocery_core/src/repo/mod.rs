//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the store.
//! - Isolate SQLite query details from store/state orchestration.

pub mod item_repo;
