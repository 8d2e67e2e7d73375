//! Flutter-facing bridge over `grocery_core`.

pub mod api;
