//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the database row
//! - The versioned entity built from that row
//! - A `Deserialize` overrides DTO applied when drafting a new entity

pub mod document;
