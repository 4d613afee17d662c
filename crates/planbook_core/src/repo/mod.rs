//! Data store contracts and implementations.
//!
//! # Responsibility
//! - Define the list/get/create/update/delete contract per record kind.
//! - Provide an owned, versioned in-memory collection implementing it.
//! - Translate hosted record API rows at the boundary (`wire`).
//!
//! # Invariants
//! - Write paths validate records before they enter a collection.
//! - Ids are assigned by the store and never reused.

pub mod memory_repo;
pub mod record_repo;
pub mod wire;
