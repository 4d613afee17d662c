//! Domain model for task/note/meeting records.
//!
//! # Responsibility
//! - Define the typed records consumed by the query engine and data stores.
//! - Own per-record validation and normalization rules.
//!
//! # Invariants
//! - Every record is identified by a stable positive `RecordId`.
//! - Optional fields carry explicit defaults; fallbacks are never resolved in
//!   view logic.
//!
//! # See also
//! - repo::wire for the hosted record API row shape.

pub mod meeting;
pub mod note;
pub mod record;
pub mod task;
