//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and query derivation into use-case APIs.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Derived views are recomputed from a fresh `list_all` on every call.

pub mod dashboard_service;
pub mod error;
pub mod meeting_service;
pub mod note_service;
pub mod task_service;
