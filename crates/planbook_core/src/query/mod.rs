//! Collection query engine.
//!
//! # Responsibility
//! - Derive filtered, ordered views over in-memory record collections.
//! - Compose dashboard projections from the same filters and orderings.
//!
//! # Invariants
//! - Every function here is pure: inputs are borrowed, never mutated, and
//!   outputs borrow from the input slice.
//! - Sorting is stable; equal keys keep input order.
//! - "Now" is always an explicit argument; calendar days are evaluated in
//!   the timezone of that argument.

pub mod dashboard;
pub mod meetings;
pub mod notes;
pub mod tasks;

mod matching;
