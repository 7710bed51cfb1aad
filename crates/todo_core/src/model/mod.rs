//! Domain model definitions.
//!
//! # Responsibility
//! - Define the canonical todo record and its companion value types.
//! - Centralize record-level validation shared by store and codec.
//!
//! # Invariants
//! - Only `completed` is mutable after construction.
//! - Record text is never blank.

pub mod todo;
