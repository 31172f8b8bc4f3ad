//! Domain model for gift-exchange drawings.
//!
//! # Responsibility
//! - Define the persisted record shapes used by core business logic.
//!
//! # Invariants
//! - Every drawing is identified by a stable `DrawingId`.
//! - Records are immutable once persisted; replacement is a new record.

pub mod drawing;

pub use drawing::{AssignmentMap, Drawing, DrawingId, DrawingValidationError, Participant};
