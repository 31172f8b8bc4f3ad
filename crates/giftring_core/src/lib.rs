//! Core domain logic for giftring, a Secret-Santa drawing service.
//! This crate is the single source of truth for draw correctness invariants.

pub mod db;
pub mod draw;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod share;
pub mod slug;

pub use draw::{draw, DrawError, DrawResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::drawing::{
    AssignmentMap, Drawing, DrawingId, DrawingValidationError, Participant,
};
pub use repo::drawing_repo::{
    DrawingRepository, RepoError, RepoResult, SqliteDrawingRepository,
};
pub use service::draw_service::{
    DrawService, DrawServiceError, DrawServiceResult, ParticipantEntry, RosterError,
};
pub use share::{reveal_message, reveal_url, whatsapp_link};
pub use slug::{slugify, unique_slug};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
