//! Use-case services wrapping the draw engine and persistence gateway.

pub mod draw_service;

pub use draw_service::{
    DrawService, DrawServiceError, DrawServiceResult, ParticipantEntry, RosterError,
};
