//! Persistence gateway for drawing records.

pub mod drawing_repo;

pub use drawing_repo::{
    DrawingRepository, RepoError, RepoResult, SqliteDrawingRepository,
};
