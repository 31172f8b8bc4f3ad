//! Draw use-case service.
//!
//! # Responsibility
//! - Build validated rosters from raw organizer input.
//! - Run draws and persist the resulting record atomically.
//! - Serve the id- and slug-based read paths.
//!
//! # Invariants
//! - Service APIs never bypass engine or repository validation.
//! - A failed draw or save leaves no partial record behind.

use crate::draw::{draw, DrawError};
use crate::model::drawing::{Drawing, DrawingId, Participant};
use crate::repo::drawing_repo::{DrawingRepository, RepoError, RepoResult};
use crate::slug::{slugify, unique_slug};
use log::{error, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Raw participant input as collected by the organizer-facing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub name: String,
    pub contact: String,
}

impl ParticipantEntry {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }
}

/// Rejections raised while turning raw entries into a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// An entry's trimmed name is empty.
    EmptyName { position: usize },
    /// A name produced an empty slug (no Latin alphanumerics survive
    /// normalization), so slug-based lookup cannot address it.
    EmptySlug { name: String },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { position } => {
                write!(f, "entry at position {position} has an empty name")
            }
            Self::EmptySlug { name } => {
                write!(f, "name `{name}` yields no usable slug characters")
            }
        }
    }
}

impl Error for RosterError {}

pub type DrawServiceResult<T> = Result<T, DrawServiceError>;

/// Failures surfaced by the draw use-case.
#[derive(Debug)]
pub enum DrawServiceError {
    Roster(RosterError),
    Draw(DrawError),
    Repo(RepoError),
}

impl Display for DrawServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roster(err) => write!(f, "{err}"),
            Self::Draw(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DrawServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Roster(err) => Some(err),
            Self::Draw(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RosterError> for DrawServiceError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<DrawError> for DrawServiceError {
    fn from(value: DrawError) -> Self {
        Self::Draw(value)
    }
}

impl From<RepoError> for DrawServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper around the draw engine and a drawing repository.
pub struct DrawService<R: DrawingRepository> {
    repo: R,
}

impl<R: DrawingRepository> DrawService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds a validated roster from raw organizer entries.
    ///
    /// # Contract
    /// - Names are trimmed; empty names and empty slugs are rejected.
    /// - Colliding slugs are disambiguated with a counter suffix, so the
    ///   returned roster always has unique slugs.
    /// - Registration order is preserved.
    pub fn build_roster(&self, entries: &[ParticipantEntry]) -> Result<Vec<Participant>, RosterError> {
        let mut roster: Vec<Participant> = Vec::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(RosterError::EmptyName { position });
            }

            let base = slugify(name);
            if base.is_empty() {
                return Err(RosterError::EmptySlug {
                    name: name.to_string(),
                });
            }

            let slug = unique_slug(&base, roster.iter().map(|p| p.slug.as_str()));
            roster.push(Participant::with_slug(name, entry.contact.clone(), slug));
        }

        Ok(roster)
    }

    /// Runs a draw over the roster and persists the resulting record.
    ///
    /// The randomness source is explicit so tests can run the whole path
    /// against a seeded generator.
    ///
    /// # Contract
    /// - Returns the persisted record, timestamped with the current time in
    ///   epoch milliseconds and carrying a fresh `DrawingId`.
    /// - On any failure nothing is persisted.
    pub fn run_draw<G: Rng + ?Sized>(
        &self,
        participants: Vec<Participant>,
        rng: &mut G,
    ) -> DrawServiceResult<Drawing> {
        info!(
            "event=draw module=service status=start participants={}",
            participants.len()
        );

        let assignments = match draw(&participants, rng) {
            Ok(assignments) => assignments,
            Err(err) => {
                error!(
                    "event=draw module=service status=error participants={} error={err}",
                    participants.len()
                );
                return Err(err.into());
            }
        };

        let drawing = Drawing::new(participants, assignments, now_epoch_ms());
        self.repo.save_drawing(&drawing)?;

        info!(
            "event=draw module=service status=ok drawing={} participants={}",
            drawing.uuid,
            drawing.participants.len()
        );
        Ok(drawing)
    }

    /// Gets one drawing by stable record ID; `Ok(None)` when unknown.
    pub fn drawing(&self, id: DrawingId) -> RepoResult<Option<Drawing>> {
        self.repo.get_drawing(id)
    }

    /// Gets the most recent drawing containing the given participant slug.
    pub fn drawing_for_slug(&self, slug: &str) -> RepoResult<Option<Drawing>> {
        self.repo.get_drawing_by_slug(slug)
    }

    /// Reveals the assigned recipient name for one participant slug.
    pub fn reveal_for_slug(&self, slug: &str) -> RepoResult<Option<String>> {
        self.repo.assignment_for_slug(slug)
    }

    /// Removes a drawing record, e.g. when the organizer clears a round.
    pub fn clear_drawing(&self, id: DrawingId) -> RepoResult<()> {
        self.repo.delete_drawing(id)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
