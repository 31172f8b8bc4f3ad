//! Drawing domain model.
//!
//! # Responsibility
//! - Define the persisted record combining roster, assignments and draw time.
//! - Validate the structural invariants every storage path relies on.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another drawing.
//! - Slugs are non-empty and unique within one drawing.
//! - `assignments` maps every slug to some other participant's name, and
//!   every participant name is assigned exactly once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted drawing record.
pub type DrawingId = Uuid;

/// Mapping from participant slug to the assigned recipient's display name.
pub type AssignmentMap = BTreeMap<String, String>;

/// One registered gift-exchange participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name as entered by the organizer, trimmed.
    pub name: String,
    /// Opaque external-messaging address (phone number for WhatsApp links).
    pub contact: String,
    /// URL-safe lookup key, unique within one drawing.
    pub slug: String,
}

impl Participant {
    /// Creates a participant with a slug derived from the trimmed name.
    ///
    /// The derived slug is not checked for emptiness or collisions here;
    /// roster building owns that validation.
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        let slug = crate::slug::slugify(&name);
        Self {
            name,
            contact: contact.into(),
            slug,
        }
    }

    /// Creates a participant with a caller-chosen slug.
    ///
    /// Used when roster building has disambiguated a colliding slug.
    pub fn with_slug(
        name: impl Into<String>,
        contact: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            contact: contact.into(),
            slug: slug.into(),
        }
    }
}

/// Persisted unit of one completed draw.
///
/// Immutable once persisted: a new draw replaces the record wholesale, it is
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    /// Stable record ID used for organizer-facing lookup.
    pub uuid: DrawingId,
    /// Roster in registration order.
    pub participants: Vec<Participant>,
    /// Slug -> assigned recipient name.
    pub assignments: AssignmentMap,
    /// Draw completion time in Unix epoch milliseconds.
    pub drawn_at: i64,
}

/// Structural violations detected by `Drawing::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingValidationError {
    /// A participant's trimmed display name is empty.
    EmptyName { position: usize },
    /// A participant's slug is empty, so slug-based lookup cannot work.
    EmptySlug { name: String },
    /// Two participants share one slug; lookup would conflate them.
    DuplicateSlug { slug: String },
    /// A participant has no entry in the assignment map.
    MissingAssignment { slug: String },
    /// A participant is assigned their own name.
    SelfAssignment { slug: String },
    /// An assigned name does not belong to any participant, or a
    /// participant's name is assigned more than once.
    BrokenAssignmentCycle { name: String },
    /// The assignment map has a different number of entries than the roster.
    AssignmentCountMismatch { participants: usize, assignments: usize },
}

impl Display for DrawingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { position } => {
                write!(f, "participant at position {position} has an empty name")
            }
            Self::EmptySlug { name } => {
                write!(f, "participant `{name}` produced an empty slug")
            }
            Self::DuplicateSlug { slug } => {
                write!(f, "slug `{slug}` is used by more than one participant")
            }
            Self::MissingAssignment { slug } => {
                write!(f, "participant `{slug}` has no assignment")
            }
            Self::SelfAssignment { slug } => {
                write!(f, "participant `{slug}` is assigned to themselves")
            }
            Self::BrokenAssignmentCycle { name } => {
                write!(f, "name `{name}` is not assigned exactly once")
            }
            Self::AssignmentCountMismatch {
                participants,
                assignments,
            } => write!(
                f,
                "{assignments} assignments for {participants} participants"
            ),
        }
    }
}

impl Error for DrawingValidationError {}

impl Drawing {
    /// Assembles a drawing record with a fresh stable ID.
    pub fn new(participants: Vec<Participant>, assignments: AssignmentMap, drawn_at: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            participants,
            assignments,
            drawn_at,
        }
    }

    /// Checks every structural invariant the storage layer depends on.
    ///
    /// # Errors
    /// Returns the first violation found, in roster order.
    pub fn validate(&self) -> Result<(), DrawingValidationError> {
        let mut seen_slugs: Vec<&str> = Vec::with_capacity(self.participants.len());
        for (position, participant) in self.participants.iter().enumerate() {
            if participant.name.trim().is_empty() {
                return Err(DrawingValidationError::EmptyName { position });
            }
            if participant.slug.is_empty() {
                return Err(DrawingValidationError::EmptySlug {
                    name: participant.name.clone(),
                });
            }
            if seen_slugs.contains(&participant.slug.as_str()) {
                return Err(DrawingValidationError::DuplicateSlug {
                    slug: participant.slug.clone(),
                });
            }
            seen_slugs.push(participant.slug.as_str());
        }

        if self.assignments.len() != self.participants.len() {
            return Err(DrawingValidationError::AssignmentCountMismatch {
                participants: self.participants.len(),
                assignments: self.assignments.len(),
            });
        }

        for participant in &self.participants {
            let assigned = self.assignments.get(&participant.slug).ok_or_else(|| {
                DrawingValidationError::MissingAssignment {
                    slug: participant.slug.clone(),
                }
            })?;
            // Assigned values are display names, so among namesakes an entry
            // matching the giver's own name may point at the other holder of
            // that name. The per-entry check therefore only fires for names
            // registered once; the multiplicity count below pins the rest.
            let namesakes = self
                .participants
                .iter()
                .filter(|other| other.name == participant.name)
                .count();
            if *assigned == participant.name && namesakes == 1 {
                return Err(DrawingValidationError::SelfAssignment {
                    slug: participant.slug.clone(),
                });
            }
        }

        // Slug -> name must be a bijection onto roster names: each roster
        // name appears as an assigned value as often as it appears in the
        // roster (once, unless the organizer registered namesakes).
        for participant in &self.participants {
            let times_assigned = self
                .assignments
                .values()
                .filter(|name| **name == participant.name)
                .count();
            let times_registered = self
                .participants
                .iter()
                .filter(|other| other.name == participant.name)
                .count();
            if times_assigned != times_registered {
                return Err(DrawingValidationError::BrokenAssignmentCycle {
                    name: participant.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Looks up the assigned recipient name for one participant slug.
    pub fn assignment_for(&self, slug: &str) -> Option<&str> {
        self.assignments.get(slug).map(String::as_str)
    }
}
