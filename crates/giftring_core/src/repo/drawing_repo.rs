//! Drawing repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist complete drawing records and the slug lookup index.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Drawing::validate()` before SQL mutations.
//! - A record and its participant rows are written in one transaction;
//!   readers never observe a partially written drawing.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::drawing::{AssignmentMap, Drawing, DrawingId, DrawingValidationError, Participant};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for drawing persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DrawingValidationError),
    Db(DbError),
    NotFound(DrawingId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "drawing not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted drawing data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DrawingValidationError> for RepoError {
    fn from(value: DrawingValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for drawing records.
///
/// Lookups answer `Ok(None)` for unknown ids/slugs; errors are reserved for
/// storage failures and corrupted persisted state.
pub trait DrawingRepository {
    fn save_drawing(&self, drawing: &Drawing) -> RepoResult<DrawingId>;
    fn get_drawing(&self, id: DrawingId) -> RepoResult<Option<Drawing>>;
    fn get_drawing_by_slug(&self, slug: &str) -> RepoResult<Option<Drawing>>;
    fn assignment_for_slug(&self, slug: &str) -> RepoResult<Option<String>>;
    fn delete_drawing(&self, id: DrawingId) -> RepoResult<()>;
}

/// SQLite-backed drawing repository.
pub struct SqliteDrawingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDrawingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_participants(&self, id: DrawingId) -> RepoResult<Vec<(Participant, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT slug, name, contact, assigned_name
             FROM participants
             WHERE drawing_uuid = ?1
             ORDER BY position ASC;",
        )?;

        let mut rows = stmt.query(params![id.to_string()])?;
        let mut loaded = Vec::new();
        while let Some(row) = rows.next()? {
            let participant = Participant {
                slug: row.get("slug")?,
                name: row.get("name")?,
                contact: row.get("contact")?,
            };
            let assigned_name: String = row.get("assigned_name")?;
            loaded.push((participant, assigned_name));
        }

        Ok(loaded)
    }

    fn load_drawing(&self, id: DrawingId, drawn_at: i64) -> RepoResult<Drawing> {
        let rows = self.load_participants(id)?;

        let mut participants = Vec::with_capacity(rows.len());
        let mut assignments = AssignmentMap::new();
        for (participant, assigned_name) in rows {
            assignments.insert(participant.slug.clone(), assigned_name);
            participants.push(participant);
        }

        let drawing = Drawing {
            uuid: id,
            participants,
            assignments,
            drawn_at,
        };
        drawing.validate().map_err(|err| {
            RepoError::InvalidData(format!("drawing {id} failed validation on read: {err}"))
        })?;
        Ok(drawing)
    }
}

impl DrawingRepository for SqliteDrawingRepository<'_> {
    fn save_drawing(&self, drawing: &Drawing) -> RepoResult<DrawingId> {
        drawing.validate()?;

        // unchecked_transaction: the repository borrows the connection
        // immutably and core guarantees at most one write in flight.
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO drawings (uuid, drawn_at) VALUES (?1, ?2);",
            params![drawing.uuid.to_string(), drawing.drawn_at],
        )?;

        for (position, participant) in drawing.participants.iter().enumerate() {
            // validate() guarantees the entry exists; the lookup stays
            // fallible so a future invariant change cannot silently write
            // bad rows.
            let assigned_name = drawing.assignments.get(&participant.slug).ok_or_else(|| {
                RepoError::Validation(DrawingValidationError::MissingAssignment {
                    slug: participant.slug.clone(),
                })
            })?;

            tx.execute(
                "INSERT INTO participants (
                    drawing_uuid,
                    position,
                    slug,
                    name,
                    contact,
                    assigned_name
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    drawing.uuid.to_string(),
                    position as i64,
                    participant.slug.as_str(),
                    participant.name.as_str(),
                    participant.contact.as_str(),
                    assigned_name.as_str(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(drawing.uuid)
    }

    fn get_drawing(&self, id: DrawingId) -> RepoResult<Option<Drawing>> {
        let drawn_at = self
            .conn
            .query_row(
                "SELECT drawn_at FROM drawings WHERE uuid = ?1;",
                params![id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        match drawn_at {
            Some(drawn_at) => Ok(Some(self.load_drawing(id, drawn_at)?)),
            None => Ok(None),
        }
    }

    fn get_drawing_by_slug(&self, slug: &str) -> RepoResult<Option<Drawing>> {
        // A slug can appear in several drawings over time; the most recent
        // draw wins, matching replace-not-patch record semantics.
        let found = self
            .conn
            .query_row(
                "SELECT d.uuid, d.drawn_at
                 FROM drawings d
                 JOIN participants p ON p.drawing_uuid = d.uuid
                 WHERE p.slug = ?1
                 ORDER BY d.drawn_at DESC, d.uuid ASC
                 LIMIT 1;",
                params![slug],
                |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                },
            )
            .optional()?;

        let Some((uuid_text, drawn_at)) = found else {
            return Ok(None);
        };

        let id = Uuid::parse_str(&uuid_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in drawings.uuid"))
        })?;
        Ok(Some(self.load_drawing(id, drawn_at)?))
    }

    fn assignment_for_slug(&self, slug: &str) -> RepoResult<Option<String>> {
        let drawing = self.get_drawing_by_slug(slug)?;
        Ok(drawing.and_then(|drawing| drawing.assignment_for(slug).map(str::to_string)))
    }

    fn delete_drawing(&self, id: DrawingId) -> RepoResult<()> {
        // Participant rows go with the drawing via ON DELETE CASCADE.
        let changed = self.conn.execute(
            "DELETE FROM drawings WHERE uuid = ?1;",
            params![id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}
