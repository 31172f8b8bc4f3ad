//! Gift-exchange draw engine.
//!
//! # Responsibility
//! - Compute one complete assignment map for a roster of participants.
//! - Guarantee the no-self-assignment and single-cycle invariants.
//!
//! # Invariants
//! - Exactly one assignment per participant slug.
//! - No participant is ever assigned their own name.
//! - For rosters of three or more, the assignment graph is one cycle
//!   covering everybody: rotation offsets are restricted to values coprime
//!   with the roster size, which is necessary and sufficient for a rotation
//!   to form a single n-cycle.

use crate::model::drawing::AssignmentMap;
use crate::model::Participant;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on construction retries after a failed self-assignment
/// guard. The coprime-offset construction cannot trip the guard, so the
/// bound exists only to keep the retry loop provably finite.
const MAX_DRAW_ATTEMPTS: u32 = 8;

pub type DrawResult<T> = Result<T, DrawError>;

/// Failure modes of the draw engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// A draw needs at least two participants.
    InsufficientParticipants { found: usize },
    /// Every construction attempt failed the self-assignment guard.
    RetriesExhausted { attempts: u32 },
}

impl Display for DrawError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientParticipants { found } => {
                write!(f, "a draw needs at least 2 participants, got {found}")
            }
            Self::RetriesExhausted { attempts } => {
                write!(f, "draw construction failed after {attempts} attempts")
            }
        }
    }
}

impl Error for DrawError {}

/// Computes a complete assignment map for the given roster.
///
/// The randomness source is an explicit parameter so callers can run the
/// engine against a seeded generator in tests and `rand::thread_rng()` in
/// production.
///
/// # Contract
/// - Two participants: deterministic mutual swap (the only derangement).
/// - Three or more: circular rotation by a random offset drawn uniformly
///   from the offsets in `[1, n-1]` coprime with `n`, producing a single
///   n-cycle with no fixed points.
/// - Returns the full map or fails atomically; no partial output.
///
/// # Errors
/// - `DrawError::InsufficientParticipants` when fewer than two entries.
/// - `DrawError::RetriesExhausted` if the defensive self-assignment guard
///   keeps failing (unreachable with the coprime construction).
pub fn draw<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> DrawResult<AssignmentMap> {
    let n = participants.len();
    if n < 2 {
        return Err(DrawError::InsufficientParticipants { found: n });
    }

    if n == 2 {
        let mut assignments = AssignmentMap::new();
        assignments.insert(participants[0].slug.clone(), participants[1].name.clone());
        assignments.insert(participants[1].slug.clone(), participants[0].name.clone());
        return Ok(assignments);
    }

    for _ in 0..MAX_DRAW_ATTEMPTS {
        let offset = random_coprime_offset(n, rng);

        // The self-assignment guard works on positions, not display names:
        // names may legitimately repeat across a roster of namesakes, while
        // an index can only map to itself when `offset % n == 0`, which the
        // sampling range already excludes.
        if offset % n == 0 {
            continue;
        }

        let mut assignments = AssignmentMap::new();
        for (index, participant) in participants.iter().enumerate() {
            let target = &participants[(index + offset) % n];
            assignments.insert(participant.slug.clone(), target.name.clone());
        }

        return Ok(assignments);
    }

    Err(DrawError::RetriesExhausted {
        attempts: MAX_DRAW_ATTEMPTS,
    })
}

/// Samples a rotation offset uniformly from `{k in [1, n-1] | gcd(k, n) == 1}`.
///
/// The set is never empty: `1` is coprime with every `n >= 2`.
fn random_coprime_offset<R: Rng + ?Sized>(n: usize, rng: &mut R) -> usize {
    let candidates: Vec<usize> = (1..n).filter(|offset| gcd(*offset, n) == 1).collect();
    candidates[rng.gen_range(0..candidates.len())]
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}
