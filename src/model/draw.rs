//! Draw session models.

use crate::model::ledger::UserId;

/// Phases a single draw moves through.
///
/// `Failed` is reached from `Validating`, or from `Revealing` when the winner cannot be
/// announced. Either way the ledger is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Validating,
    Revealing,
    Committing,
    Done,
    Failed,
}

/// A room occupant who holds entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub user_id: UserId,
    /// Display name captured when the session was validated.
    pub name: String,
    pub entries: u32,
}

/// One intermediate frame of the animated reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinFrame<'a> {
    /// Zero-based frame index.
    pub step: usize,
    pub highlighted: &'a Candidate,
}

/// Result of a committed draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub winner: Candidate,
    /// Entries removed from the winner's holding at commit time.
    pub removed: u32,
}
