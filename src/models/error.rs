//! Engine errors and non-fatal seeding warnings.

use crate::models::fixture::MatchId;
use crate::models::team::{PlayerId, TeamId};
use thiserror::Error;

/// Broad class of a `TournamentError`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input itself is invalid.
    Validation,
    /// The tournament or match is not in a state that allows the operation.
    IllegalState,
}

/// Errors that can occur during tournament operations.
/// A failed operation never touches the caller's snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Need at least {required} teams to start (have {actual})")]
    NotEnoughTeams { required: usize, actual: usize },

    #[error("Group {group} needs at least 2 teams (has {actual})")]
    NotEnoughTeamsInGroup { group: String, actual: usize },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("A team named \"{0}\" already exists in this tournament")]
    DuplicateTeamName(String),

    #[error("Roster is full ({max} players)")]
    RosterFull { max: usize },

    #[error("Shirt number {0} is already taken on this team")]
    DuplicatePlayerNumber(u32),

    #[error("Invalid score: {0:?}")]
    InvalidScore(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Table {table} is outside 1..={max_tables}")]
    TableOutOfRange { table: u32, max_tables: u32 },

    #[error("Match not found")]
    MatchNotFound(MatchId),

    #[error("Team not found")]
    TeamNotFound(TeamId),

    #[error("Player not found")]
    PlayerNotFound(PlayerId),

    #[error("The tournament has already started")]
    AlreadyStarted,

    #[error("Both sides of this match are not decided yet")]
    UndecidedParticipants(MatchId),

    #[error("A knockout match cannot end level without a tie advantage")]
    UnresolvedTie(MatchId),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            NotEnoughTeams { .. }
            | NotEnoughTeamsInGroup { .. }
            | EmptyName
            | DuplicateTeamName(_)
            | RosterFull { .. }
            | DuplicatePlayerNumber(_)
            | InvalidScore(_)
            | InvalidSettings(_)
            | TableOutOfRange { .. } => ErrorKind::Validation,
            MatchNotFound(_)
            | TeamNotFound(_)
            | PlayerNotFound(_)
            | AlreadyStarted
            | UndecidedParticipants(_)
            | UnresolvedTie(_) => ErrorKind::IllegalState,
        }
    }
}

/// Seeding fell back to a best-effort order. Logged, never returned as an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdvancementWarning {
    /// No team advanced from the group stage.
    NoAdvancingTeams,
    /// A trailing group had no partner group for cross pairing; its teams entered unpaired.
    UnpairedGroup(String),
    /// Two crossed groups sent different numbers of teams; missing slots became TBD.
    ShortGroupPair { first: String, second: String },
    /// Odd number of advancing teams; the middle seed gets no partner.
    OddAdvancingCount(usize),
}
