//! Data structures for the tournament: teams, matches, tournament document.

mod error;
mod fixture;
mod ids;
mod team;
mod tournament;

pub use error::{AdvancementWarning, ErrorKind, TournamentError};
pub use fixture::{Match, MatchId, Participant, Stage, MAX_SCORE};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use team::{Percentage, PlayerId, Record, RosterPlayer, Team, TeamId, MAX_ROSTER_SIZE};
pub use tournament::{
    KnockoutLogic, TieBreakRule, Tournament, TournamentFormat, TournamentId, TournamentSettings,
    TournamentState,
};
