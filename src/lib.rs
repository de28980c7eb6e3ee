//! Tournament engine: league, groups and knockout formats with tie-break ranking,
//! bracket progression, and table assignment. Library with models and business logic.

pub mod csv_io;
pub mod logic;
pub mod models;
pub mod suggest;

pub use logic::{
    assign_tables, determine_advantage, generate_knockout_round, generate_round_robin,
    group_standings, move_match_to_table, overall_standings, parse_score, podium, rank,
    record_result, start_tournament, table_occupancy, tables_in_use_by_round, Podium, TableSlot,
};
pub use models::{
    AdvancementWarning, ErrorKind, IdGenerator, KnockoutLogic, Match, MatchId, Participant, MAX_SCORE,
    PlayerId, RandomIds, Record, RosterPlayer, SequentialIds, Stage, Team, TeamId, TieBreakRule,
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentSettings,
    TournamentState,
};
