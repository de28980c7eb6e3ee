//! Tournament engine: ranking, scheduling, brackets, tables, and stage progression.

mod advantage;
mod bracket;
mod podium;
mod progression;
mod ranking;
mod schedule;
mod setup;
mod tables;

pub use advantage::determine_advantage;
pub use bracket::{generate_knockout_round, seed_knockout, Seeding};
pub use podium::{group_standings, overall_standings, podium, Podium};
pub use progression::{parse_score, record_result};
pub use ranking::{compare_by_rules, compare_teams, compute_record, effective_rules, rank, recompute_records};
pub use schedule::generate_round_robin;
pub use setup::{group_label, start_tournament};
pub use tables::{assign_tables, move_match_to_table, table_occupancy, tables_in_use_by_round, TableSlot};
