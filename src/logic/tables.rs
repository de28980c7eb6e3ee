//! Table (venue) assignment, manual moves, and the per-table occupancy view.

use crate::models::{Match, MatchId, Tournament, TournamentError};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Number tables `1..=max_tables` cyclically within each round, in generation order.
///
/// No two fixtures of a round share a table while the round has at most `max_tables`
/// fixtures; beyond that tables are reused and those fixtures run one after another.
pub fn assign_tables(matches: &[Match], max_tables: u32) -> Vec<Match> {
    let max_tables = max_tables.max(1);
    let mut next_by_round: HashMap<u32, u32> = HashMap::new();
    matches
        .iter()
        .map(|m| {
            let next = next_by_round.entry(m.round).or_insert(1);
            let table = *next;
            *next = if table >= max_tables { 1 } else { table + 1 };
            Match {
                table_number: table,
                ..m.clone()
            }
        })
        .collect()
}

/// Move one fixture to another table. Sibling fixtures are left alone.
pub fn move_match_to_table(
    tournament: &Tournament,
    match_id: MatchId,
    table: u32,
) -> Result<Tournament, TournamentError> {
    let max_tables = tournament.settings.max_tables;
    if table == 0 || table > max_tables {
        return Err(TournamentError::TableOutOfRange { table, max_tables });
    }
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let mut next = tournament.clone();
    next.matches[idx].table_number = table;
    Ok(next)
}

/// Tables already taken by the other fixtures of the same round.
pub fn tables_in_use_by_round(
    tournament: &Tournament,
    match_id: MatchId,
) -> Result<BTreeSet<u32>, TournamentError> {
    let target = tournament
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    Ok(tournament
        .matches
        .iter()
        .filter(|m| m.round == target.round && m.id != match_id)
        .map(|m| m.table_number)
        .collect())
}

/// One table and the match currently waiting to be played on it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSlot {
    pub table: u32,
    pub current: Option<Match>,
}

/// For every table, the first unfinished match assigned to it.
pub fn table_occupancy(tournament: &Tournament) -> Vec<TableSlot> {
    (1..=tournament.settings.max_tables)
        .map(|table| TableSlot {
            table,
            current: tournament
                .matches
                .iter()
                .find(|m| m.table_number == table && !m.is_finished && !m.is_vacant())
                .cloned(),
        })
        .collect()
}
