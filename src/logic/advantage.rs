//! Tie advantage for knockout fixtures: which team goes through on a level score.

use crate::logic::ranking::{compare_teams, compute_record};
use crate::models::{Match, Stage, Team, TeamId, TieBreakRule};
use std::cmp::Ordering;

/// Decide which of two teams holds the tie advantage. `None` only for unknown or identical teams.
///
/// 1. Both teams have a frozen group position: the better (smaller) position wins.
///    This is what lets teams from different groups be compared.
/// 2. Otherwise rank the two on their group-stage-only records under `rules`, with the
///    usual name fallback. Two distinct teams always produce an advantage team.
pub fn determine_advantage(
    team_a: TeamId,
    team_b: TeamId,
    teams: &[Team],
    rules: &[TieBreakRule],
    matches: &[Match],
) -> Option<TeamId> {
    if team_a == team_b {
        return None;
    }
    let a = teams.iter().find(|t| t.id == team_a)?;
    let b = teams.iter().find(|t| t.id == team_b)?;

    if let (Some(pos_a), Some(pos_b)) = (a.group_pos, b.group_pos) {
        match pos_a.cmp(&pos_b) {
            Ordering::Less => return Some(team_a),
            Ordering::Greater => return Some(team_b),
            Ordering::Equal => {}
        }
    }

    let group_matches: Vec<Match> = matches
        .iter()
        .filter(|m| m.stage == Stage::Group && m.is_finished)
        .cloned()
        .collect();
    let group_view = |team: &Team| Team {
        record: compute_record(team.id, &group_matches),
        ..team.clone()
    };
    let (a, b) = (group_view(a), group_view(b));

    match compare_teams(&a, &b, rules, &group_matches) {
        Ordering::Greater => Some(team_b),
        Ordering::Less | Ordering::Equal => Some(team_a),
    }
}
