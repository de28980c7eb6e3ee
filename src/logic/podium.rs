//! Standings views and the final podium.

use crate::logic::ranking::rank;
use crate::models::{Match, Stage, Team, TeamId, Tournament, TournamentFormat};
use serde::Serialize;
use std::collections::BTreeMap;

/// Every team ranked under the tournament's rules.
pub fn overall_standings(tournament: &Tournament) -> Vec<Team> {
    rank(&tournament.teams, &tournament.settings.tie_break_rules, &tournament.matches)
}

/// Each group ranked on its own, keyed by group label.
pub fn group_standings(tournament: &Tournament) -> BTreeMap<String, Vec<Team>> {
    let mut groups: BTreeMap<String, Vec<Team>> = BTreeMap::new();
    for team in &tournament.teams {
        if let Some(group) = &team.group {
            groups.entry(group.clone()).or_default().push(team.clone());
        }
    }
    groups
        .into_iter()
        .map(|(label, members)| {
            let ranked = rank(&members, &tournament.settings.tie_break_rules, &tournament.matches);
            (label, ranked)
        })
        .collect()
}

/// Top three of a finished tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Podium {
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
    pub third: Option<TeamId>,
}

/// Final podium, or `None` while the tournament is still running.
///
/// LEAGUE takes the top three of the table. Knockout formats read the final and the
/// third-place match, falling back on the advantage team for level scores.
pub fn podium(tournament: &Tournament) -> Option<Podium> {
    if !tournament.is_finished {
        return None;
    }
    if tournament.settings.format == TournamentFormat::League {
        let standings = overall_standings(tournament);
        let at = |i: usize| standings.get(i).map(|t| t.id);
        return Some(Podium {
            champion: at(0),
            runner_up: at(1),
            third: at(2),
        });
    }

    let use_advantage = tournament.settings.use_knockout_advantage;
    let decided = |stage: Stage| {
        tournament
            .matches
            .iter()
            .find(|m: &&Match| m.stage == stage)
            .and_then(|m| m.outcome(use_advantage))
    };
    let final_result = decided(Stage::Final);
    Some(Podium {
        champion: final_result.and_then(|(winner, _)| winner.team_id()),
        runner_up: final_result.and_then(|(_, loser)| loser.team_id()),
        third: decided(Stage::ThirdPlace).and_then(|(winner, _)| winner.team_id()),
    })
}
