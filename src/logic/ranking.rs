//! Ranking: the cascading tie-break comparator and the record projection it reads.

use crate::models::{Match, Record, Team, TeamId, TieBreakRule};
use std::cmp::Ordering;

/// Fold every finished match involving `team_id` into a fresh record. Walkovers are
/// not played and do not count.
pub fn compute_record<'a>(team_id: TeamId, matches: impl IntoIterator<Item = &'a Match>) -> Record {
    matches
        .into_iter()
        .filter_map(|m| m.goals_for_team(team_id))
        .fold(Record::default(), |mut record, (scored, conceded)| {
            record.add_result(scored, conceded);
            record
        })
}

/// Copy of `teams` with every record recomputed from scratch over `matches`.
pub fn recompute_records(teams: &[Team], matches: &[Match]) -> Vec<Team> {
    teams
        .iter()
        .map(|team| Team {
            record: compute_record(team.id, matches),
            ..team.clone()
        })
        .collect()
}

/// The rule list actually applied: POINTS first, then the configured rules.
pub fn effective_rules(rules: &[TieBreakRule]) -> Vec<TieBreakRule> {
    applied_rules(rules).collect()
}

fn applied_rules(rules: &[TieBreakRule]) -> impl Iterator<Item = TieBreakRule> + '_ {
    let implicit_points = (!rules.contains(&TieBreakRule::Points)).then_some(TieBreakRule::Points);
    implicit_points.into_iter().chain(rules.iter().copied())
}

/// Finished meetings between exactly `a` and `b`, in either direction.
fn meetings<'m>(a: TeamId, b: TeamId, matches: &'m [Match]) -> impl Iterator<Item = &'m Match> {
    matches
        .iter()
        .filter(move |m| m.is_finished && m.involves(a) && m.involves(b) && a != b)
}

fn away_goals(team: TeamId, matches: &[Match]) -> u32 {
    matches
        .iter()
        .filter(|m| m.away.is_team(team) && !m.is_walkover())
        .filter_map(|m| m.score())
        .fold(0u32, |total, (_, away)| total.saturating_add(away))
}

/// Higher value ranks first, so the comparison is reversed.
fn higher_first<T: Ord>(a: T, b: T) -> Ordering {
    b.cmp(&a)
}

fn compare_rule(rule: TieBreakRule, a: &Team, b: &Team, matches: &[Match]) -> Ordering {
    let (ra, rb) = (&a.record, &b.record);
    match rule {
        TieBreakRule::Points => higher_first(ra.points, rb.points),
        TieBreakRule::Wins => higher_first(ra.won, rb.won),
        TieBreakRule::GoalsFor => higher_first(ra.goals_for, rb.goals_for),
        TieBreakRule::GoalDiff => higher_first(ra.goal_diff(), rb.goal_diff()),
        TieBreakRule::Percentage => higher_first(ra.percentage(), rb.percentage()),
        TieBreakRule::AwayGoals => higher_first(away_goals(a.id, matches), away_goals(b.id, matches)),
        TieBreakRule::HeadToHead => {
            let mut h2h = (Record::default(), Record::default());
            for m in meetings(a.id, b.id, matches) {
                if let (Some((fa, aa)), Some((fb, ab))) = (m.goals_for_team(a.id), m.goals_for_team(b.id)) {
                    h2h.0.add_result(fa, aa);
                    h2h.1.add_result(fb, ab);
                }
            }
            higher_first(h2h.0.points, h2h.1.points)
        }
        TieBreakRule::H2hGoalDiff => {
            let diff: i64 = meetings(a.id, b.id, matches)
                .filter_map(|m| m.goals_for_team(a.id))
                .map(|(scored, conceded)| i64::from(scored) - i64::from(conceded))
                .sum();
            // b's differential is the mirror image of a's
            higher_first(diff, -diff)
        }
        TieBreakRule::H2hGoalsFor => {
            let (ga, gb) = meetings(a.id, b.id, matches)
                .filter_map(|m| m.goals_for_team(a.id))
                .fold((0u32, 0u32), |(ga, gb), (scored, conceded)| {
                    (ga.saturating_add(scored), gb.saturating_add(conceded))
                });
            higher_first(ga, gb)
        }
    }
}

/// Apply the rules in order; the first one that separates the teams decides.
/// `Less` means `a` ranks ahead of `b`. No name fallback.
pub fn compare_by_rules(a: &Team, b: &Team, rules: &[TieBreakRule], matches: &[Match]) -> Ordering {
    applied_rules(rules)
        .map(|rule| compare_rule(rule, a, b, matches))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Full comparator: rules, then team name, then id.
pub fn compare_teams(a: &Team, b: &Team, rules: &[TieBreakRule], matches: &[Match]) -> Ordering {
    compare_by_rules(a, b, rules, matches)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Order `teams` best-first under `rules`.
///
/// Head-to-head rules only look at one pair at a time and are not transitive over
/// three or more teams, so teams are inserted one by one instead of using `sort_by`,
/// which may panic on an inconsistent comparator.
pub fn rank(teams: &[Team], rules: &[TieBreakRule], matches: &[Match]) -> Vec<Team> {
    let mut ranked: Vec<Team> = Vec::with_capacity(teams.len());
    for team in teams {
        let pos = ranked
            .iter()
            .position(|placed| compare_teams(team, placed, rules, matches) == Ordering::Less)
            .unwrap_or(ranked.len());
        ranked.insert(pos, team.clone());
    }
    ranked
}
