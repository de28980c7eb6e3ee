//! Ranking: rule cascade, head-to-head family, and the name fallback.

mod common;

use arena_tournament::logic::{compare_by_rules, compute_record, effective_rules, recompute_records};
use arena_tournament::{rank, Participant, Record, Stage, TieBreakRule};
use common::{finished, team};
use std::cmp::Ordering;

fn names(teams: &[arena_tournament::Team]) -> Vec<String> {
    teams.iter().map(|t| t.name.clone()).collect()
}

#[test]
fn points_always_come_first() {
    assert_eq!(
        effective_rules(&[TieBreakRule::GoalDiff]),
        vec![TieBreakRule::Points, TieBreakRule::GoalDiff]
    );
    assert_eq!(
        effective_rules(&[TieBreakRule::Wins, TieBreakRule::Points]),
        vec![TieBreakRule::Wins, TieBreakRule::Points]
    );
}

#[test]
fn record_is_a_fold_over_finished_matches() {
    let a = team(1, "A");
    let b = team(2, "B");
    let mut open = finished(12, &a, &b, 5, 5, Stage::League);
    open.is_finished = false;
    let matches = vec![
        finished(10, &a, &b, 3, 1, Stage::League),
        finished(11, &b, &a, 2, 2, Stage::League),
        open,
    ];
    let r = compute_record(a.id, &matches);
    assert_eq!(r.played, 2);
    assert_eq!((r.won, r.drawn, r.lost), (1, 1, 0));
    assert_eq!((r.goals_for, r.goals_against), (5, 3));
    assert_eq!(r.points, 4);
    assert_eq!(r.played, r.won + r.drawn + r.lost);
    assert_eq!(r.points, 3 * r.won + r.drawn);
}

#[test]
fn points_then_goal_difference() {
    let (a, b, c) = (team(1, "A"), team(2, "B"), team(3, "C"));
    let matches = vec![
        finished(10, &a, &b, 1, 0, Stage::League),
        finished(11, &b, &c, 4, 0, Stage::League),
        finished(12, &c, &a, 1, 0, Stage::League),
    ];
    // Everyone has 3 points; B has the best goal difference, then A, then C.
    let teams = recompute_records(&[a, b, c], &matches);
    let ranked = rank(&teams, &[TieBreakRule::GoalDiff], &matches);
    assert_eq!(names(&ranked), ["B", "A", "C"]);
}

#[test]
fn head_to_head_split_falls_through_to_next_rule() {
    let (a, b) = (team(1, "A"), team(2, "B"));
    let matches = vec![
        finished(10, &a, &b, 2, 1, Stage::League),
        finished(11, &b, &a, 3, 0, Stage::League),
    ];
    let teams = recompute_records(&[a, b], &matches);
    let (a, b) = (&teams[0], &teams[1]);

    assert_eq!(compare_by_rules(a, b, &[TieBreakRule::HeadToHead], &matches), Ordering::Equal);
    assert_eq!(
        compare_by_rules(a, b, &[TieBreakRule::HeadToHead, TieBreakRule::H2hGoalDiff], &matches),
        Ordering::Greater
    );
    assert_eq!(
        compare_by_rules(a, b, &[TieBreakRule::HeadToHead, TieBreakRule::H2hGoalsFor], &matches),
        Ordering::Greater
    );
    let ranked = rank(&teams, &[TieBreakRule::HeadToHead, TieBreakRule::GoalDiff], &matches);
    assert_eq!(names(&ranked), ["B", "A"]);
}

#[test]
fn head_to_head_only_counts_the_pair() {
    let (a, b, c) = (team(1, "A"), team(2, "B"), team(3, "C"));
    let matches = vec![
        finished(10, &a, &b, 1, 1, Stage::League),
        finished(11, &b, &c, 5, 0, Stage::League),
        finished(12, &c, &a, 2, 0, Stage::League),
        finished(13, &a, &c, 2, 0, Stage::League),
    ];
    let teams = recompute_records(&[a, b, c], &matches);
    let (a, b) = (&teams[0], &teams[1]);
    // Level on points; their only meeting was a draw, whatever else happened against C.
    assert_eq!(a.record.points, b.record.points);
    assert_eq!(compare_by_rules(a, b, &[TieBreakRule::HeadToHead], &matches), Ordering::Equal);
    assert_eq!(
        compare_by_rules(a, b, &[TieBreakRule::HeadToHead, TieBreakRule::GoalDiff], &matches),
        Ordering::Greater
    );
}

#[test]
fn goals_for_compares_both_teams() {
    let (a, b, c, d) = (team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D"));
    let matches = vec![
        finished(10, &a, &c, 1, 0, Stage::League),
        finished(11, &b, &d, 3, 2, Stage::League),
    ];
    let teams = recompute_records(&[a, b, c, d], &matches);
    assert_eq!(
        compare_by_rules(&teams[0], &teams[1], &[TieBreakRule::GoalsFor], &matches),
        Ordering::Greater
    );
}

#[test]
fn away_goals_only_count_away_matches() {
    let (a, b, c) = (team(1, "A"), team(2, "B"), team(3, "C"));
    let matches = vec![
        finished(10, &a, &c, 3, 3, Stage::League),
        finished(11, &c, &b, 3, 3, Stage::League),
    ];
    let teams = recompute_records(&[a, b, c], &matches);
    // A and B: one draw, 3 goals each; only B scored away.
    let ranked = rank(&teams[..2], &[TieBreakRule::AwayGoals], &matches);
    assert_eq!(names(&ranked), ["B", "A"]);
}

#[test]
fn percentage_prefers_fewer_games_for_same_points() {
    let (a, b, c) = (team(1, "A"), team(2, "B"), team(3, "C"));
    let matches = vec![
        finished(10, &a, &c, 1, 0, Stage::League),
        finished(11, &b, &c, 1, 0, Stage::League),
        finished(12, &b, &c, 0, 2, Stage::League),
    ];
    let teams = recompute_records(&[a, b, c], &matches);
    let ranked = rank(&teams[..2], &[TieBreakRule::Percentage], &matches);
    assert_eq!(names(&ranked), ["A", "B"]);
}

#[test]
fn unseparated_teams_fall_back_to_name() {
    let teams = vec![team(1, "Zebras"), team(2, "Ants"), team(3, "Moles")];
    let ranked = rank(&teams, &[TieBreakRule::Wins, TieBreakRule::GoalDiff], &[]);
    assert_eq!(names(&ranked), ["Ants", "Moles", "Zebras"]);
}

#[test]
fn reranking_is_idempotent() {
    let (a, b, c, d) = (team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D"));
    let matches = vec![
        finished(10, &a, &b, 2, 2, Stage::League),
        finished(11, &c, &d, 0, 1, Stage::League),
        finished(12, &a, &d, 1, 3, Stage::League),
        finished(13, &b, &c, 2, 0, Stage::League),
    ];
    let rules = [TieBreakRule::HeadToHead, TieBreakRule::GoalDiff, TieBreakRule::GoalsFor];
    let teams = recompute_records(&[a, b, c, d], &matches);
    let once = rank(&teams, &rules, &matches);
    let twice = rank(&once, &rules, &matches);
    assert_eq!(names(&once), names(&twice));
}

#[test]
fn huge_totals_saturate_instead_of_overflowing() {
    let (a, b, c, d) = (team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D"));
    let big = u32::MAX;
    let matches = vec![
        finished(10, &b, &a, 0, big, Stage::League),
        finished(11, &c, &a, 0, big, Stage::League),
        finished(12, &b, &d, 0, big, Stage::League),
        finished(13, &c, &d, 0, big, Stage::League),
        finished(14, &a, &d, big, big, Stage::League),
        finished(15, &d, &a, big, big, Stage::League),
    ];
    let r = compute_record(a.id, &matches);
    assert_eq!((r.played, r.won, r.drawn, r.points), (4, 2, 2, 8));
    assert_eq!((r.goals_for, r.goals_against), (big, big));

    // A and D are level on everything these rules can see, so the name decides.
    let teams = recompute_records(&[a, b, c, d], &matches);
    let rules = [TieBreakRule::AwayGoals, TieBreakRule::H2hGoalsFor];
    assert_eq!(names(&rank(&teams, &rules, &matches)), ["A", "D", "B", "C"]);
}

#[test]
fn walkovers_stay_out_of_the_record() {
    let a = team(1, "A");
    let b = team(2, "B");
    let mut walkover = finished(10, &a, &b, 0, 3, Stage::QuarterFinal);
    walkover.home = Participant::Tbd;
    let r = compute_record(b.id, &[walkover.clone()]);
    assert_eq!(r, Record::default());

    // Nor do its goals count as away goals.
    let teams = vec![team(3, "Aardvarks"), b.clone()];
    let ranked = rank(&teams, &[TieBreakRule::AwayGoals], &[walkover]);
    assert_eq!(names(&ranked), ["Aardvarks", "B"]);
}

#[test]
fn points_decide_even_when_not_listed() {
    let (a, b) = (team(1, "A"), team(2, "B"));
    let matches = vec![
        finished(10, &a, &b, 1, 0, Stage::League),
        finished(11, &b, &a, 5, 2, Stage::League),
        finished(12, &a, &b, 1, 0, Stage::League),
    ];
    let teams = recompute_records(&[a, b], &matches);
    // B has the better goal difference, A the points.
    assert!(teams[1].record.goal_diff() > teams[0].record.goal_diff());
    assert_eq!(
        compare_by_rules(&teams[0], &teams[1], &[TieBreakRule::GoalDiff], &matches),
        Ordering::Less
    );
}
