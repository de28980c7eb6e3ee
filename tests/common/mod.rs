//! Shared builders for the integration tests.
#![allow(dead_code)]

use arena_tournament::{
    record_result, start_tournament, Match, Participant, SequentialIds, Stage, Team, TeamId,
    Tournament, TournamentFormat, TournamentSettings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

pub fn settings(format: TournamentFormat, max_tables: u32) -> TournamentSettings {
    TournamentSettings {
        format,
        max_tables,
        ..TournamentSettings::default()
    }
}

/// Tournament in Setup with teams named `names`.
pub fn tournament_with_teams(settings: TournamentSettings, names: &[&str], ids: &mut SequentialIds) -> Tournament {
    let mut t = Tournament::new("Test Cup", settings, ids);
    for name in names {
        t.add_team(name, ids).unwrap();
    }
    t
}

pub fn started(settings: TournamentSettings, names: &[&str], ids: &mut SequentialIds) -> Tournament {
    let t = tournament_with_teams(settings, names, ids);
    start_tournament(&t, ids, &mut StdRng::seed_from_u64(7)).unwrap()
}

pub fn id_of(t: &Tournament, name: &str) -> TeamId {
    t.teams.iter().find(|team| team.name == name).unwrap().id
}

pub fn name_of(t: &Tournament, p: Participant) -> String {
    match p {
        Participant::Team(id) => t.team_name(id).to_string(),
        Participant::Tbd => "TBD".to_string(),
        Participant::Bye => "BYE".to_string(),
    }
}

pub fn stage_matches(t: &Tournament, stage: Stage) -> Vec<Match> {
    t.matches.iter().filter(|m| m.stage == stage).cloned().collect()
}

/// Record `a`'s goals and `b`'s goals in their meeting, whichever side is home.
pub fn score_between(
    t: &Tournament,
    a: &str,
    b: &str,
    goals_a: u32,
    goals_b: u32,
    ids: &mut SequentialIds,
) -> Tournament {
    let (a_id, b_id) = (id_of(t, a), id_of(t, b));
    let m = t
        .matches
        .iter()
        .find(|m| !m.is_finished && m.involves(a_id) && m.involves(b_id))
        .unwrap_or_else(|| panic!("no open match between {a} and {b}"));
    let (home, away) = if m.home.is_team(a_id) { (goals_a, goals_b) } else { (goals_b, goals_a) };
    record_result(t, m.id, home, away, ids).unwrap()
}

/// Teams named `T<n>`: the lower number wins 1-0.
pub fn strength(t: &Tournament, p: Participant) -> u32 {
    name_of(t, p).trim_start_matches('T').parse().unwrap_or(u32::MAX)
}

/// Play every open match of `stage` with the stronger team winning 1-0.
pub fn play_stage_by_strength(t: &Tournament, stage: Stage, ids: &mut SequentialIds) -> Tournament {
    let mut current = t.clone();
    for m in stage_matches(t, stage).into_iter().filter(|m| !m.is_finished) {
        let home_wins = strength(&current, m.home) < strength(&current, m.away);
        let (h, a) = if home_wins { (1, 0) } else { (0, 1) };
        current = record_result(&current, m.id, h, a, ids).unwrap();
    }
    current
}

pub fn team(n: u128, name: &str) -> Team {
    Team::new(Uuid::from_u128(n), name)
}

pub fn finished(id: u128, home: &Team, away: &Team, home_score: u32, away_score: u32, stage: Stage) -> Match {
    let mut m = Match::new(
        Uuid::from_u128(id),
        Participant::Team(home.id),
        Participant::Team(away.id),
        1,
        1,
        stage,
    );
    m.finish(home_score, away_score);
    m
}
