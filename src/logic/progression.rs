//! Stage progression: record a result, refresh standings, and open the next stage
//! once the current one is complete.

use crate::logic::bracket::{generate_knockout_round, seed_knockout};
use crate::logic::ranking::{rank, recompute_records};
use crate::models::{
    IdGenerator, Match, MatchId, Participant, Stage, Team, Tournament, TournamentError, MAX_SCORE,
};
use std::collections::BTreeMap;

/// Turn raw user input into a score. Rejects non-numeric, negative, and implausibly
/// large values (above `MAX_SCORE`).
pub fn parse_score(raw: &str) -> Result<u32, TournamentError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|score| *score <= MAX_SCORE)
        .ok_or_else(|| TournamentError::InvalidScore(raw.to_string()))
}

fn check_score(score: u32) -> Result<(), TournamentError> {
    if score > MAX_SCORE {
        return Err(TournamentError::InvalidScore(score.to_string()));
    }
    Ok(())
}

/// Record a result and advance the tournament.
///
/// Re-scoring a match that was already finished only refreshes the standings; it
/// never generates fixtures a second time. Fixtures generated downstream of it are
/// left as they are.
pub fn record_result(
    tournament: &Tournament,
    match_id: MatchId,
    home_score: u32,
    away_score: u32,
    ids: &mut impl IdGenerator,
) -> Result<Tournament, TournamentError> {
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    check_score(home_score)?;
    check_score(away_score)?;
    let current = &tournament.matches[idx];
    check_recordable(tournament, current, home_score, away_score)?;

    let was_finished = current.is_finished;
    let stage = current.stage;
    let mut next = tournament.clone();
    next.matches[idx].finish(home_score, away_score);
    next.teams = recompute_records(&next.teams, &next.matches);
    log::debug!(
        "Recorded {} {}-{} ({}{})",
        stage,
        home_score,
        away_score,
        match_id,
        if was_finished { ", re-score" } else { "" }
    );

    if was_finished || !stage_finished(&next.matches, stage) {
        return Ok(next);
    }

    log::info!("{} complete in {:?}", stage, next.name);
    match stage {
        Stage::League => finish(&mut next),
        Stage::Group => advance_from_groups(&mut next, ids),
        Stage::RoundOf16 | Stage::QuarterFinal => advance_knockout(&mut next, stage, ids),
        Stage::SemiFinal => advance_from_semis(&mut next, ids),
        Stage::Final | Stage::ThirdPlace => {
            let medals_decided = next
                .matches
                .iter()
                .filter(|m| matches!(m.stage, Stage::Final | Stage::ThirdPlace))
                .all(|m| m.is_finished || m.is_vacant());
            if medals_decided {
                finish(&mut next);
            }
        }
    }
    Ok(next)
}

fn check_recordable(
    tournament: &Tournament,
    m: &Match,
    home_score: u32,
    away_score: u32,
) -> Result<(), TournamentError> {
    let undecided =
        matches!(m.home, Participant::Bye) || matches!(m.away, Participant::Bye) || m.is_vacant();
    if undecided {
        return Err(TournamentError::UndecidedParticipants(m.id));
    }
    if m.stage.is_knockout() && home_score == away_score && !m.is_walkover() {
        let resolvable = tournament.settings.use_knockout_advantage && m.advantage_team_id.is_some();
        if !resolvable {
            return Err(TournamentError::UnresolvedTie(m.id));
        }
    }
    Ok(())
}

/// Vacant fixtures can never be played, so they do not hold a stage open.
fn stage_finished(matches: &[Match], stage: Stage) -> bool {
    matches
        .iter()
        .filter(|m| m.stage == stage)
        .all(|m| m.is_finished || m.is_vacant())
}

fn finish(tournament: &mut Tournament) {
    tournament.is_finished = true;
    log::info!("Tournament {:?} finished", tournament.name);
}

fn next_round(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.round).max().unwrap_or(0) + 1
}

/// Winners and losers of a finished stage, in pairing order.
fn stage_outcomes(tournament: &Tournament, stage: Stage) -> (Vec<Participant>, Vec<Participant>) {
    let use_advantage = tournament.settings.use_knockout_advantage;
    tournament
        .matches
        .iter()
        .filter(|m| m.stage == stage)
        .map(|m| m.outcome(use_advantage).unwrap_or((Participant::Tbd, Participant::Tbd)))
        .unzip()
}

/// Freeze group positions, seed the survivors, and open the first knockout round.
fn advance_from_groups(tournament: &mut Tournament, ids: &mut impl IdGenerator) {
    let rules = tournament.settings.tie_break_rules.clone();
    let advance_count = tournament.settings.advance_count_per_group as usize;

    let mut groups: BTreeMap<String, Vec<Team>> = BTreeMap::new();
    for team in &tournament.teams {
        if let Some(group) = &team.group {
            groups.entry(group.clone()).or_default().push(team.clone());
        }
    }

    let mut advancing: BTreeMap<String, Vec<Team>> = BTreeMap::new();
    for (label, members) in groups {
        let standings = rank(&members, &rules, &tournament.matches);
        for (pos, ranked) in standings.iter().enumerate() {
            if let Some(team) = tournament.get_team_mut(ranked.id) {
                team.group_pos = Some(pos as u32 + 1);
            }
        }
        advancing.insert(label, standings.into_iter().take(advance_count).collect());
    }

    let seeding = seed_knockout(&advancing, tournament.settings.knockout_logic, &rules, &tournament.matches);
    for warning in &seeding.warnings {
        log::warn!("Knockout seeding fell back to best effort: {:?}", warning);
    }

    let stage = Stage::for_bracket_size(seeding.order.len());
    let round = next_round(&tournament.matches);
    let fixtures = generate_knockout_round(
        &seeding.order,
        stage,
        round,
        tournament.settings.max_tables,
        1,
        Some(&*tournament),
        ids,
    );
    log::info!("{} drawn with {} matches", stage, fixtures.len());
    tournament.matches.extend(fixtures);
}

/// Winners of a round of 16 or quarter-final move on to the next stage.
fn advance_knockout(tournament: &mut Tournament, stage: Stage, ids: &mut impl IdGenerator) {
    let Some(next_stage) = stage.next_knockout() else {
        return;
    };
    let (winners, _) = stage_outcomes(tournament, stage);
    let round = next_round(&tournament.matches);
    let fixtures = generate_knockout_round(
        &winners,
        next_stage,
        round,
        tournament.settings.max_tables,
        1,
        Some(&*tournament),
        ids,
    );
    tournament.matches.extend(fixtures);
}

/// Semi-final winners meet in the final; losers play for third place on the next table.
fn advance_from_semis(tournament: &mut Tournament, ids: &mut impl IdGenerator) {
    let (winners, losers) = stage_outcomes(tournament, Stage::SemiFinal);
    let round = next_round(&tournament.matches);
    let max_tables = tournament.settings.max_tables;
    let final_round =
        generate_knockout_round(&winners, Stage::Final, round, max_tables, 1, Some(&*tournament), ids);
    let third_place =
        generate_knockout_round(&losers, Stage::ThirdPlace, round, max_tables, 2, Some(&*tournament), ids);
    tournament.matches.extend(final_round);
    tournament.matches.extend(third_place);
}
