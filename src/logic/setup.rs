//! Setup phase: start the tournament (Setup -> first stage fixtures).

use crate::logic::bracket::generate_knockout_round;
use crate::logic::schedule::generate_round_robin;
use crate::logic::tables::assign_tables;
use crate::models::{
    IdGenerator, Participant, Stage, Team, Tournament, TournamentError, TournamentFormat,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Label of the `index`-th group: A, B, C, ...
pub fn group_label(index: usize) -> String {
    let letter = u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i));
    match letter {
        Some(c) => c.to_string(),
        None => format!("G{}", index + 1),
    }
}

/// Generate the opening fixtures for the configured format.
///
/// LEAGUE: one round robin. KNOCKOUT: a bracket over the teams in entry order.
/// GROUPS_KNOCKOUT: teams are shuffled with `rng`, dealt into groups, and each group
/// plays its own round robin. Tables are then numbered per round.
pub fn start_tournament(
    tournament: &Tournament,
    ids: &mut impl IdGenerator,
    rng: &mut impl Rng,
) -> Result<Tournament, TournamentError> {
    if tournament.has_started() {
        return Err(TournamentError::AlreadyStarted);
    }
    tournament.settings.validate()?;
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams {
            required: 2,
            actual: tournament.teams.len(),
        });
    }

    let settings = &tournament.settings;
    let mut next = tournament.clone();
    let matches = match settings.format {
        TournamentFormat::League => {
            generate_round_robin(&next.teams, settings.max_tables, Stage::League, ids)
        }
        TournamentFormat::Knockout => {
            let entrants: Vec<Participant> = next.teams.iter().map(|t| Participant::Team(t.id)).collect();
            let stage = Stage::for_bracket_size(entrants.len());
            generate_knockout_round(&entrants, stage, 1, settings.max_tables, 1, Some(tournament), ids)
        }
        TournamentFormat::GroupsKnockout => {
            let group_count = settings.num_groups as usize;
            let mut drawn = next.teams.clone();
            drawn.shuffle(rng);
            next.teams = drawn
                .into_iter()
                .enumerate()
                .map(|(i, team)| team.in_group(group_label(i % group_count)))
                .collect();

            let mut matches = Vec::new();
            for g in 0..group_count {
                let label = group_label(g);
                let members: Vec<Team> = next
                    .teams
                    .iter()
                    .filter(|t| t.group.as_deref() == Some(label.as_str()))
                    .cloned()
                    .collect();
                if members.len() < 2 {
                    return Err(TournamentError::NotEnoughTeamsInGroup {
                        group: label,
                        actual: members.len(),
                    });
                }
                matches.extend(
                    generate_round_robin(&members, settings.max_tables, Stage::Group, ids)
                        .into_iter()
                        .map(|mut m| {
                            m.group_id = Some(label.clone());
                            m
                        }),
                );
            }
            matches
        }
    };

    next.matches = assign_tables(&matches, settings.max_tables);
    log::info!(
        "Started tournament {:?}: {:?}, {} teams, {} matches",
        next.name,
        settings.format,
        next.teams.len(),
        next.matches.len()
    );
    Ok(next)
}
