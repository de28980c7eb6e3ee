//! Knockout bracket: pairing a seed order into a round, and seeding group survivors.

use crate::logic::advantage::determine_advantage;
use crate::logic::ranking::rank;
use crate::models::{
    AdvancementWarning, IdGenerator, KnockoutLogic, Match, Participant, Stage, Team, TieBreakRule,
    Tournament,
};
use std::collections::BTreeMap;

/// Pair `entrants` in order (0 vs 1, 2 vs 3, ...) into one knockout round.
///
/// A missing partner becomes `Tbd`. When `tournament` is given with advantage mode on,
/// each fixture between two concrete teams gets its advantage team frozen now.
/// Tables run cyclically from `start_table`, wrapping at `max_tables`.
pub fn generate_knockout_round(
    entrants: &[Participant],
    stage: Stage,
    round: u32,
    max_tables: u32,
    start_table: u32,
    tournament: Option<&Tournament>,
    ids: &mut impl IdGenerator,
) -> Vec<Match> {
    let max_tables = max_tables.max(1);
    let mut table = (start_table.max(1) - 1) % max_tables + 1;

    entrants
        .chunks(2)
        .map(|pair| {
            let home = pair[0];
            let away = pair.get(1).copied().unwrap_or(Participant::Tbd);
            let mut m = Match::new(ids.next_id(), home, away, round, table, stage);
            table = if table >= max_tables { 1 } else { table + 1 };

            if let Some(t) = tournament.filter(|t| t.settings.use_knockout_advantage) {
                if let (Some(h), Some(a)) = (home.team_id(), away.team_id()) {
                    m.advantage_team_id =
                        determine_advantage(h, a, &t.teams, &t.settings.tie_break_rules, &t.matches);
                }
            }
            m
        })
        .collect()
}

/// First knockout order built from group survivors, plus any fallbacks taken.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Seeding {
    pub order: Vec<Participant>,
    pub warnings: Vec<AdvancementWarning>,
}

/// Order group survivors for the first knockout round.
///
/// `advancing` maps each group label to its qualified teams, best first.
pub fn seed_knockout(
    advancing: &BTreeMap<String, Vec<Team>>,
    logic: KnockoutLogic,
    rules: &[TieBreakRule],
    matches: &[Match],
) -> Seeding {
    if advancing.values().all(Vec::is_empty) {
        return Seeding {
            order: Vec::new(),
            warnings: vec![AdvancementWarning::NoAdvancingTeams],
        };
    }
    match logic {
        KnockoutLogic::Olympic => olympic_order(advancing),
        KnockoutLogic::Efficiency => efficiency_order(advancing, rules, matches),
    }
}

/// Neighbouring groups (in label order) are crossed: 1st of one meets the last
/// qualifier of the other. With two qualifiers per group that is A1-B2 and B1-A2.
fn olympic_order(advancing: &BTreeMap<String, Vec<Team>>) -> Seeding {
    let groups: Vec<(&String, &Vec<Team>)> = advancing.iter().collect();
    let mut seeding = Seeding::default();

    for pair in groups.chunks(2) {
        match pair {
            [(first_label, first), (second_label, second)] => {
                if first.len() != second.len() {
                    seeding.warnings.push(AdvancementWarning::ShortGroupPair {
                        first: first_label.to_string(),
                        second: second_label.to_string(),
                    });
                }
                let m = first.len().max(second.len());
                for i in 0..m {
                    let x = first.get(i).map_or(Participant::Tbd, |t| Participant::Team(t.id));
                    let y = second.get(m - 1 - i).map_or(Participant::Tbd, |t| Participant::Team(t.id));
                    // Better group position plays at home.
                    if i <= m - 1 - i {
                        seeding.order.extend([x, y]);
                    } else {
                        seeding.order.extend([y, x]);
                    }
                }
            }
            [(label, lone)] => {
                seeding.warnings.push(AdvancementWarning::UnpairedGroup(label.to_string()));
                seeding.order.extend(lone.iter().map(|t| Participant::Team(t.id)));
            }
            _ => {}
        }
    }
    seeding
}

/// All survivors ranked together; best meets worst, second meets second-worst, ...
fn efficiency_order(
    advancing: &BTreeMap<String, Vec<Team>>,
    rules: &[TieBreakRule],
    matches: &[Match],
) -> Seeding {
    let pooled: Vec<Team> = advancing.values().flatten().cloned().collect();
    let ranked = rank(&pooled, rules, matches);
    let n = ranked.len();
    let mut seeding = Seeding::default();

    for i in 0..n / 2 {
        seeding.order.push(Participant::Team(ranked[i].id));
        seeding.order.push(Participant::Team(ranked[n - 1 - i].id));
    }
    if n % 2 == 1 {
        seeding.order.push(Participant::Team(ranked[n / 2].id));
        seeding.warnings.push(AdvancementWarning::OddAdvancingCount(n));
    }
    seeding
}
