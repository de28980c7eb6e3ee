//! Round-robin schedule generation (circle method).

use crate::models::{IdGenerator, Match, Participant, Stage, Team, TeamId};

/// Every team meets every other team once.
///
/// With an odd team count a BYE slot is added; pairings against it are dropped, so
/// each team sits out exactly one round. `n` slots give `n - 1` rounds of `n / 2`
/// pairings. Tables are handed out cyclically per round; `assign_tables` makes the
/// final numbering when the tournament starts.
pub fn generate_round_robin(
    teams: &[Team],
    max_tables: u32,
    stage: Stage,
    ids: &mut impl IdGenerator,
) -> Vec<Match> {
    let mut slots: Vec<Option<TeamId>> = teams.iter().map(|t| Some(t.id)).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }
    let n = slots.len();
    if n < 2 {
        return Vec::new();
    }
    let max_tables = max_tables.max(1);

    let mut matches = Vec::with_capacity(n / 2 * (n - 1));
    for round in 1..n {
        let mut table = 1;
        for i in 0..n / 2 {
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                matches.push(Match::new(
                    ids.next_id(),
                    Participant::Team(home),
                    Participant::Team(away),
                    round as u32,
                    table,
                    stage,
                ));
                table = if table >= max_tables { 1 } else { table + 1 };
            }
        }
        // Slot 0 stays fixed; the last slot rotates in behind it.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    matches
}
