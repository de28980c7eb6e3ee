//! Table assignment, manual moves, and occupancy.

mod common;

use arena_tournament::{
    assign_tables, move_match_to_table, record_result, table_occupancy, tables_in_use_by_round,
    ErrorKind, Participant, SequentialIds, TournamentError, TournamentFormat,
};
use common::{settings, started};
use std::collections::BTreeSet;
use uuid::Uuid;

#[test]
fn assign_tables_restarts_every_round() {
    let mut ids = SequentialIds::new();
    let t = started(settings(TournamentFormat::League, 3), &["A", "B", "C", "D", "E", "F", "G", "H"], &mut ids);
    let renumbered = assign_tables(&t.matches, 3);
    for round in 1..=7 {
        let tables: Vec<u32> = renumbered.iter().filter(|m| m.round == round).map(|m| m.table_number).collect();
        assert_eq!(tables, [1, 2, 3, 1]);
    }
    // Only the table changes.
    for (before, after) in t.matches.iter().zip(&renumbered) {
        assert_eq!((before.id, before.home, before.away), (after.id, after.home, after.away));
    }
}

#[test]
fn moving_a_match_leaves_its_siblings_alone() {
    let mut ids = SequentialIds::new();
    let t = started(settings(TournamentFormat::League, 3), &["A", "B", "C", "D"], &mut ids);
    let target = t.matches[0].id;
    let sibling = t.matches[1].clone();

    let moved = move_match_to_table(&t, target, 2).unwrap();
    assert_eq!(moved.get_match(target).unwrap().table_number, 2);
    assert_eq!(moved.get_match(sibling.id).unwrap().table_number, sibling.table_number);
    // The input snapshot is untouched.
    assert_eq!(t.get_match(target).unwrap().table_number, 1);
}

#[test]
fn moving_outside_the_table_range_is_rejected() {
    let mut ids = SequentialIds::new();
    let t = started(settings(TournamentFormat::League, 2), &["A", "B", "C", "D"], &mut ids);
    let target = t.matches[0].id;

    for table in [0, 3] {
        let err = move_match_to_table(&t, target, table).unwrap_err();
        assert_eq!(err, TournamentError::TableOutOfRange { table, max_tables: 2 });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    let missing = Uuid::from_u128(999_999);
    assert_eq!(
        move_match_to_table(&t, missing, 1).unwrap_err(),
        TournamentError::MatchNotFound(missing)
    );
}

#[test]
fn tables_in_use_excludes_the_match_itself() {
    let mut ids = SequentialIds::new();
    let t = started(settings(TournamentFormat::League, 4), &["A", "B", "C", "D", "E", "F"], &mut ids);
    let round_one: Vec<_> = t.matches.iter().filter(|m| m.round == 1).collect();
    assert_eq!(round_one.len(), 3);

    let in_use = tables_in_use_by_round(&t, round_one[0].id).unwrap();
    assert_eq!(in_use, BTreeSet::from([2, 3]));
}

#[test]
fn occupancy_shows_the_next_match_per_table() {
    let mut ids = SequentialIds::new();
    let t = started(settings(TournamentFormat::League, 3), &["A", "B", "C", "D"], &mut ids);

    let slots = table_occupancy(&t);
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].current.as_ref().map(|m| m.id), Some(t.matches[0].id));
    assert_eq!(slots[1].current.as_ref().map(|m| m.id), Some(t.matches[1].id));
    // Two matches per round never reach table 3.
    assert!(slots[2].current.is_none());

    let after = record_result(&t, t.matches[0].id, 1, 0, &mut ids).unwrap();
    let slots = table_occupancy(&after);
    let next_on_one = slots[0].current.as_ref().unwrap();
    assert_eq!(next_on_one.round, 2);
    assert_eq!(next_on_one.table_number, 1);
}

#[test]
fn occupancy_skips_vacant_fixtures() {
    let mut ids = SequentialIds::new();
    let mut t = started(settings(TournamentFormat::League, 2), &["A", "B", "C", "D"], &mut ids);
    t.matches[0].home = Participant::Tbd;
    t.matches[0].away = Participant::Tbd;

    let slots = table_occupancy(&t);
    let on_one = slots[0].current.as_ref().unwrap();
    assert!(!on_one.is_vacant());
    assert_eq!((on_one.round, on_one.table_number), (2, 1));
}
