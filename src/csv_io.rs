//! CSV import of team names and CSV export of standings.

use crate::logic::overall_standings;
use crate::models::Tournament;
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One team name per record, first column. A `name` header and blank rows are skipped.
pub fn import_team_names<R: Read>(reader: R) -> Result<Vec<String>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Overall standings as CSV: position, team, group, then the record columns.
pub fn write_standings_csv<W: Write>(tournament: &Tournament, writer: W) -> Result<(), CsvError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "position", "team", "group", "played", "won", "drawn", "lost", "goals_for",
        "goals_against", "goal_diff", "points",
    ])?;
    for (i, team) in overall_standings(tournament).iter().enumerate() {
        let r = &team.record;
        wtr.write_record([
            (i + 1).to_string(),
            team.name.clone(),
            team.group.clone().unwrap_or_default(),
            r.played.to_string(),
            r.won.to_string(),
            r.drawn.to_string(),
            r.lost.to_string(),
            r.goals_for.to_string(),
            r.goals_against.to_string(),
            r.goal_diff().to_string(),
            r.points.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
