//! Team, its aggregate Record, and the optional roster.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Unique identifier for a team (scoped to one tournament).
pub type TeamId = Uuid;

/// Unique identifier for a roster player.
pub type PlayerId = Uuid;

/// Maximum number of named players on a team roster.
pub const MAX_ROSTER_SIZE: usize = 15;

/// Aggregate results of a team. Always a projection over finished matches,
/// never incremented in place (see `logic::ranking::compute_record`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl Record {
    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Fold one played match into the record. Totals saturate at `u32::MAX`.
    pub fn add_result(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won = self.won.saturating_add(1);
                self.points = self.points.saturating_add(3);
            }
            Ordering::Equal => {
                self.drawn = self.drawn.saturating_add(1);
                self.points = self.points.saturating_add(1);
            }
            Ordering::Less => self.lost = self.lost.saturating_add(1),
        }
    }

    /// Points won as a share of points available, `points / (played * 3)`, or 0 when unplayed.
    pub fn percentage(&self) -> Percentage {
        if self.played == 0 {
            Percentage { num: 0, den: 1 }
        } else {
            Percentage {
                num: u64::from(self.points),
                den: u64::from(self.played) * 3,
            }
        }
    }
}

/// Exact fraction so equal percentages compare equal.
#[derive(Clone, Copy, Debug)]
pub struct Percentage {
    num: u64,
    den: u64,
}

impl Percentage {
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl PartialEq for Percentage {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Percentage {}

impl PartialOrd for Percentage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percentage {
    fn cmp(&self, other: &Self) -> Ordering {
        (u128::from(self.num) * u128::from(other.den))
            .cmp(&(u128::from(other.num) * u128::from(self.den)))
    }
}

/// A named, numbered player on a team roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: PlayerId,
    pub name: String,
    pub number: u32,
}

/// A team in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Opaque logo reference (emoji or data URL), stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub record: Record,
    /// Group label ("A", "B", ...) once groups are drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Final rank inside its group, frozen when the group stage completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_pos: Option<u32>,
    #[serde(default)]
    pub players: Vec<RosterPlayer>,
}

impl Team {
    /// Create a new team with the given id and name. Record starts at zero.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo: None,
            record: Record::default(),
            group: None,
            group_pos: None,
            players: Vec::new(),
        }
    }

    /// Builder-style group label.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
