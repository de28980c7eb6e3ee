//! Match (fixture), its participants, and the competition stages.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Highest score a side can be credited with in one match.
pub const MAX_SCORE: u32 = 999;

/// One side of a fixture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    Team(TeamId),
    /// Winner not yet known, or an empty bracket slot.
    Tbd,
    /// No opponent this round.
    Bye,
}

impl Participant {
    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Participant::Team(id) => Some(*id),
            Participant::Tbd | Participant::Bye => None,
        }
    }

    pub fn is_team(&self, id: TeamId) -> bool {
        self.team_id() == Some(id)
    }
}

impl From<TeamId> for Participant {
    fn from(id: TeamId) -> Self {
        Participant::Team(id)
    }
}

/// Phase of the competition a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    League,
    Group,
    #[serde(rename = "ROUND_16")]
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    pub fn is_knockout(self) -> bool {
        !matches!(self, Stage::League | Stage::Group)
    }

    /// Opening knockout stage for a bracket of `entrants` teams.
    pub fn for_bracket_size(entrants: usize) -> Stage {
        if entrants > 8 {
            Stage::RoundOf16
        } else if entrants > 4 {
            Stage::QuarterFinal
        } else if entrants > 2 {
            Stage::SemiFinal
        } else {
            Stage::Final
        }
    }

    /// Stage fed by the winners of this single-elimination stage.
    pub fn next_knockout(self) -> Option<Stage> {
        match self {
            Stage::RoundOf16 => Some(Stage::QuarterFinal),
            Stage::QuarterFinal => Some(Stage::SemiFinal),
            Stage::SemiFinal => Some(Stage::Final),
            Stage::League | Stage::Group | Stage::ThirdPlace | Stage::Final => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::League => "League",
            Stage::Group => "Group stage",
            Stage::RoundOf16 => "Round of 16",
            Stage::QuarterFinal => "Quarter-final",
            Stage::SemiFinal => "Semi-final",
            Stage::ThirdPlace => "Third place",
            Stage::Final => "Final",
        };
        f.write_str(label)
    }
}

/// A single fixture between two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home: Participant,
    pub away: Participant,
    /// 1-based round number.
    pub round: u32,
    pub table_number: u32,
    pub stage: Stage,
    pub is_finished: bool,
    /// Present iff `is_finished`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Team that goes through if a knockout score ends level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advantage_team_id: Option<TeamId>,
}

impl Match {
    pub fn new(id: MatchId, home: Participant, away: Participant, round: u32, table_number: u32, stage: Stage) -> Self {
        Self {
            id,
            home,
            away,
            round,
            table_number,
            stage,
            is_finished: false,
            home_score: None,
            away_score: None,
            group_id: None,
            advantage_team_id: None,
        }
    }

    /// Set both scores and mark the match finished.
    pub fn finish(&mut self, home_score: u32, away_score: u32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.is_finished = true;
    }

    /// `(home, away)` score when finished.
    pub fn score(&self) -> Option<(u32, u32)> {
        match (self.is_finished, self.home_score, self.away_score) {
            (true, Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home.is_team(team) || self.away.is_team(team)
    }

    /// Goals `(scored, conceded)` for `team` in this finished match. A walkover has
    /// no goals for anyone.
    pub fn goals_for_team(&self, team: TeamId) -> Option<(u32, u32)> {
        if self.is_walkover() {
            return None;
        }
        let (h, a) = self.score()?;
        if self.home.is_team(team) {
            Some((h, a))
        } else if self.away.is_team(team) {
            Some((a, h))
        } else {
            None
        }
    }

    /// Exactly one concrete team facing an empty bracket slot.
    pub fn is_walkover(&self) -> bool {
        matches!(
            (self.home, self.away),
            (Participant::Team(_), Participant::Tbd) | (Participant::Tbd, Participant::Team(_))
        )
    }

    /// Neither side is a concrete team; nothing can be played here.
    pub fn is_vacant(&self) -> bool {
        self.home.team_id().is_none() && self.away.team_id().is_none()
    }

    /// `(winner, loser)` of a finished match.
    ///
    /// Walkovers always go to the concrete team. A level score falls back on the
    /// advantage team when `use_advantage` is set; otherwise it has no winner.
    pub fn outcome(&self, use_advantage: bool) -> Option<(Participant, Participant)> {
        let (h, a) = self.score()?;
        if self.is_walkover() {
            return Some(match self.home {
                Participant::Team(_) => (self.home, self.away),
                _ => (self.away, self.home),
            });
        }
        match h.cmp(&a) {
            Ordering::Greater => Some((self.home, self.away)),
            Ordering::Less => Some((self.away, self.home)),
            Ordering::Equal => {
                let adv = self.advantage_team_id.filter(|_| use_advantage)?;
                if self.home.is_team(adv) {
                    Some((self.home, self.away))
                } else if self.away.is_team(adv) {
                    Some((self.away, self.home))
                } else {
                    None
                }
            }
        }
    }
}
