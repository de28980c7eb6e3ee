//! Tournament aggregate root, its settings, and setup-time editing.

use crate::models::error::TournamentError;
use crate::models::fixture::{Match, MatchId, Stage};
use crate::models::ids::IdGenerator;
use crate::models::team::{PlayerId, RosterPlayer, Team, TeamId, MAX_ROSTER_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Overall competition format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    #[default]
    League,
    GroupsKnockout,
    Knockout,
}

/// One criterion of the ranking policy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieBreakRule {
    Points,
    GoalDiff,
    GoalsFor,
    Wins,
    HeadToHead,
    #[serde(rename = "H2H_GOAL_DIFF")]
    H2hGoalDiff,
    #[serde(rename = "H2H_GOALS_FOR")]
    H2hGoalsFor,
    Percentage,
    AwayGoals,
}

/// How group survivors are ordered into the first knockout round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnockoutLogic {
    /// Cross pairing between neighbouring groups: 1st of one vs 2nd of the other.
    #[default]
    Olympic,
    /// Global ranking of all survivors, best vs worst.
    Efficiency,
}

/// Configuration chosen when the tournament is created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    pub format: TournamentFormat,
    pub max_tables: u32,
    pub num_groups: u32,
    pub advance_count_per_group: u32,
    /// POINTS is always applied first, whether listed or not.
    pub tie_break_rules: Vec<TieBreakRule>,
    pub use_knockout_advantage: bool,
    pub knockout_logic: KnockoutLogic,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            format: TournamentFormat::League,
            max_tables: 1,
            num_groups: 2,
            advance_count_per_group: 2,
            tie_break_rules: vec![TieBreakRule::Wins, TieBreakRule::GoalDiff, TieBreakRule::Percentage],
            use_knockout_advantage: false,
            knockout_logic: KnockoutLogic::Olympic,
        }
    }
}

impl TournamentSettings {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.max_tables == 0 {
            return Err(TournamentError::InvalidSettings("max_tables must be at least 1".into()));
        }
        if self.num_groups == 0 {
            return Err(TournamentError::InvalidSettings("num_groups must be at least 1".into()));
        }
        if self.advance_count_per_group == 0 {
            return Err(TournamentError::InvalidSettings(
                "advance_count_per_group must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Current phase, derived from the matches rather than stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding teams; no matches yet.
    Setup,
    LeagueInProgress,
    GroupInProgress,
    /// Earliest knockout stage that still has unfinished matches.
    KnockoutInProgress(Stage),
    Finished,
}

/// The whole tournament document: settings, teams, and every match ever generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// What a playing venue is called in this tournament ("Table", "Court", ...).
    pub location_label: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
    #[serde(flatten)]
    pub settings: TournamentSettings,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub is_finished: bool,
}

impl Tournament {
    /// Create a new tournament with no teams and no matches.
    pub fn new(name: impl Into<String>, settings: TournamentSettings, ids: &mut impl IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            location_label: "Table".to_string(),
            created_at: Utc::now(),
            slogan: None,
            settings,
            teams: Vec::new(),
            matches: Vec::new(),
            is_finished: false,
        }
    }

    pub fn state(&self) -> TournamentState {
        if self.is_finished {
            return TournamentState::Finished;
        }
        if self.matches.is_empty() {
            return TournamentState::Setup;
        }
        let current = self
            .matches
            .iter()
            .filter(|m| !m.is_finished && !m.is_vacant())
            .map(|m| m.stage)
            .min()
            .or_else(|| self.matches.last().map(|m| m.stage));
        match current {
            Some(Stage::League) => TournamentState::LeagueInProgress,
            Some(Stage::Group) => TournamentState::GroupInProgress,
            Some(stage) => TournamentState::KnockoutInProgress(stage),
            None => TournamentState::Setup,
        }
    }

    pub fn has_started(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Display name for a participant slot.
    pub fn team_name(&self, id: TeamId) -> &str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or("?")
    }

    fn ensure_setup(&self) -> Result<(), TournamentError> {
        if self.has_started() {
            return Err(TournamentError::AlreadyStarted);
        }
        Ok(())
    }

    fn ensure_unique_name(&self, name: &str, except: Option<TeamId>) -> Result<(), TournamentError> {
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| Some(t.id) != except && t.has_name(name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        Ok(())
    }

    /// Add a team (Setup only). Names are trimmed and unique, case-insensitive.
    pub fn add_team(&mut self, name: &str, ids: &mut impl IdGenerator) -> Result<TeamId, TournamentError> {
        self.ensure_setup()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        self.ensure_unique_name(name, None)?;
        let id = ids.next_id();
        self.teams.push(Team::new(id, name));
        Ok(id)
    }

    /// Remove a team by id (Setup only).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Rename a team. Allowed at any time; membership is what freezes at start.
    pub fn rename_team(&mut self, team_id: TeamId, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        self.ensure_unique_name(name, Some(team_id))?;
        let team = self
            .get_team_mut(team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.name = name.to_string();
        Ok(())
    }

    pub fn set_team_logo(&mut self, team_id: TeamId, logo: Option<String>) -> Result<(), TournamentError> {
        let team = self
            .get_team_mut(team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.logo = logo;
        Ok(())
    }

    /// Add a player to a team roster. At most 15 players, shirt numbers unique per team.
    pub fn add_roster_player(
        &mut self,
        team_id: TeamId,
        name: &str,
        number: u32,
        ids: &mut impl IdGenerator,
    ) -> Result<PlayerId, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let team = self
            .get_team_mut(team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        if team.players.len() >= MAX_ROSTER_SIZE {
            return Err(TournamentError::RosterFull { max: MAX_ROSTER_SIZE });
        }
        if team.players.iter().any(|p| p.number == number) {
            return Err(TournamentError::DuplicatePlayerNumber(number));
        }
        let id = ids.next_id();
        team.players.push(RosterPlayer {
            id,
            name: name.to_string(),
            number,
        });
        Ok(id)
    }

    pub fn remove_roster_player(&mut self, team_id: TeamId, player_id: PlayerId) -> Result<(), TournamentError> {
        let team = self
            .get_team_mut(team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        let idx = team
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        team.players.remove(idx);
        Ok(())
    }

    /// Replace the settings (Setup only).
    pub fn update_settings(&mut self, settings: TournamentSettings) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}
