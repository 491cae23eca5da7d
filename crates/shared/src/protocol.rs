use serde::{Deserialize, Serialize};

use crate::domain::{PhotoHandle, Player, PlayerId, Team, TeamColor, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub name: String,
    pub color: TeamColor,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            color: team.color.clone(),
        }
    }
}

/// A player as a card renders it: the team is resolved live, so a dangling
/// reference shows up as `team_id` set with `team` absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSummary>,
}

impl PlayerView {
    pub fn new(player: &Player, team: Option<&Team>) -> Self {
        Self {
            player_id: player.id,
            name: player.name.clone(),
            photo: player.photo.clone(),
            team_id: player.team_id,
            team: team.map(TeamSummary::from),
        }
    }

    pub fn has_dangling_team(&self) -> bool {
        self.team_id.is_some() && self.team.is_none()
    }
}

/// One entry of the team picker in the add-player form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOption {
    pub label: String,
    #[serde(default)]
    pub value: Option<TeamId>,
}

impl TeamOption {
    pub const NO_TEAM_LABEL: &'static str = "No team";

    pub fn no_team() -> Self {
        Self {
            label: Self::NO_TEAM_LABEL.to_string(),
            value: None,
        }
    }
}

impl From<&Team> for TeamOption {
    fn from(team: &Team) -> Self {
        Self {
            label: team.name.clone(),
            value: Some(team.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    pub team: TeamSummary,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub teams: Vec<TeamSummary>,
    pub players: Vec<PlayerView>,
}
