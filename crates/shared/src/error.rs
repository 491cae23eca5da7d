use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    Conflict,
    SelectionDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("name required")]
    NameRequired,
    #[error("photo required")]
    PhotoRequired,
    #[error("team {0} not found")]
    TeamNotFound(TeamId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("team {team_id} still has {} assigned player(s)", players.len())]
    TeamHasPlayers {
        team_id: TeamId,
        players: Vec<PlayerId>,
    },
    #[error("selection is not active")]
    SelectionDisabled,
    #[error("select a team before picking players")]
    NoTeamSelected,
}

impl RosterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NameRequired | Self::PhotoRequired => ErrorCode::Validation,
            Self::TeamNotFound(_) | Self::PlayerNotFound(_) => ErrorCode::NotFound,
            Self::TeamHasPlayers { .. } => ErrorCode::Conflict,
            Self::SelectionDisabled | Self::NoTeamSelected => ErrorCode::SelectionDisabled,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }
}

/// Serializable form of a [`RosterError`] for whatever renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&RosterError> for ErrorReport {
    fn from(value: &RosterError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<RosterError> for ErrorReport {
    fn from(value: RosterError) -> Self {
        Self::from(&value)
    }
}
