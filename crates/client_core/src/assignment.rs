//! Select-then-commit workflow that assigns a batch of players to one team.

use serde::Serialize;
use shared::{
    domain::{PlayerId, TeamId},
    error::RosterError,
    protocol::RosterView,
};
use storage::{AssignmentReport, RosterStore};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AssignmentState {
    #[default]
    Idle,
    Selecting {
        selected_team: Option<TeamId>,
        /// Selection order, no duplicates.
        selected_players: Vec<PlayerId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub report: AssignmentReport,
    /// The team's roster as it stands right after the commit.
    pub roster: RosterView,
}

#[derive(Debug, Default)]
pub struct AssignmentWorkflow {
    state: AssignmentState,
}

impl AssignmentWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AssignmentState {
        &self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, AssignmentState::Selecting { .. })
    }

    pub fn selected_team(&self) -> Option<TeamId> {
        match &self.state {
            AssignmentState::Selecting { selected_team, .. } => *selected_team,
            AssignmentState::Idle => None,
        }
    }

    pub fn selected_players(&self) -> &[PlayerId] {
        match &self.state {
            AssignmentState::Selecting {
                selected_players, ..
            } => selected_players,
            AssignmentState::Idle => &[],
        }
    }

    pub fn is_player_selected(&self, player_id: PlayerId) -> bool {
        self.selected_players().contains(&player_id)
    }

    /// Player cards accept taps only once a team has been picked.
    pub fn can_select_players(&self) -> bool {
        self.selected_team().is_some()
    }

    pub fn begin_selection(&mut self) {
        if self.is_selecting() {
            return;
        }
        self.state = AssignmentState::Selecting {
            selected_team: None,
            selected_players: Vec::new(),
        };
        debug!("assignment selection started");
    }

    /// Marks `team_id` as the target, replacing any previous choice.
    pub fn select_team(&mut self, team_id: TeamId) -> Result<(), RosterError> {
        let AssignmentState::Selecting { selected_team, .. } = &mut self.state else {
            return Err(RosterError::SelectionDisabled);
        };
        *selected_team = Some(team_id);
        debug!(%team_id, "assignment team selected");
        Ok(())
    }

    /// Flips the selection of a player and returns whether it is now selected.
    pub fn toggle_player(&mut self, player_id: PlayerId) -> Result<bool, RosterError> {
        let AssignmentState::Selecting {
            selected_team,
            selected_players,
        } = &mut self.state
        else {
            return Err(RosterError::SelectionDisabled);
        };
        if selected_team.is_none() {
            return Err(RosterError::NoTeamSelected);
        }

        if let Some(index) = selected_players.iter().position(|id| *id == player_id) {
            selected_players.remove(index);
            debug!(%player_id, "assignment player deselected");
            Ok(false)
        } else {
            selected_players.push(player_id);
            debug!(%player_id, "assignment player selected");
            Ok(true)
        }
    }

    /// Applies the selection to `store` and returns to idle.
    ///
    /// Without an active selection or a chosen team this does nothing and
    /// yields `Ok(None)`. If the chosen team has vanished the store is left
    /// untouched and the selection stays open so another team can be picked.
    pub fn commit(&mut self, store: &mut RosterStore) -> Result<Option<CommitOutcome>, RosterError> {
        let AssignmentState::Selecting {
            selected_team: Some(team_id),
            selected_players,
        } = &self.state
        else {
            debug!("assignment commit ignored: nothing to commit");
            return Ok(None);
        };
        let team_id = *team_id;

        let report = store.assign_players(team_id, selected_players)?;
        let roster = store.roster(team_id)?;
        self.state = AssignmentState::Idle;
        info!(
            %team_id,
            assigned = report.assigned.len(),
            skipped = report.skipped.len(),
            "assignment committed"
        );
        Ok(Some(CommitOutcome { report, roster }))
    }

    /// Drops the selection without touching the store. Safe to call at any time.
    pub fn cancel(&mut self) {
        if self.is_selecting() {
            debug!("assignment selection cancelled");
        }
        self.state = AssignmentState::Idle;
    }

    /// Evicts a team that was removed while selecting.
    pub fn forget_team(&mut self, team_id: TeamId) {
        if let AssignmentState::Selecting { selected_team, .. } = &mut self.state {
            if *selected_team == Some(team_id) {
                *selected_team = None;
            }
        }
    }

    /// Evicts a player that was removed while selecting.
    pub fn forget_player(&mut self, player_id: PlayerId) {
        if let AssignmentState::Selecting {
            selected_players, ..
        } = &mut self.state
        {
            selected_players.retain(|id| *id != player_id);
        }
    }
}

#[cfg(test)]
#[path = "tests/assignment_tests.rs"]
mod tests;
