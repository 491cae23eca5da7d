//! The object the presentation layer holds for the lifetime of the app.

use shared::{
    domain::{PhotoHandle, Player, PlayerId, Team, TeamId},
    error::RosterError,
    protocol::{PlayerView, RosterSnapshot, RosterView, TeamOption},
};
use storage::{RosterStore, StoreOptions};
use tracing::debug;

use crate::assignment::{AssignmentWorkflow, CommitOutcome};

/// Owns the store plus the assignment workflow layered over it.
#[derive(Debug, Default)]
pub struct RosterSession {
    store: RosterStore,
    assignment: AssignmentWorkflow,
}

impl RosterSession {
    pub fn new(options: StoreOptions) -> Self {
        Self::with_store(RosterStore::new(options))
    }

    pub fn with_store(store: RosterStore) -> Self {
        Self {
            store,
            assignment: AssignmentWorkflow::new(),
        }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn assignment(&self) -> &AssignmentWorkflow {
        &self.assignment
    }

    pub fn add_team(&mut self, name: &str) -> Result<Team, RosterError> {
        self.store.add_team(name)
    }

    pub fn remove_team(&mut self, team_id: TeamId) -> Result<Option<Team>, RosterError> {
        let removed = self.store.remove_team(team_id)?;
        if removed.is_some() {
            self.assignment.forget_team(team_id);
        }
        Ok(removed)
    }

    pub fn add_player(
        &mut self,
        name: &str,
        photo: Option<PhotoHandle>,
        team_id: Option<TeamId>,
    ) -> Result<Player, RosterError> {
        self.store.add_player(name, photo, team_id)
    }

    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<Player> {
        let removed = self.store.remove_player(player_id);
        if removed.is_some() {
            self.assignment.forget_player(player_id);
        }
        removed
    }

    pub fn set_player_team(&mut self, player_id: PlayerId, team_id: Option<TeamId>) -> bool {
        self.store.set_player_team(player_id, team_id)
    }

    pub fn begin_selection(&mut self) {
        self.assignment.begin_selection();
    }

    pub fn select_team(&mut self, team_id: TeamId) -> Result<(), RosterError> {
        if !self.assignment.is_selecting() {
            return Err(RosterError::SelectionDisabled);
        }
        if self.store.team(team_id).is_none() {
            return Err(RosterError::TeamNotFound(team_id));
        }
        self.assignment.select_team(team_id)
    }

    pub fn toggle_player(&mut self, player_id: PlayerId) -> Result<bool, RosterError> {
        if self.assignment.can_select_players() && self.store.player(player_id).is_none() {
            return Err(RosterError::PlayerNotFound(player_id));
        }
        self.assignment.toggle_player(player_id)
    }

    pub fn commit(&mut self) -> Result<Option<CommitOutcome>, RosterError> {
        self.assignment.commit(&mut self.store)
    }

    pub fn cancel(&mut self) {
        self.assignment.cancel();
    }

    /// Entries for the team picker: "no team" first, then every team in creation order.
    pub fn team_options(&self) -> Vec<TeamOption> {
        std::iter::once(TeamOption::no_team())
            .chain(self.store.teams().iter().map(TeamOption::from))
            .collect()
    }

    pub fn player_views(&self) -> Vec<PlayerView> {
        self.store
            .players()
            .iter()
            .map(|player| self.store.player_view(player))
            .collect()
    }

    pub fn roster(&self, team_id: TeamId) -> Result<RosterView, RosterError> {
        self.store.roster(team_id)
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.store.snapshot()
    }

    /// Creates the player described by `draft`, clearing the draft on success.
    pub fn submit_player(&mut self, draft: &mut PlayerDraft) -> Result<Player, RosterError> {
        let player = self
            .store
            .add_player(&draft.name, draft.photo.clone(), draft.team)?;
        debug!(player_id = %player.id, "player draft submitted");
        draft.clear();
        Ok(player)
    }
}

/// Contents of the add-player form while it is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub photo: Option<PhotoHandle>,
    pub team: Option<TeamId>,
}

impl PlayerDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: Option<TeamId>) -> Self {
        self.team = team;
        self
    }

    /// Called by the camera once a picture has been taken.
    pub fn attach_photo(&mut self, photo: PhotoHandle) {
        self.photo = Some(photo);
    }

    pub fn choose(&mut self, option: &TeamOption) {
        self.team = option.value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
