//! In-memory roster store: the single owner of the team and player collections.

use chrono::Utc;
use shared::{
    domain::{normalize_name, PhotoHandle, Player, PlayerId, Team, TeamId, TeamRemovalPolicy},
    error::RosterError,
    protocol::{PlayerView, RosterSnapshot, RosterView, TeamSummary},
};
use tracing::{debug, info, warn};

mod color;

pub use color::{ColorPicker, PaletteColorPicker, RandomColorPicker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Players cannot be created without a captured photo.
    pub require_photo: bool,
    pub team_removal: TeamRemovalPolicy,
}

/// Result of one batched assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    pub team_id: Option<TeamId>,
    pub assigned: Vec<PlayerId>,
    /// Ids that no longer exist in the store.
    pub skipped: Vec<PlayerId>,
}

pub struct RosterStore {
    teams: Vec<Team>,
    players: Vec<Player>,
    next_team_id: i64,
    next_player_id: i64,
    colors: Box<dyn ColorPicker>,
    options: StoreOptions,
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl std::fmt::Debug for RosterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterStore")
            .field("teams", &self.teams.len())
            .field("players", &self.players.len())
            .field("options", &self.options)
            .finish()
    }
}

impl RosterStore {
    pub fn new(options: StoreOptions) -> Self {
        Self::with_color_picker(options, RandomColorPicker)
    }

    pub fn with_color_picker(options: StoreOptions, colors: impl ColorPicker + 'static) -> Self {
        Self {
            teams: Vec::new(),
            players: Vec::new(),
            next_team_id: 1,
            next_player_id: 1,
            colors: Box::new(colors),
            options,
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn add_team(&mut self, name: &str) -> Result<Team, RosterError> {
        let Some(name) = normalize_name(name) else {
            warn!("rejected team without a name");
            return Err(RosterError::NameRequired);
        };

        let team = Team {
            id: TeamId(self.next_team_id),
            name,
            color: self.colors.pick(),
            created_at: Utc::now(),
        };
        self.next_team_id += 1;
        info!(team_id = %team.id, name = %team.name, color = %team.color, "team added");
        self.teams.push(team.clone());
        Ok(team)
    }

    /// Removes a team. An unknown id is a no-op and yields `Ok(None)`.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<Option<Team>, RosterError> {
        let Some(index) = self.teams.iter().position(|team| team.id == team_id) else {
            debug!(%team_id, "remove_team: no such team");
            return Ok(None);
        };

        let members: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|player| player.belongs_to(team_id))
            .map(|player| player.id)
            .collect();

        match self.options.team_removal {
            TeamRemovalPolicy::Reject if !members.is_empty() => {
                warn!(%team_id, players = members.len(), "refusing to remove team with players");
                return Err(RosterError::TeamHasPlayers {
                    team_id,
                    players: members,
                });
            }
            TeamRemovalPolicy::Cascade => {
                for player in self.players.iter_mut().filter(|p| p.belongs_to(team_id)) {
                    player.team_id = None;
                }
            }
            TeamRemovalPolicy::Retain | TeamRemovalPolicy::Reject => {}
        }

        let team = self.teams.remove(index);
        info!(
            %team_id,
            policy = ?self.options.team_removal,
            affected_players = members.len(),
            "team removed"
        );
        Ok(Some(team))
    }

    /// Creates a player. A `team_id` that does not resolve leaves the player without a team.
    pub fn add_player(
        &mut self,
        name: &str,
        photo: Option<PhotoHandle>,
        team_id: Option<TeamId>,
    ) -> Result<Player, RosterError> {
        let Some(name) = normalize_name(name) else {
            warn!("rejected player without a name");
            return Err(RosterError::NameRequired);
        };
        let photo = photo.filter(|handle| !handle.is_blank());
        if self.options.require_photo && photo.is_none() {
            warn!(%name, "rejected player without a photo");
            return Err(RosterError::PhotoRequired);
        }

        let team_id = match team_id {
            Some(id) if self.team(id).is_some() => Some(id),
            Some(id) => {
                debug!(team_id = %id, "add_player: team not found, creating without team");
                None
            }
            None => None,
        };

        let player = Player {
            id: PlayerId(self.next_player_id),
            name,
            photo,
            team_id,
            created_at: Utc::now(),
        };
        self.next_player_id += 1;
        info!(
            player_id = %player.id,
            name = %player.name,
            team_id = ?player.team_id,
            has_photo = player.photo.is_some(),
            "player added"
        );
        self.players.push(player.clone());
        Ok(player)
    }

    /// Removes a player. An unknown id is a no-op and yields `None`.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<Player> {
        let Some(index) = self.players.iter().position(|p| p.id == player_id) else {
            debug!(%player_id, "remove_player: no such player");
            return None;
        };
        let player = self.players.remove(index);
        info!(%player_id, "player removed");
        Some(player)
    }

    /// Points a player at a team (or clears it with `None`).
    ///
    /// Returns `false` without mutating when the player is unknown or the
    /// target team does not exist.
    pub fn set_player_team(&mut self, player_id: PlayerId, team_id: Option<TeamId>) -> bool {
        if let Some(id) = team_id {
            if self.team(id).is_none() {
                debug!(%player_id, team_id = %id, "set_player_team: no such team");
                return false;
            }
        }
        let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) else {
            debug!(%player_id, "set_player_team: no such player");
            return false;
        };
        player.team_id = team_id;
        info!(%player_id, team_id = ?team_id, "player team set");
        true
    }

    /// Assigns every listed player to `team_id` as one batch.
    ///
    /// The team is checked before anything is touched; players that have
    /// disappeared are reported in `skipped` instead of failing the batch.
    pub fn assign_players(
        &mut self,
        team_id: TeamId,
        player_ids: &[PlayerId],
    ) -> Result<AssignmentReport, RosterError> {
        if self.team(team_id).is_none() {
            warn!(%team_id, "assignment target team is gone");
            return Err(RosterError::TeamNotFound(team_id));
        }

        let mut report = AssignmentReport {
            team_id: Some(team_id),
            ..AssignmentReport::default()
        };
        for &player_id in player_ids {
            match self.players.iter_mut().find(|p| p.id == player_id) {
                Some(player) => {
                    player.team_id = Some(team_id);
                    report.assigned.push(player_id);
                }
                None => report.skipped.push(player_id),
            }
        }
        info!(
            %team_id,
            assigned = report.assigned.len(),
            skipped = report.skipped.len(),
            "players assigned"
        );
        Ok(report)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players whose reference equals `team_id`, in insertion order.
    pub fn players_of_team(&self, team_id: TeamId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.belongs_to(team_id))
            .collect()
    }

    pub fn unassigned_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.team_id.is_none())
            .collect()
    }

    /// Live lookup of a player's team; `None` when unassigned or dangling.
    pub fn resolve_team(&self, player: &Player) -> Option<&Team> {
        player.team_id.and_then(|team_id| self.team(team_id))
    }

    pub fn player_view(&self, player: &Player) -> PlayerView {
        PlayerView::new(player, self.resolve_team(player))
    }

    pub fn roster(&self, team_id: TeamId) -> Result<RosterView, RosterError> {
        let team = self
            .team(team_id)
            .ok_or(RosterError::TeamNotFound(team_id))?;
        Ok(RosterView {
            team: TeamSummary::from(team),
            players: self
                .players_of_team(team_id)
                .into_iter()
                .map(|player| PlayerView::new(player, Some(team)))
                .collect(),
        })
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            teams: self.teams.iter().map(TeamSummary::from).collect(),
            players: self
                .players
                .iter()
                .map(|player| self.player_view(player))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
