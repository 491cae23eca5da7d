//! Line-oriented command shell standing in for the mobile screens.

use clap::{Parser, Subcommand};
use client_core::{AssignmentReport, AssignmentState, PlayerDraft, RosterSession};
use serde::Serialize;
use shared::{
    domain::{PhotoHandle, Player, PlayerId, Team, TeamId},
    error::{ErrorReport, RosterError},
    protocol::{RosterSnapshot, RosterView, TeamOption},
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(subcommand)]
    Team(TeamCommand),
    #[command(subcommand)]
    Player(PlayerCommand),
    #[command(subcommand)]
    Assign(AssignCommand),
    /// Show all teams and players.
    List,
    /// Show the players of one team.
    Roster { team_id: i64 },
    /// Show the team picker entries of the add-player form.
    Options,
}

#[derive(Subcommand, Debug)]
enum TeamCommand {
    Add {
        #[arg(num_args = 0..)]
        name: Vec<String>,
    },
    Rm {
        team_id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PlayerCommand {
    Add {
        #[arg(num_args = 0..)]
        name: Vec<String>,
        #[arg(long)]
        photo: Option<String>,
        #[arg(long)]
        team: Option<i64>,
    },
    Rm {
        player_id: i64,
    },
    /// Move a player to a team, or out of any team when no team is given.
    Team {
        player_id: i64,
        team_id: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum AssignCommand {
    Begin,
    Team { team_id: i64 },
    Toggle { player_id: i64 },
    Commit,
    Cancel,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Reply {
    TeamAdded(Team),
    TeamRemoved { team_id: TeamId, removed: bool },
    PlayerAdded(Player),
    PlayerRemoved { player_id: PlayerId, removed: bool },
    PlayerTeamSet { player_id: PlayerId, applied: bool },
    Snapshot(RosterSnapshot),
    Roster(RosterView),
    Options(Vec<TeamOption>),
    Selection(AssignmentState),
    PlayerToggled { player_id: PlayerId, selected: bool },
    Committed {
        #[serde(skip_serializing_if = "Option::is_none")]
        skipped: Option<Vec<PlayerId>>,
        roster: RosterView,
    },
    NothingToCommit,
    Error(ErrorReport),
    Usage(String),
}

pub struct Shell {
    session: RosterSession,
    json: bool,
}

impl Shell {
    pub fn new(session: RosterSession, json: bool) -> Self {
        Self { session, json }
    }

    pub fn session(&self) -> &RosterSession {
        &self.session
    }

    /// Runs one input line; blank lines and `#` comments produce no output.
    pub fn run_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let reply = self.dispatch(line);
        Some(self.render(&reply))
    }

    pub fn dispatch(&mut self, line: &str) -> Reply {
        let Some(words) = shlex::split(line) else {
            return Reply::Usage(format!("error: unbalanced quotes in '{line}'"));
        };
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(error) => return Reply::Usage(error.render().to_string().trim_end().to_string()),
        };
        match self.execute(parsed.command) {
            Ok(reply) => reply,
            Err(error) => {
                debug!(%error, line, "command rejected");
                Reply::Error(ErrorReport::from(&error))
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Reply, RosterError> {
        let reply = match command {
            ShellCommand::Team(TeamCommand::Add { name }) => {
                Reply::TeamAdded(self.session.add_team(&name.join(" "))?)
            }
            ShellCommand::Team(TeamCommand::Rm { team_id }) => {
                let team_id = TeamId(team_id);
                let removed = self.session.remove_team(team_id)?.is_some();
                Reply::TeamRemoved { team_id, removed }
            }
            ShellCommand::Player(PlayerCommand::Add { name, photo, team }) => {
                let mut draft = PlayerDraft::new(name.join(" ")).with_team(team.map(TeamId));
                if let Some(uri) = photo {
                    draft.attach_photo(PhotoHandle::new(uri));
                }
                Reply::PlayerAdded(self.session.submit_player(&mut draft)?)
            }
            ShellCommand::Player(PlayerCommand::Rm { player_id }) => {
                let player_id = PlayerId(player_id);
                let removed = self.session.remove_player(player_id).is_some();
                Reply::PlayerRemoved { player_id, removed }
            }
            ShellCommand::Player(PlayerCommand::Team { player_id, team_id }) => {
                let player_id = PlayerId(player_id);
                let applied = self.session.set_player_team(player_id, team_id.map(TeamId));
                Reply::PlayerTeamSet { player_id, applied }
            }
            ShellCommand::Assign(AssignCommand::Begin) => {
                self.session.begin_selection();
                Reply::Selection(self.session.assignment().state().clone())
            }
            ShellCommand::Assign(AssignCommand::Team { team_id }) => {
                self.session.select_team(TeamId(team_id))?;
                Reply::Selection(self.session.assignment().state().clone())
            }
            ShellCommand::Assign(AssignCommand::Toggle { player_id }) => {
                let player_id = PlayerId(player_id);
                let selected = self.session.toggle_player(player_id)?;
                Reply::PlayerToggled {
                    player_id,
                    selected,
                }
            }
            ShellCommand::Assign(AssignCommand::Commit) => match self.session.commit()? {
                Some(outcome) => Reply::Committed {
                    skipped: skipped(&outcome.report),
                    roster: outcome.roster,
                },
                None => Reply::NothingToCommit,
            },
            ShellCommand::Assign(AssignCommand::Cancel) => {
                self.session.cancel();
                Reply::Selection(self.session.assignment().state().clone())
            }
            ShellCommand::List => Reply::Snapshot(self.session.snapshot()),
            ShellCommand::Roster { team_id } => Reply::Roster(self.session.roster(TeamId(team_id))?),
            ShellCommand::Options => Reply::Options(self.session.team_options()),
        };
        Ok(reply)
    }

    fn render(&self, reply: &Reply) -> String {
        if self.json {
            return serde_json::to_string(reply).unwrap_or_else(|error| {
                format!("{{\"type\":\"error\",\"payload\":{{\"message\":\"{error}\"}}}}")
            });
        }
        render_text(reply)
    }
}

fn skipped(report: &AssignmentReport) -> Option<Vec<PlayerId>> {
    (!report.skipped.is_empty()).then(|| report.skipped.clone())
}

fn render_text(reply: &Reply) -> String {
    match reply {
        Reply::TeamAdded(team) => format!("added team {} {} ({})", team.id, team.name, team.color),
        Reply::TeamRemoved { team_id, removed } => removal_text("team", team_id.0, *removed),
        Reply::PlayerAdded(player) => {
            let team = player
                .team_id
                .map(|id| format!(" in team {id}"))
                .unwrap_or_default();
            format!("added player {} {}{team}", player.id, player.name)
        }
        Reply::PlayerRemoved { player_id, removed } => {
            removal_text("player", player_id.0, *removed)
        }
        Reply::PlayerTeamSet { player_id, applied } => {
            if *applied {
                format!("player {player_id} updated")
            } else {
                format!("player {player_id} unchanged")
            }
        }
        Reply::Snapshot(snapshot) => {
            let mut lines = vec![format!("teams ({}):", snapshot.teams.len())];
            lines.extend(
                snapshot
                    .teams
                    .iter()
                    .map(|team| format!("  {} {} ({})", team.team_id, team.name, team.color)),
            );
            lines.push(format!("players ({}):", snapshot.players.len()));
            lines.extend(snapshot.players.iter().map(|player| {
                let team = match (&player.team, player.team_id) {
                    (Some(team), _) => team.name.clone(),
                    (None, Some(id)) => format!("removed team {id}"),
                    (None, None) => "-".to_string(),
                };
                let photo = player
                    .photo
                    .as_ref()
                    .map(|photo| format!(" [{photo}]"))
                    .unwrap_or_default();
                format!("  {} {} <{team}>{photo}", player.player_id, player.name)
            }));
            lines.join("\n")
        }
        Reply::Roster(roster) => roster_text(roster),
        Reply::Options(options) => options
            .iter()
            .map(|option| match option.value {
                Some(id) => format!("  {id}: {}", option.label),
                None => format!("  -: {}", option.label),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::Selection(AssignmentState::Idle) => "selection off".to_string(),
        Reply::Selection(AssignmentState::Selecting {
            selected_team,
            selected_players,
        }) => {
            let team = selected_team
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string());
            format!(
                "selecting: team {team}, {} player(s)",
                selected_players.len()
            )
        }
        Reply::PlayerToggled {
            player_id,
            selected,
        } => {
            let verb = if *selected { "selected" } else { "deselected" };
            format!("player {player_id} {verb}")
        }
        Reply::Committed { skipped, roster } => {
            let mut text = roster_text(roster);
            if let Some(skipped) = skipped {
                let ids: Vec<String> = skipped.iter().map(ToString::to_string).collect();
                text.push_str(&format!("\nskipped missing player(s): {}", ids.join(", ")));
            }
            text
        }
        Reply::NothingToCommit => "nothing to commit".to_string(),
        Reply::Error(report) => format!("error: {}", report.message),
        Reply::Usage(usage) => usage.clone(),
    }
}

fn removal_text(kind: &str, id: i64, removed: bool) -> String {
    if removed {
        format!("removed {kind} {id}")
    } else {
        format!("no {kind} {id}")
    }
}

fn roster_text(roster: &RosterView) -> String {
    let names: Vec<&str> = roster.players.iter().map(|p| p.name.as_str()).collect();
    format!(
        "{} ({}): {}",
        roster.team.name,
        roster.team.color,
        if names.is_empty() {
            "no players".to_string()
        } else {
            names.join(", ")
        }
    )
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
