use super::*;
use shared::domain::TeamColor;
use storage::{PaletteColorPicker, StoreOptions};

fn store() -> RosterStore {
    let palette = PaletteColorPicker::new(vec![TeamColor::from_rgb(0x43, 0xA0, 0x47)]).expect("palette");
    RosterStore::with_color_picker(StoreOptions::default(), palette)
}

#[test]
fn starts_idle_with_selection_disabled() {
    let mut workflow = AssignmentWorkflow::new();
    assert_eq!(workflow.state(), &AssignmentState::Idle);
    assert!(!workflow.can_select_players());
    assert_eq!(workflow.select_team(TeamId(1)), Err(RosterError::SelectionDisabled));
    assert_eq!(workflow.toggle_player(PlayerId(1)), Err(RosterError::SelectionDisabled));
}

#[test]
fn players_need_a_team_first() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();

    assert_eq!(workflow.toggle_player(PlayerId(1)), Err(RosterError::NoTeamSelected));
    workflow.select_team(TeamId(1)).expect("team");
    assert!(workflow.can_select_players());
    assert_eq!(workflow.toggle_player(PlayerId(1)), Ok(true));
}

#[test]
fn selecting_another_team_replaces_the_first() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(TeamId(1)).expect("first");
    workflow.select_team(TeamId(2)).expect("second");
    assert_eq!(workflow.selected_team(), Some(TeamId(2)));
}

#[test]
fn toggling_twice_deselects_and_keeps_order() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(TeamId(1)).expect("team");

    workflow.toggle_player(PlayerId(3)).expect("3");
    workflow.toggle_player(PlayerId(1)).expect("1");
    workflow.toggle_player(PlayerId(2)).expect("2");
    assert_eq!(workflow.toggle_player(PlayerId(1)), Ok(false));

    assert_eq!(workflow.selected_players(), &[PlayerId(3), PlayerId(2)]);
    assert!(!workflow.is_player_selected(PlayerId(1)));
}

#[test]
fn begin_selection_twice_keeps_current_selection() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(TeamId(1)).expect("team");
    workflow.begin_selection();
    assert_eq!(workflow.selected_team(), Some(TeamId(1)));
}

#[test]
fn cancel_is_idempotent_and_never_touches_the_store() {
    let mut store = store();
    let lions = store.add_team("Lions").expect("lions");
    let ana = store.add_player("Ana", None, None).expect("ana");

    let mut workflow = AssignmentWorkflow::new();
    workflow.cancel();
    workflow.cancel();
    assert_eq!(workflow.state(), &AssignmentState::Idle);

    workflow.begin_selection();
    workflow.select_team(lions.id).expect("team");
    workflow.toggle_player(ana.id).expect("ana");
    workflow.cancel();

    assert_eq!(workflow.state(), &AssignmentState::Idle);
    assert_eq!(store.player(ana.id).expect("ana").team_id, None);
}

#[test]
fn commit_assigns_selected_players_and_resets() {
    let mut store = store();
    let lions = store.add_team("Lions").expect("lions");
    let ana = store.add_player("Ana", None, None).expect("ana");
    let bo = store.add_player("Bo", None, None).expect("bo");

    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(lions.id).expect("team");
    workflow.toggle_player(ana.id).expect("ana");

    let outcome = workflow
        .commit(&mut store)
        .expect("commit")
        .expect("outcome");

    assert_eq!(outcome.report.assigned, vec![ana.id]);
    assert_eq!(outcome.roster.team.team_id, lions.id);
    assert_eq!(outcome.roster.players.len(), 1);
    assert_eq!(workflow.state(), &AssignmentState::Idle);
    assert_eq!(store.player(bo.id).expect("bo").team_id, None);
}

#[test]
fn commit_without_team_is_a_noop() {
    let mut store = store();
    let mut workflow = AssignmentWorkflow::new();

    assert_eq!(workflow.commit(&mut store), Ok(None));

    workflow.begin_selection();
    assert_eq!(workflow.commit(&mut store), Ok(None));
    assert!(workflow.is_selecting());
}

#[test]
fn commit_onto_vanished_team_keeps_selection_open() {
    let mut store = store();
    let lions = store.add_team("Lions").expect("lions");
    let ana = store.add_player("Ana", None, None).expect("ana");

    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(lions.id).expect("team");
    workflow.toggle_player(ana.id).expect("ana");
    store.remove_team(lions.id).expect("remove");

    assert_eq!(
        workflow.commit(&mut store),
        Err(RosterError::TeamNotFound(lions.id))
    );
    assert!(workflow.is_selecting());
    assert_eq!(store.player(ana.id).expect("ana").team_id, None);
}

#[test]
fn forget_evicts_removed_entities_from_selection() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(TeamId(1)).expect("team");
    workflow.toggle_player(PlayerId(5)).expect("5");
    workflow.toggle_player(PlayerId(6)).expect("6");

    workflow.forget_player(PlayerId(5));
    workflow.forget_team(TeamId(2));
    assert_eq!(workflow.selected_team(), Some(TeamId(1)));
    assert_eq!(workflow.selected_players(), &[PlayerId(6)]);

    workflow.forget_team(TeamId(1));
    assert_eq!(workflow.selected_team(), None);
    assert!(!workflow.can_select_players());
}

#[test]
fn state_serializes_with_tag() {
    let mut workflow = AssignmentWorkflow::new();
    workflow.begin_selection();
    workflow.select_team(TeamId(7)).expect("team");

    let json = serde_json::to_value(workflow.state()).expect("json");
    assert_eq!(json["state"], "selecting");
    assert_eq!(json["selected_team"], 7);
}
