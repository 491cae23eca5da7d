use super::*;
use client_core::{PaletteColorPicker, RosterStore, StoreOptions};
use shared::domain::TeamColor;

fn shell(options: StoreOptions, json: bool) -> Shell {
    let palette = PaletteColorPicker::new(vec![TeamColor::from_rgb(0xD8, 0x1B, 0x60)]).expect("palette");
    Shell::new(
        RosterSession::with_store(RosterStore::with_color_picker(options, palette)),
        json,
    )
}

fn run(shell: &mut Shell, line: &str) -> String {
    shell.run_line(line).expect("output")
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let mut shell = shell(StoreOptions::default(), false);
    assert_eq!(shell.run_line(""), None);
    assert_eq!(shell.run_line("   # setup"), None);
}

#[test]
fn assignment_session_end_to_end() {
    let mut shell = shell(StoreOptions::default(), false);

    assert_eq!(run(&mut shell, "team add Lions"), "added team 1 Lions (#D81B60)");
    assert_eq!(run(&mut shell, "player add Ana"), "added player 1 Ana");
    assert_eq!(run(&mut shell, "player add Bo"), "added player 2 Bo");
    assert_eq!(run(&mut shell, "assign begin"), "selecting: team none, 0 player(s)");
    assert_eq!(
        run(&mut shell, "assign toggle 1"),
        "error: select a team before picking players"
    );
    assert_eq!(run(&mut shell, "assign team 1"), "selecting: team 1, 0 player(s)");
    assert_eq!(run(&mut shell, "assign toggle 1"), "player 1 selected");
    assert_eq!(run(&mut shell, "assign commit"), "Lions (#D81B60): Ana");
    assert_eq!(run(&mut shell, "assign commit"), "nothing to commit");
    assert_eq!(run(&mut shell, "roster 1"), "Lions (#D81B60): Ana");

    let store = shell.session().store();
    assert_eq!(store.player(PlayerId(2)).expect("bo").team_id, None);
}

#[test]
fn validation_errors_are_reported_inline() {
    let mut shell = shell(
        StoreOptions {
            require_photo: true,
            ..StoreOptions::default()
        },
        false,
    );

    assert_eq!(run(&mut shell, "team add"), "error: name required");
    assert_eq!(run(&mut shell, "player add Cat"), "error: photo required");
    assert_eq!(
        run(&mut shell, "player add Cat --photo file://x.jpg"),
        "added player 1 Cat"
    );
    assert_eq!(shell.session().store().team_count(), 0);
}

#[test]
fn removals_of_unknown_ids_are_noops() {
    let mut shell = shell(StoreOptions::default(), false);
    assert_eq!(run(&mut shell, "team rm 4"), "no team 4");
    assert_eq!(run(&mut shell, "player rm 4"), "no player 4");
}

#[test]
fn list_marks_removed_teams() {
    let mut shell = shell(StoreOptions::default(), false);
    run(&mut shell, "team add Lions");
    run(&mut shell, "player add Ana --team 1 --photo file://ana.jpg");
    run(&mut shell, "team rm 1");

    assert_eq!(
        run(&mut shell, "list"),
        "teams (0):\nplayers (1):\n  1 Ana <removed team 1> [file://ana.jpg]"
    );
}

#[test]
fn options_start_with_no_team() {
    let mut shell = shell(StoreOptions::default(), false);
    run(&mut shell, "team add Red Wolves");
    assert_eq!(run(&mut shell, "options"), "  -: No team\n  1: Red Wolves");
}

#[test]
fn unknown_commands_print_usage() {
    let mut shell = shell(StoreOptions::default(), false);
    let output = run(&mut shell, "dance");
    assert!(output.contains("unrecognized subcommand"), "{output}");
}

#[test]
fn json_mode_emits_tagged_replies() {
    let mut shell = shell(StoreOptions::default(), true);

    let added: serde_json::Value =
        serde_json::from_str(&run(&mut shell, "team add Lions")).expect("json");
    assert_eq!(added["type"], "team_added");
    assert_eq!(added["payload"]["name"], "Lions");

    let error: serde_json::Value =
        serde_json::from_str(&run(&mut shell, "assign team 1")).expect("json");
    assert_eq!(error["type"], "error");
    assert_eq!(error["payload"]["code"], "selection_disabled");
}

#[test]
fn quoted_photo_handle_is_kept_whole() {
    let mut shell = shell(StoreOptions::default(), false);
    assert_eq!(
        run(&mut shell, "player add Ana --photo \"file://my photo.jpg\""),
        "added player 1 Ana"
    );

    let ana = shell.session().store().player(PlayerId(1)).expect("ana");
    assert_eq!(ana.name, "Ana");
    assert_eq!(
        ana.photo.as_ref().map(PhotoHandle::as_str),
        Some("file://my photo.jpg")
    );
}

#[test]
fn quoted_names_keep_inner_spacing() {
    let mut shell = shell(StoreOptions::default(), false);
    assert_eq!(
        run(&mut shell, "team add 'Red   Wolves'"),
        "added team 1 Red   Wolves (#D81B60)"
    );
}

#[test]
fn unbalanced_quotes_are_rejected() {
    let mut shell = shell(StoreOptions::default(), false);
    let output = run(&mut shell, "player add \"Ana --photo file://x.jpg");
    assert!(output.contains("unbalanced quotes"), "{output}");
    assert_eq!(shell.session().store().player_count(), 0);
}
