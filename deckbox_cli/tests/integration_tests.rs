//! Integration tests for the deckbox binary.
//!
//! These tests verify end-to-end behavior including:
//! - Catalog loading from single-record and list files
//! - Deck editing through the interactive shell
//! - Deck files written on save and reloaded at startup
//! - File side effects of delete and rename

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("deckbox"))
}

/// Binary rooted at `data_dir`, isolated from the user's own configuration
///
/// An empty config file inside `data_dir` is passed with `--config`, so
/// settings under `$XDG_CONFIG_HOME` can never redirect catalog or deck files.
fn cli_in(data_dir: &Path) -> Command {
    let config = data_dir.join("config.toml");
    fs::write(&config, "").expect("Failed to write test config");

    let mut cmd = cli();
    cmd.env("XDG_CONFIG_HOME", data_dir.join("xdg-config"))
        .arg("--config")
        .arg(&config)
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

/// Temp data directory with a small catalog under `catalog/`
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let catalog = temp_dir.path().join("catalog");
    fs::create_dir_all(&catalog).unwrap();
    fs::write(
        catalog.join("single.json"),
        r#"{"id": 1, "name": "Single", "type": "Spell Card"}"#,
    )
    .unwrap();
    fs::write(
        catalog.join("list.json"),
        r#"[
            {"id": 10, "name": "Alpha Dragon", "atk": 0, "def": 0, "level": 1},
            {"id": 11, "name": "Beta Warrior", "properties": ["Warrior"]}
        ]"#,
    )
    .unwrap();
    temp_dir
}

/// Shell invocation rooted at `data_dir`
fn shell(data_dir: &Path) -> Command {
    let mut cmd = cli_in(data_dir);
    cmd.arg("shell");
    cmd
}

fn deck_file(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join("decks").join(format!("{}.json", name))
}

fn read_deck_file(data_dir: &Path, name: &str) -> serde_json::Value {
    let contents = fs::read_to_string(deck_file(data_dir, name)).expect("Failed to read deck");
    serde_json::from_str(&contents).expect("Deck file is not JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trading card deck manager"));
}

#[test]
fn test_search_subcommand() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("search")
        .arg("ALPHA")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha Dragon (ID: 10)"))
        .stdout(predicate::str::contains("Beta").not());
}

#[test]
fn test_missing_catalog_aborts() {
    let temp_dir = tempfile::tempdir().unwrap();

    cli_in(temp_dir.path())
        .arg("--catalog-dir")
        .arg(temp_dir.path().join("no-such-catalog"))
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CatalogDirectoryNotFound"));
}

#[test]
fn test_shell_creates_decks_directory() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 deck(s) loaded."));

    assert!(temp_dir.path().join("decks").is_dir());
}

#[test]
fn test_save_writes_ids_in_order() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin(
            "create_deck main\nadd_card main 11\nadd_card main 10\nadd_card main 11\nsave_deck main\nexit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck 'main' saved."));

    assert_eq!(
        read_deck_file(temp_dir.path(), "main"),
        serde_json::json!({"name": "main", "cards": [11, 10, 11]})
    );
}

#[test]
fn test_saved_decks_reload_on_startup() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("create_deck main\nadd_card main 1\nadd_card main 10\nsave_deck main\nexit\n")
        .assert()
        .success();

    shell(temp_dir.path())
        .write_stdin("list_decks\nshow_deck main\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 deck(s) loaded."))
        .stdout(predicate::str::contains("• main"))
        .stdout(predicate::str::contains("1 - Single"))
        .stdout(predicate::str::contains("10 - Alpha Dragon"));
}

#[test]
fn test_reload_drops_cards_removed_from_catalog() {
    let temp_dir = setup_test_dir();
    let decks = temp_dir.path().join("decks");
    fs::create_dir_all(&decks).unwrap();
    fs::write(
        decks.join("drift.json"),
        r#"{"name": "drift", "cards": [10, 500, 11]}"#,
    )
    .unwrap();

    shell(temp_dir.path())
        .write_stdin("show_deck drift\nsave_deck drift\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 - Alpha Dragon"))
        .stdout(predicate::str::contains("11 - Beta Warrior"))
        .stdout(predicate::str::contains("500").not());

    assert_eq!(
        read_deck_file(temp_dir.path(), "drift"),
        serde_json::json!({"name": "drift", "cards": [10, 11]})
    );
}

#[test]
fn test_delete_removes_file() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("create_deck gone\nsave_deck gone\ndelete_deck gone\ncreate_deck unsaved\ndelete_deck unsaved\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck 'gone' deleted and file removed."))
        .stdout(predicate::str::contains("Deck 'unsaved' deleted (no saved file)."));

    assert!(!deck_file(temp_dir.path(), "gone").exists());
}

#[test]
fn test_rename_moves_file() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("create_deck old\nadd_card old 1\nsave_deck old\nrename_deck old new\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck renamed from 'old' to 'new'."));

    assert!(!deck_file(temp_dir.path(), "old").exists());
    assert_eq!(
        read_deck_file(temp_dir.path(), "new"),
        serde_json::json!({"name": "new", "cards": [1]})
    );

    shell(temp_dir.path())
        .write_stdin("list_decks\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("• new"))
        .stdout(predicate::str::contains("• old").not());
}

#[test]
fn test_rename_onto_existing_deck_fails() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("create_deck a\ncreate_deck b\nrename_deck a b\nlist_decks\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A deck named 'b' already exists"))
        .stdout(predicate::str::contains("• a"));
}

#[test]
fn test_remove_and_clear() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin(
            "create_deck d\nadd_card d 10\nadd_card d 10\nadd_card d 10\nadd_card d 11\n\
             remove_card d 10 2\nsave_deck d\nremove_card d 10 9\nremove_card d 10\n\
             clear_deck d\nshow_deck d\nexit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 copies of card 10 from deck 'd'."))
        .stdout(predicate::str::contains("Removed 1 copy of card 10 from deck 'd'."))
        .stdout(predicate::str::contains("Card 10 is not in deck 'd'."))
        .stdout(predicate::str::contains("(empty)"));

    assert_eq!(
        read_deck_file(temp_dir.path(), "d"),
        serde_json::json!({"name": "d", "cards": [10, 11]})
    );
}

#[test]
fn test_usage_and_unknown_commands() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("add_card onlyone\nrename_deck a\ndance\nadd_card d nope\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: add_card <deck> <id>"))
        .stdout(predicate::str::contains("Usage: rename_deck <old> <new>"))
        .stdout(predicate::str::contains("Unknown command: dance"))
        .stdout(predicate::str::contains("Invalid card id: 'nope'"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let temp_dir = setup_test_dir();

    shell(temp_dir.path())
        .write_stdin("create_deck d\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck 'd' created."));
}

#[test]
fn test_user_config_does_not_leak_into_tests() {
    let temp_dir = setup_test_dir();
    let elsewhere = tempfile::tempdir().unwrap();

    // A user config that would send decks outside the test directory
    let xdg = temp_dir.path().join("xdg-config");
    fs::create_dir_all(xdg.join("deckbox")).unwrap();
    fs::write(
        xdg.join("deckbox").join("config.toml"),
        format!("[data]\ndecks_dir = {:?}\n", elsewhere.path().join("decks")),
    )
    .unwrap();

    shell(temp_dir.path())
        .write_stdin("create_deck main\nsave_deck main\nexit\n")
        .assert()
        .success();

    assert!(deck_file(temp_dir.path(), "main").exists());
    assert!(!elsewhere.path().join("decks").join("main.json").exists());
}

#[test]
fn test_config_file_sets_decks_dir() {
    let temp_dir = setup_test_dir();
    let custom_decks = temp_dir.path().join("custom-decks");
    let config = temp_dir.path().join("custom.toml");
    fs::write(
        &config,
        format!("[data]\ndecks_dir = {:?}\n", custom_decks),
    )
    .unwrap();

    cli()
        .env("XDG_CONFIG_HOME", temp_dir.path().join("xdg-config"))
        .arg("--config")
        .arg(&config)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("create_deck main\nsave_deck main\nexit\n")
        .assert()
        .success();

    assert!(custom_decks.join("main.json").exists());
    assert!(!deck_file(temp_dir.path(), "main").exists());
}
