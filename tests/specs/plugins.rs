//! Plugins: discovery, execution through `prehook run`, and the
//! `plugin` subcommands.

use crate::prelude::*;

const PLUGINS_ON: &str = "version = 1\n[plugins]\nenabled = true\ndirectory = \"plugins\"\n";

fn manifest(name: &str) -> String {
    format!(
        "name: {name}\nversion: 1.0.0\ndescription: test plugin\nexecutable: run.sh\nfile_patterns: [\"*.txt\"]\ncategory: custom\n"
    )
}

#[test]
fn passing_plugin_runs_with_builtins() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin("plugins/ok", &manifest("todo"), "cat >/dev/null\necho '{\"success\": true}'")
        .file("notes.txt", "clean\n")
        .stage(&["notes.txt"]);

    let report = json_stdout(repo.run().args(["--only", "todo", "-o", "json"]));
    let todo = check_entry(&report, "todo");
    assert_eq!(todo["success"], true);
    assert_eq!(todo["files"][0], "notes.txt");
}

#[test]
fn failing_plugin_reports_error_and_suggestion() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin(
            "plugins/todo",
            &manifest("todo"),
            "cat >/dev/null\necho '{\"success\": false, \"error\": \"found TODO\", \"suggestion\": \"resolve it\"}'",
        )
        .file("notes.txt", "TODO\n")
        .stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "todo"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("todo: FAIL"))
        .stdout(predicates::str::contains("found TODO"))
        .stdout(predicates::str::contains("resolve it"));
}

#[test]
fn plugin_without_matching_files_passes_without_running() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin("plugins/todo", &manifest("todo"), "exit 7")
        .file("main.go", "package main\n")
        .stage(&["main.go"]);

    repo.run().args(["--only", "todo"]).assert().success();
}

#[test]
fn plugin_name_is_accepted_by_skip() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin("plugins/todo", &manifest("todo"), "exit 7")
        .file("notes.txt", "clean\n")
        .stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "todo,eof"])
        .env("SKIP", "todo")
        .assert()
        .success();
}

#[test]
fn plugins_are_ignored_when_disabled() {
    let repo = Repo::new();
    repo.plugin("plugins/todo", &manifest("todo"), "exit 7")
        .config("version = 1\n[plugins]\ndirectory = \"plugins\"\n");

    repo.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("todo").not());
}

#[test]
fn list_includes_plugins_after_builtins() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin("plugins/todo", &manifest("todo"), "exit 0");

    let output = repo.cmd().arg("list").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    assert!(last.starts_with("todo"), "last line: {last}");
    assert!(last.contains("test plugin"));
}

#[test]
fn plugin_list_shows_version_and_load_errors() {
    let repo = Repo::new();
    repo.config(PLUGINS_ON)
        .plugin("plugins/todo", &manifest("todo"), "exit 0")
        .file("plugins/broken/plugin.yaml", "name: [unclosed\n");

    repo.cmd()
        .args(["plugin", "list"])
        .assert()
        .code(2)
        .stdout(predicates::str::contains("todo 1.0.0"))
        .stderr(predicates::str::contains("broken"));
}

#[test]
fn plugin_validate_accepts_complete_manifest() {
    let repo = Repo::new();
    repo.plugin("plugins/todo", &manifest("todo"), "exit 0");

    repo.cmd()
        .args(["plugin", "validate", "plugins/todo"])
        .assert()
        .success()
        .stdout(predicates::str::contains("ok"));
}

#[test]
fn plugin_validate_lists_problems() {
    let repo = Repo::new();
    repo.plugin(
        "plugins/bad",
        "name: bad\nexecutable: run.sh\ntimeout: soon\ncategory: vibes\n",
        "exit 0",
    );

    repo.cmd()
        .args(["plugin", "validate", "plugins/bad"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("timeout"))
        .stderr(predicates::str::contains("vibes"));
}

#[test]
fn plugin_validate_without_manifest_fails() {
    let repo = Repo::new();
    std::fs::create_dir_all(repo.join("plugins/empty")).unwrap();

    repo.cmd()
        .args(["plugin", "validate", "plugins/empty"])
        .assert()
        .code(2);
}
