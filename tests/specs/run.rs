//! `prehook run`: selection, fixers, output formats and exit codes.

use crate::prelude::*;

#[test]
fn trailing_whitespace_is_fixed_and_reported() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \nworld\n").stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "whitespace"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("whitespace: FAIL"))
        .stdout(predicates::str::contains("notes.txt"))
        .stdout(predicates::str::contains("1 failed"));

    assert_eq!(repo.read("notes.txt"), "hello\nworld\n");
}

#[test]
fn second_run_after_fix_passes() {
    let repo = Repo::new();
    repo.file("notes.txt", "no newline").stage(&["notes.txt"]);

    repo.run().args(["--only", "eof"]).assert().code(1);
    repo.run().args(["--only", "eof"]).assert().success();
    assert_eq!(repo.read("notes.txt"), "no newline\n");
}

#[test]
fn unstaged_files_are_not_checked() {
    let repo = Repo::new();
    repo.file("staged.txt", "clean\n")
        .file("dirty.txt", "dirty   \n")
        .stage(&["staged.txt"]);

    repo.run().args(["--only", "whitespace"]).assert().success();
    assert_eq!(repo.read("dirty.txt"), "dirty   \n");
}

#[test]
fn explicit_files_override_staged_set() {
    let repo = Repo::new();
    repo.file("dirty.txt", "dirty   \n");

    repo.run()
        .args(["--only", "whitespace", "dirty.txt"])
        .assert()
        .code(1);
    assert_eq!(repo.read("dirty.txt"), "dirty\n");
}

#[test]
fn explicit_files_are_resolved_from_subdirectory() {
    let repo = Repo::new();
    repo.file("sub/dirty.txt", "dirty   \n");

    prehook_cmd()
        .args(["run", "--only", "whitespace", "dirty.txt"])
        .current_dir(repo.join("sub"))
        .assert()
        .code(1)
        .stdout(predicates::str::contains("sub/dirty.txt"));
}

#[test]
fn excluded_paths_are_not_touched() {
    let repo = Repo::new();
    repo.file("vendor/lib.txt", "dirty   \n")
        .stage(&["vendor/lib.txt"]);

    repo.run().args(["--only", "whitespace"]).assert().success();
    assert_eq!(repo.read("vendor/lib.txt"), "dirty   \n");
}

#[test]
fn ai_attribution_is_reported() {
    let repo = Repo::new();
    repo.file("README.md", "# Title\n\nGenerated with Claude\n")
        .stage(&["README.md"]);

    repo.run()
        .args(["--only", "ai_detection"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("README.md:3"));
}

#[test]
fn skip_flag_removes_check() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \n").stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "whitespace,eof", "--skip", "whitespace"])
        .assert()
        .success();
    assert_eq!(repo.read("notes.txt"), "hello   \n");
}

#[test]
fn skip_env_removes_check() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \n").stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "whitespace,eof"])
        .env("SKIP", "whitespace")
        .assert()
        .success();
}

#[test]
fn prehook_skip_is_used_when_skip_is_empty() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \n").stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "whitespace,eof"])
        .env("SKIP", "")
        .env("PREHOOK_SKIP", "whitespace")
        .assert()
        .success();
}

#[test]
fn skipping_everything_is_a_selection_error() {
    let repo = Repo::new();
    repo.run()
        .args(["--skip", "all"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no checks"));
}

#[test]
fn json_output_reports_structured_results() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \n").stage(&["notes.txt"]);

    let report = json_stdout(repo.run().args(["--only", "whitespace,eof", "-o", "json"]));
    assert_eq!(report["passed"], false);
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["summary"]["total_files"], 1);
    assert!(report["timestamp"].is_string());

    let whitespace = check_entry(&report, "whitespace");
    assert_eq!(whitespace["success"], false);
    assert_eq!(whitespace["files"][0], "notes.txt");
    assert!(whitespace["suggestion"].as_str().unwrap().contains("git add"));
    assert_eq!(check_entry(&report, "eof")["success"], true);
}

#[test]
fn fail_fast_stops_after_first_failure() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   ").stage(&["notes.txt"]);

    let report = json_stdout(repo.run().args([
        "--only",
        "whitespace,eof",
        "--fail-fast",
        "-o",
        "json",
    ]));
    assert_eq!(report["summary"]["total"], 1);
    assert_eq!(report["checks"][0]["name"], "whitespace");
}

#[test]
fn missing_tool_fails_unless_graceful() {
    let repo = Repo::new();
    repo.file("main.go", "package main\n").stage(&["main.go"]);

    // An empty PATH hides gofmt whether or not it is installed
    let report = json_stdout(
        repo.run()
            .args(["--only", "fmt", "-o", "json"])
            .env("PATH", ""),
    );
    let fmt = check_entry(&report, "fmt");
    assert_eq!(fmt["success"], false);
    assert_eq!(fmt["can_skip"], true);

    let report = json_stdout(
        repo.run()
            .args(["--only", "fmt", "--graceful", "-o", "json"])
            .env("PATH", ""),
    );
    let fmt = check_entry(&report, "fmt");
    assert_eq!(fmt["success"], true);
    assert_eq!(fmt["skipped"], true);
    assert_eq!(report["summary"]["skipped"], 1);
}

#[test]
fn graceful_skip_is_shown_in_text_output() {
    let repo = Repo::new();
    repo.file("main.go", "package main\n").stage(&["main.go"]);

    repo.run()
        .args(["--only", "fmt", "--graceful"])
        .env("PATH", "")
        .assert()
        .success()
        .stdout(predicates::str::contains("fmt: SKIP"))
        .stdout(predicates::str::contains("1 skipped"));
}

#[test]
fn verbose_prints_progress_to_stderr() {
    let repo = Repo::new();
    repo.file("notes.txt", "clean\n").stage(&["notes.txt"]);

    repo.run()
        .args(["--only", "eof", "--verbose"])
        .assert()
        .success()
        .stderr(predicates::str::contains("[verbose] eof: running"))
        .stderr(predicates::str::contains("[verbose] eof: passed"))
        .stdout(predicates::str::contains("eof: PASS"));
}

#[test]
fn no_color_output_has_no_escape_codes() {
    let repo = Repo::new();
    repo.file("notes.txt", "hello   \n").stage(&["notes.txt"]);

    let output = repo
        .run()
        .args(["--only", "whitespace"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("\x1b["), "unexpected ANSI codes: {stdout}");
}
