use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "TestID,SystemName,TestType,TestResult,Active";

fn testrec(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("testrec").unwrap();
    cmd.current_dir(home)
        .env("TESTREC_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_creates_header_only_file() {
    let dir = TempDir::new().unwrap();
    testrec(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 records"));

    let content = fs::read_to_string(dir.path().join("tests.csv")).unwrap();
    assert_eq!(content, format!("{HEADER}\n"));
}

#[test]
fn missing_file_without_init_fails() {
    let dir = TempDir::new().unwrap();
    testrec(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("testrec init"));
}

#[test]
fn add_list_and_search() {
    let dir = TempDir::new().unwrap();
    testrec(dir.path()).arg("init").assert().success();

    testrec(dir.path())
        .args(["add", "Core DB", "UnitTest", "--result", "passed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test record created: #1"));
    testrec(dir.path())
        .args(["add", "Web UI", "Smoke"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("tests.csv")).unwrap();
    assert_eq!(
        content,
        format!("{HEADER}\n1,Core DB,UnitTest,Passed,1\n2,Web UI,Smoke,Pending,1\n")
    );

    testrec(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Core DB").and(predicate::str::contains("Web UI")));

    testrec(dir.path())
        .args(["search", "smo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Web UI").and(predicate::str::contains("Core DB").not()));

    testrec(dir.path())
        .args(["search", "we"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search term"));
}

#[test]
fn invalid_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    testrec(dir.path()).arg("init").assert().success();

    testrec(dir.path())
        .args(["add", "AB", "UnitTest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid system name"));

    let content = fs::read_to_string(dir.path().join("tests.csv")).unwrap();
    assert_eq!(content, format!("{HEADER}\n"));
}

#[test]
fn delete_recover_purge_cycle() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("runs.csv");
    fs::write(
        &file,
        format!("{HEADER}\n5,Core DB,UnitTest,Passed,1\n6,Web UI,Smoke,Failed,1\n"),
    )
    .unwrap();

    testrec(dir.path())
        .args(["--file", "runs.csv", "delete", "5", "--yes"])
        .assert()
        .success();
    testrec(dir.path())
        .args(["--file", "runs.csv", "list", "--deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Core DB"));

    // declined prompt leaves the file alone
    testrec(dir.path())
        .args(["--file", "runs.csv", "purge"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    testrec(dir.path())
        .args(["--file", "runs.csv", "purge", "6", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be deleted before"));

    testrec(dir.path())
        .args(["--file", "runs.csv", "purge"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Purged: #5"));

    let content = fs::read_to_string(&file).unwrap();
    assert_eq!(content, format!("{HEADER}\n6,Web UI,Smoke,Failed,1\n"));
}

#[test]
fn delete_batch_with_deleted_record_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("runs.csv");
    let original = format!("{HEADER}\n1,Core DB,UnitTest,Passed,1\n2,Web UI,Smoke,Failed,0\n");
    fs::write(&file, &original).unwrap();

    testrec(dir.path())
        .args(["--file", "runs.csv", "delete", "1", "2", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already deleted"));
    testrec(dir.path())
        .args(["--file", "runs.csv", "delete", "1", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("listed more than once"));

    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn update_applies_all_flags_in_one_save() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tests.csv"),
        format!("{HEADER}\n1,Core DB,UnitTest,Pending,1\n"),
    )
    .unwrap();

    testrec(dir.path())
        .args(["update", "1", "--type", "Bad Type", "--result", "Failed"])
        .assert()
        .failure();
    testrec(dir.path())
        .args(["update", "1", "--name", "Core DB (eu)", "--result", "Failed"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("tests.csv")).unwrap();
    assert_eq!(content, format!("{HEADER}\n1,Core DB (eu),UnitTest,Failed,1\n"));
}

#[test]
fn malformed_rows_warn_but_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tests.csv"),
        format!("{HEADER}\n5,Core DB,UnitTest,Bogus,1\nabc,x,y,Passed,1\n"),
    )
    .unwrap();

    testrec(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending"))
        .stderr(predicate::str::contains("unknown test result"));
}

#[test]
fn wrong_header_is_refused() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tests.csv"), "id,name\n1,x\n").unwrap();

    testrec(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected header"));
}

#[test]
fn files_and_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();

    testrec(dir.path())
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.csv").and(predicate::str::contains("notes.txt").not()));

    testrec(dir.path())
        .args(["config", "default-file", "nightly.csv"])
        .assert()
        .success();
    testrec(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("nightly.csv").exists());
}
