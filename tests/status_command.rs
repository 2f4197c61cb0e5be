use assert_cmd::Command;
use assert_fs::fixture::PathChild;
use predicates::prelude::predicate;

mod common;

#[test]
fn lists_mirrored_commits_in_authoritative_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repo = common::repository(1, "acme", "widget");
    let snapshot = common::snapshot_with(
        repo,
        vec![
            common::commit_detail("c2", Some(7)),
            common::commit_detail("c1", Some(7)),
        ],
    );
    let remote = common::write_snapshot(&dir, "remote.json", &snapshot);
    let store_file = dir.child("store.json");

    let mut cmd = Command::cargo_bin("mirrit")?;
    cmd.env("NO_COLOR", "1")
        .arg("sync")
        .arg("--remote")
        .arg(remote.path())
        .arg("--store")
        .arg(store_file.path());
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("mirrit")?;
    cmd.env("NO_COLOR", "1")
        .arg("status")
        .arg("--store")
        .arg(store_file.path());

    let output = cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/widget (2 commits)"))
        .get_output()
        .stdout
        .clone();

    // newest first: c2 before c1
    let stdout = String::from_utf8(output)?;
    let newest = stdout.find("c2").unwrap();
    let oldest = stdout.find("c1").unwrap();
    assert!(newest < oldest);

    Ok(())
}

#[test]
fn an_absent_store_lists_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    let mut cmd = Command::cargo_bin("mirrit")?;
    cmd.env("NO_COLOR", "1")
        .arg("status")
        .arg("--store")
        .arg(dir.child("absent.json").path());

    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}
