use predicates::prelude::*;

mod common;
use common::{commit_file, read, sprig, write};

const DATE_LINE: &str = r"\nDate:   \w{3} \w{3} \d{1,2} \d{2}:\d{2}:\d{2} \d{4} \+0000\n";

#[test]
fn init_then_log() {
    let dir = common::init_repo();

    sprig(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::is_match(DATE_LINE).unwrap())
        .stdout(predicate::str::ends_with("initial commit\n\n"))
        .stderr("");
}

#[test]
fn error_outside_repo() {
    let dir = tempfile::tempdir().unwrap();

    sprig(dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout("")
        .stderr("Not in an initialized sprig directory.\n");
}

#[test]
fn error_init_twice() {
    let dir = common::init_repo();

    sprig(dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr("A sprig version-control system already exists in the current directory.\n");
}

#[test]
fn dash_c_selects_work_dir() {
    let dir = common::init_repo();
    let elsewhere = tempfile::tempdir().unwrap();
    write(dir.path(), "f.txt", "hello");

    sprig(elsewhere.path())
        .arg("-C")
        .arg(dir.path())
        .args(&["add", "f.txt"])
        .assert()
        .success();

    sprig(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\nf.txt\n\n"));
}

#[test]
fn add_commit_and_restore() {
    let dir = common::init_repo();
    let path = dir.path();

    commit_file(path, "wug.txt", "This is a wug.\n", "added wug");
    write(path, "wug.txt", "This is not a wug.\n");

    sprig(path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\nwug.txt (modified)\n\n",
        ));

    sprig(path)
        .args(&["checkout", "--", "wug.txt"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read(path, "wug.txt").unwrap(), "This is a wug.\n");

    sprig(path)
        .args(&["find", "added wug"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{40}\n$").unwrap());
}

#[test]
fn rm_and_commit() {
    let dir = common::init_repo();
    let path = dir.path();

    commit_file(path, "f.txt", "f", "add f");
    sprig(path).args(&["rm", "f.txt"]).assert().success();
    assert_eq!(read(path, "f.txt"), None);

    sprig(path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nf.txt\n\n"));

    sprig(path).args(&["commit", "remove f"]).assert().success();

    sprig(path)
        .arg("commit")
        .arg("nothing")
        .assert()
        .code(1)
        .stderr("No changes added to the commit.\n");
}

#[test]
fn error_empty_message() {
    let dir = common::init_repo();
    write(dir.path(), "f.txt", "f");
    sprig(dir.path()).args(&["add", "f.txt"]).assert().success();

    sprig(dir.path())
        .args(&["commit", ""])
        .assert()
        .code(1)
        .stderr("Please enter a commit message.\n");
}

#[test]
fn branches_and_merge() {
    let dir = common::init_repo();
    let path = dir.path();

    commit_file(path, "base.txt", "base\n", "base");
    sprig(path).args(&["branch", "dev"]).assert().success();
    commit_file(path, "master.txt", "m\n", "on master");

    sprig(path).args(&["checkout", "dev"]).assert().success();
    assert_eq!(read(path, "master.txt"), None);
    commit_file(path, "dev.txt", "d\n", "on dev");

    sprig(path).args(&["checkout", "master"]).assert().success();
    sprig(path).args(&["merge", "dev"]).assert().success().stdout("");

    assert_eq!(read(path, "dev.txt").unwrap(), "d\n");
    assert_eq!(read(path, "master.txt").unwrap(), "m\n");

    sprig(path)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged master with dev.\n"));

    sprig(path)
        .arg("global-log")
        .assert()
        .success()
        .stdout(predicate::str::contains("on dev\n"))
        .stdout(predicate::str::contains("on master\n"));

    sprig(path).args(&["rm-branch", "dev"]).assert().success();
    sprig(path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n\n"));
}

#[test]
fn merge_conflict() {
    let dir = common::init_repo();
    let path = dir.path();

    commit_file(path, "f.txt", "base\n", "base");
    sprig(path).args(&["branch", "dev"]).assert().success();
    commit_file(path, "f.txt", "ours\n", "master edit");
    sprig(path).args(&["checkout", "dev"]).assert().success();
    commit_file(path, "f.txt", "theirs\n", "dev edit");
    sprig(path).args(&["checkout", "master"]).assert().success();

    sprig(path)
        .args(&["merge", "dev"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read(path, "f.txt").unwrap(),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );

    sprig(path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\nf.txt\n\n"));
}

#[test]
fn reset_and_untracked_guard() {
    let dir = common::init_repo();
    let path = dir.path();

    commit_file(path, "a.txt", "a\n", "add a");
    let first = String::from_utf8(
        sprig(path)
            .args(&["find", "add a"])
            .output()
            .unwrap()
            .stdout,
    )
    .unwrap();
    let first = first.trim();

    sprig(path).args(&["rm", "a.txt"]).assert().success();
    sprig(path).args(&["commit", "drop a"]).assert().success();
    write(path, "a.txt", "untracked\n");

    sprig(path)
        .args(&["reset", &first[..8]])
        .assert()
        .code(1)
        .stderr("There is an untracked file in the way; delete it, or add and commit it first.\n");
    assert_eq!(read(path, "a.txt").unwrap(), "untracked\n");

    std::fs::remove_file(path.join("a.txt")).unwrap();
    sprig(path).args(&["reset", &first[..8]]).assert().success();
    assert_eq!(read(path, "a.txt").unwrap(), "a\n");

    sprig(path)
        .args(&["reset", "ffffffff"])
        .assert()
        .code(1)
        .stderr("No commit with that id exists.\n");
}
