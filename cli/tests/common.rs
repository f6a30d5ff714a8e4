use std::{fs, path::Path};

use assert_cmd::Command;

/// A `sprig` command that runs with `dir` as its working directory.
pub fn sprig(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sprig").unwrap();
    cmd.current_dir(dir);
    cmd
}

/// Run `sprig init` in a fresh temporary directory.
pub fn init_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    sprig(dir.path()).arg("init").assert().success();
    dir
}

#[allow(dead_code)]
pub fn write(dir: &Path, path: &str, content: &str) {
    fs::write(dir.join(path), content).unwrap();
}

#[allow(dead_code)]
pub fn read(dir: &Path, path: &str) -> Option<String> {
    fs::read_to_string(dir.join(path)).ok()
}

/// Stage `path` with `content` and commit it.
#[allow(dead_code)]
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write(dir, path, content);
    sprig(dir).args(&["add", path]).assert().success();
    sprig(dir).args(&["commit", message]).assert().success();
}
