/*!
 * Integration tests for the promptfs command line
 */

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use filetime::{set_file_mtime, FileTime};
use predicates::prelude::*;
use tempfile::tempdir;

fn write_file(root: &Path, rel_path: &str, content: &str, mtime: i64) {
    let path = root.join(rel_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
}

fn setup_test_directory() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/a.py", "print('a')\n", 100);
    write_file(dir.path(), "src/b.py", "print('b')\n", 50);
    write_file(dir.path(), "build/c.py", "print('c')\n", 200);
    dir
}

fn promptfs() -> Command {
    Command::cargo_bin("promptfs").unwrap()
}

#[test]
fn test_help_exits_zero() {
    promptfs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--only"))
        .stdout(predicate::str::contains("--additional"));
}

#[test]
fn test_unknown_flag_exits_one() {
    promptfs()
        .arg("--no-such-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_value_exits_one() {
    for flag in ["-i", "-O", "-a", "-o"] {
        promptfs()
            .arg(flag)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Usage"));
    }
}

#[test]
fn test_stdout_output() {
    let dir = setup_test_directory();

    let assert = promptfs().arg(dir.path()).arg("--stdout").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.starts_with("Project Folder Structure:\n========================\n  src\n"));
    let b = stdout.find("==== src/b.py ====").unwrap();
    let a = stdout.find("==== src/a.py ====").unwrap();
    assert!(b < a);
    assert!(!stdout.contains("build"));
    assert!(!stdout.contains("written to"));
}

#[test]
fn test_file_output_and_completion_message() {
    let dir = setup_test_directory();

    promptfs()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Project structure and file contents written to prompt_script.txt",
        ));

    let written = fs::read_to_string(dir.path().join("prompt_script.txt")).unwrap();
    assert!(written.contains("==== src/a.py ===="));
    assert!(!written.contains("==== build/c.py ===="));
}

#[test]
fn test_output_is_not_reingested() {
    let dir = setup_test_directory();
    write_file(dir.path(), "notes.txt", "notes\n", 10);

    for _ in 0..2 {
        promptfs()
            .current_dir(dir.path())
            .args(["-O", "*.txt", "-q"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    let written = fs::read_to_string(dir.path().join("prompt_script.txt")).unwrap();
    assert!(written.contains("==== notes.txt ===="));
    assert!(!written.contains("==== prompt_script.txt ===="));
}

#[test]
fn test_missing_scope_warns_and_succeeds() {
    let dir = setup_test_directory();

    promptfs()
        .arg(dir.path())
        .args(["-O", "nowhere/", "--stdout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("nowhere/"));
}

#[test]
fn test_missing_project_directory_fails() {
    let dir = tempdir().unwrap();

    promptfs()
        .arg(dir.path().join("missing"))
        .arg("--stdout")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Target directory not found"));
}

#[test]
fn test_generate_completions() {
    promptfs()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("promptfs"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_warns_and_continues() {
    use std::os::unix::fs::PermissionsExt;

    let dir = setup_test_directory();
    write_file(dir.path(), "src/locked/hidden.py", "secret\n", 10);
    let locked = dir.path().join("src/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let output = promptfs()
        .arg(dir.path())
        .arg("--stdout")
        .output()
        .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping unreadable entry"));
    assert!(stderr.contains("locked"));
    assert!(stdout.contains("==== src/a.py ===="));
    assert!(!stdout.contains("hidden.py"));
}
