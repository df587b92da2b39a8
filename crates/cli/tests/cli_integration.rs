// Tripwire - Fault Injection Target
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn tripwire() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tripwire"))
}

fn write_input(dir: &TempDir, contents: &[u8]) -> PathBuf {
    let path = dir.path().join("input.bin");
    std::fs::write(&path, contents).expect("Failed to write input file");
    path
}

#[test]
fn test_cli_help() {
    tripwire()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tripwire fault injection target"))
        .stdout(predicate::str::contains("Usage: tripwire"));
}

#[test]
fn test_missing_argument_prints_usage() {
    tripwire()
        .assert()
        .code(255)
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("<FILENAME>"));
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.bin");

    tripwire()
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_non_matching_inputs_exit_clean() {
    let inputs: [&[u8]; 6] = [b"", b"A", b"ABCDE", b"abcdef", b"ABCXEF", b"XABCDEF"];

    for contents in inputs {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, contents);
        tripwire()
            .arg(&path)
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn test_extra_arguments_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, b"ABCDEX");

    tripwire()
        .arg(&path)
        .args(["second", "third"])
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_directory_input_is_load_error() {
    let dir = TempDir::new().unwrap();

    tripwire()
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to open"))
        .stderr(predicate::str::contains("not a regular file"))
        .stderr(predicate::str::contains("allocate").not());
}

#[test]
fn test_trigger_with_exit_action() {
    for contents in [&b"ABCDEF"[..], &b"ABCDEF and then some"[..]] {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, contents);
        tripwire()
            .arg(&path)
            .args(["--on-fault", "exit"])
            .assert()
            .code(139)
            .stderr(predicate::str::contains("Fault triggered"));
    }
}

#[test]
fn test_trigger_aborts_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, b"ABCDEF\n");

    let output = tripwire().arg(&path).output().unwrap();
    assert!(!output.status.success());

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(output.status.signal(), Some(6), "expected SIGABRT");
    }
}

#[test]
fn test_trace_flag_logs_match_depth() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, b"ABCQ");

    tripwire()
        .arg("--trace")
        .arg(&path)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("matched 3 bytes"));
}
