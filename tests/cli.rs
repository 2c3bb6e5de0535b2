//! End-to-end tests for the `line-pipe` binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BANDS: &str = "foo fighters\narctic monkeys\nlime cordiale\n";

fn line_pipe(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_line-pipe"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may exit before reading stdin when its arguments are bad.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

#[test]
fn test_no_stages_copies_input() {
    let out = line_pipe(&[], b"foo fighters");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"foo fighters\n");
}

#[test]
fn test_positional_stages() {
    let out = line_pipe(&["NLOCATE /arctic/", "UPPER"], BANDS.as_bytes());
    assert!(out.status.success());
    assert_eq!(out.stdout, b"FOO FIGHTERS\nLIME CORDIALE\n");
}

#[test]
fn test_script_and_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bands.txt");
    let script = dir.path().join("filter.pipe");
    let output = dir.path().join("nested/out.txt");
    fs::write(&input, BANDS).unwrap();
    fs::write(&script, "PIPE LOCATE /i/\n| CHANGE / /_/\n?\n").unwrap();

    let out = line_pipe(
        &[
            "--script",
            script.to_str().unwrap(),
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        b"",
    );
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "foo_fighters\narctic_monkeys\nlime_cordiale\n"
    );
}

#[test]
fn test_bytes_mode_keeps_invalid_utf8() {
    let out = line_pipe(&["--bytes"], b"\xff\xfe\nok");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"\xff\xfe\nok\n");
}

#[test]
fn test_invalid_utf8_fails_in_line_mode() {
    let out = line_pipe(&[], b"ok\n\xff\xfe\n");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(out.stdout, b"ok\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains(
            "Pipe error: execution stopped with 2 lines read, 1 lines written, due to error from transform"
        ),
        "{stderr}"
    );
}

#[test]
fn test_bad_stage_is_reported() {
    let out = line_pipe(&["FROB"], BANDS.as_bytes());
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown command: FROB"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let out = line_pipe(&["-i", missing.to_str().unwrap()], b"");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error reading input file"));
}
