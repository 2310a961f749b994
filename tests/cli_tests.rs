//! Command-line tests for `orfscan -o`.
//!
//! The interactive viewer needs a terminal, so only the CLI mode is driven
//! here.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CORPUS: &str = "\
>SEQ2004
CCATGAAATTT
TAAGGNTGCCCTGAAA
>SEQ2005
GGGCCCTTT
>SEQ2006
ATGTGA
";

const EXPECTED: &str = "\
>SEQ2004
ATGAAATTTTAA
ATGCCCTGA

>SEQ2005

>SEQ2006
ATGTGA

";

fn write_corpus(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("sequences.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_stdout_output() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, CORPUS);

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&input)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout(EXPECTED);
}

#[test]
fn test_file_output_matches_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, CORPUS);
    let output = dir.path().join("orfs.txt");

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--print")
        .assert()
        .success()
        .stdout(EXPECTED)
        .stderr(predicate::str::contains("Wrote 3 ORFs from 3 records"));

    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
}

#[test]
fn test_custom_marker() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, ">chrA_01\nATGTAG\n>chrB_02\nTTATGCCCTAAT\n");

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&input)
        .args(["--marker", "A_01", "-o", "-"])
        .assert()
        .success()
        .stdout(">chrA_01\nATGTAG\n\n>chrB_02\nATGCCCTAA\n\n");
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.txt");

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&missing)
        .args(["-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot proceed"));
}

#[test]
fn test_marker_not_found() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, CORPUS);

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&input)
        .args(["-m", "1999", "-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"1999\" not found"));
}

#[test]
fn test_empty_marker_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, CORPUS);

    Command::cargo_bin("orfscan")
        .unwrap()
        .arg(&input)
        .args(["-m", "", "-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, CORPUS);

    let run = || {
        Command::cargo_bin("orfscan")
            .unwrap()
            .arg(&input)
            .args(["-o", "-"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}
