use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn inspect_lists_columns_and_stats() {
    let file = csv("label,time,value\na,0,1.5\nb,1,oops\nc,2,3.5\n\n");

    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--columns", "1,2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("header: yes"))
        .stdout(predicate::str::contains("Column A: label (text)"))
        .stdout(predicate::str::contains("Column B: time (numeric)"))
        .stdout(predicate::str::contains("Column C: value (text)"))
        .stdout(predicate::str::contains("x=1 y=2: 2 points, 2 skipped"));
}

#[test]
fn inspect_defaults_to_first_numeric_columns() {
    let file = csv("name,t,v\nx,1,2\ny,3,4\n");

    Command::cargo_bin("curvedit")
        .expect("binary")
        .arg("--inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("x=1 y=2: 2 points, 0 skipped"));
}

#[test]
fn inspect_label_column_without_header() {
    let file = csv("a,1,2\nb,3,4\n");

    Command::cargo_bin("curvedit")
        .expect("binary")
        .arg("--inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("header: no"))
        .stdout(predicate::str::contains("Column A (text)"))
        .stdout(predicate::str::contains("x=1 y=2: 2 points, 0 skipped"));
}

#[test]
fn inspect_honours_columns_and_log_x() {
    let file = csv("-1,5,7\n2,3,9\n");

    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--columns", "A,C", "--log-x"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("header: no"))
        .stdout(predicate::str::contains("x=0 y=2: 1 points"))
        .stdout(predicate::str::contains("1 x<=0"));
}

#[test]
fn inspect_with_tab_delimiter() {
    let file = csv("t\tv\n1\t2\n");

    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--delimiter", "tab"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Column B: v (numeric)"));
}

#[test]
fn inspect_missing_file_fails() {
    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "/no/such/file.csv"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: Failed to open file"));
}

#[test]
fn bad_columns_are_rejected() {
    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--columns", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --columns"));
}

#[test]
fn bad_delimiter_is_rejected() {
    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--delimiter", ";;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single character"));
}

#[test]
fn zero_history_depth_is_rejected() {
    Command::cargo_bin("curvedit")
        .expect("binary")
        .args(["--inspect", "--history-depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}
