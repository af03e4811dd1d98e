//! Exit status and stdout contract of the two binaries.
//!
//! Every case runs in a fresh temporary directory so no `.env` file or stray
//! PDF leaks in. Only the `Saved image to` case needs pdfium and is gated by
//! `E2E_ENABLED`.

mod common;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn slides_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pdf2slides"));
    cmd.current_dir(dir.path())
        .env_remove("MINIO_ENDPOINT")
        .env_remove("MINIO_ACCESS_KEY")
        .env_remove("MINIO_SECRET_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn image_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pdf2image"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a single JSON value")
}

#[test]
fn slides_missing_pdf_prints_json_error_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let assert = slides_cmd(&dir)
        .args(["ghost.pdf", "abc123"])
        .assert()
        .code(1);

    assert_eq!(
        stdout_json(assert.get_output()),
        serde_json::json!({"error": "PDF file not found: ghost.pdf"})
    );
}

#[test]
fn slides_missing_pdf_wins_over_missing_storage_settings() {
    let dir = tempfile::tempdir().unwrap();
    let assert = slides_cmd(&dir)
        .env("MINIO_ENDPOINT", "localhost:9000")
        .args(["ghost.pdf", "abc123"])
        .assert()
        .code(1);

    let value = stdout_json(assert.get_output());
    assert_eq!(value["error"], "PDF file not found: ghost.pdf");
}

#[test]
fn slides_with_one_positional_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    slides_cmd(&dir)
        .arg("deck.pdf")
        .assert()
        .code(1)
        .stdout(contains("Usage:"));
}

#[test]
fn slides_with_three_positionals_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    slides_cmd(&dir)
        .args(["deck.pdf", "abc123", "extra"])
        .assert()
        .code(1)
        .stdout(contains("Usage:"));
}

#[test]
fn image_without_arguments_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    image_cmd(&dir)
        .assert()
        .code(1)
        .stdout(contains("Usage:"));
}

#[test]
fn image_missing_pdf_reports_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let assert = image_cmd(&dir)
        .arg("ghost.pdf")
        .assert()
        .code(1)
        .stderr(contains("Error: PDF file not found: ghost.pdf"));

    assert!(assert.get_output().stdout.is_empty());
}

#[test]
fn image_missing_pdf_with_json_flag_reports_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let assert = image_cmd(&dir)
        .args(["--json", "ghost.pdf"])
        .assert()
        .code(1);

    assert_eq!(
        stdout_json(assert.get_output()),
        serde_json::json!({"error": "PDF file not found: ghost.pdf"})
    );
}

#[test]
fn image_saves_next_to_input() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.pdf"), common::blank_pdf(1)).unwrap();

    image_cmd(&dir)
        .arg("one.pdf")
        .assert()
        .success()
        .stdout(contains("Saved image to one.png"));

    assert!(dir.path().join("one.png").is_file());
}
