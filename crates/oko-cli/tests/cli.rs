use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("oko")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("oko")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn run_cmd_raw(db_path: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("oko")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command")
}

#[test]
fn cli_user_register_and_verify_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");

    run_cmd(
        &db_path,
        &["user", "add", "--email", "Ada@Example.COM", "--password", "hunter22"],
    );

    let users = run_cmd_json(&db_path, &["user", "ls"]);
    let items = users.as_array().expect("array");
    assert_eq!(items.len(), 1);
    // Emails are normalized to lowercase on registration.
    assert_eq!(items[0]["email"], "ada@example.com");

    let out = run_cmd(
        &db_path,
        &["user", "verify", "--email", "ada@example.com", "--password", "hunter22"],
    );
    assert!(out.contains("ok"));

    run_cmd(&db_path, &["user", "rm", "ada@example.com"]);
    let users = run_cmd_json(&db_path, &["user", "ls"]);
    assert!(users.as_array().expect("array").is_empty());
}

#[test]
fn cli_verify_failures_map_to_exit_codes() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");

    run_cmd(
        &db_path,
        &["user", "add", "--email", "ada@example.com", "--password", "hunter22"],
    );

    let wrong = run_cmd_raw(
        &db_path,
        &["user", "verify", "--email", "ada@example.com", "--password", "nope66"],
    );
    assert_eq!(wrong.status.code(), Some(3));

    let unknown = run_cmd_raw(
        &db_path,
        &["user", "verify", "--email", "ghost@example.com", "--password", "hunter22"],
    );
    assert_eq!(unknown.status.code(), Some(2));
}

#[test]
fn cli_rejects_bad_registrations() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");

    let bad_email = run_cmd_raw(
        &db_path,
        &["user", "add", "--email", "not-an-email", "--password", "hunter22"],
    );
    assert_eq!(bad_email.status.code(), Some(3));

    let short = run_cmd_raw(
        &db_path,
        &["user", "add", "--email", "ada@example.com", "--password", "abc"],
    );
    assert_eq!(short.status.code(), Some(3));

    run_cmd(
        &db_path,
        &["user", "add", "--email", "ada@example.com", "--password", "hunter22"],
    );
    let duplicate = run_cmd_raw(
        &db_path,
        &["user", "add", "--email", "ADA@example.com", "--password", "hunter22"],
    );
    assert_eq!(duplicate.status.code(), Some(3));
}

#[test]
fn cli_offline_report_from_saved_payload() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");
    let payload_path = temp.path().join("payload.json");
    let html_path = temp.path().join("report.html");

    std::fs::write(
        &payload_path,
        r#"{"results": [
            {"🏫Источник": "База1", "👤Имя": "Иван",
             "📞Телефон": "+7 (916) 123-45-67", "📧Почта": "ivan@example.com"}
        ]}"#,
    )
    .expect("write payload");

    let report = run_cmd_json(
        &db_path,
        &[
            "report",
            "nick",
            "ivan",
            "--input",
            payload_path.to_str().expect("payload path"),
            "--out",
            html_path.to_str().expect("html path"),
        ],
    );
    assert_eq!(report["summary"]["record_count"], 1);
    assert_eq!(report["summary"]["name_count"], 1);
    assert_eq!(report["summary"]["phone_count"], 1);
    assert_eq!(report["summary"]["email_count"], 1);
    assert_eq!(report["summary"]["phones"][0]["number"], "+7 916 123 4567");
    assert!(report["source"].is_null());

    let html = std::fs::read_to_string(&html_path).expect("read html");
    assert!(html.contains("База1"));
    assert!(html.contains("ivan@example.com"));
}

#[test]
fn cli_offline_report_falls_back_to_raw_block() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");
    let payload_path = temp.path().join("payload.txt");
    std::fs::write(&payload_path, "<garbage>").expect("write payload");

    let report = run_cmd_json(
        &db_path,
        &[
            "report",
            "phone",
            "79161234567",
            "--input",
            payload_path.to_str().expect("payload path"),
        ],
    );
    assert_eq!(report["summary"]["record_count"], 1);
    assert_eq!(report["summary"]["blocks"][0]["kind"], "raw");
    // The raw fallback goes through the sanitizer.
    assert_eq!(report["summary"]["blocks"][0]["text"], "garbage");
}

#[test]
fn cli_history_requires_a_known_user() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("oko.sqlite3");

    let missing = run_cmd_raw(&db_path, &["history", "--user", "ghost@example.com"]);
    assert_eq!(missing.status.code(), Some(2));

    run_cmd(
        &db_path,
        &["user", "add", "--email", "ada@example.com", "--password", "hunter22"],
    );
    let history = run_cmd_json(&db_path, &["history", "--user", "ada@example.com"]);
    assert!(history.as_array().expect("array").is_empty());
}
