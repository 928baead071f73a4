//! CLI integration tests
//!
//! Drive the built `usercrud` binary against a temporary database file.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn usercrud(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_usercrud"))
        .env_remove("USERCRUD_PASSWORD")
        .env_remove("USERCRUD_TIMEOUT_MS")
        .env("RUST_LOG", "off")
        .args(["--db", db.to_str().unwrap()])
        .args(["--hash-memory-kib", "8", "--hash-iterations", "1"])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("users.sql")
}

fn create_ada(db: &Path) -> i64 {
    let output = usercrud(
        db,
        &[
            "user",
            "create",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--age",
            "36",
            "--password",
            "secret",
        ],
    );
    stdout_json(&output)["id"].as_i64().unwrap()
}

#[test]
fn test_migrate_creates_users_table() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let value = stdout_json(&usercrud(&db, &["migrate"]));
    assert_eq!(value["applied"][0], "001_users");

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_create_get_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_ada(&db);

    let user = stdout_json(&usercrud(&db, &["user", "get", &id.to_string()]));
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "USER");
    assert_eq!(user["age"], 36);
    assert!(user.get("password_hash").is_none());

    let list = stdout_json(&usercrud(&db, &["user", "list"]));
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(!String::from_utf8_lossy(&usercrud(&db, &["user", "list"]).stdout).contains("secret"));
}

#[test]
fn test_password_is_hashed_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_ada(&db);

    let conn = Connection::open(&db).unwrap();
    let stored: String = conn
        .query_row("SELECT password FROM users WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .unwrap();
    assert!(stored.starts_with("$argon2id$"));

    let ok = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id.to_string(), "--password", "secret"],
    ));
    assert_eq!(ok["valid"], true);

    let bad = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id.to_string(), "--password", "wrong"],
    ));
    assert_eq!(bad["valid"], false);
}

#[test]
fn test_update_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_ada(&db).to_string();

    stdout_json(&usercrud(
        &db,
        &[
            "user",
            "update",
            &id,
            "--name",
            "Ada King",
            "--email",
            "ada@king.org",
            "--role",
            "ADMIN",
            "--password",
            "rotated",
        ],
    ));

    let user = stdout_json(&usercrud(&db, &["user", "get", &id]));
    assert_eq!(user["name"], "Ada King");
    assert_eq!(user["role"], "ADMIN");
    assert!(user["age"].is_null());

    let verify = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id, "--password", "rotated"],
    ));
    assert_eq!(verify["valid"], true);

    stdout_json(&usercrud(&db, &["user", "delete", &id]));
    let missing = usercrud(&db, &["user", "get", &id]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_duplicate_email_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    create_ada(&db);

    let output = usercrud(
        &db,
        &[
            "user",
            "create",
            "--name",
            "Other",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_DUPLICATE"));
}

#[test]
fn test_password_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = Command::new(env!("CARGO_BIN_EXE_usercrud"))
        .env("USERCRUD_DB", &db)
        .env("USERCRUD_PASSWORD", "from-env")
        .env("USERCRUD_HASH_MEMORY_KIB", "8")
        .env("USERCRUD_HASH_ITERATIONS", "1")
        .env("RUST_LOG", "off")
        .args(["user", "create", "--name", "Env", "--email", "env@example.com"])
        .output()
        .unwrap();
    let id = stdout_json(&output)["id"].as_i64().unwrap().to_string();

    let verify = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id, "--password", "from-env"],
    ));
    assert_eq!(verify["valid"], true);
}

#[test]
fn test_update_ignores_password_environment() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_ada(&db).to_string();

    let output = Command::new(env!("CARGO_BIN_EXE_usercrud"))
        .env("USERCRUD_PASSWORD", "from-env")
        .env("RUST_LOG", "off")
        .args(["--db", db.to_str().unwrap()])
        .args(["--hash-memory-kib", "8", "--hash-iterations", "1"])
        .args(["user", "update", &id, "--name", "Ada", "--email", "ada@example.com"])
        .args(["--role", "USER"])
        .output()
        .unwrap();
    stdout_json(&output);

    let kept = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id, "--password", "secret"],
    ));
    assert_eq!(kept["valid"], true);

    let from_env = stdout_json(&usercrud(
        &db,
        &["user", "verify-password", &id, "--password", "from-env"],
    ));
    assert_eq!(from_env["valid"], false);
}

#[test]
fn test_unopenable_database_exits_with_connection_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("missing-dir").join("users.sql");

    let output = usercrud(&db, &["user", "list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CONNECTION"));
}

#[test]
fn test_incompatible_existing_table_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY);")
            .unwrap();
    }

    let output = usercrud(&db, &["user", "list"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_seed_import_directory() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let seeds = temp_dir.path().join("seeds");
    fs::create_dir_all(&seeds).unwrap();
    fs::write(
        seeds.join("01_admins.yaml"),
        "schema_version: 0\nusers:\n  - {name: Root, email: root@example.com, role: ADMIN, password: r}\n",
    )
    .unwrap();
    fs::write(
        seeds.join("02_users.yaml"),
        "schema_version: 0\nusers:\n  - {name: Ann, email: ann@example.com, password: a}\n  - {name: Ben, email: ben@example.com, password: b}\n",
    )
    .unwrap();

    let reports = stdout_json(&usercrud(&db, &["seed", "import", seeds.to_str().unwrap()]));
    assert_eq!(reports[0]["inserted"], 1);
    assert_eq!(reports[1]["inserted"], 2);
    assert_eq!(reports[1]["digest"].as_str().unwrap().len(), 64);

    let list = stdout_json(&usercrud(&db, &["user", "list"]));
    assert_eq!(list.as_array().unwrap().len(), 3);
}
