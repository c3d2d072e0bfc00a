//! Config store error-message, atomic-write-safety, and round-trip tests.

use assert_fs::prelude::*;
use chrono::NaiveDate;
use mir_core::{
    config,
    types::{Config, ProjectName, ProjectRecord},
    ConfigError,
};
use predicates::prelude::predicate;
use std::fs;
use std::path::PathBuf;

fn alpha() -> ProjectRecord {
    ProjectRecord::new(
        ProjectName::from("alpha"),
        PathBuf::from("/work/alpha"),
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
    )
}

fn write_config(home: &assert_fs::TempDir, body: &str) {
    home.child(".mir/config.json").write_str(body).expect("write config");
}

// ---------------------------------------------------------------------------
// 1. Load
// ---------------------------------------------------------------------------

#[test]
fn first_run_is_an_empty_config() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let cfg = config::load_at(home.path()).expect("load");
    assert!(cfg.projects.is_empty());
    assert!(!cfg.setup_complete);
    home.child(".mir").assert(predicate::path::missing());
}

#[test]
fn load_corrupt_json_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(&home, "{ \"projects\": { broken");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("config.json"), "must contain file path, got: {err}");
}

#[test]
fn load_wrong_shape_returns_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(&home, "[1, 2, 3]");
    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn loads_file_written_by_earlier_tool_versions() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{
  "github_username": "octo",
  "github_email": "octo@example.com",
  "workspace": "/home/octo/Projects",
  "use_workspace": true,
  "setup_complete": true,
  "projects": {
    "navex": {
      "path": "/home/octo/Projects/navex",
      "github": null,
      "created": "2024-02-11",
      "description": ""
    }
  }
}"#,
    );

    let cfg = config::load_at(home.path()).expect("load");
    assert_eq!(cfg.identity.username.as_deref(), Some("octo"));
    assert_eq!(cfg.identity.email.as_deref(), Some("octo@example.com"));
    assert_eq!(cfg.workspace.root(), Some(std::path::Path::new("/home/octo/Projects")));
    let navex = cfg.projects.get("navex").expect("navex");
    assert_eq!(navex.github, None);
    assert_eq!(navex.created, NaiveDate::from_ymd_opt(2024, 2, 11));
}

#[test]
fn null_fields_survive_a_save() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{"github_username": null, "github_email": null, "workspace": null, "use_workspace": false, "setup_complete": false, "projects": {}}"#,
    );
    let cfg = config::load_at(home.path()).expect("load");
    config::save_at(home.path(), &cfg).expect("save");

    let raw = fs::read_to_string(config::config_path_at(home.path())).expect("read");
    let saved: serde_json::Value = serde_json::from_str(&raw).expect("json");
    for key in ["github_username", "github_email", "workspace"] {
        assert_eq!(saved.get(key), Some(&serde_json::Value::Null), "{key} dropped");
    }
}

#[test]
fn record_without_created_date_still_loads() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{"projects": {"a": {"path": "/a"}, "b": {"path": "/b", "created": "2024-02-11"}}}"#,
    );
    let cfg = config::load_at(home.path()).expect("load");
    assert_eq!(cfg.projects.len(), 2);
    assert_eq!(cfg.projects.get("a").expect("a").created, None);
    assert_eq!(
        cfg.projects.get("b").expect("b").created,
        NaiveDate::from_ymd_opt(2024, 2, 11)
    );
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn save_cleans_up_tmp_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut cfg = Config::default();
    cfg.projects.insert(alpha());
    config::save_at(home.path(), &cfg).expect("save");

    home.child(".mir/config.json").assert(predicate::path::exists());
    home.child(".mir/config.json.tmp").assert(predicate::path::missing());
}

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut cfg = Config::default();
    cfg.projects.insert(alpha());
    config::save_at(home.path(), &cfg).expect("save");

    let path = config::config_path_at(home.path());
    let original_bytes = fs::read(&path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = path.with_file_name("config.json.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let loaded = config::load_at(home.path()).expect("load after crash");
    assert_eq!(loaded, cfg);
    assert_eq!(original_bytes, fs::read(&path).expect("reread"));
}

#[cfg(unix)]
#[test]
fn config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;
    let home = assert_fs::TempDir::new().expect("tempdir");
    config::save_at(home.path(), &Config::default()).expect("save");
    let mode = fs::metadata(config::config_path_at(home.path()))
        .expect("meta")
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o600, "expected 0600, got {mode:o}");
}

// ---------------------------------------------------------------------------
// 3. Round-trip stability
// ---------------------------------------------------------------------------

#[test]
fn save_of_load_is_idempotent() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{"projects":{"zeta":{"path":"/z","created":"2024-01-01","pinned":true},
            "alpha":{"path":"/a","github":"https://github.com/octo/alpha","created":"2023-12-31"}},
            "setup_complete":true,"theme":"dark","github_username":"octo"}"#,
    );
    let path = config::config_path_at(home.path());

    let first = config::load_at(home.path()).expect("load 1");
    config::save_at(home.path(), &first).expect("save 1");
    let after_first = fs::read_to_string(&path).expect("read 1");

    let second = config::load_at(home.path()).expect("load 2");
    config::save_at(home.path(), &second).expect("save 2");
    let after_second = fs::read_to_string(&path).expect("read 2");

    assert_eq!(after_first, after_second, "file content must stabilise after first save");
    assert_eq!(first, second);
}

#[test]
fn unknown_keys_survive_a_save() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{"theme":"dark","projects":{"zeta":{"path":"/z","created":"2024-01-01","pinned":true}}}"#,
    );

    let cfg = config::load_at(home.path()).expect("load");
    config::save_at(home.path(), &cfg).expect("save");

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config::config_path_at(home.path())).unwrap())
            .expect("json");
    assert_eq!(raw["theme"], "dark");
    assert_eq!(raw["projects"]["zeta"]["pinned"], true);
}

#[test]
fn stored_order_survives_a_save() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(
        &home,
        r#"{"projects":{"zeta":{"path":"/z","created":"2024-01-01"},
            "alpha":{"path":"/a","created":"2024-01-01"}}}"#,
    );
    let cfg = config::load_at(home.path()).expect("load");
    config::save_at(home.path(), &cfg).expect("save");
    let cfg = config::load_at(home.path()).expect("reload");

    let names: Vec<&str> = cfg.projects.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha"]);
}
