use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use deskwatch::config::{
    ENV_API_ADDR, ENV_CONFIG, ENV_INPUT_PATH, ENV_LOG_PATH, ENV_MAX_HISTORY, ENV_MIN_CONFIDENCE,
};
use deskwatch::{DeskConfig, DeskError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        ENV_CONFIG,
        ENV_INPUT_PATH,
        ENV_LOG_PATH,
        ENV_MAX_HISTORY,
        ENV_API_ADDR,
        ENV_MIN_CONFIDENCE,
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_defaults_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = DeskConfig::load().expect("load config");
    assert_eq!(cfg, DeskConfig::default());
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(
        br#"{
            "input_path": "/var/lib/deskwatch/new_input.json",
            "log_path": "/var/lib/deskwatch/log.json",
            "max_history": 24,
            "api_addr": "0.0.0.0:8080"
        }"#,
    )
    .expect("write config");

    std::env::set_var(ENV_CONFIG, file.path());
    std::env::set_var(ENV_LOG_PATH, "/srv/desk/log.json");
    std::env::set_var(ENV_MAX_HISTORY, "5");

    let cfg = DeskConfig::load().expect("load config");

    assert_eq!(cfg.input_path, PathBuf::from("/var/lib/deskwatch/new_input.json"));
    assert_eq!(cfg.log_path, PathBuf::from("/srv/desk/log.json"));
    assert_eq!(cfg.max_history, 5);
    assert_eq!(cfg.api_addr, "0.0.0.0:8080");
    assert_eq!(cfg.score_output_path, PathBuf::from("input/score_output.json"));

    clear_env();
}

#[test]
fn rejects_non_numeric_max_history() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var(ENV_MAX_HISTORY, "ten");
    assert!(matches!(DeskConfig::load(), Err(DeskError::Config(_))));

    clear_env();
}

#[test]
fn rejects_zero_max_history_from_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(br#"{"max_history": 0}"#).expect("write config");
    std::env::set_var(ENV_CONFIG, file.path());

    let err = DeskConfig::load().unwrap_err();
    assert!(err.to_string().contains("max_history"));

    clear_env();
}

#[test]
fn missing_config_file_is_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var(ENV_CONFIG, "/nonexistent/deskwatch.json");
    assert!(matches!(DeskConfig::load(), Err(DeskError::Config(_))));

    clear_env();
}

#[test]
fn min_confidence_from_file_then_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(br#"{"min_confidence": 0.25}"#).expect("write config");
    std::env::set_var(ENV_CONFIG, file.path());
    assert_eq!(DeskConfig::load().expect("load config").min_confidence, 0.25);

    std::env::set_var(ENV_MIN_CONFIDENCE, "0.75");
    assert_eq!(DeskConfig::load().expect("load config").min_confidence, 0.75);

    std::env::set_var(ENV_MIN_CONFIDENCE, "2");
    assert!(matches!(DeskConfig::load(), Err(DeskError::Config(_))));

    clear_env();
}
