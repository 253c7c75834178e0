//! FAMTREE_* environment overrides.
//!
//! Kept in its own test binary: environment variables are process-wide, and
//! every test here holds ENV_LOCK while they are set.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use famtree::application::ApplicationError;
use famtree::config::{local_config_path, Settings};

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 4] = [
    "FAMTREE_MAX_CHILDREN",
    "FAMTREE_INPUT_FILE",
    "FAMTREE_OUTPUT_FILE",
    "FAMTREE_GRAPH_NAME",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn given_env_and_local_config_when_load_then_env_wins() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_vars();
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "max_children = 5\ngraph_name = \"Local\"\noutput_file = \"local.dot\"\n",
    )
    .unwrap();
    env::set_var("FAMTREE_MAX_CHILDREN", "3");
    env::set_var("FAMTREE_GRAPH_NAME", "Kin");

    let result = Settings::load(Some(dir.path()));
    clear_vars();
    let settings = result.expect("load settings");

    assert_eq!(settings.max_children, 3);
    assert_eq!(settings.graph_name, "Kin");
    assert_eq!(settings.output_file, PathBuf::from("local.dot"));
}

#[test]
fn given_env_paths_when_load_then_paths_overridden() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_vars();
    let dir = TempDir::new().unwrap();
    env::set_var("FAMTREE_INPUT_FILE", "people.csv");
    env::set_var("FAMTREE_OUTPUT_FILE", "people.dot");

    let result = Settings::load(Some(dir.path()));
    clear_vars();
    let settings = result.expect("load settings");

    assert_eq!(settings.input_file, PathBuf::from("people.csv"));
    assert_eq!(settings.output_file, PathBuf::from("people.dot"));
}

#[test]
fn given_non_numeric_env_capacity_when_load_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_vars();
    let dir = TempDir::new().unwrap();
    env::set_var("FAMTREE_MAX_CHILDREN", "abc");

    let result = Settings::load(Some(dir.path()));
    clear_vars();

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
