//! Test utilities shared across test modules

use crate::paths::AwsPaths;
use crate::ui::{ColorMode, Ui};
use std::fs;
use tempfile::TempDir;

/// Create an AwsPaths struct for testing using a temporary directory
///
/// Mirrors the real ~/.aws/ layout inside the temp directory. Nothing is
/// created on disk.
pub fn setup_test_paths(temp_dir: &TempDir) -> AwsPaths {
    AwsPaths::in_dir(temp_dir.path().join(".aws"))
}

/// Write both AWS files, creating the directory first
pub fn write_aws_files(paths: &AwsPaths, credentials: &str, config: &str) {
    fs::create_dir_all(&paths.aws_dir).unwrap();
    fs::write(&paths.credentials, credentials).unwrap();
    fs::write(&paths.config, config).unwrap();
}

pub fn test_ui() -> Ui {
    Ui::new(ColorMode::Never, false)
}
