//! Profile switching logic.
//!
//! This module implements the core mechanism of `awsprof`: pointing the
//! `default` profile at a named one. It handles:
//! - Checking both AWS files exist before touching anything.
//! - Serializing concurrent switches through the lock file.
//! - Creating missing `default` sections.
//! - Persisting only the files the rewrite changed, all-or-nothing.

use anyhow::Result;
use std::path::Path;

use crate::error::SwitchError;
use crate::ini::ConfigFile;
use crate::lock::ProfileLock;
use crate::paths::AwsPaths;
use crate::resolver::{ProfileKind, classify};
use crate::rewriter::{Touched, apply, ensure_defaults};
use crate::ui::Ui;

/// Switch the default profile to `name`
pub fn switch_to_profile(paths: &AwsPaths, name: &str, ui: &Ui) -> Result<ProfileKind> {
    require_file(&paths.credentials)?;
    require_file(&paths.config)?;

    let _lock = ProfileLock::acquire(&paths.lock_file)?;

    let mut credentials = ConfigFile::load(&paths.credentials)?;
    let mut config = ConfigFile::load(&paths.config)?;

    let created = ensure_defaults(&mut credentials, &mut config);
    if created.credentials {
        ui.status("profile [default] not found in credentials file, creating one");
    }
    if created.config {
        ui.status("profile [default] not found in config file, creating one");
    }

    let kind = classify(name, &credentials, &config);
    match kind {
        ProfileKind::CredentialProfile => {
            ui.status(format!("setting AWS profile [{}] as default profile", name))
        }
        ProfileKind::AssumedRoleProfile => ui.status(format!("assuming AWS profile [{}]", name)),
        ProfileKind::NotFound => {}
    }

    let touched = apply(kind, name, &mut credentials, &mut config)?;
    persist(paths, &credentials, &config, touched)?;

    Ok(kind)
}

/// Load both files, credentials first
pub fn load_both(paths: &AwsPaths) -> Result<(ConfigFile, ConfigFile)> {
    let credentials = ConfigFile::load(&paths.credentials)?;
    let config = ConfigFile::load(&paths.config)?;
    Ok((credentials, config))
}

fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SwitchError::FileNotFound(path.to_path_buf()).into());
    }
    Ok(())
}

/// Stage every touched file before replacing any of them
fn persist(
    paths: &AwsPaths,
    credentials: &ConfigFile,
    config: &ConfigFile,
    touched: Touched,
) -> Result<()> {
    let mut staged = Vec::new();
    if touched.credentials {
        staged.push(credentials.stage(&paths.credentials)?);
    }
    if touched.config {
        staged.push(config.stage(&paths.config)?);
    }

    for write in staged {
        log::debug!(
            "replacing {} file",
            paths.file_label(write.target())
        );
        write.commit()?;
    }
    Ok(())
}
