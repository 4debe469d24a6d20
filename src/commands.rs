//! High-level command orchestration for the CLI.
//!
//! One handler per command, shared by the `awsprof` subcommands and the
//! standalone `set-aws-profile`, `list-aws-profiles` and `get-current-profile`
//! binaries.

use anyhow::Result;

use crate::error::SwitchError;
use crate::paths::AwsPaths;
use crate::resolver::{current_profile_name, list_profiles};
use crate::switch::{load_both, switch_to_profile};
use crate::ui::Ui;

/// Make `profile` the default profile
///
/// Fails with [`SwitchError::MissingArgument`] before any file is opened when
/// no profile is given; `invoked_as` names the command in its usage hint.
pub fn set(
    paths: &AwsPaths,
    profile: Option<&str>,
    invoked_as: &'static str,
    ui: &Ui,
) -> Result<()> {
    let name = profile.ok_or(SwitchError::MissingArgument {
        command: invoked_as,
    })?;
    switch_to_profile(paths, name, ui)?;
    Ok(())
}

/// Print every selectable profile, one per line, and return them
pub fn list(paths: &AwsPaths, ui: &Ui) -> Result<Vec<String>> {
    let (credentials, config) = load_both(paths)?;
    let names: Vec<String> = list_profiles(&credentials, &config)
        .map(str::to_string)
        .collect();
    for name in &names {
        ui.println(name);
    }
    Ok(names)
}

/// Print the profile the defaults point at, or nothing
pub fn current(paths: &AwsPaths, ui: &Ui) -> Result<Option<String>> {
    let (credentials, config) = load_both(paths)?;
    let name = current_profile_name(&credentials, &config).map(str::to_string);
    match &name {
        Some(name) => ui.println(name),
        None => log::debug!("default sections match no named profile"),
    }
    Ok(name)
}
