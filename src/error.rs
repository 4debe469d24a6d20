use std::path::PathBuf;
use thiserror::Error;

/// Failures a profile switch reports to the user
#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("profile [{0}] not found in either credentials or config file")]
    ProfileNotFound(String),

    /// `command` is how the user invoked the switch, e.g. `awsprof set`
    #[error("this script requires one argument, usage: {command} target-profile")]
    MissingArgument { command: &'static str },

    #[error("profile [{profile}] has no {key} in credentials file")]
    IncompleteProfile { profile: String, key: &'static str },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}
