//! Pieces shared by every binary: color flags, logging setup, exit handling.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::ui::{ColorMode, Ui};

/// Global color flags
#[derive(Args, Debug, Clone)]
pub struct ColorArgs {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// When to color the `===` prefix
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        value_enum,
        default_value_t = ColorMode::Auto
    )]
    pub color: ColorMode,
}

impl ColorArgs {
    pub fn ui(&self) -> Ui {
        Ui::new(self.color, self.no_color)
    }
}

/// Route `log` records to stderr, `warn` and above unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
}

/// Report a command's outcome as a `=== ` line and an exit code
///
/// Any value a successful command returns has already been printed.
pub fn finish<T>(ui: &Ui, result: Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{:?}", err);
            ui.error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
