use clap::Parser;
use std::process::ExitCode;

use awsprof::{
    cli::{ColorArgs, finish, init_logging},
    commands,
    paths::AwsPaths,
};

/// Point the AWS CLI default profile at a credential or role profile
#[derive(Parser)]
#[command(name = "set-aws-profile", version)]
struct Cli {
    #[command(flatten)]
    color: ColorArgs,

    /// Name of the profile to activate
    profile: Option<String>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ui = cli.color.ui();

    let result = AwsPaths::new().and_then(|paths| {
        commands::set(&paths, cli.profile.as_deref(), "set-aws-profile", &ui)
    });
    finish(&ui, result)
}
