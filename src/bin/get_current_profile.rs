use clap::Parser;
use std::process::ExitCode;

use awsprof::{
    cli::{ColorArgs, finish, init_logging},
    commands,
    paths::AwsPaths,
};

/// Print the profile the AWS CLI default profile points at
#[derive(Parser)]
#[command(name = "get-current-profile", version)]
struct Cli {
    #[command(flatten)]
    color: ColorArgs,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ui = cli.color.ui();

    let result = AwsPaths::new().and_then(|paths| commands::current(&paths, &ui));
    finish(&ui, result)
}
