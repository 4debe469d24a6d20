use clap::Parser;
use std::process::ExitCode;

use awsprof::{
    cli::{ColorArgs, finish, init_logging},
    commands,
    paths::AwsPaths,
};

/// List every profile set-aws-profile accepts, one per line
#[derive(Parser)]
#[command(name = "list-aws-profiles", version)]
struct Cli {
    #[command(flatten)]
    color: ColorArgs,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ui = cli.color.ui();

    let result = AwsPaths::new().and_then(|paths| commands::list(&paths, &ui));
    finish(&ui, result)
}
