use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::process::ExitCode;

use awsprof::{
    cli::{ColorArgs, finish, init_logging},
    commands,
    paths::AwsPaths,
};

#[derive(Parser)]
#[command(name = "awsprof")]
#[command(about = "AWS CLI Profile Switcher - point the default profile at any named profile")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    color: ColorArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make a credential or role profile the default profile
    Set {
        /// Name of the profile to activate
        profile: Option<String>,
    },

    /// List all profiles that can be set, one per line
    List,

    /// Print the profile the default profile currently points at
    Current,

    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ui = cli.color.ui();

    let result = match cli.command {
        Commands::Set { profile } => AwsPaths::new()
            .and_then(|paths| commands::set(&paths, profile.as_deref(), "awsprof set", &ui)),
        Commands::List => AwsPaths::new()
            .and_then(|paths| commands::list(&paths, &ui))
            .map(drop),
        Commands::Current => AwsPaths::new()
            .and_then(|paths| commands::current(&paths, &ui))
            .map(drop),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "awsprof", &mut std::io::stdout());
            Ok(())
        }
    };

    finish(&ui, result)
}
