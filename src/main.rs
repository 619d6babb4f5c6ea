use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "streamlist")]
#[command(about = "Keep track of shows and movies to watch")]
#[command(version)]
struct Cli {
    /// Json file holding all saved state
    #[arg(long, env = "STREAMLIST_STORE", default_value = "streamlist.json")]
    store: PathBuf,

    /// Log every change
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    match commands::run(cli.command, &cli.store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
