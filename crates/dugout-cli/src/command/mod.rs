use clap::{Parser, Subcommand};
use env_logger::Env;

use self::{inspect::InspectArg, optimize::OptimizeArg};

mod inspect;
mod optimize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Assign players to balanced teams using a genetic algorithm
    Optimize(#[clap(flatten)] OptimizeArg),
    /// Show roster composition without optimizing
    Inspect(#[clap(flatten)] InspectArg),
}

impl Mode {
    /// Log level used when `RUST_LOG` is not set.
    fn default_log_level(&self) -> &'static str {
        match self {
            Mode::Optimize(arg) if arg.is_quiet() => "warn",
            Mode::Optimize(_) | Mode::Inspect(_) => "info",
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.mode.default_log_level()))
        .init();
    match args.mode {
        Mode::Optimize(arg) => optimize::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}
