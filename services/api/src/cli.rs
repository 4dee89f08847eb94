use crate::console::{run_console, ConsoleArgs};
use crate::import::{run_import, ImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lending_platform::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lending Platform",
    about = "Decide loan applications and report portfolio statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Enter loan applications interactively and print statistics on demand
    Console(ConsoleArgs),
    /// Decide every loan in a CSV export and print the resulting statistics
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Console(args) => run_console(args),
        Command::Import(args) => run_import(args),
    }
}
