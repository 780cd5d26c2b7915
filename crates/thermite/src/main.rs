mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    tracing::debug!(command = ?cli.command, "dispatching command");

    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "thermite", &mut std::io::stdout());
            Ok(())
        }

        // Everything else works against the inventory
        Command::Actions => commands::actions::handle(&cli.global),
        Command::Init => commands::inventory_cmd::init(&cli.global),
        Command::Inventory => commands::inventory_cmd::handle(&cli.global),
        Command::Update(args) => commands::update::handle(args, &cli.global).await,
        Command::Config(args) => commands::config_ops::handle(args, &cli.global).await,
        Command::Ping(args) => commands::probe::ping(args, &cli.global).await,
        Command::Traceroute(args) => commands::probe::traceroute(args, &cli.global).await,
    }
}
