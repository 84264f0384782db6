use clap::Parser;

use next_prune::cli::Cli;
use next_prune::commands;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    tracing::debug!(?cli, "parsed arguments");

    if let Err(err) = commands::prune::run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("next_prune={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
