use clap::Parser;
use std::process;
use std::str::FromStr;
use tpt_cli::cli::{Cli, Commands};
use tpt_cli::config::{load_config, TptConfig};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::solve::SolveOptions;

fn log_level(cli: &Cli, config: &TptConfig) -> Level {
    cli.log_level
        .or_else(|| Level::from_str(&config.logging.level).ok())
        .unwrap_or(Level::WARN)
}

fn run(cli: &Cli, config: &TptConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Solve {
            instance,
            backend,
            format,
            precision,
            out,
        } => {
            let options = SolveOptions {
                backend: backend.as_deref(),
                format: *format,
                precision: *precision,
                out: out.as_deref(),
            };
            commands::solve::handle(instance, &options, config)
        }
        Commands::Balance { instance } => commands::balance::handle(instance, config),
        Commands::Backends => commands::backends::handle(),
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // The config file can set the log level, so it is read before logging exists.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&cli, &config))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }
    debug!("configuration: {:?}", config);

    if let Err(e) = run(&cli, &config) {
        debug!("command failed: {e:?}");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
