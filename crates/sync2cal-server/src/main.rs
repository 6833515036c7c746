//! sync2cal entry point.

use std::process::ExitCode;

use clap::Parser;
use sync2cal_core::{TracingConfig, init_tracing};
use tracing::Level;

use sync2cal_server::cli::{Cli, Command};
use sync2cal_server::{AppConfig, ServerResult, commands, serve};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let serving = matches!(cli.command, None | Some(Command::Serve { .. }));
    let mut tracing_config = if serving {
        let config = TracingConfig::server();
        if cli.debug {
            config.with_level(Level::DEBUG)
        } else {
            config
        }
    } else {
        TracingConfig::cli(cli.debug)
    };
    if let Some(format) = cli.log_format {
        tracing_config = tracing_config.with_format(format);
    }
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    }
    .with_env_overrides();

    match cli.command {
        None => serve(&config).await,
        Some(Command::Serve { bind, port }) => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config).await
        }
        Some(Command::Fetch {
            integration,
            params,
            json,
        }) => {
            let output = commands::fetch(&config, &integration, params, json).await?;
            print!("{}", output);
            Ok(())
        }
        Some(Command::Integrations) => {
            print!("{}", commands::integrations(&config)?);
            Ok(())
        }
    }
}
