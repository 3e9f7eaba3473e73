use linkhost::app::Links;
use linkhost::core::LocalFileLoader;
use linkhost::{run, Config, HostError};
use std::env;
use std::io;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}

async fn start() -> Result<(), HostError> {
    let config = Config::from_args(env::args_os())?;
    let program = Links::new()
        .with_interval(config.interval)
        .exit_when_done(config.exit_when_done);

    run(
        &config.path,
        &LocalFileLoader::new(),
        program,
        io::stdout(),
        shutdown_signal(),
    )
    .await
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> ExitCode {
    // stdout carries the links, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(HostError::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
