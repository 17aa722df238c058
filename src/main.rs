//! # queuesim Main Entry Point
//!
//! Interactive simulation form on a terminal, single headless run otherwise.

use anyhow::Result;
use queuesim::cmd_args::CommandLineArgs;
use queuesim::config;
use queuesim::repl::io::{TerminalEventStream, TerminalRenderStream};
use queuesim::{batch, AppController};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    tracing::debug!("Command line arguments: {:?}", cmd_args);

    if cmd_args.once() || !atty::is(atty::Stream::Stdout) {
        return run_batch(&cmd_args).await;
    }

    let mut app = AppController::with_io_streams(
        cmd_args,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}

async fn run_batch(cmd_args: &CommandLineArgs) -> Result<()> {
    let mut profile = config::load_profile(cmd_args.profile(), &config::get_profile_path())?;
    if let Some(server) = cmd_args.server() {
        profile.set_server(server);
    }

    let mut stdout = std::io::stdout();
    batch::run_once(cmd_args, &profile, &mut stdout).await?;
    Ok(())
}

fn init_tracing_subscriber() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_env(format!(
                "{}_LOG_LEVEL",
                env!("CARGO_PKG_NAME").to_uppercase()
            ))
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("hyper_util=warn".parse().unwrap())
            .add_directive("tokio=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("rustls=warn".parse().unwrap())
            .add_directive("h2=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_subscriber_should_initialize_logging_without_panic() {
        init_tracing_subscriber();
    }
}
