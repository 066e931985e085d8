mod cli;
mod config;
mod error;
mod logging;
mod output;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use time::OffsetDateTime;
use walletbal_core::{BalanceOrchestrator, HttpProviderFactory, OrchestratorConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init_logging();

    let accounts = config::load_accounts(&cli.config)?;
    let settings = OrchestratorConfig::new(usize::from(cli.workers), cli.target_currency.as_str())?;
    let factory = HttpProviderFactory::default().with_timeout_ms(cli.timeout_ms);
    let orchestrator = BalanceOrchestrator::new(Arc::new(factory), settings);

    let portfolio = orchestrator.fetch_portfolio(accounts).await;

    let stdout = io::stdout();
    output::render(
        &portfolio,
        cli.format,
        cli.pretty,
        OffsetDateTime::now_utc(),
        &mut stdout.lock(),
    )?;

    if portfolio.failed_count() > 0 {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
