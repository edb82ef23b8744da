mod cli;
mod runner;

#[cfg(test)]
mod tests;

use clap::Parser;
use esratio_core::status::Status;
use esratio_es::EsExecutor;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = cli::Cli::parse();
    let (status, message) = match run(&cli).await {
        Ok(report) => (report.status, report.message),
        Err(err) => (Status::Unknown, format!("{err:#}")),
    };

    println!("{status} - {message}");
    std::process::exit(status.exit_code());
}

async fn run(cli: &cli::Cli) -> anyhow::Result<runner::CheckReport> {
    let executor = EsExecutor::new(cli.es_config())?;
    let report = runner::run_check(&executor, &cli.check_config(), chrono::Utc::now()).await?;
    Ok(report)
}

/// Logs go to stderr so the status line stays alone on stdout.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("esratio=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
