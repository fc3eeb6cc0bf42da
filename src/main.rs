use clap::Parser;
use hikr_dl::cli::Args;
use hikr_dl::{PhotoDownloader, Result, RunSummary};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: &Args) -> Result<RunSummary> {
    let config = args.to_config()?;
    let mut downloader = PhotoDownloader::new(config)?;
    downloader.run(args.count).await
}
