use anyhow::Result;
use clap::Parser;
use qr_check::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args).await {
        cli::report_failure(&err);
        std::process::exit(1);
    }
    Ok(())
}
