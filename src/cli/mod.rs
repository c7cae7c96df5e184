use crate::errors::AppResult;
use clap::Parser;

pub mod commands;

/// Bitcoin transaction script tokenizer
#[derive(Parser, Debug)]
#[command(name = "tx-tape")]
#[command(about = "Split a transaction's input and output scripts into tapes and cells")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub parse: commands::parse::ParseCommand,
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture debug!() and info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    // Logs go to stderr so stdout only carries the record
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    cli.parse.run().await
}
