use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use ymparse_core::AppConfig;
use ymparse_scraper::{ExtractionError, ProductExtractor, ProductRecord};

#[derive(Debug, Parser)]
#[command(name = "ymparse-cli")]
#[command(about = "Yandex Market product page parser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse one product page and print the JSON envelope to stdout
    Parse {
        /// Product page URL on Yandex Market
        url: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = ymparse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON result; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { url, pretty } => {
            let result = run_parse(&config, &url).await;
            if let Err(e) = &result {
                tracing::error!(stage = e.stage(), url = %url, error = %e, "parse failed");
            }

            let output = envelope(&result);
            let rendered = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{rendered}");

            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::CheckConfig => {
            println!("{config:#?}");
            if !config.has_provider_key() {
                eprintln!("warning: FIRECRAWL_API_KEY is not set; parse will fail");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Builds the extractor and runs one extraction. Client setup failures are
/// returned like any other extraction error.
async fn run_parse(config: &AppConfig, url: &str) -> Result<ProductRecord, ExtractionError> {
    let extractor = ProductExtractor::from_config(config)?;
    extractor.extract(url).await
}

/// Same envelope shape the HTTP API returns.
fn envelope(result: &Result<ProductRecord, ExtractionError>) -> Value {
    match result {
        Ok(product) => json!({ "success": true, "product": product }),
        Err(e) => json!({ "success": false, "error": e.user_message() }),
    }
}
