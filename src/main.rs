//! Main entry point for Metadata Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metadata_translator::cli::commands::{self, Commands};

/// Metadata Translator - rate-limited translation helper
#[derive(Parser, Debug)]
#[command(name = "metadata-translator", version, about, long_about = None)]
struct Args {
    /// Translation API endpoint (optional, defaults to TRANSLATOR_API_ENDPOINT env var)
    #[arg(long)]
    api_endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("metadata_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Override config with CLI args if provided
    if let Some(api_endpoint) = args.api_endpoint {
        std::env::set_var("TRANSLATOR_API_ENDPOINT", api_endpoint);
    }

    match args.command {
        Some(Commands::Translate {
            text,
            lang,
            fallback,
            prefs,
            mode,
            engine,
            params,
        }) => {
            commands::handle_translate(text, lang, fallback, prefs, mode, engine, params).await?;
        }
        Some(Commands::Params { table }) => {
            commands::handle_params(table)?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
