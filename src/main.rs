//! Main entry point for the Google Translate CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use google_translator::cli::commands::{self, Commands};

/// Google Translate web client
#[derive(Parser, Debug)]
#[command(name = "google-translator", version, about, long_about = None)]
struct Args {
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

    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("google_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Some(Commands::Translate {
            text,
            source_lang,
            target_lang,
            suffix,
            timeout,
            proxy,
            json,
        }) => {
            let config = commands::build_config(suffix, timeout, proxy)?;
            commands::handle_translate(text, source_lang, target_lang, config, json).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages();
        }
        Some(Commands::Server { host, port }) => {
            let config = commands::build_config(None, None, Vec::new())?;
            commands::handle_server(host, port, config).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
