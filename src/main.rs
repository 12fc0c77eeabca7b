use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use lake_extractor::cli;
use serde_json::Value;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Lake Extractor: --{lakex}-> pulls a public API into date-partitioned Parquet
#[derive(Parser)]
#[command(name = "lakex", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source configuration from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one extraction: fetch, flatten, and land today's partition
    Run {
        /// Optional JSON event payload, accepted and ignored
        #[arg(default_value = "{}")]
        event: String,
    },

    /// Validate configuration without any network call or write
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Missing .env is fine; configuration may come from the process env.
    let _ = dotenvy::from_filename(&cli.env);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Run { event } => {
            let event: Value = serde_json::from_str(&event)
                .map_err(|e| eyre::eyre!("Invalid event payload: {e}"))?;
            let response = cli::run_extraction(event).await?;
            println!("{}", serde_json::to_string(&response)?);
        }
        Commands::Check => {
            cli::check_config()?;
        }
    }

    Ok(())
}
