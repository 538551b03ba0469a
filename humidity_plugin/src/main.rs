/*!
# Humidity Converter Plugin

Loads the protocol configuration named by `PROTOCOL_CONFIG_PATH`, builds the
parameter catalog, and drives the register converter from the command line.

## Usage

### Validate configuration
```bash
PROTOCOL_CONFIG_PATH=protocol.yaml plugin-humidity check
```

### Encode a command issue
```bash
plugin-humidity --config protocol.yaml encode --device hum-001 --model humidity-v1 \
    --feature set-threshold --value threshold=0102
```

### Decode a device reply
```bash
plugin-humidity --config protocol.yaml decode 07
```
*/

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use register_codec::{Catalog, Converter};
use tracing::{error, info};

mod commands;

#[derive(Parser)]
#[command(name = "plugin-humidity")]
#[command(about = "Register converter plugin for humidity devices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Protocol configuration file path
    #[arg(short, long, env = "PROTOCOL_CONFIG_PATH")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and print catalog statistics
    Check,

    /// Convert a command issue into device payloads
    Encode {
        /// Target device id
        #[arg(short, long)]
        device: String,

        /// Device model id
        #[arg(short, long)]
        model: String,

        /// Command feature id
        #[arg(short, long)]
        feature: String,

        /// Parameter value as ID=DIGITS, repeatable
        #[arg(short, long = "value", value_parser = commands::parse_value_pair)]
        values: Vec<(String, String)>,
    },

    /// Convert hex-encoded device replies into the message-queue format
    Decode {
        /// Feature type of the reply
        #[arg(long, default_value = "command")]
        feature_type: String,

        /// Raw replies as hex strings; only the first is decoded
        messages: Vec<String>,
    },

    /// Build data report requests for a model feature
    Report {
        /// Device model id
        #[arg(short, long)]
        model: String,

        /// Feature id
        #[arg(short, long)]
        feature: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.json_logs);

    let catalog = Catalog::load(&cli.config)
        .with_context(|| format!("Failed to load protocol configuration {}", cli.config.display()))
        .inspect_err(|e| error!("{:#}", e))?;
    info!(path = %cli.config.display(), "protocol configuration loaded");

    let converter = Converter::new(Arc::new(catalog));

    match cli.command {
        Commands::Check => commands::check(&converter),
        Commands::Encode { device, model, feature, values } => {
            commands::encode(&converter, &device, &model, &feature, values)
        }
        Commands::Decode { feature_type, messages } => {
            commands::decode(&converter, &messages, &feature_type)
        }
        Commands::Report { model, feature } => commands::report(&converter, &model, &feature),
    }
}

/// Initialize logging to stderr to keep stdout clean for command output
fn init_logging(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
