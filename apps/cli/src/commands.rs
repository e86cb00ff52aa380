//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use layoutmap_core::{Request, Response, handle_request, handle_request_json};
use layoutmap_shared::{
    AppConfig, ExtractionConfig, LayoutMapError, init_config, load_config, load_config_from,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// layoutmap: normalize form-layout exports.
#[derive(Parser)]
#[command(
    name = "layoutmap",
    version,
    about = "Normalize form-layout XML exports into field, profile, card, button and database registries.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.layoutmap/layoutmap.toml.
    #[arg(long, global = true, env = "LAYOUTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract registries from a combined export and print the response envelope.
    Parse {
        /// Path to the combined XML export, or `-` for stdin.
        input: String,

        /// Fill dbInfo and lovs on field records from the schema section.
        #[arg(long)]
        link: bool,

        /// Pretty-print the JSON response.
        #[arg(long)]
        pretty: bool,
    },

    /// Serve line-delimited JSON task requests on stdin, one response per line.
    Serve,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries responses.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "layoutmap=info",
        1 => "layoutmap=debug",
        _ => "layoutmap=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            input,
            link,
            pretty,
        } => cmd_parse(cli.config.as_deref(), &input, link, pretty).await,
        Command::Serve => cmd_serve(cli.config.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()).await,
        },
    }
}

/// Load the explicit config file if one was given, else the user config.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// CLI flags override config file values.
fn extraction_config(config: &AppConfig, link: bool) -> ExtractionConfig {
    let mut extraction = config.extraction.clone();
    if link {
        extraction.link_db_fields = true;
    }
    extraction
}

fn read_input(input: &str) -> Result<String> {
    let xml = if input == "-" {
        std::io::read_to_string(std::io::stdin()).map_err(|e| LayoutMapError::io("<stdin>", e))?
    } else {
        std::fs::read_to_string(input).map_err(|e| LayoutMapError::io(input, e))?
    };
    Ok(xml)
}

async fn cmd_parse(config_path: Option<&Path>, input: &str, link: bool, pretty: bool) -> Result<()> {
    let config = resolve_config(config_path)?;
    let extraction = extraction_config(&config, link);
    let xml = read_input(input)?;

    info!(input, bytes = xml.len(), link = extraction.link_db_fields, "parsing export");

    let response = handle_request(Request::ParseCombined { xml }, &extraction);
    println!("{}", response.to_json(pretty || config.output.pretty)?);

    failure_as_error(&response)
}

fn failure_as_error(response: &Response) -> Result<()> {
    match &response.error {
        Some(error) => Err(eyre!("extraction failed: {}", error.message)),
        None => Ok(()),
    }
}

async fn cmd_serve(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let extraction = Arc::new(config.extraction);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served = 0usize;

    info!("serving task requests on stdin");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // Each request runs in its own blocking task with no shared mutable state.
        let extraction = Arc::clone(&extraction);
        let response =
            tokio::task::spawn_blocking(move || handle_request_json(&line, &extraction)).await?;

        let json = response.to_json(false)?;
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;

        served += 1;
        debug!(served, success = response.success, "response written");
    }

    info!(served, "request stream closed");
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
