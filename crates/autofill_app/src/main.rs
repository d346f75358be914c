mod platform;

use std::path::PathBuf;

use anyhow::Context;
use autofill_logging::{LogDestination, DEFAULT_LOG_FILE};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use platform::AutofillConfig;

/// Suggests bookmark names for URLs typed or pasted on stdin.
#[derive(Debug, Parser)]
#[command(name = "autofill_app", version)]
struct Cli {
    /// RON config file; missing files fall back to defaults.
    #[arg(long, default_value = "autofill.ron")]
    config: PathBuf,
    /// URL of the page hosting the form.
    #[arg(long)]
    page_url: Option<String>,
    /// Base URL of the title endpoint.
    #[arg(long)]
    endpoint: Option<String>,
    /// Quiet period before a typed URL is looked up.
    #[arg(long)]
    debounce_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let destination = match cli.log {
        LogTarget::File => LogDestination::File(cli.log_file.clone()),
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both(cli.log_file.clone()),
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    autofill_logging::initialize(destination, level);

    let mut config = AutofillConfig::load(&cli.config)?;
    if let Some(page_url) = cli.page_url {
        config.page_url = page_url;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    let resolved = config.resolve().context("invalid configuration")?;

    platform::run_app(resolved).await
}
