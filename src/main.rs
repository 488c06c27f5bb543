// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_docs_sync::{
    sync_docs, AppError, Command, CommandLineInput, NotionHttpClient, NotionRepository,
    SyncConfig, LOG_FILE_NAME,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("opening log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )
        .context("building logging configuration")?;

    log4rs::init_config(config).context("installing logger")?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Resolves the configuration and runs one sync.
async fn execute_sync(config: &SyncConfig) -> Result<(), AppError> {
    log::info!(
        "Syncing {} into Notion page {}",
        config.docs_path.display(),
        config.root_page
    );

    let client: Arc<dyn NotionRepository> = Arc::new(NotionHttpClient::new(&config.token)?);
    let report = sync_docs(config, client).await?;

    println!("✓ {}", report);

    report.ensure_complete()
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the token may come from the flag or the environment
    dotenvy::dotenv().ok();

    let cli = CommandLineInput::parse();
    let Command::Sync(args) = cli.command;

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    let result = match SyncConfig::resolve(args) {
        Ok(config) => execute_sync(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Run failed with {}: {}", e.kind(), e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
