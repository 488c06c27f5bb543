// src/config.rs
use crate::constants::NOTION_TOKEN_ENV;
use crate::error::AppError;
use crate::sync::SyncOptions;
use crate::types::{NotionToken, PageId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish a directory of Markdown/plain text files under a Notion page
    Sync(SyncArgs),
}

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Local documentation directory to publish
    pub docs_path: PathBuf,

    /// URL (or ID) of the Notion page that receives the docs
    pub notion_url: String,

    /// Notion integration token (falls back to the NOTION_TOKEN environment variable)
    #[arg(long)]
    pub notion_token: Option<String>,

    /// Keep child pages that no longer have a local counterpart
    #[arg(long, default_value_t = false)]
    pub no_prune: bool,

    /// Do not give newly created pages a random emoji icon
    #[arg(long, default_value_t = false)]
    pub no_icons: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved sync configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub docs_path: PathBuf,
    pub root_page: PageId,
    pub token: NotionToken,
    pub prune: bool,
    pub icons: bool,
    pub verbose: bool,
}

impl SyncConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(args: SyncArgs) -> Result<Self, AppError> {
        Self::resolve_with(args, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration, looking environment variables up through `env`.
    pub fn resolve_with(
        args: SyncArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let raw_token = match args.notion_token {
            Some(token) => token,
            None => env(NOTION_TOKEN_ENV).ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "pass --notion-token or set the {} environment variable",
                    NOTION_TOKEN_ENV
                ))
            })?,
        };

        let token = NotionToken::new(raw_token)?;
        let root_page = PageId::parse(&args.notion_url)?;

        Ok(SyncConfig {
            docs_path: args.docs_path,
            root_page,
            token,
            prune: !args.no_prune,
            icons: !args.no_icons,
            verbose: args.verbose,
        })
    }

    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            prune: self.prune,
            icons: self.icons,
        }
    }
}
