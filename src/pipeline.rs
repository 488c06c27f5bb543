// src/pipeline.rs
//! The sync pipeline: walk the local tree, then publish it.
//!
//! The walk happens before any API call, so a missing or unreadable docs
//! directory fails without touching Notion.

use crate::analytics::measure_tree;
use crate::api::NotionRepository;
use crate::config::SyncConfig;
use crate::error::AppError;
use crate::sync::{SyncOrchestrator, SyncReport};
use crate::walker::walk_directory;
use std::sync::Arc;

/// Syncs `config.docs_path` into the configured root page through `repository`.
///
/// Per-node failures and unreadable local entries end up in the returned
/// report; see [`SyncReport::ensure_complete`] to turn them into an error.
pub async fn sync_docs(
    config: &SyncConfig,
    repository: Arc<dyn NotionRepository>,
) -> Result<SyncReport, AppError> {
    let outcome = walk_directory(&config.docs_path)?;

    let summary = measure_tree(&outcome.root);
    log::info!(
        "Found {} file(s) in {} director(ies) under {} ({} page(s) to sync, max depth {})",
        summary.files,
        summary.directories,
        config.docs_path.display(),
        summary.page_count(),
        summary.deepest_nesting
    );
    if !outcome.warnings.is_empty() {
        log::warn!(
            "{} unreadable entr(ies) left out of the sync",
            outcome.warnings.len()
        );
    }

    let orchestrator = SyncOrchestrator::new(repository, config.options());
    let mut report = orchestrator.run(&outcome.root, &config.root_page).await?;

    for warning in &outcome.warnings {
        report.record_failure(warning.path.display().to_string(), warning.to_error());
    }
    Ok(report)
}
