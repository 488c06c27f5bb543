// src/sync/report.rs
//! Outcome of a sync run.

use crate::error::AppError;
use std::fmt;

/// A node whose subtree could not be synced.
#[derive(Debug)]
pub struct SyncFailure {
    /// Path of the node relative to the docs root.
    pub path: String,
    pub error: AppError,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// Counters and failures collected while syncing.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub pages_created: usize,
    pub pages_matched: usize,
    pub pages_archived: usize,
    pub files_populated: usize,
    pub blocks_written: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every node was synced.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record_failure(&mut self, path: impl Into<String>, error: AppError) {
        let failure = SyncFailure {
            path: path.into(),
            error,
        };
        log::error!("Failed to sync {}", failure);
        self.failures.push(failure);
    }

    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }

    /// Turns recorded failures into [`AppError::SyncIncomplete`].
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(AppError::SyncIncomplete {
                failures: self.failure_messages(),
            })
        }
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page(s) created, {} matched, {} archived; {} file(s) populated with {} block(s)",
            self.pages_created,
            self.pages_matched,
            self.pages_archived,
            self.files_populated,
            self.blocks_written
        )?;
        if !self.failures.is_empty() {
            write!(f, "; {} failure(s)", self.failures.len())?;
        }
        Ok(())
    }
}
