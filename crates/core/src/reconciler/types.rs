//! Reconciler types.

use serde::Serialize;
use thiserror::Error;

use crate::torrent_client::TorrentClientError;

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Torrent client error: {0}")]
    Client(#[from] TorrentClientError),

    #[error("No download directories configured")]
    NoDownloadDirs,
}

/// What the reconciler decided for one torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Verdict {
    /// Not complete; its files were not looked at.
    SkippedIncomplete,
    /// Every selected file was found under some download dir.
    AllPresent { checked_files: usize },
    /// A selected file was missing and the torrent was removed.
    Removed { missing_file: String },
    /// A selected file was missing; dry run, so nothing was removed.
    WouldRemove { missing_file: String },
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::SkippedIncomplete => "skipped_incomplete",
            Verdict::AllPresent { .. } => "all_present",
            Verdict::Removed { .. } => "removed",
            Verdict::WouldRemove { .. } => "would_remove",
        }
    }

    /// The selected file found missing, if any.
    pub fn missing_file(&self) -> Option<&str> {
        match self {
            Verdict::Removed { missing_file } | Verdict::WouldRemove { missing_file } => {
                Some(missing_file)
            }
            _ => None,
        }
    }
}

/// Outcome for a single torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentOutcome {
    pub hash: String,
    pub name: String,
    pub verdict: Verdict,
}

/// Per-torrent outcomes of a run, in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub outcomes: Vec<TorrentOutcome>,
}

/// Counts per verdict kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub skipped: usize,
    pub present: usize,
    pub removed: usize,
    pub would_remove: usize,
}

impl ReconcileReport {
    /// True when the client reported no torrents at all.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes for torrents that were removed.
    pub fn removed(&self) -> impl Iterator<Item = &TorrentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, Verdict::Removed { .. }))
    }

    /// Look up the outcome for a hash.
    pub fn outcome(&self, hash: &str) -> Option<&TorrentOutcome> {
        self.outcomes.iter().find(|o| o.hash == hash)
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.outcomes.len(),
            ..Default::default()
        };
        for outcome in &self.outcomes {
            match outcome.verdict {
                Verdict::SkippedIncomplete => summary.skipped += 1,
                Verdict::AllPresent { .. } => summary.present += 1,
                Verdict::Removed { .. } => summary.removed += 1,
                Verdict::WouldRemove { .. } => summary.would_remove += 1,
            }
        }
        summary
    }
}
