//! Reconciler implementation.
//!
//! Walks the torrent list in the order the client reports it, and each
//! torrent's files in listing order. Every client call and probe is awaited
//! before the next one starts.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::torrent_client::{TorrentClient, TorrentFile, TorrentInfo};

use super::config::ReconcileConfig;
use super::probe::{resolve_under, PathProbe};
use super::types::{ReconcileError, ReconcileReport, TorrentOutcome, Verdict};

/// Removes completed torrents whose selected files are gone from every download dir.
pub struct Reconciler {
    client: Arc<dyn TorrentClient>,
    probe: Arc<dyn PathProbe>,
    config: ReconcileConfig,
}

impl Reconciler {
    /// Create a reconciler. Fails if no download dirs are configured.
    pub fn new(
        client: Arc<dyn TorrentClient>,
        probe: Arc<dyn PathProbe>,
        config: ReconcileConfig,
    ) -> Result<Self, ReconcileError> {
        if config.download_dirs.is_empty() {
            return Err(ReconcileError::NoDownloadDirs);
        }

        Ok(Self {
            client,
            probe,
            config,
        })
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Run one reconciliation pass.
    ///
    /// The first client error aborts the run; torrents already removed stay removed.
    pub async fn run(&self) -> Result<ReconcileReport, ReconcileError> {
        debug!("Listing torrents from {}", self.client.name());
        let torrents = self.client.list_torrents().await?;

        if torrents.is_empty() {
            info!("No torrents found");
            return Ok(ReconcileReport::default());
        }

        let mut report = ReconcileReport::default();
        for torrent in &torrents {
            let outcome = self.check_torrent(torrent).await?;
            report.outcomes.push(outcome);
        }

        let summary = report.summary();
        info!(
            total = summary.total,
            skipped = summary.skipped,
            present = summary.present,
            removed = summary.removed,
            would_remove = summary.would_remove,
            "Reconciliation finished"
        );

        Ok(report)
    }

    /// Decide, and act on, a single torrent.
    pub async fn check_torrent(
        &self,
        torrent: &TorrentInfo,
    ) -> Result<TorrentOutcome, ReconcileError> {
        let outcome = |verdict| TorrentOutcome {
            hash: torrent.hash.clone(),
            name: torrent.name.clone(),
            verdict,
        };

        if !torrent.is_complete() {
            debug!(
                state = torrent.state.as_str(),
                amount_left = torrent.amount_left,
                "Not complete: {}",
                torrent.hash
            );
            info!("Skipping because it's not complete: {}", torrent.name);
            return Ok(outcome(Verdict::SkippedIncomplete));
        }

        info!("Verifying if all files are present: {}", torrent.name);
        let files = self.client.list_files(&torrent.hash).await?;

        let mut checked_files = 0;
        for file in files.iter().filter(|f| f.is_selected()) {
            checked_files += 1;

            if self.locate(file).await.is_some() {
                continue;
            }

            let missing_file = file.name.clone();

            if self.config.dry_run {
                warn!(
                    "File {} is missing for {}, would remove the torrent (dry run)",
                    file.name, torrent.name
                );
                return Ok(outcome(Verdict::WouldRemove { missing_file }));
            }

            warn!(
                "File {} is missing for {}, removing the torrent",
                file.name, torrent.name
            );
            self.client
                .remove_torrent(&torrent.hash, self.config.delete_files)
                .await?;
            return Ok(outcome(Verdict::Removed { missing_file }));
        }

        info!("All files are present for {}", torrent.name);
        Ok(outcome(Verdict::AllPresent { checked_files }))
    }

    /// First download dir under which `file` exists, probing dirs in order.
    pub async fn locate(&self, file: &TorrentFile) -> Option<PathBuf> {
        for root in &self.config.download_dirs {
            let candidate = resolve_under(root, &file.name);
            if self.probe.exists(&candidate).await {
                debug!("Found {} at {}", file.name, candidate.display());
                return Some(candidate);
            }
        }
        None
    }
}
