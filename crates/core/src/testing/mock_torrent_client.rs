//! Mock torrent client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::torrent_client::{TorrentClient, TorrentClientError, TorrentFile, TorrentInfo};

/// Client operations, for error injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListTorrents,
    ListFiles,
    RemoveTorrent,
}

/// A recorded client call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListTorrents,
    ListFiles { hash: String },
    RemoveTorrent { hash: String, delete_files: bool },
}

/// Internal state for a mock torrent.
#[derive(Debug, Clone)]
struct MockTorrentState {
    info: TorrentInfo,
    files: Vec<TorrentFile>,
}

/// Mock implementation of the TorrentClient trait.
///
/// Provides controllable behavior for testing:
/// - Torrents are listed in insertion order
/// - Every call is recorded for assertions
/// - Per-operation one-shot failures
///
/// # Example
///
/// ```rust,ignore
/// let client = MockTorrentClient::new();
/// client
///     .add_torrent(fixtures::completed_torrent("h1", "T1"), vec![fixtures::file("a.txt", 1)])
///     .await;
///
/// client.fail_next(MockOperation::RemoveTorrent, TorrentClientError::Timeout).await;
///
/// // ... run the reconciler ...
///
/// assert_eq!(client.list_files_calls().await, vec!["h1"]);
/// ```
#[derive(Debug, Default)]
pub struct MockTorrentClient {
    /// Torrents in listing order.
    torrents: Arc<RwLock<Vec<MockTorrentState>>>,
    /// Recorded calls, in order.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// Errors returned by the next call of each operation.
    pending_errors: Arc<RwLock<HashMap<MockOperation, TorrentClientError>>>,
}

impl MockTorrentClient {
    /// Create a new mock torrent client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a torrent with its files.
    pub async fn add_torrent(&self, info: TorrentInfo, files: Vec<TorrentFile>) {
        self.torrents
            .write()
            .await
            .push(MockTorrentState { info, files });
    }

    /// Configure the next call of `operation` to fail with the given error.
    pub async fn fail_next(&self, operation: MockOperation, error: TorrentClientError) {
        self.pending_errors.write().await.insert(operation, error);
    }

    /// Check if a torrent exists.
    pub async fn has_torrent(&self, hash: &str) -> bool {
        self.torrents
            .read()
            .await
            .iter()
            .any(|t| t.info.hash == hash)
    }

    /// Get the number of torrents.
    pub async fn torrent_count(&self) -> usize {
        self.torrents.read().await.len()
    }

    /// All recorded calls, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Hashes passed to `list_files`, in order.
    pub async fn list_files_calls(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedCall::ListFiles { hash } => Some(hash.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(hash, delete_files)` pairs passed to `remove_torrent`, in order.
    pub async fn remove_calls(&self) -> Vec<(String, bool)> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedCall::RemoveTorrent { hash, delete_files } => {
                    Some((hash.clone(), *delete_files))
                }
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    /// Take the pending error for an operation, if set.
    async fn take_error(&self, operation: MockOperation) -> Option<TorrentClientError> {
        self.pending_errors.write().await.remove(&operation)
    }
}

#[async_trait]
impl TorrentClient for MockTorrentClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_torrents(&self) -> Result<Vec<TorrentInfo>, TorrentClientError> {
        self.record(RecordedCall::ListTorrents).await;
        if let Some(err) = self.take_error(MockOperation::ListTorrents).await {
            return Err(err);
        }

        Ok(self
            .torrents
            .read()
            .await
            .iter()
            .map(|t| t.info.clone())
            .collect())
    }

    async fn list_files(&self, hash: &str) -> Result<Vec<TorrentFile>, TorrentClientError> {
        self.record(RecordedCall::ListFiles {
            hash: hash.to_string(),
        })
        .await;
        if let Some(err) = self.take_error(MockOperation::ListFiles).await {
            return Err(err);
        }

        self.torrents
            .read()
            .await
            .iter()
            .find(|t| t.info.hash == hash)
            .map(|t| t.files.clone())
            .ok_or_else(|| TorrentClientError::TorrentNotFound(hash.to_string()))
    }

    async fn remove_torrent(
        &self,
        hash: &str,
        delete_files: bool,
    ) -> Result<(), TorrentClientError> {
        self.record(RecordedCall::RemoveTorrent {
            hash: hash.to_string(),
            delete_files,
        })
        .await;
        if let Some(err) = self.take_error(MockOperation::RemoveTorrent).await {
            return Err(err);
        }

        let mut torrents = self.torrents.write().await;
        match torrents.iter().position(|t| t.info.hash == hash) {
            Some(index) => {
                torrents.remove(index);
                Ok(())
            }
            None => Err(TorrentClientError::TorrentNotFound(hash.to_string())),
        }
    }
}
