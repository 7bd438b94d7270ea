//! Types for torrent client operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during torrent client operations.
#[derive(Debug, Error)]
pub enum TorrentClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Torrent not found: {0}")]
    TorrentNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// State of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorrentState {
    /// Downloading from peers.
    Downloading,
    /// Fetching metadata (magnet without info dict yet).
    MetaDownload,
    /// Seeding to peers.
    Seeding,
    /// Download or upload is paused.
    Paused,
    /// Checking file integrity.
    Checking,
    /// Data is being relocated on disk.
    Moving,
    /// Queued for download.
    Queued,
    /// Stalled (no peers).
    Stalled,
    /// The client reports the torrent's data as missing.
    MissingFiles,
    /// Error state.
    Error,
    /// Unknown state.
    Unknown,
}

impl TorrentState {
    /// Returns the string representation for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            TorrentState::Downloading => "downloading",
            TorrentState::MetaDownload => "meta_download",
            TorrentState::Seeding => "seeding",
            TorrentState::Paused => "paused",
            TorrentState::Checking => "checking",
            TorrentState::Moving => "moving",
            TorrentState::Queued => "queued",
            TorrentState::Stalled => "stalled",
            TorrentState::MissingFiles => "missing_files",
            TorrentState::Error => "error",
            TorrentState::Unknown => "unknown",
        }
    }

    /// States in which the on-disk layout or file list is in flux.
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            TorrentState::Moving | TorrentState::Checking | TorrentState::MetaDownload
        )
    }
}

/// Information about a torrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentInfo {
    /// Info hash (lowercase hex).
    pub hash: String,
    /// Torrent name.
    pub name: String,
    /// Current state.
    pub state: TorrentState,
    /// Download progress (0.0 - 1.0).
    pub progress: f64,
    /// Total size of the selected files in bytes.
    pub size_bytes: u64,
    /// Bytes still to download.
    pub amount_left: u64,
    /// Save path on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    /// Category/label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TorrentInfo {
    /// Whether the torrent has finished downloading and is safe to verify
    /// against the filesystem.
    ///
    /// Nothing may be left to download, and the torrent must not be in a
    /// transitional state. Error states are deliberately not excluded:
    /// a torrent whose data vanished is what reconciliation looks for.
    pub fn is_complete(&self) -> bool {
        self.amount_left == 0 && !self.state.is_transitional()
    }
}

/// A file belonging to a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentFile {
    /// Position in the torrent's file list.
    pub index: u32,
    /// Path relative to the download directory.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Download progress (0.0 - 1.0).
    pub progress: f64,
    /// Download priority. 0 means the file was deselected.
    pub priority: i32,
}

impl TorrentFile {
    /// Whether the file was selected for download.
    pub fn is_selected(&self) -> bool {
        self.priority != 0
    }
}

/// Trait for torrent client backends.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// List all torrents in the order the backend reports them.
    async fn list_torrents(&self) -> Result<Vec<TorrentInfo>, TorrentClientError>;

    /// List the files of a torrent in the order the backend reports them.
    async fn list_files(&self, hash: &str) -> Result<Vec<TorrentFile>, TorrentClientError>;

    /// Remove a torrent.
    /// If `delete_files` is true, also delete downloaded files.
    async fn remove_torrent(&self, hash: &str, delete_files: bool)
        -> Result<(), TorrentClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent(amount_left: u64, state: TorrentState) -> TorrentInfo {
        TorrentInfo {
            hash: "abc123".to_string(),
            name: "Test Torrent".to_string(),
            state,
            progress: 1.0,
            size_bytes: 1024,
            amount_left,
            save_path: None,
            category: None,
        }
    }

    #[test]
    fn test_torrent_state_as_str() {
        assert_eq!(TorrentState::Downloading.as_str(), "downloading");
        assert_eq!(TorrentState::MetaDownload.as_str(), "meta_download");
        assert_eq!(TorrentState::Seeding.as_str(), "seeding");
        assert_eq!(TorrentState::Moving.as_str(), "moving");
        assert_eq!(TorrentState::MissingFiles.as_str(), "missing_files");
        assert_eq!(TorrentState::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_torrent_state_serialization() {
        assert_eq!(
            serde_json::to_string(&TorrentState::MissingFiles).unwrap(),
            "\"missing_files\""
        );
        assert_eq!(
            serde_json::to_string(&TorrentState::Seeding).unwrap(),
            "\"seeding\""
        );
    }

    #[test]
    fn test_is_complete_requires_nothing_left() {
        assert!(torrent(0, TorrentState::Seeding).is_complete());
        assert!(!torrent(1, TorrentState::Seeding).is_complete());
        assert!(!torrent(4096, TorrentState::Downloading).is_complete());
    }

    #[test]
    fn test_is_complete_excludes_transitional_states() {
        assert!(!torrent(0, TorrentState::Moving).is_complete());
        assert!(!torrent(0, TorrentState::Checking).is_complete());
        assert!(!torrent(0, TorrentState::MetaDownload).is_complete());
    }

    #[test]
    fn test_is_complete_keeps_error_states() {
        assert!(torrent(0, TorrentState::MissingFiles).is_complete());
        assert!(torrent(0, TorrentState::Error).is_complete());
        assert!(torrent(0, TorrentState::Paused).is_complete());
    }

    #[test]
    fn test_file_is_selected() {
        let mut file = TorrentFile {
            index: 0,
            name: "movie/file.mkv".to_string(),
            size_bytes: 10,
            progress: 1.0,
            priority: 1,
        };
        assert!(file.is_selected());

        file.priority = 7;
        assert!(file.is_selected());

        file.priority = 0;
        assert!(!file.is_selected());
    }

    #[test]
    fn test_torrent_info_serialization() {
        let mut info = torrent(0, TorrentState::Seeding);
        info.save_path = Some("/downloads".to_string());

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("category"));

        let parsed: TorrentInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.hash, "abc123");
        assert_eq!(parsed.state, TorrentState::Seeding);
        assert_eq!(parsed.save_path, Some("/downloads".to_string()));
    }
}
