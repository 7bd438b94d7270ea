//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the torrent client and path
//! probe traits, allowing reconciliation to be tested without a qBittorrent
//! instance or a populated filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use qbclean_core::testing::{fixtures, MockProbe, MockTorrentClient};
//!
//! let client = MockTorrentClient::new();
//! client
//!     .add_torrent(fixtures::completed_torrent("h1", "T1"), vec![fixtures::file("a.txt", 1)])
//!     .await;
//! let probe = MockProbe::with_existing(["/data/a.txt"]);
//! ```

mod mock_probe;
mod mock_torrent_client;

pub use mock_probe::MockProbe;
pub use mock_torrent_client::{MockOperation, MockTorrentClient, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::torrent_client::{TorrentFile, TorrentInfo, TorrentState};

    /// A seeding torrent with nothing left to download.
    pub fn completed_torrent(hash: &str, name: &str) -> TorrentInfo {
        TorrentInfo {
            hash: hash.to_string(),
            name: name.to_string(),
            state: TorrentState::Seeding,
            progress: 1.0,
            size_bytes: 1024 * 1024 * 100, // 100 MB
            amount_left: 0,
            save_path: Some("/downloads".to_string()),
            category: None,
        }
    }

    /// A downloading torrent with `amount_left` bytes still missing.
    pub fn incomplete_torrent(hash: &str, name: &str, amount_left: u64) -> TorrentInfo {
        let size_bytes = 1024 * 1024 * 100;
        TorrentInfo {
            state: TorrentState::Downloading,
            progress: 1.0 - (amount_left as f64 / size_bytes as f64),
            size_bytes,
            amount_left,
            ..completed_torrent(hash, name)
        }
    }

    /// A fully downloaded file with the given priority.
    pub fn file(name: &str, priority: i32) -> TorrentFile {
        TorrentFile {
            index: 0,
            name: name.to_string(),
            size_bytes: 1024,
            progress: if priority == 0 { 0.0 } else { 1.0 },
            priority,
        }
    }
}
