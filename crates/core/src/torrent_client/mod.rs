//! Torrent client abstraction.
//!
//! This module provides a `TorrentClient` trait covering the operations the
//! reconciler needs, with a qBittorrent WebUI backend.

mod qbittorrent;
mod types;

pub use qbittorrent::QBittorrentClient;
pub use types::*;
