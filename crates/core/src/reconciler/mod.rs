//! Torrent/filesystem reconciliation.
//!
//! For every completed torrent, each selected file is looked up under the
//! configured download dirs. The first file that cannot be found anywhere
//! gets the torrent removed from the client; its remaining files are not
//! checked.

mod config;
mod probe;
mod runner;
mod types;

pub use config::{split_dir_list, ReconcileConfig};
pub use probe::{resolve_under, FsProbe, PathProbe};
pub use runner::Reconciler;
pub use types::{ReconcileError, ReconcileReport, ReportSummary, TorrentOutcome, Verdict};
