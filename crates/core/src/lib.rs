pub mod config;
pub mod reconciler;
pub mod testing;
pub mod torrent_client;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, ENV_KEYS,
};
pub use reconciler::{
    resolve_under, FsProbe, PathProbe, ReconcileConfig, ReconcileError, ReconcileReport,
    Reconciler, ReportSummary, TorrentOutcome, Verdict,
};
pub use torrent_client::{
    QBittorrentClient, TorrentClient, TorrentClientError, TorrentFile, TorrentInfo, TorrentState,
};
