use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qbclean_core::Config;

/// Remove qBittorrent torrents whose downloaded files are gone from disk.
#[derive(Debug, Parser)]
#[command(name = "qbclean", version, about)]
pub struct Args {
    /// TOML config file. Environment variables override its values.
    #[arg(long, env = "QBCLEAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log what would be removed without removing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Remove torrent entries but leave their data on disk.
    #[arg(long)]
    pub keep_files: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "QBCLEAN_LOG_FORMAT")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Args {
    /// Apply command-line switches on top of the loaded config.
    ///
    /// Switches only ever make a run more conservative; absent flags leave
    /// the config untouched.
    pub fn apply(&self, config: &mut Config) {
        if self.dry_run {
            config.reconcile.dry_run = true;
        }
        if self.keep_files {
            config.reconcile.delete_files = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbclean_core::load_config_from_str;

    fn config() -> Config {
        load_config_from_str(
            r#"
[server]
url = "http://localhost:8080"
username = "admin"
password = "adminadmin"

[reconcile]
download_dirs = ["/data"]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["qbclean"]).unwrap();
        assert!(!args.dry_run);
        assert!(!args.keep_files);
        assert_eq!(args.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "qbclean",
            "--config",
            "/etc/qbclean.toml",
            "--dry-run",
            "--keep-files",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/etc/qbclean.toml")));
        assert!(args.dry_run);
        assert!(args.keep_files);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Args::try_parse_from(["qbclean", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_apply_without_flags_keeps_config() {
        let args = Args::try_parse_from(["qbclean"]).unwrap();
        let mut config = config();
        args.apply(&mut config);

        assert!(!config.reconcile.dry_run);
        assert!(config.reconcile.delete_files);
    }

    #[test]
    fn test_apply_flags() {
        let args = Args::try_parse_from(["qbclean", "--dry-run", "--keep-files"]).unwrap();
        let mut config = config();
        args.apply(&mut config);

        assert!(config.reconcile.dry_run);
        assert!(!config.reconcile.delete_files);
    }
}
