//! Reconciler configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Configuration for a reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Directories probed, in order, for each selected file.
    /// Accepts a list or a comma-separated string.
    #[serde(deserialize_with = "dirs_from_list_or_csv")]
    pub download_dirs: Vec<PathBuf>,

    /// Delete the torrent's data along with the entry.
    #[serde(default = "default_delete_files")]
    pub delete_files: bool,

    /// Log what would be removed without removing anything.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_delete_files() -> bool {
    true
}

impl ReconcileConfig {
    /// Config with the given roots and default options.
    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            download_dirs: dirs.into_iter().map(Into::into).collect(),
            delete_files: default_delete_files(),
            dry_run: false,
        }
    }
}

fn dirs_from_list_or_csv<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dirs {
        List(Vec<PathBuf>),
        Csv(String),
    }

    Ok(match Dirs::deserialize(deserializer)? {
        Dirs::List(dirs) => dirs,
        Dirs::Csv(csv) => split_dir_list(&csv),
    })
}

/// Split a comma-separated directory list, dropping blank entries.
pub fn split_dir_list(csv: &str) -> Vec<PathBuf> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
