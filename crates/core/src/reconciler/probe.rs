//! Filesystem existence probing.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Answers whether a path exists.
///
/// Implementations must not distinguish "absent" from "inaccessible":
/// anything that cannot be confirmed to exist is reported as missing.
#[async_trait]
pub trait PathProbe: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

#[async_trait]
impl PathProbe for FsProbe {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Probe of {} failed, treating as missing: {}", path.display(), e);
                false
            }
        }
    }
}

/// Join a torrent-relative file name onto a download root.
///
/// The result never leaves `root`: root and prefix components of `name` are
/// dropped, and `..` only undoes a component that `name` itself added.
pub fn resolve_under(root: &Path, name: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut depth = 0usize;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                depth += 1;
            }
            Component::ParentDir if depth > 0 => {
                path.pop();
                depth -= 1;
            }
            Component::ParentDir
            | Component::CurDir
            | Component::RootDir
            | Component::Prefix(_) => {}
        }
    }
    path
}
