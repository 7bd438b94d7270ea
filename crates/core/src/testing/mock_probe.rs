//! Mock path probe for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::reconciler::PathProbe;

/// Mock implementation of the PathProbe trait.
///
/// Answers from an in-memory set of paths and records every probe in order,
/// so tests can assert exactly which paths were looked at.
#[derive(Debug, Default)]
pub struct MockProbe {
    existing: Arc<RwLock<HashSet<PathBuf>>>,
    probed: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockProbe {
    /// Create a probe where nothing exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe where exactly the given paths exist.
    pub fn with_existing<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            existing: Arc::new(RwLock::new(paths.into_iter().map(Into::into).collect())),
            probed: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Mark a path as existing.
    pub async fn add_existing(&self, path: impl Into<PathBuf>) {
        self.existing.write().await.insert(path.into());
    }

    /// Paths probed so far, in order.
    pub async fn probed(&self) -> Vec<PathBuf> {
        self.probed.read().await.clone()
    }
}

#[async_trait]
impl PathProbe for MockProbe {
    async fn exists(&self, path: &Path) -> bool {
        self.probed.write().await.push(path.to_path_buf());
        self.existing.read().await.contains(path)
    }
}
