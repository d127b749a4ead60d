use std::collections::HashMap;
use std::path::PathBuf;

use futures::future::{self, LocalBoxFuture};

use crate::error::CollaboratorError;

/// Fetches static text assets (the movie script) by path.
pub trait AssetSource {
    fn fetch_text(&self, path: &str) -> LocalBoxFuture<'static, Result<String, CollaboratorError>>;
}

/// Reads assets from a directory on disk, for the native binary.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn fetch_text(&self, path: &str) -> LocalBoxFuture<'static, Result<String, CollaboratorError>> {
        let full = self.root.join(path.trim_start_matches('/'));
        let result = std::fs::read_to_string(&full)
            .map_err(|e| CollaboratorError::Network(format!("{}: {}", full.display(), e)));
        Box::pin(future::ready(result))
    }
}

/// Fixed in-memory assets.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    files: HashMap<String, String>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, text: &str) -> Self {
        self.files.insert(path.to_string(), text.to_string());
        self
    }
}

impl AssetSource for StaticAssets {
    fn fetch_text(&self, path: &str) -> LocalBoxFuture<'static, Result<String, CollaboratorError>> {
        let result = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| CollaboratorError::Network(format!("{}: not found", path)));
        Box::pin(future::ready(result))
    }
}
