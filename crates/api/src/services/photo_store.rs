//! Storage sink for captured check-in photos.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

use crate::config::MediaConfig;

/// Sink for captured verification photos. Implementations return a
/// public URL for the stored bytes.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn store(&self, bytes: &[u8]) -> io::Result<String>;
}

/// Filesystem-backed photo store.
///
/// Photos are content-addressed by SHA-256 digest and sharded by the
/// first two hex characters, so a re-submitted frame maps to the same
/// path and is written at most once.
pub struct FsPhotoStore {
    root: PathBuf,
    base_url: String,
}

impl FsPhotoStore {
    /// Creates a photo store rooted at the configured media directory.
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_dir),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn store(&self, bytes: &[u8]) -> io::Result<String> {
        let digest = shared::crypto::sha256_hex(bytes);
        let shard = &digest[..2];
        let dir = self.root.join(shard);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{digest}.jpg"));
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, bytes).await?;
        }

        Ok(format!("{}/{}/{}.jpg", self.base_url, shard, digest))
    }
}
