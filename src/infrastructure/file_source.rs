// Filesystem snapshot source
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Bytes, FetchError> {
        let payload = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.describe(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), bytes = payload.len(), "read snapshot file");
        Ok(Bytes::from(payload))
    }
}
