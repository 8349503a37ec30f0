// Source trait for the attendance snapshot resource
use crate::domain::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Where the snapshot comes from, for logs and diagnostics
    fn describe(&self) -> String;

    /// Retrieve the raw snapshot payload once
    async fn fetch(&self) -> Result<Bytes, FetchError>;
}
