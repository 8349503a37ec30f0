// HTTP snapshot source
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(url: String) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        FetchError::Transport {
            url: self.url.clone(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let payload = response.bytes().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(url = %self.url, bytes = payload.len(), "fetched snapshot");
        Ok(payload)
    }
}
