use std::future::Future;
use std::path::Path;

use crate::foundation::error::{TrimError, TrimResult};

/// Copies a remote source to a local path.
pub trait Fetcher {
    /// Materialize `remote` at `local`. `local` does not exist yet.
    fn fetch(&self, remote: &str, local: &Path) -> impl Future<Output = TrimResult<()>>;
}

/// [`Fetcher`] for `http(s)://` sources, with `file://` URIs copied directly.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Fetcher with a redirect-following client.
    pub fn new() -> TrimResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("vidtrim/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrimError::media_fetch(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    async fn download(&self, remote: &str, local: &Path) -> TrimResult<()> {
        use futures_util::StreamExt as _;
        use tokio::io::AsyncWriteExt as _;

        let response = self
            .client
            .get(remote)
            .send()
            .await
            .map_err(|e| TrimError::media_fetch(format!("request to '{remote}' failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TrimError::media_fetch(format!(
                "'{remote}' returned HTTP status {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(local).await.map_err(|e| {
            TrimError::media_fetch(format!("failed to create '{}': {e}", local.display()))
        })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| TrimError::media_fetch(format!("download interrupted: {e}")))?;
            file.write_all(&chunk).await.map_err(|e| {
                TrimError::media_fetch(format!("failed to write '{}': {e}", local.display()))
            })?;
        }
        file.flush()
            .await
            .map_err(|e| TrimError::media_fetch(format!("failed to flush download: {e}")))?;
        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, remote: &str, local: &Path) -> TrimResult<()> {
        if let Some(path) = remote.strip_prefix("file://") {
            tokio::fs::copy(path, local).await.map_err(|e| {
                TrimError::media_fetch(format!("failed to copy '{path}': {e}"))
            })?;
            return Ok(());
        }

        let result = self.download(remote, local).await;
        if result.is_err() {
            // Leave no partial file behind.
            let _ = tokio::fs::remove_file(local).await;
        }
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/fetch.rs"]
mod tests;
