use std::path::PathBuf;

use crate::foundation::core::VideoMetadata;
use crate::foundation::error::{TrimError, TrimResult};
use crate::media::cache::CacheDir;
use crate::media::engine::MediaEngine;
use crate::media::fetch::Fetcher;
use crate::media::probe::probe_stream;

/// Obtains a locally playable copy of a source plus its intrinsic metadata.
pub struct IngestionPipeline<'a, E, F> {
    engine: &'a E,
    fetcher: &'a F,
    cache: &'a CacheDir,
}

impl<'a, E: MediaEngine, F: Fetcher> IngestionPipeline<'a, E, F> {
    /// Pipeline over the given collaborators.
    pub fn new(engine: &'a E, fetcher: &'a F, cache: &'a CacheDir) -> Self {
        Self {
            engine,
            fetcher,
            cache,
        }
    }

    /// Copy (unless `is_local`) and probe `source_uri` concurrently.
    ///
    /// The probe always reads `source_uri` as given. The first failure aborts the other task,
    /// removes any partial copy and returns no metadata.
    #[tracing::instrument(skip(self))]
    pub async fn ingest(&self, source_uri: &str, is_local: bool) -> TrimResult<VideoMetadata> {
        let target = (!is_local).then(|| self.cache.unique_path("mp4"));

        let copy = async {
            let Some(target) = target.as_deref() else {
                return Ok::<(), TrimError>(());
            };
            self.cache
                .ensure()
                .await
                .map_err(|e| TrimError::media_fetch(e.to_string()))?;
            self.fetcher.fetch(source_uri, target).await
        };
        let probe = probe_stream(self.engine, source_uri);

        let probed = match tokio::try_join!(copy, probe) {
            Ok(((), probed)) => probed,
            Err(err) => {
                // The copy future may have been dropped mid-write.
                if let Some(target) = &target {
                    self.cache.discard(target).await;
                }
                return Err(err);
            }
        };

        let uri = target.unwrap_or_else(|| PathBuf::from(source_uri));
        tracing::info!(
            uri = %uri.display(),
            width = probed.width,
            height = probed.height,
            duration = probed.duration,
            "source ingested"
        );

        Ok(VideoMetadata {
            uri,
            width: probed.width,
            height: probed.height,
            duration: probed.duration,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/ingest.rs"]
mod tests;
