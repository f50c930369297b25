use std::future::Future;

use crate::foundation::core::VideoMetadata;
use crate::foundation::error::TrimError;

/// The application embedding the editor: it shows and dismisses the editing view.
pub trait EditorHost {
    /// The session started opening; present the view.
    fn present(&self) -> impl Future<Output = ()>;

    /// Session state has been reset; dismiss the view.
    fn dismiss(&self) -> impl Future<Output = ()>;

    /// Ingestion finished and the editor is interactive.
    fn ready(&self, metadata: &VideoMetadata) {
        let _ = metadata;
    }

    /// An operation failed in a way the user should see.
    fn failed(&self, error: &TrimError) {
        let _ = error;
    }
}

/// Host without a view. Reports every signal through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessHost;

impl EditorHost for HeadlessHost {
    async fn present(&self) {
        tracing::debug!("editor presented");
    }

    async fn dismiss(&self) {
        tracing::debug!("editor dismissed");
    }

    fn ready(&self, metadata: &VideoMetadata) {
        tracing::info!(
            uri = %metadata.uri.display(),
            duration = metadata.duration,
            "editor ready"
        );
    }

    fn failed(&self, error: &TrimError) {
        tracing::error!(error = %error, "editor operation failed");
    }
}
