use anyhow::Result;
use async_trait::async_trait;

use crate::snapshot::ImageArtifact;

/// Persistence of derived binary artifacts (full images, thumbnails, file
/// previews) under the application's images directory.
///
/// Artifacts are written once and treated as immutable; the UI reads them
/// directly by file name. Deletion is driven externally by history eviction.
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Write the full image and a derived thumbnail, returning the artifact
    /// metadata with generated collision-resistant file names.
    async fn persist_image(&self, bytes: &[u8]) -> Result<ImageArtifact>;

    /// Best-effort preview thumbnail for a copied file. Unsupported or
    /// unreadable files yield `None`, never an error.
    async fn persist_file_preview(&self, path: &str) -> Option<String>;

    /// Remove an artifact and any sibling metadata file sharing its stem.
    /// Deleting a name that is already gone is not an error.
    async fn delete(&self, file_name: &str) -> Result<()>;
}
