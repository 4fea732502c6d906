use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use image::GenericImageView;
use pw_core::ports::ArtifactStorePort;
use pw_core::snapshot::ImageArtifact;
use tokio::fs;

use super::thumbnail::Thumbnailer;

/// Extensions eligible for a file preview. Only regular files with one of
/// these extensions, no larger than `MAX_PREVIEW_SOURCE_BYTES`, get a
/// thumbnail; everything else quietly yields no preview.
const PREVIEWABLE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff",
];
const MAX_PREVIEW_SOURCE_BYTES: u64 = 64 * 1024 * 1024;

/// Filesystem-backed artifact store rooted at the images directory.
///
/// Writes full images, thumbnails and one `<stem>.json` sidecar carrying the
/// artifact metadata. Files are written once and never touched again; the
/// UI reads them by name.
pub struct FsArtifactStore {
    images_dir: PathBuf,
    thumbnailer: Thumbnailer,
}

impl FsArtifactStore {
    pub fn new(images_dir: PathBuf) -> Self {
        Self {
            images_dir,
            thumbnailer: Thumbnailer::default(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Collision-resistant stem: millisecond timestamp for human sorting
    /// plus a random suffix for uniqueness within the same millisecond.
    fn generate_stem(&self, prefix: &str) -> String {
        let ms = chrono::Utc::now().timestamp_millis();
        let rand = uuid::Uuid::new_v4().simple().to_string();
        format!("{prefix}-{ms}-{}", &rand[..8])
    }

    async fn write_sidecar(&self, stem: &str, artifact: &ImageArtifact) {
        let path = self.images_dir.join(format!("{stem}.json"));
        match serde_json::to_vec_pretty(artifact) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json).await {
                    log::warn!("write artifact sidecar {} failed: {err}", path.display());
                }
            }
            Err(err) => log::warn!("serialize artifact sidecar failed: {err}"),
        }
    }
}

/// Artifact names are plain file names inside the images directory; anything
/// that resolves outside it is refused.
fn validate_file_name(file_name: &str) -> Result<()> {
    ensure!(!file_name.is_empty(), "empty artifact file name");
    ensure!(
        Path::new(file_name).file_name().is_some_and(|n| n == file_name),
        "artifact file name must not contain path components: {file_name}"
    );
    Ok(())
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    async fn persist_image(&self, bytes: &[u8]) -> Result<ImageArtifact> {
        fs::create_dir_all(&self.images_dir).await.with_context(|| {
            format!("create images dir failed: {}", self.images_dir.display())
        })?;

        // One render gives both the thumbnail and the source dimensions.
        // When only the encode side fails we still have a decodable image,
        // so fall back to a metadata-only decode and emit without thumbnail.
        let rendered = match self.thumbnailer.render(bytes) {
            Ok(r) => Some(r),
            Err(err) => {
                log::warn!("thumbnail render failed: {err:#}");
                None
            }
        };
        let (width, height) = match &rendered {
            Some(r) => (r.source_width, r.source_height),
            None => image::load_from_memory(bytes)
                .context("decode image bytes")?
                .dimensions(),
        };

        let stem = self.generate_stem("img");
        let file_name = format!("{stem}.png");
        fs::write(self.images_dir.join(&file_name), bytes)
            .await
            .with_context(|| format!("write image {file_name} failed"))?;

        let thumb_file_name = match rendered {
            Some(r) => {
                let name = format!("{stem}.thumb.webp");
                match fs::write(self.images_dir.join(&name), &r.webp_bytes).await {
                    Ok(()) => Some(name),
                    Err(err) => {
                        log::warn!("write thumbnail {name} failed: {err}");
                        None
                    }
                }
            }
            None => None,
        };

        let artifact = ImageArtifact {
            width,
            height,
            size_bytes: bytes.len() as u64,
            file_name,
            thumb_file_name,
        };
        self.write_sidecar(&stem, &artifact).await;
        Ok(artifact)
    }

    async fn persist_file_preview(&self, path: &str) -> Option<String> {
        let meta = fs::metadata(path).await.ok()?;
        if !meta.is_file() || meta.len() > MAX_PREVIEW_SOURCE_BYTES {
            return None;
        }
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        if !PREVIEWABLE_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }

        let bytes = fs::read(path).await.ok()?;
        let rendered = match self.thumbnailer.render(&bytes) {
            Ok(r) => r,
            Err(err) => {
                log::debug!("file preview render failed for {path}: {err:#}");
                return None;
            }
        };

        fs::create_dir_all(&self.images_dir).await.ok()?;
        let name = format!("{}.thumb.webp", self.generate_stem("file"));
        match fs::write(self.images_dir.join(&name), &rendered.webp_bytes).await {
            Ok(()) => Some(name),
            Err(err) => {
                log::warn!("write file preview {name} failed: {err}");
                None
            }
        }
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        validate_file_name(file_name)?;

        let remove = |path: PathBuf| async move {
            match fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => {
                    Err(err).with_context(|| format!("remove artifact failed: {}", path.display()))
                }
            }
        };

        remove(self.images_dir.join(file_name)).await?;
        if let Some(stem) = Path::new(file_name).file_stem().and_then(|s| s.to_str()) {
            remove(self.images_dir.join(format!("{stem}.json"))).await?;
        }
        Ok(())
    }
}
