use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pw_core::settings::CaptureSettings;
use tokio::fs;

/// JSON-file persistence for [`CaptureSettings`].
///
/// A missing file yields defaults. An unparsable file also yields defaults
/// with a warning: a broken config must never take the capture loop down
/// with it. Writes go through a temp file and rename so the settings file
/// is always either the old or the new content.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp settings failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp settings to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    pub async fn load(&self) -> Result<CaptureSettings> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CaptureSettings::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                log::warn!(
                    "settings file {} is unreadable, falling back to defaults: {err}",
                    self.path.display()
                );
                Ok(CaptureSettings::default())
            }
        }
    }

    pub async fn save(&self, settings: &CaptureSettings) -> Result<()> {
        let content =
            serde_json::to_string_pretty(settings).context("serialize settings failed")?;

        self.atomic_write(&content).await
    }
}
