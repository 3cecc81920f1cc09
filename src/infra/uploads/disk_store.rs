use std::path::PathBuf;
use std::sync::LazyLock;
use chrono::Utc;
use rand::Rng;
use regex::Regex;
use tracing::info;

use crate::error::AppError;

static FILENAME_SANITIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.]").unwrap());

pub const PAYMENT_PROOF_DIR: &str = "pop";
pub const GALLERY_DIR: &str = "gallery";

/// Stores uploads on local disk under per-category subdirectories, with
/// a timestamp + random-suffix + sanitized-name scheme so concurrent
/// uploads of the same filename cannot collide.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Writes the bytes and returns the public path (`/files/{dir}/{name}`).
    pub async fn save(&self, subdir: &str, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::InternalWithMsg(format!("Failed to create upload dir: {}", e))
        })?;

        let sanitized = FILENAME_SANITIZE_RE.replace_all(original_name, "_");
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let filename = format!("{}-{}-{}", Utc::now().timestamp_millis(), suffix, sanitized);

        let target = dir.join(&filename);
        tokio::fs::write(&target, bytes).await.map_err(|e| {
            AppError::InternalWithMsg(format!("Failed to write upload: {}", e))
        })?;

        info!("Stored upload: {}", target.display());
        Ok(format!("/files/{}/{}", subdir, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_sanitizes_and_namespaces() {
        let tmp = std::env::temp_dir().join(format!("store_test_{}", uuid::Uuid::new_v4()));
        let store = DiskStore::new(&tmp);

        let path = store.save(PAYMENT_PROOF_DIR, "my receipt (1).png", b"fake-image").await.unwrap();
        assert!(path.starts_with("/files/pop/"));
        assert!(path.ends_with("my_receipt__1_.png"));
        assert!(!path.contains(' '));

        let on_disk = tmp.join(PAYMENT_PROOF_DIR).join(path.rsplit('/').next().unwrap());
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"fake-image");

        let _ = tokio::fs::remove_dir_all(&tmp).await;
    }
}
