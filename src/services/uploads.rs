use bytes::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::utils::sanitize_filename;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "mp4", "mov", "avi"];

/// Stores incident media on local disk.
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    pub async fn new(upload_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
            anyhow::anyhow!("Failed to create upload directory {}: {}", upload_dir.display(), e)
        })?;

        Ok(Self { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn allowed_file(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Writes one uploaded file and returns its stored name, or `None` when the
    /// extension is not accepted.
    pub async fn save(&self, original_name: &str, data: Bytes) -> anyhow::Result<Option<String>> {
        let safe_name = sanitize_filename(original_name);
        if !Self::allowed_file(&safe_name) {
            tracing::warn!(file = %original_name, "Rejected upload with disallowed extension");
            return Ok(None);
        }

        let tag = Uuid::new_v4().simple().to_string();
        let filename = format!(
            "{}_{}_{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            &tag[..8],
            safe_name
        );
        tokio::fs::write(self.upload_dir.join(&filename), &data).await?;

        tracing::info!(file = %filename, size = data.len(), "File saved");
        Ok(Some(filename))
    }

    /// Returns false when the file did not exist.
    pub async fn delete(&self, filename: &str) -> anyhow::Result<bool> {
        let path = self.upload_dir.join(sanitize_filename(filename));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %filename, "File deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(UploadService::allowed_file("photo.JPG"));
        assert!(UploadService::allowed_file("clip.mp4"));
        assert!(!UploadService::allowed_file("script.sh"));
        assert!(!UploadService::allowed_file("noextension"));
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().join("media")).await.unwrap();

        let stored = service
            .save("../flood photo.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.ends_with("_flood_photo.png"));

        let on_disk = tokio::fs::read(service.upload_dir().join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");

        assert!(service.delete(&stored).await.unwrap());
        assert!(!service.delete(&stored).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_name_saved_twice_gets_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().to_path_buf()).await.unwrap();

        let first = service.save("clip.mp4", Bytes::from_static(b"one")).await.unwrap().unwrap();
        let second = service.save("clip.mp4", Bytes::from_static(b"two")).await.unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(dir.path().join(&first)).await.unwrap(), b"one");
        assert_eq!(tokio::fs::read(dir.path().join(&second)).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_disallowed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().to_path_buf()).await.unwrap();

        let stored = service.save("payload.exe", Bytes::from_static(b"x")).await.unwrap();
        assert!(stored.is_none());
    }
}
