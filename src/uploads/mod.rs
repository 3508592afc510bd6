//! Upload sink for record images.
//!
//! Files are written to the configured upload directory under a time-derived
//! name and served back from `/uploads/<name>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::AppError;
use crate::store::MonotonicClock;

/// Public mount point for uploaded files.
pub const UPLOADS_MOUNT: &str = "/uploads";

/// A file received with a create request, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client gave the file. Only its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Writes uploaded files into one directory.
#[derive(Debug)]
pub struct UploadSink {
    dir: PathBuf,
    clock: Arc<MonotonicClock>,
}

impl UploadSink {
    /// Create the sink, creating the upload directory if it does not exist.
    pub async fn init(dir: &Path, clock: Arc<MonotonicClock>) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
            clock,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the file and return its public path.
    ///
    /// The write completes before this returns.
    pub async fn store(&self, file: &UploadedFile) -> Result<String, AppError> {
        let name = stored_name(self.clock.next(), &file.file_name);
        let path = self.dir.join(&name);

        tokio::fs::write(&path, &file.bytes).await?;
        tracing::info!(
            "Stored upload {:?} as {} ({} bytes)",
            file.file_name,
            path.display(),
            file.bytes.len()
        );

        Ok(format!("{}/{}", UPLOADS_MOUNT, name))
    }
}

/// `<stamp>.<ext>`, or just `<stamp>` when the original name has no extension.
fn stored_name(stamp: u64, original: &str) -> String {
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", stamp, ext),
        _ => stamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stored_name_keeps_extension_only() {
        assert_eq!(stored_name(17, "photo.png"), "17.png");
        assert_eq!(stored_name(17, "archive.tar.gz"), "17.gz");
        assert_eq!(stored_name(17, "README"), "17");
        assert_eq!(stored_name(17, "../../etc/passwd"), "17");
        assert_eq!(stored_name(17, "../../evil.sh"), "17.sh");
        assert_eq!(stored_name(17, ".hidden"), "17");
    }

    #[tokio::test]
    async fn test_init_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("uploads");

        let sink = UploadSink::init(&dir, Arc::new(MonotonicClock::new()))
            .await
            .unwrap();

        assert!(sink.dir().is_dir());
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = UploadSink::init(temp_dir.path(), Arc::new(MonotonicClock::new()))
            .await
            .unwrap();

        let file = UploadedFile {
            file_name: "face.jpg".to_string(),
            bytes: b"not really a jpeg".to_vec(),
        };
        let public = sink.store(&file).await.unwrap();

        assert!(public.starts_with("/uploads/"));
        assert!(public.ends_with(".jpg"));

        let name = public.trim_start_matches("/uploads/");
        let written = std::fs::read(temp_dir.path().join(name)).unwrap();
        assert_eq!(written, file.bytes);
    }

    #[tokio::test]
    async fn test_same_instant_uploads_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let sink = UploadSink::init(temp_dir.path(), Arc::new(MonotonicClock::new()))
            .await
            .unwrap();

        let file = UploadedFile {
            file_name: "a.txt".to_string(),
            bytes: vec![1, 2, 3],
        };
        let first = sink.store(&file).await.unwrap();
        let second = sink.store(&file).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_write_failure_is_internal() {
        let temp_dir = TempDir::new().unwrap();
        let sink = UploadSink::init(temp_dir.path(), Arc::new(MonotonicClock::new()))
            .await
            .unwrap();
        std::fs::remove_dir_all(temp_dir.path()).unwrap();

        let file = UploadedFile {
            file_name: "a.txt".to_string(),
            bytes: vec![1],
        };
        let err = sink.store(&file).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
