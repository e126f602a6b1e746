//! File service over a single volume root directory.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use uuid::Uuid;

use crate::{Result, VolstoreError};

/// Prefix for in-flight upload files inside the volume root.
///
/// Entries carrying this prefix are invisible to listings and are removed
/// if the upload that created them fails.
const TMP_PREFIX: &str = ".upload-";

/// One stored file as observed from the volume root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Filename, unique within the volume.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Result of a successful store operation.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Filename as given by the client.
    pub name: String,
    /// Number of bytes written.
    pub size_bytes: u64,
    /// Destination path inside the volume root.
    pub path: PathBuf,
}

/// Volume reachability as reported by the health check.
#[derive(Debug, Clone, Copy)]
pub struct VolumeHealth {
    /// Whether the volume root is currently readable.
    pub reachable: bool,
}

/// File service for a configured storage volume.
///
/// All entries live directly under the volume root, one filesystem entry
/// per uploaded file, named exactly as given by the client (after
/// validation). The filesystem is the single source of truth; no separate
/// index is maintained.
#[derive(Debug, Clone)]
pub struct VolumeService {
    /// Root directory of the volume.
    root: PathBuf,
    /// Maximum upload size in bytes.
    max_file_size: u64,
}

impl VolumeService {
    /// Create a new VolumeService rooted at the given directory.
    ///
    /// The root directory is created if it does not exist.
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            VolstoreError::StorageUnavailable(format!(
                "cannot create volume root {}: {e}",
                root.display()
            ))
        })?;

        Ok(Self {
            root,
            max_file_size,
        })
    }

    /// Root directory of the volume.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maximum upload size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Store content under the given filename.
    ///
    /// The filename is validated before any filesystem access, the size
    /// limit is enforced before any write, and content is written to a
    /// temporary name then renamed into place. Readers never observe a
    /// partially written file, and a failed upload leaves nothing behind.
    ///
    /// Storing an existing filename silently overwrites it (last write
    /// wins).
    pub async fn store(&self, filename: &str, content: &[u8]) -> Result<StoredFile> {
        let target = self.entry_path(filename)?;

        let size_bytes = content.len() as u64;
        if size_bytes > self.max_file_size {
            return Err(VolstoreError::PayloadTooLarge {
                size_bytes,
                limit_bytes: self.max_file_size,
            });
        }

        let tmp = self.root.join(format!("{TMP_PREFIX}{}", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, content).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(StoredFile {
            name: filename.to_string(),
            size_bytes,
            path: target,
        })
    }

    /// List all files directly inside the volume root.
    ///
    /// Directories and in-flight upload files are skipped. The result is
    /// sorted by name so repeated listings are deterministic.
    pub async fn list(&self) -> Result<Vec<FileEntry>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            VolstoreError::StorageUnavailable(format!(
                "cannot read volume root {}: {e}",
                self.root.display()
            ))
        })?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.starts_with(TMP_PREFIX) {
                continue;
            }

            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }

            let modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            entries.push(FileEntry {
                name,
                size_bytes: meta.len(),
                modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Read the stored bytes for the given filename.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(filename)?;

        match fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VolstoreError::NotFound(format!("file {filename}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the entry with the given filename.
    ///
    /// Returns the path the entry occupied.
    pub async fn delete(&self, filename: &str) -> Result<PathBuf> {
        let path = self.entry_path(filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VolstoreError::NotFound(format!("file {filename}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether the volume root is currently readable.
    pub async fn health(&self) -> VolumeHealth {
        VolumeHealth {
            reachable: fs::read_dir(&self.root).await.is_ok(),
        }
    }

    /// Validate a filename and resolve it against the volume root.
    fn entry_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root.join(filename))
    }
}

/// Validate a client-supplied filename before it is joined to the volume root.
///
/// Names must be non-empty, must not be `.` or `..`, and must not contain
/// path separators or NUL bytes. Rejected names never touch the filesystem.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(VolstoreError::InvalidInput(
            "filename must not be empty".to_string(),
        ));
    }
    if filename == "." || filename == ".." {
        return Err(VolstoreError::InvalidInput(format!(
            "invalid filename: {filename}"
        )));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains('\0') {
        return Err(VolstoreError::InvalidInput(format!(
            "filename must not contain path separators: {filename}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, VolumeService) {
        let temp_dir = TempDir::new().unwrap();
        let service = VolumeService::new(temp_dir.path(), 1024).unwrap();
        (temp_dir, service)
    }

    #[test]
    fn test_new_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("volume");

        assert!(!root.exists());

        let service = VolumeService::new(&root, 1024).unwrap();

        assert!(root.exists());
        assert_eq!(service.root(), root);
        assert_eq!(service.max_file_size(), 1024);
    }

    #[tokio::test]
    async fn test_store_and_read() {
        let (_temp_dir, service) = setup();
        let content = b"Hello, volume!";

        let stored = service.store("hello.txt", content).await.unwrap();

        assert_eq!(stored.name, "hello.txt");
        assert_eq!(stored.size_bytes, content.len() as u64);
        assert_eq!(stored.path, service.root().join("hello.txt"));

        let loaded = service.read("hello.txt").await.unwrap();
        assert_eq!(loaded, content);
    }

    #[tokio::test]
    async fn test_store_then_list() {
        let (_temp_dir, service) = setup();

        service.store("a.txt", b"aaaaa").await.unwrap();

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size_bytes, 5);
    }

    #[tokio::test]
    async fn test_store_rejects_empty_filename() {
        let (_temp_dir, service) = setup();

        let result = service.store("", b"data").await;

        assert!(matches!(result, Err(VolstoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_store_rejects_path_traversal() {
        let (_temp_dir, service) = setup();

        for name in ["../../etc/passwd", "..\\secret", "a/b.txt", "..", "."] {
            let result = service.store(name, b"data").await;
            assert!(
                matches!(result, Err(VolstoreError::InvalidInput(_))),
                "{name} should be rejected"
            );
        }

        // Nothing was written anywhere.
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_rejects_oversize() {
        let temp_dir = TempDir::new().unwrap();
        let service = VolumeService::new(temp_dir.path(), 10).unwrap();

        let result = service.store("big.bin", &[0u8; 11]).await;

        match result {
            Err(VolstoreError::PayloadTooLarge {
                size_bytes,
                limit_bytes,
            }) => {
                assert_eq!(size_bytes, 11);
                assert_eq!(limit_bytes, 10);
            }
            other => panic!("expected PayloadTooLarge, got {other:?}"),
        }

        // No partial or temporary file survives the rejection.
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_store_at_limit_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let service = VolumeService::new(temp_dir.path(), 10).unwrap();

        let stored = service.store("exact.bin", &[0u8; 10]).await.unwrap();
        assert_eq!(stored.size_bytes, 10);
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let (_temp_dir, service) = setup();

        service.store("note.txt", b"first").await.unwrap();
        service.store("note.txt", b"second version").await.unwrap();

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size_bytes, 14);

        let loaded = service.read("note.txt").await.unwrap();
        assert_eq!(loaded, b"second version");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_temp_dir, service) = setup();

        let entries = service.list().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let (_temp_dir, service) = setup();

        service.store("c.txt", b"c").await.unwrap();
        service.store("a.txt", b"a").await.unwrap();
        service.store("b.txt", b"b").await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let (temp_dir, service) = setup();

        service.store("file.txt", b"data").await.unwrap();
        std::fs::create_dir(temp_dir.path().join("subdir")).unwrap();

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "file.txt");
    }

    #[tokio::test]
    async fn test_list_skips_inflight_uploads() {
        let (temp_dir, service) = setup();

        service.store("real.txt", b"data").await.unwrap();
        std::fs::write(temp_dir.path().join(".upload-abc123"), b"partial").unwrap();

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "real.txt");
    }

    #[tokio::test]
    async fn test_list_idempotent() {
        let (_temp_dir, service) = setup();

        service.store("a.txt", b"a").await.unwrap();
        service.store("b.txt", b"bb").await.unwrap();

        let first = service.list().await.unwrap();
        let second = service.list().await.unwrap();

        let names = |entries: &[FileEntry]| {
            entries.iter().map(|e| e.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let (_temp_dir, service) = setup();

        let result = service.read("missing.txt").await;
        assert!(matches!(result, Err(VolstoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_rejects_path_traversal() {
        let (_temp_dir, service) = setup();

        let result = service.read("../secret").await;
        assert!(matches!(result, Err(VolstoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, service) = setup();

        service.store("gone.txt", b"bye").await.unwrap();

        let path = service.delete("gone.txt").await.unwrap();
        assert_eq!(path, service.root().join("gone.txt"));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let (_temp_dir, service) = setup();

        let result = service.delete("missing.txt").await;
        assert!(matches!(result, Err(VolstoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_rejects_path_traversal() {
        let (_temp_dir, service) = setup();

        let result = service.delete("../secret").await;
        assert!(matches!(result, Err(VolstoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_binary_round_trip() {
        let (_temp_dir, service) = setup();

        let content: Vec<u8> = (0..=255).collect();

        service.store("binary.bin", &content).await.unwrap();
        let loaded = service.read("binary.bin").await.unwrap();

        assert_eq!(loaded, content);
    }

    #[tokio::test]
    async fn test_health() {
        let (temp_dir, service) = setup();

        assert!(service.health().await.reachable);

        std::fs::remove_dir_all(temp_dir.path()).unwrap();
        assert!(!service.health().await.reachable);
    }

    #[tokio::test]
    async fn test_upload_list_delete_scenario() {
        // Limit of 10 bytes: a 5-byte file fits, an 11-byte file does not.
        let temp_dir = TempDir::new().unwrap();
        let service = VolumeService::new(temp_dir.path(), 10).unwrap();

        let stored = service.store("a.txt", b"12345").await.unwrap();
        assert_eq!(stored.size_bytes, 5);

        let result = service.store("b.txt", b"12345678901").await;
        assert!(matches!(
            result,
            Err(VolstoreError::PayloadTooLarge { .. })
        ));

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt"]);

        service.delete("a.txt").await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        let result = service.delete("a.txt").await;
        assert!(matches!(result, Err(VolstoreError::NotFound(_))));
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("report.pdf").is_ok());
        assert!(validate_filename("no_extension").is_ok());
        assert!(validate_filename(".hidden").is_ok());
        assert!(validate_filename("日本語ファイル.txt").is_ok());

        assert!(validate_filename("").is_err());
        assert!(validate_filename(".").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("a/b").is_err());
        assert!(validate_filename("/etc/passwd").is_err());
        assert!(validate_filename("..\\windows").is_err());
        assert!(validate_filename("nul\0byte").is_err());
    }
}
