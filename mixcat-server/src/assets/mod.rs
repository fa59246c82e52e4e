//! Image asset storage
//!
//! Uploaded images live as flat files under a single uploads directory,
//! named `<uuid>.<ext>`. The reference embedded in catalog records is the
//! public path `/uploads/<filename>`. Retrieval distinguishes a missing
//! file from an I/O fault so the HTTP layer can answer 404 vs 500.
//!
//! No garbage collection: callers remove replaced files best-effort via
//! [`AssetStore::remove`]; files orphaned by a crash stay on disk.

use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use uuid::Uuid;

/// Maximum accepted image payload: 5 MiB, enforced server-side.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Extensions we accept and serve. Anything else is stored as `bin`.
const KNOWN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Stored filenames: UUID plus a short lowercase extension. Also the
/// retrieval gate - anything else (dotfiles, separators, traversal) is
/// rejected before touching the filesystem.
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.[a-z0-9]{1,5}$")
        .expect("invalid filename regex")
});

/// Asset store error type
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {filename}")]
    NotFound { filename: String },

    #[error("asset I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Flat file store for uploaded images.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Store one image payload under a fresh collision-resistant name.
    ///
    /// Returns the generated filename. The extension is taken from the
    /// client-supplied filename when it is one we know.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_filename: Option<&str>,
    ) -> Result<String, AssetError> {
        let ext = original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .filter(|e| KNOWN_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or_else(|| "bin".to_owned());

        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        fs::write(self.root.join(&filename), bytes).await?;

        Ok(filename)
    }

    /// Read back the exact bytes stored under `filename`.
    ///
    /// A name failing the filename pattern or an absent file is
    /// `AssetError::NotFound`; anything else is an I/O fault.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, AssetError> {
        if !FILENAME_RE.is_match(filename) {
            return Err(AssetError::NotFound {
                filename: filename.to_owned(),
            });
        }

        match fs::read(self.root.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetError::NotFound {
                filename: filename.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of a previously stored file, by public path or
    /// bare filename. Failures are logged, never propagated; entity
    /// mutations must not fail because cleanup did.
    pub async fn remove(&self, reference: &str) {
        let filename = reference.rsplit('/').next().unwrap_or(reference);
        if !FILENAME_RE.is_match(filename) {
            return;
        }

        if let Err(e) = fs::remove_file(self.root.join(filename)).await {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(filename, "failed to remove replaced asset: {}", e);
            }
        }
    }

    /// Public path clients use to fetch `filename`.
    pub fn public_path(filename: &str) -> String {
        format!("/uploads/{}", filename)
    }

    /// Content type for a stored filename, from its extension.
    pub fn content_type(filename: &str) -> &'static str {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store(temp: &TempDir) -> AssetStore {
        AssetStore::open(temp.path().join("uploads")).await.unwrap()
    }

    #[tokio::test]
    async fn store_and_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        let filename = assets
            .store(b"fake png bytes", Some("glass.png"))
            .await
            .unwrap();

        assert!(filename.ends_with(".png"));
        let bytes = assets.read(&filename).await.unwrap();
        assert_eq!(bytes, b"fake png bytes");
    }

    #[tokio::test]
    async fn unknown_extension_becomes_bin() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        let filename = assets.store(b"data", Some("evil.exe")).await.unwrap();
        assert!(filename.ends_with(".bin"));

        let filename = assets.store(b"data", None).await.unwrap();
        assert!(filename.ends_with(".bin"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        let err = assets
            .read("00000000-0000-0000-0000-000000000000.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[tokio::test]
    async fn traversal_names_are_not_found() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        for name in ["../secret", "..%2fsecret", ".hidden", "a/b.png"] {
            let err = assets.read(name).await.unwrap_err();
            assert!(matches!(err, AssetError::NotFound { .. }), "{}", name);
        }
    }

    #[tokio::test]
    async fn remove_accepts_public_path() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        let filename = assets.store(b"x", Some("a.jpg")).await.unwrap();
        assets.remove(&AssetStore::public_path(&filename)).await;

        let err = assets.read(&filename).await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_missing_is_silent() {
        let temp = TempDir::new().unwrap();
        let assets = store(&temp).await;

        // Neither of these should panic or error
        assets
            .remove("/uploads/00000000-0000-0000-0000-000000000000.png")
            .await;
        assets.remove("not-a-stored-name").await;
    }

    #[test]
    fn content_types() {
        assert_eq!(AssetStore::content_type("a.png"), "image/png");
        assert_eq!(AssetStore::content_type("a.jpeg"), "image/jpeg");
        assert_eq!(AssetStore::content_type("a.bin"), "application/octet-stream");
    }
}
