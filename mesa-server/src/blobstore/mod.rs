//! Blob Store
//!
//! Filesystem-backed object store for catalog images, constructed once
//! at startup and injected through [`crate::core::ServerState`] — no
//! module-level credentials. Keys are deterministic
//! `{entity}/{id}/{filename}` paths; reads go through short-lived
//! signed URLs (sha2 over secret + key + expiry) so the HTTP layer can
//! serve blobs without consulting the database.

use sha2::{Digest, Sha256};
use shared::util::now_millis;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    secret: String,
}

impl BlobStore {
    /// Open (and create if missing) the store under `root`.
    pub fn new(root: impl Into<PathBuf>, secret: impl Into<String>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            secret: secret.into(),
        })
    }

    /// Deterministic key for an entity's image
    pub fn object_key(entity: &str, id: i64, filename: &str) -> String {
        // Keep only the filename component; strip any path the client sent.
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        format!("{entity}/{id}/{name}")
    }

    fn resolve(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|part| part.is_empty() || part == "." || part == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    pub fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        tracing::debug!(key, size = bytes.len(), "Blob stored");
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve(key)?;
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(fs::read(&path)?)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    fn signature(&self, key: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(key.as_bytes());
        hasher.update(b":");
        hasher.update(expires.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Relative signed URL valid for `ttl_secs`
    pub fn presigned_get_url(&self, key: &str, ttl_secs: i64) -> String {
        let expires = now_millis() / 1000 + ttl_secs;
        let sig = self.signature(key, expires);
        format!("/api/images/{key}?expires={expires}&sig={sig}")
    }

    /// Check a signed GET: signature matches and not expired.
    pub fn verify(&self, key: &str, expires: i64, sig: &str) -> bool {
        if expires < now_millis() / 1000 {
            return false;
        }
        self.signature(key, expires) == sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, BlobStore) {
        let dir = TempDir::new().unwrap();
        let store = BlobStore::new(dir.path().join("blobs"), "test-secret").unwrap();
        (dir, store)
    }

    #[test]
    fn put_get_exists_remove_roundtrip() {
        let (_dir, store) = store();
        let key = BlobStore::object_key("product", 42, "foto.jpg");
        assert_eq!(key, "product/42/foto.jpg");
        assert!(!store.exists(&key));

        store.put(&key, b"bytes").unwrap();
        assert!(store.exists(&key));
        assert_eq!(store.get(&key).unwrap(), b"bytes");

        store.remove(&key).unwrap();
        assert!(!store.exists(&key));
        assert!(matches!(store.get(&key), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn traversal_keys_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(store.put("../escape", b"x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.put("/abs", b"x"), Err(StorageError::InvalidKey(_))));
        assert!(!store.exists("a//b"));
    }

    #[test]
    fn object_key_strips_client_paths() {
        assert_eq!(
            BlobStore::object_key("category", 7, "../../etc/passwd"),
            "category/7/passwd"
        );
    }

    #[test]
    fn signed_urls_verify_until_expiry() {
        let (_dir, store) = store();
        let url = store.presigned_get_url("product/1/a.jpg", 60);
        assert!(url.starts_with("/api/images/product/1/a.jpg?expires="));

        let expires: i64 = url.split("expires=").nth(1).unwrap().split('&').next().unwrap().parse().unwrap();
        let sig = url.split("sig=").nth(1).unwrap().to_string();

        assert!(store.verify("product/1/a.jpg", expires, &sig));
        // Wrong key, tampered sig, or past expiry all fail.
        assert!(!store.verify("product/1/b.jpg", expires, &sig));
        assert!(!store.verify("product/1/a.jpg", expires, "deadbeef"));
        assert!(!store.verify("product/1/a.jpg", now_millis() / 1000 - 1, &sig));
    }
}
