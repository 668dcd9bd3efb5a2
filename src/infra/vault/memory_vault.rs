use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::vault::{FileStore, StoreError, VaultFile};

#[derive(Default)]
struct MemoryVaultData {
    files: BTreeMap<String, Vec<u8>>,
    folders: BTreeSet<String>,
}

/// In-memory vault. Backs `--dry-run` imports so nothing touches the disk.
#[derive(Default)]
pub struct MemoryVault {
    data: Mutex<MemoryVaultData>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file with its size in bytes, sorted by path.
    pub fn listing(&self) -> Vec<(String, usize)> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.files
            .iter()
            .map(|(path, bytes)| (path.clone(), bytes.len()))
            .collect()
    }

    fn with_data<T>(&self, f: impl FnOnce(&mut MemoryVaultData) -> T) -> T {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut data)
    }
}

#[cfg(test)]
impl MemoryVault {
    pub fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.with_data(|data| data.files.get(path).cloned())
    }

    pub fn text(&self, path: &str) -> Option<String> {
        self.bytes(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn insert_text(&self, path: &str, text: &str) {
        self.with_data(|data| data.files.insert(path.to_string(), text.as_bytes().to_vec()));
    }

    pub fn has_folder(&self, path: &str) -> bool {
        self.with_data(|data| data.folders.contains(path))
    }

    pub fn file_count(&self) -> usize {
        self.with_data(|data| data.files.len())
    }
}

#[async_trait]
impl FileStore for MemoryVault {
    async fn get_file(&self, path: &str) -> Result<Option<VaultFile>, StoreError> {
        Ok(self.with_data(|data| data.files.contains_key(path).then(|| VaultFile::new(path))))
    }

    async fn folder_exists(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.with_data(|data| data.folders.contains(path)))
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        self.with_data(|data| {
            if data.folders.contains(path) {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
            data.folders.insert(path.to_string());
            Ok(())
        })
    }

    async fn read(&self, file: &VaultFile) -> Result<String, StoreError> {
        self.with_data(|data| {
            data.files
                .get(&file.path)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .ok_or_else(|| StoreError::NotFound(file.path.clone()))
        })
    }

    async fn create(&self, path: &str, data: &str) -> Result<VaultFile, StoreError> {
        self.create_binary(path, data.as_bytes()).await
    }

    async fn modify(&self, file: &VaultFile, data: &str) -> Result<(), StoreError> {
        self.modify_binary(file, data.as_bytes()).await
    }

    async fn create_binary(&self, path: &str, bytes: &[u8]) -> Result<VaultFile, StoreError> {
        self.with_data(|data| {
            if data.files.contains_key(path) {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
            data.files.insert(path.to_string(), bytes.to_vec());
            Ok(VaultFile::new(path))
        })
    }

    async fn modify_binary(&self, file: &VaultFile, bytes: &[u8]) -> Result<(), StoreError> {
        self.with_data(|data| match data.files.get_mut(&file.path) {
            Some(existing) => {
                *existing = bytes.to_vec();
                Ok(())
            }
            None => Err(StoreError::NotFound(file.path.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_refuses_existing_file() {
        let vault = MemoryVault::new();
        vault.create("a.md", "one").await.unwrap();
        assert!(matches!(
            vault.create("a.md", "two").await,
            Err(StoreError::AlreadyExists(_))
        ));
        assert_eq!(vault.text("a.md").as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn test_modify_requires_existing_file() {
        let vault = MemoryVault::new();
        let result = vault.modify(&VaultFile::new("missing.md"), "x").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_listing_reports_sizes() {
        let vault = MemoryVault::new();
        vault.create_binary("are.na/1.png", &[0; 4]).await.unwrap();
        vault.create("are.na/2.md", "hi").await.unwrap();
        assert_eq!(
            vault.listing(),
            vec![
                ("are.na/1.png".to_string(), 4),
                ("are.na/2.md".to_string(), 2)
            ]
        );
    }
}
