use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::core::vault::{FileStore, StoreError, VaultFile};

/// Vault backed by a directory on disk. Vault paths are `/`-separated and
/// relative to `root`.
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault path onto the filesystem, refusing anything that escapes the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path);
        if path.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    async fn write_new(&self, path: &str, data: &[u8]) -> Result<VaultFile, StoreError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_string()),
                _ => StoreError::Io(e),
            })?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(VaultFile::new(path))
    }

    async fn overwrite(&self, file: &VaultFile, data: &[u8]) -> Result<(), StoreError> {
        let target = self.resolve(&file.path)?;
        if !fs::try_exists(&target).await? {
            return Err(StoreError::NotFound(file.path.clone()));
        }
        fs::write(&target, data).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStore for LocalVault {
    async fn get_file(&self, path: &str) -> Result<Option<VaultFile>, StoreError> {
        let target = self.resolve(path)?;
        match fs::metadata(&target).await {
            Ok(meta) if meta.is_file() => Ok(Some(VaultFile::new(path))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn folder_exists(&self, path: &str) -> Result<bool, StoreError> {
        let target = self.resolve(path)?;
        match fs::metadata(&target).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let target = self.resolve(path)?;
        fs::create_dir_all(target).await?;
        Ok(())
    }

    async fn read(&self, file: &VaultFile) -> Result<String, StoreError> {
        let target = self.resolve(&file.path)?;
        fs::read_to_string(&target).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(file.path.clone()),
            _ => StoreError::Io(e),
        })
    }

    async fn create(&self, path: &str, data: &str) -> Result<VaultFile, StoreError> {
        self.write_new(path, data.as_bytes()).await
    }

    async fn modify(&self, file: &VaultFile, data: &str) -> Result<(), StoreError> {
        self.overwrite(file, data.as_bytes()).await
    }

    async fn create_binary(&self, path: &str, data: &[u8]) -> Result<VaultFile, StoreError> {
        self.write_new(path, data).await
    }

    async fn modify_binary(&self, file: &VaultFile, data: &[u8]) -> Result<(), StoreError> {
        self.overwrite(file, data).await
    }
}
