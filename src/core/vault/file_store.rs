use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault path: {0}")]
    InvalidPath(String),
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// A file inside the vault, addressed by its vault-relative `/`-separated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    pub path: String,
    pub name: String,
}

impl VaultFile {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name }
    }

    /// Name of the directory holding the file, `None` at the vault root.
    pub fn parent_name(&self) -> Option<&str> {
        let (parent, _) = self.path.rsplit_once('/')?;
        parent.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Join a vault directory and a file name.
pub fn vault_path(dir: &str, file_name: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", dir, file_name)
    }
}

/// File access the host application provides.
///
/// `create*` fail when the file exists and `modify*` fail when it does not;
/// the upsert helpers pick the right one.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// The file at `path`, or `None` when nothing (or a folder) is there.
    async fn get_file(&self, path: &str) -> Result<Option<VaultFile>, StoreError>;
    async fn folder_exists(&self, path: &str) -> Result<bool, StoreError>;
    async fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    async fn read(&self, file: &VaultFile) -> Result<String, StoreError>;
    async fn create(&self, path: &str, data: &str) -> Result<VaultFile, StoreError>;
    async fn modify(&self, file: &VaultFile, data: &str) -> Result<(), StoreError>;

    async fn create_binary(&self, path: &str, data: &[u8]) -> Result<VaultFile, StoreError>;
    async fn modify_binary(&self, file: &VaultFile, data: &[u8]) -> Result<(), StoreError>;
}
