pub mod file_store;
pub mod upsert;

pub use file_store::{vault_path, FileStore, StoreError, VaultFile};
pub use upsert::{upsert_binary, upsert_text, Upserted};
