use super::file_store::{FileStore, StoreError, VaultFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Replaced,
}

#[derive(Debug, Clone)]
pub struct Upserted {
    pub file: VaultFile,
    pub outcome: UpsertOutcome,
}

/// Write `data` to `path`, replacing the content of an existing file in place.
pub async fn upsert_text<F>(store: &F, path: &str, data: &str) -> Result<Upserted, StoreError>
where
    F: FileStore + ?Sized,
{
    if let Some(file) = store.get_file(path).await? {
        store.modify(&file, data).await?;
        return Ok(Upserted {
            file,
            outcome: UpsertOutcome::Replaced,
        });
    }

    let file = store.create(path, data).await?;
    Ok(Upserted {
        file,
        outcome: UpsertOutcome::Created,
    })
}

/// Binary counterpart of [`upsert_text`].
pub async fn upsert_binary<F>(store: &F, path: &str, data: &[u8]) -> Result<Upserted, StoreError>
where
    F: FileStore + ?Sized,
{
    if let Some(file) = store.get_file(path).await? {
        store.modify_binary(&file, data).await?;
        return Ok(Upserted {
            file,
            outcome: UpsertOutcome::Replaced,
        });
    }

    let file = store.create_binary(path, data).await?;
    Ok(Upserted {
        file,
        outcome: UpsertOutcome::Created,
    })
}
