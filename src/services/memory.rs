//! In-memory Store
//!
//! Backs demo mode and controller tests. Behaves like the REST store:
//! ids are assigned on create and unknown ids are `NotFound`.

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use super::storage::{ObjectStorage, content_type_for};
use super::store::EntityStore;
use crate::constants::MAX_IMAGE_BYTES;
use crate::domain::{EntityId, Record};
use crate::error::{Error, Result};

/// A table kept in process memory
pub struct MemoryStore<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn not_found(id: &EntityId) -> Error {
        Error::NotFound {
            entity: T::LABEL,
            id: id.to_string(),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> EntityStore<T> for MemoryStore<T> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        Ok(self.rows.read().await.clone())
    }

    async fn create(&self, draft: &T::Draft) -> Result<T> {
        let record = T::from_draft(EntityId::generate(), draft);
        self.rows.write().await.push(record.clone());
        tracing::debug!(table = T::TABLE, id = %record.id(), "Inserted in memory");
        Ok(record)
    }

    async fn update(&self, id: &EntityId, draft: &T::Draft) -> Result<T> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| &r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        row.apply_draft(draft);
        Ok(row.clone())
    }

    async fn remove(&self, id: &EntityId) -> Result<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| &r.id() != id);
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

/// Object storage that keeps uploads in memory and hands out `memory://` URLs
#[derive(Default)]
pub struct MemoryStorage {
    uploads: Mutex<Vec<(String, usize)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys and sizes uploaded so far
    pub async fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().await.clone()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        content_type_for(key)?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::Invalid {
                message: format!("Image exceeds {MAX_IMAGE_BYTES} bytes"),
            });
        }
        self.uploads.lock().await.push((key.to_string(), bytes.len()));
        Ok(format!("memory://{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, ClientDraft};

    fn draft(nombre: &str) -> ClientDraft {
        ClientDraft {
            nombre: nombre.into(),
            documento: nombre.to_lowercase(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_update_remove() {
        let store: MemoryStore<Client> = MemoryStore::new();
        let ana = store.create(&draft("Ana")).await.unwrap();
        assert_eq!(store.len().await, 1);

        let updated = store
            .update(&ana.id, &ClientDraft { compras: 4, ..draft("Ana") })
            .await
            .unwrap();
        assert_eq!(updated.compras, 4);
        assert_eq!(store.fetch_all().await.unwrap()[0].compras, 4);

        store.remove(&ana.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store: MemoryStore<Client> = MemoryStore::new();
        let missing = EntityId::from("nope");
        assert!(matches!(
            store.update(&missing, &draft("x")).await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(store.remove(&missing).await, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn storage_rejects_unknown_extension() {
        let storage = MemoryStorage::new();
        assert!(storage.upload("p1/foto.bmp", vec![0; 4]).await.is_err());
        let url = storage.upload("p1/foto.png", vec![0; 4]).await.unwrap();
        assert_eq!(url, "memory://p1/foto.png");
        assert_eq!(storage.uploads().await, vec![("p1/foto.png".to_string(), 4)]);
    }
}
