//! Entity Store
//!
//! The CRUD surface every management page talks to. Calls are pass-through:
//! no retry and no caching.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{EntityId, Record};
use crate::error::Result;

/// A backend table of `T` records
#[async_trait]
pub trait EntityStore<T: Record>: Send + Sync {
    /// Every row of the table
    async fn fetch_all(&self) -> Result<Vec<T>>;

    /// Insert a row; the store assigns the id
    async fn create(&self, draft: &T::Draft) -> Result<T>;

    /// Replace the editable columns of row `id`
    async fn update(&self, id: &EntityId, draft: &T::Draft) -> Result<T>;

    /// Delete row `id`
    async fn remove(&self, id: &EntityId) -> Result<()>;
}

#[async_trait]
impl<T: Record, S: EntityStore<T> + ?Sized> EntityStore<T> for Arc<S> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        (**self).fetch_all().await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &EntityId, draft: &T::Draft) -> Result<T> {
        (**self).update(id, draft).await
    }

    async fn remove(&self, id: &EntityId) -> Result<()> {
        (**self).remove(id).await
    }
}
