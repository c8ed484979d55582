//! Persistence seam for portal records.
//!
//! [`Repository`] is the async CRUD interface the portal talks to. The
//! [`InMemoryRepository`] keeps records in insertion order behind a
//! `tokio::sync::RwLock` and is shared cheaply by cloning.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use spmb_core::{SpmbError, SpmbResult};

use crate::models::Entity;

/// Async CRUD over one record type.
///
/// Implementations must be `Send + Sync` so that one store can back several
/// collaborators.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Returns the record with `id`.
    async fn get(&self, id: &str) -> SpmbResult<T>;

    /// Returns all records in insertion order.
    async fn list(&self) -> SpmbResult<Vec<T>>;

    /// Stores a new record, assigning an id if it has none.
    async fn create(&self, entity: T) -> SpmbResult<T>;

    /// Replaces the record with the same id.
    async fn update(&self, entity: T) -> SpmbResult<T>;

    /// Removes the record with `id`.
    async fn delete(&self, id: &str) -> SpmbResult<()>;
}

fn not_found<T: Entity>(id: &str) -> SpmbError {
    SpmbError::NotFound(format!("{} '{id}'", T::KIND))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A repository that keeps records in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a store seeded with `items`, stored as given.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: &str) -> SpmbResult<T> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn list(&self) -> SpmbResult<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn create(&self, mut entity: T) -> SpmbResult<T> {
        let mut items = self.items.write().await;
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        if items.iter().any(|item| item.id() == entity.id()) {
            return Err(SpmbError::Conflict(format!(
                "{} '{}' already exists",
                T::KIND,
                entity.id()
            )));
        }
        entity.stamp(None, now());
        tracing::debug!(kind = T::KIND, id = entity.id(), "created record");
        items.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> SpmbResult<T> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == entity.id())
            .ok_or_else(|| not_found::<T>(entity.id()))?;
        entity.stamp(Some(&*slot), now());
        *slot = entity.clone();
        tracing::debug!(kind = T::KIND, id = entity.id(), "updated record");
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> SpmbResult<()> {
        let mut items = self.items.write().await;
        let position = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        items.remove(position);
        tracing::debug!(kind = T::KIND, id, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentScheme;
    use spmb_forms::FormTemplate;

    fn scheme(id: &str) -> PaymentScheme {
        PaymentScheme {
            id: id.to_string(),
            nama: format!("Skema {id}"),
            jumlah: 250_000,
            keterangan: String::new(),
            is_active: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo: InMemoryRepository<PaymentScheme> = InMemoryRepository::new();
        repo.create(scheme("1")).await.unwrap();
        let got = repo.get("1").await.unwrap();
        assert_eq!(got.nama, "Skema 1");
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo: InMemoryRepository<PaymentScheme> = InMemoryRepository::new();
        let created = repo.create(scheme("")).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(repo.get(&created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repo = InMemoryRepository::with_items(vec![scheme("1")]);
        let err = repo.create(scheme("1")).await.unwrap_err();
        assert!(matches!(err, SpmbError::Conflict(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let repo: InMemoryRepository<PaymentScheme> = InMemoryRepository::new();
        assert!(matches!(repo.get("x").await, Err(SpmbError::NotFound(_))));
        assert!(matches!(repo.update(scheme("x")).await, Err(SpmbError::NotFound(_))));
        assert!(matches!(repo.delete("x").await, Err(SpmbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo: InMemoryRepository<PaymentScheme> = InMemoryRepository::new();
        for id in ["3", "1", "2"] {
            repo.create(scheme(id)).await.unwrap();
        }
        repo.delete("1").await.unwrap();
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[tokio::test]
    async fn test_update_replaces() {
        let repo = InMemoryRepository::with_items(vec![scheme("1")]);
        let mut changed = scheme("1");
        changed.jumlah = 300_000;
        repo.update(changed).await.unwrap();
        assert_eq!(repo.get("1").await.unwrap().jumlah, 300_000);
    }

    #[tokio::test]
    async fn test_template_timestamps() {
        let repo: InMemoryRepository<FormTemplate> = InMemoryRepository::new();
        let created = repo.create(FormTemplate::new("t", "Form")).await.unwrap();
        assert_eq!(created.created_at(), created.updated_at());
        assert_ne!(created.created_at(), NaiveDateTime::default());

        let mut edited = FormTemplate::new("t", "Form Baru");
        edited.is_active = true;
        let updated = repo.update(edited).await.unwrap();
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() >= created.updated_at());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo: InMemoryRepository<PaymentScheme> = InMemoryRepository::new();
        let other = repo.clone();
        repo.create(scheme("1")).await.unwrap();
        assert_eq!(other.len().await, 1);
    }
}
