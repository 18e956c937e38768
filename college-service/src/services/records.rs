use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::store::{Page, RecordStore};
use super::ServiceError;
use crate::models::{Changeset, Record};

/// CRUD over one entity type.
///
/// Performs validation only; callers are expected to have passed the auth
/// gate already.
pub struct RecordService<R: Record> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R: Record> RecordService<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    pub async fn list(&self, page: Page) -> Result<Vec<R>, ServiceError> {
        self.store.list(page).await
    }

    pub async fn create(&self, fields: R::Create) -> Result<R, ServiceError> {
        fields.validate()?;

        let record = R::from_create(Uuid::new_v4().to_string(), fields);
        self.store.insert(&record).await?;

        tracing::info!(kind = R::KIND, id = %record.id(), "Record created");
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<R, ServiceError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(R::KIND, id))
    }

    pub async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.store.find(id).await?.is_some())
    }

    pub async fn update(&self, id: &str, changes: R::Update) -> Result<R, ServiceError> {
        changes.validate()?;
        if changes.is_empty() {
            return Err(ServiceError::Validation(
                "At least one field must be supplied".to_string(),
            ));
        }

        let mut record = self.get(id).await?;
        record.apply(changes);

        if !self.store.replace(&record).await? {
            // Deleted between the read and the write.
            return Err(ServiceError::not_found(R::KIND, id));
        }

        tracing::info!(kind = R::KIND, id = %id, "Record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found(R::KIND, id));
        }

        tracing::info!(kind = R::KIND, id = %id, "Record deleted");
        Ok(())
    }
}
