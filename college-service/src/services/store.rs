use async_trait::async_trait;
use std::sync::Mutex;

use super::ServiceError;
use crate::models::Record;

/// Optional window over a listing. Absent values mean "from the start" and
/// "everything".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// Persistence for one entity type.
///
/// Uniqueness violations surface as [`ServiceError::Conflict`].
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<R>, ServiceError>;
    async fn find(&self, id: &str) -> Result<Option<R>, ServiceError>;
    async fn insert(&self, record: &R) -> Result<(), ServiceError>;
    /// Returns false when no record with that id exists.
    async fn replace(&self, record: &R) -> Result<bool, ServiceError>;
    /// Returns false when no record with that id exists.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}

pub(crate) fn conflict<R: Record>() -> ServiceError {
    match R::KIND {
        "Course" => ServiceError::Conflict("A course with this code already exists".to_string()),
        "Enrollment" => ServiceError::Conflict(
            "The student is already enrolled in this course for that semester".to_string(),
        ),
        kind => ServiceError::Conflict(format!("{} already exists", kind)),
    }
}

/// In-process store keeping records in insertion order.
///
/// Used by tests and local runs without MongoDB.
pub struct MemoryStore<R> {
    records: Mutex<Vec<R>>,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<R>>, ServiceError> {
        self.records
            .lock()
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn list(&self, page: Page) -> Result<Vec<R>, ServiceError> {
        let records = self.lock()?;
        let skip = page.skip.unwrap_or(0) as usize;
        let iter = records.iter().skip(skip).cloned();
        Ok(match page.limit {
            Some(limit) if limit > 0 => iter.take(limit as usize).collect(),
            _ => iter.collect(),
        })
    }

    async fn find(&self, id: &str) -> Result<Option<R>, ServiceError> {
        Ok(self.lock()?.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, record: &R) -> Result<(), ServiceError> {
        let mut records = self.lock()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(conflict::<R>());
        }
        if let Some(key) = record.unique_key() {
            if records.iter().any(|r| r.unique_key().as_deref() == Some(key.as_str())) {
                return Err(conflict::<R>());
            }
        }
        records.push(record.clone());
        Ok(())
    }

    async fn replace(&self, record: &R) -> Result<bool, ServiceError> {
        let mut records = self.lock()?;
        if let Some(key) = record.unique_key() {
            let clash = records.iter().any(|r| {
                r.id() != record.id() && r.unique_key().as_deref() == Some(key.as_str())
            });
            if clash {
                return Err(conflict::<R>());
            }
        }
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, NewCourse};

    fn course(id: &str, code: &str) -> Course {
        Course::from_create(
            id.to_string(),
            NewCourse {
                code: code.to_string(),
                title: "Database Systems".to_string(),
                credits: 3,
                department: "Computer Science".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_and_honours_window() {
        let store = MemoryStore::<Course>::new();
        for (id, code) in [("a", "CS1"), ("b", "CS2"), ("c", "CS3")] {
            store.insert(&course(id, code)).await.unwrap();
        }

        let all = store.list(Page::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let window = store
            .list(Page {
                skip: Some(1),
                limit: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, "b");
    }

    #[tokio::test]
    async fn duplicate_unique_key_is_a_conflict() {
        let store = MemoryStore::<Course>::new();
        store.insert(&course("a", "CS501")).await.unwrap();

        let err = store.insert(&course("b", "CS501")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(store.list(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_may_keep_its_own_key_but_not_take_another() {
        let store = MemoryStore::<Course>::new();
        store.insert(&course("a", "CS501")).await.unwrap();
        store.insert(&course("b", "CS502")).await.unwrap();

        let mut a = course("a", "CS501");
        a.title = "Advanced Programming".to_string();
        assert!(store.replace(&a).await.unwrap());

        let err = store.replace(&course("a", "CS502")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        assert!(!store.replace(&course("zzz", "CS999")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::<Course>::new();
        store.insert(&course("a", "CS501")).await.unwrap();
        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
    }
}
