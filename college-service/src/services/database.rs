use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};

use super::store::{conflict, Page, RecordStore};
use super::ServiceError;
use crate::models::{Course, Enrollment, Record, Student};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, ServiceError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            ServiceError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), ServiceError> {
        tracing::info!("Creating MongoDB indexes for college-service");

        let course_code_index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(
                IndexOptions::builder()
                    .name("course_code_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection::<Course>()
            .create_index(course_code_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create unique code index on courses: {}", e);
                ServiceError::from(e)
            })?;
        tracing::info!("Created unique index on courses.code");

        let enrollment_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "course_id": 1, "semester": 1 })
            .options(
                IndexOptions::builder()
                    .name("enrollment_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection::<Enrollment>()
            .create_index(enrollment_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create unique index on enrollments: {}", e);
                ServiceError::from(e)
            })?;
        tracing::info!("Created index on enrollments.(student_id, course_id, semester)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), ServiceError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                ServiceError::from(e)
            })?;
        Ok(())
    }

    pub fn collection<R: Record>(&self) -> Collection<R> {
        self.db.collection(R::COLLECTION)
    }

    pub fn students(&self) -> MongoStore<Student> {
        MongoStore::new(self.collection())
    }

    pub fn courses(&self) -> MongoStore<Course> {
        MongoStore::new(self.collection())
    }

    pub fn enrollments(&self) -> MongoStore<Enrollment> {
        MongoStore::new(self.collection())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// [`RecordStore`] over one Mongo collection.
pub struct MongoStore<R: Record> {
    collection: Collection<R>,
}

impl<R: Record> MongoStore<R> {
    pub fn new(collection: Collection<R>) -> Self {
        Self { collection }
    }

    fn map_write_error(err: mongodb::error::Error) -> ServiceError {
        if is_duplicate_key(&err) {
            tracing::debug!(kind = R::KIND, "Duplicate key rejected by storage");
            conflict::<R>()
        } else {
            tracing::error!(kind = R::KIND, "Failed to write record: {}", err);
            ServiceError::from(err)
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MongoStore<R> {
    async fn list(&self, page: Page) -> Result<Vec<R>, ServiceError> {
        let find_options = FindOptions::builder()
            .skip(page.skip)
            .limit(page.limit.filter(|l| *l > 0))
            .build();

        let cursor = self
            .collection
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!(kind = R::KIND, "Failed to list records: {}", e);
                ServiceError::from(e)
            })?;

        let records: Vec<R> = cursor.try_collect().await.map_err(|e| {
            tracing::error!(kind = R::KIND, "Failed to collect records: {}", e);
            ServiceError::from(e)
        })?;

        Ok(records)
    }

    async fn find(&self, id: &str) -> Result<Option<R>, ServiceError> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(kind = R::KIND, id = %id, "Failed to fetch record: {}", e);
                ServiceError::from(e)
            })
    }

    async fn insert(&self, record: &R) -> Result<(), ServiceError> {
        self.collection
            .insert_one(record, None)
            .await
            .map_err(Self::map_write_error)?;
        Ok(())
    }

    async fn replace(&self, record: &R) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": record.id() }, record, None)
            .await
            .map_err(Self::map_write_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(kind = R::KIND, id = %id, "Failed to delete record: {}", e);
                ServiceError::from(e)
            })?;
        Ok(result.deleted_count > 0)
    }
}
