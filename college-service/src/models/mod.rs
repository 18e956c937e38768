//! Stored entities.
//!
//! Every entity is persisted with its identifier under `_id` and exposed over
//! HTTP through its `Response` type, which renames it to `id`.

mod course;
mod enrollment;
mod student;

pub use course::{Course, CourseChanges, CourseResponse, NewCourse};
pub use enrollment::{Enrollment, EnrollmentChanges, EnrollmentResponse, NewEnrollment};
pub use student::{NewStudent, Student, StudentChanges, StudentResponse};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Keeps an explicit `null` apart from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: a missing
/// field stays `None`, `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial update. Only fields that are `Some` are applied.
pub trait Changeset: Validate {
    fn is_empty(&self) -> bool;
}

/// An entity type managed by a record service.
pub trait Record:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Human readable name used in error messages, e.g. `Student`.
    const KIND: &'static str;
    /// Mongo collection holding this entity.
    const COLLECTION: &'static str;

    type Create: Validate + DeserializeOwned + Send + 'static;
    type Update: Changeset + DeserializeOwned + Send + 'static;
    type Response: Serialize + From<Self> + Send + 'static;

    fn id(&self) -> &str;

    fn from_create(id: String, fields: Self::Create) -> Self;

    fn apply(&mut self, changes: Self::Update);

    /// Value that must be unique across the collection, if any.
    ///
    /// Mongo enforces this through a unique index; the in-memory store
    /// compares these keys directly.
    fn unique_key(&self) -> Option<String> {
        None
    }
}
