use super::{Page, RecordService, ServiceError};
use crate::models::{Course, Enrollment, EnrollmentChanges, NewEnrollment, Student};

/// Enrollment records plus the referential checks the document store does
/// not perform: both the student and the course must exist.
#[derive(Clone)]
pub struct EnrollmentService {
    records: RecordService<Enrollment>,
    students: RecordService<Student>,
    courses: RecordService<Course>,
}

impl EnrollmentService {
    pub fn new(
        records: RecordService<Enrollment>,
        students: RecordService<Student>,
        courses: RecordService<Course>,
    ) -> Self {
        Self {
            records,
            students,
            courses,
        }
    }

    pub fn records(&self) -> &RecordService<Enrollment> {
        &self.records
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Enrollment>, ServiceError> {
        self.records.list(page).await
    }

    pub async fn create(&self, fields: NewEnrollment) -> Result<Enrollment, ServiceError> {
        self.ensure_references(Some(&fields.student_id), Some(&fields.course_id))
            .await?;
        self.records.create(fields).await
    }

    pub async fn update(
        &self,
        id: &str,
        changes: EnrollmentChanges,
    ) -> Result<Enrollment, ServiceError> {
        // An unknown id is a 404 regardless of what the changes reference.
        self.records.get(id).await?;
        self.ensure_references(changes.student_id.as_deref(), changes.course_id.as_deref())
            .await?;
        self.records.update(id, changes).await
    }

    async fn ensure_references(
        &self,
        student_id: Option<&str>,
        course_id: Option<&str>,
    ) -> Result<(), ServiceError> {
        if let Some(student_id) = student_id.filter(|s| !s.is_empty()) {
            if !self.students.exists(student_id).await? {
                return Err(ServiceError::Validation(format!(
                    "student_id {} does not reference an existing student",
                    student_id
                )));
            }
        }

        if let Some(course_id) = course_id.filter(|s| !s.is_empty()) {
            if !self.courses.exists(course_id).await? {
                return Err(ServiceError::Validation(format!(
                    "course_id {} does not reference an existing course",
                    course_id
                )));
            }
        }

        Ok(())
    }
}
