use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Changeset, Record};

/// A student taking a course in a given semester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enrollment {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub semester: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEnrollment {
    #[validate(length(min = 1, message = "student_id is required"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "course_id is required"))]
    pub course_id: String,
    #[validate(length(min = 1, message = "semester is required"))]
    pub semester: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EnrollmentChanges {
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, message = "course_id must not be empty"))]
    pub course_id: Option<String>,
    #[validate(length(min = 1, message = "semester must not be empty"))]
    pub semester: Option<String>,
}

impl Changeset for EnrollmentChanges {
    fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.course_id.is_none() && self.semester.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollmentResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub semester: String,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            semester: enrollment.semester,
        }
    }
}

impl Record for Enrollment {
    const KIND: &'static str = "Enrollment";
    const COLLECTION: &'static str = "enrollments";

    type Create = NewEnrollment;
    type Update = EnrollmentChanges;
    type Response = EnrollmentResponse;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, fields: NewEnrollment) -> Self {
        Self {
            id,
            student_id: fields.student_id,
            course_id: fields.course_id,
            semester: fields.semester,
        }
    }

    fn apply(&mut self, changes: EnrollmentChanges) {
        if let Some(student_id) = changes.student_id {
            self.student_id = student_id;
        }
        if let Some(course_id) = changes.course_id {
            self.course_id = course_id;
        }
        if let Some(semester) = changes.semester {
            self.semester = semester;
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!(
            "{}\u{1f}{}\u{1f}{}",
            self.student_id, self.course_id, self.semester
        ))
    }
}
