use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Changeset, Record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub title: String,
    pub credits: i32,
    pub department: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCourse {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 0, message = "credits must not be negative"))]
    pub credits: i32,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CourseChanges {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "credits must not be negative"))]
    pub credits: Option<i32>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
}

impl Changeset for CourseChanges {
    fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.title.is_none()
            && self.credits.is_none()
            && self.department.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub credits: i32,
    pub department: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            code: course.code,
            title: course.title,
            credits: course.credits,
            department: course.department,
        }
    }
}

impl Record for Course {
    const KIND: &'static str = "Course";
    const COLLECTION: &'static str = "courses";

    type Create = NewCourse;
    type Update = CourseChanges;
    type Response = CourseResponse;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, fields: NewCourse) -> Self {
        Self {
            id,
            code: fields.code,
            title: fields.title,
            credits: fields.credits,
            department: fields.department,
        }
    }

    fn apply(&mut self, changes: CourseChanges) {
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(credits) = changes.credits {
            self.credits = credits;
        }
        if let Some(department) = changes.department {
            self.department = department;
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }
}
