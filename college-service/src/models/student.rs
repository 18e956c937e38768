use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{nullable, Changeset, Record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewStudent {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StudentChanges {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
    /// `null` removes the stored address.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<Option<String>>,
}

impl Changeset for StudentChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.department.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            department: student.department,
            email: student.email,
        }
    }
}

impl Record for Student {
    const KIND: &'static str = "Student";
    const COLLECTION: &'static str = "students";

    type Create = NewStudent;
    type Update = StudentChanges;
    type Response = StudentResponse;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, fields: NewStudent) -> Self {
        Self {
            id,
            name: fields.name,
            department: fields.department,
            email: fields.email,
        }
    }

    fn apply(&mut self, changes: StudentChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(department) = changes.department {
            self.department = department;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_form_uses_underscore_id() {
        let student = Student {
            id: "s-1".to_string(),
            name: "Alice".to_string(),
            department: "CS".to_string(),
            email: None,
        };
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["_id"], "s-1");
        assert!(value.get("email").is_none());

        let response = serde_json::to_value(StudentResponse::from(student)).unwrap();
        assert_eq!(
            response,
            serde_json::json!({ "id": "s-1", "name": "Alice", "department": "CS" })
        );
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut student = Student::from_create(
            "s-1".to_string(),
            NewStudent {
                name: "Alice".to_string(),
                department: "CS".to_string(),
                email: None,
            },
        );
        student.apply(StudentChanges {
            department: Some("Mathematics".to_string()),
            ..Default::default()
        });
        assert_eq!(student.name, "Alice");
        assert_eq!(student.department, "Mathematics");
    }

    #[test]
    fn empty_required_fields_fail_validation() {
        let fields = NewStudent {
            name: String::new(),
            department: "CS".to_string(),
            email: Some("not-an-email".to_string()),
        };
        let errors = fields.validate().unwrap_err();
        let failed = errors.field_errors();
        assert!(failed.contains_key("name"));
        assert!(failed.contains_key("email"));
    }

    #[test]
    fn null_email_clears_it_and_absent_email_keeps_it() {
        let mut student = Student {
            id: "s-1".to_string(),
            name: "Alice".to_string(),
            department: "CS".to_string(),
            email: Some("alice@college.edu".to_string()),
        };

        let rename: StudentChanges = serde_json::from_str(r#"{"name":"Alicia"}"#).unwrap();
        assert!(rename.email.is_none());
        student.apply(rename);
        assert_eq!(student.email.as_deref(), Some("alice@college.edu"));

        let clear: StudentChanges = serde_json::from_str(r#"{"email":null}"#).unwrap();
        assert!(!clear.is_empty());
        assert!(clear.validate().is_ok());
        student.apply(clear);
        assert_eq!(student.email, None);
        assert_eq!(student.name, "Alicia");
    }

    #[test]
    fn malformed_replacement_email_fails_validation() {
        let changes: StudentChanges = serde_json::from_str(r#"{"email":"nope"}"#).unwrap();
        assert!(changes.validate().unwrap_err().field_errors().contains_key("email"));
    }
}
