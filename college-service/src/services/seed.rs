use super::{EnrollmentService, Page, RecordService, ServiceError};
use crate::models::{Course, NewCourse, NewEnrollment, NewStudent, Student};

/// Insert the demo students, courses and enrollments that are not present yet.
///
/// Students are matched by email, courses by code and enrollments by
/// (student, course, semester), so running this twice changes nothing.
pub async fn seed_demo_data(
    students: &RecordService<Student>,
    courses: &RecordService<Course>,
    enrollments: &EnrollmentService,
) -> Result<(), ServiceError> {
    let john = ensure_student(students, "John Doe", "john@college.edu", "Computer Science").await?;
    let jane = ensure_student(students, "Jane Smith", "jane@college.edu", "Mathematics").await?;

    let cs501 = ensure_course(courses, "CS501", "Advanced Programming", 4).await?;
    let cs502 = ensure_course(courses, "CS502", "Database Systems", 3).await?;

    ensure_enrollment(enrollments, &john, &cs501, "Fall 2023").await?;
    ensure_enrollment(enrollments, &jane, &cs502, "Fall 2023").await?;

    tracing::info!("Demo data seeded");
    Ok(())
}

async fn ensure_student(
    students: &RecordService<Student>,
    name: &str,
    email: &str,
    department: &str,
) -> Result<Student, ServiceError> {
    let existing = students
        .list(Page::default())
        .await?
        .into_iter()
        .find(|s| s.email.as_deref() == Some(email));
    if let Some(student) = existing {
        return Ok(student);
    }

    students
        .create(NewStudent {
            name: name.to_string(),
            department: department.to_string(),
            email: Some(email.to_string()),
        })
        .await
}

async fn ensure_course(
    courses: &RecordService<Course>,
    code: &str,
    title: &str,
    credits: i32,
) -> Result<Course, ServiceError> {
    let existing = courses
        .list(Page::default())
        .await?
        .into_iter()
        .find(|c| c.code == code);
    if let Some(course) = existing {
        return Ok(course);
    }

    courses
        .create(NewCourse {
            code: code.to_string(),
            title: title.to_string(),
            credits,
            department: "Computer Science".to_string(),
        })
        .await
}

async fn ensure_enrollment(
    enrollments: &EnrollmentService,
    student: &Student,
    course: &Course,
    semester: &str,
) -> Result<(), ServiceError> {
    let result = enrollments
        .create(NewEnrollment {
            student_id: student.id.clone(),
            course_id: course.id.clone(),
            semester: semester.to_string(),
        })
        .await;

    match result {
        Ok(_) | Err(ServiceError::Conflict(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
