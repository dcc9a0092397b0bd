use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::student::StudentStatus;
use crate::entities::{course, student};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub final_grade: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub final_grade: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub final_grade: Option<Decimal>,
    /// Derived: Unrated without a grade, Passed at 3.0 or above, Failed below.
    pub status: StudentStatus,
}

impl StudentResponse {
    pub fn from_model(student: student::Model, course: Option<course::Model>) -> Self {
        let (course_name, course_code) = match course {
            Some(course) => (course.name, course.code),
            None => (None, None),
        };
        Self {
            id: student.id,
            status: student.status(),
            name: student.name,
            course_id: student.course_id,
            course_name,
            course_code,
            final_grade: student.final_grade,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<StudentResponse>,
}
