use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::CourseStatus;
use crate::entities::{course, teacher};
use crate::repositories::CourseAggregates;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<CourseStatus>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<CourseStatus>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<CourseStatus>,
    pub teacher_id: Option<i32>,
    pub teacher_name: Option<String>,
    pub num_students: i64,
    pub num_activities: i64,
    /// Mean of recorded grades, 2 decimals; null when no student has a grade.
    pub average: Option<f64>,
}

impl CourseResponse {
    pub fn from_model(
        course: course::Model,
        teacher: Option<teacher::Model>,
        aggregates: &CourseAggregates,
    ) -> Self {
        Self {
            teacher_name: teacher.and_then(|t| t.name),
            num_students: aggregates.student_count(course.id),
            num_activities: aggregates.activity_count(course.id),
            average: aggregates.average(course.id),
            id: course.id,
            name: course.name,
            code: course.code,
            description: course.description,
            status: course.status,
            teacher_id: course.teacher_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub total: usize,
    pub courses: Vec<CourseResponse>,
}
