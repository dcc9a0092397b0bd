use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::student::StudentStatus;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// One of: general, course_stats, students_per_course, performance,
    /// pending_activities, top_students, monthly_averages.
    pub action: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GeneralReport {
    pub active_courses: i64,
    pub total_students: i64,
    pub total_activities: i64,
    /// Mean of all recorded grades, 2 decimals; 0.0 when nobody is graded.
    #[serde(rename = "promedio_general")]
    pub overall_average: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseStatsRow {
    pub id: i32,
    pub name: Option<String>,
    pub code: Option<String>,
    pub num_students: i64,
    pub num_activities: i64,
    /// Null when no student in the course has a grade; nulls sort last.
    pub average: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentsPerCourseRow {
    pub course: Option<String>,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PerformanceRow {
    pub status: StudentStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingActivitiesRow {
    pub course: String,
    pub pending: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopStudentRow {
    pub student: Option<String>,
    pub course: String,
    pub grade: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyAverageRow {
    /// `YYYY-MM`, distinct months drawn from activity due dates.
    pub month: String,
    pub average: f64,
}
