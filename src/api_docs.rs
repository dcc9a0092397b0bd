use utoipa::OpenApi;

use crate::entities::sea_orm_active_enums::{ActivityStatus, ActivityType, CourseStatus};
use crate::entities::student::StudentStatus;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Academic Management API",
        description = "CRUD over teachers, courses, students and activities, aggregate reports, Excel export and grade prediction."
    ),
    paths(
        routes::health::route::health_check,
        routes::teachers::route::create_teacher,
        routes::teachers::route::get_all_teachers,
        routes::teachers::route::get_teacher,
        routes::teachers::route::update_teacher,
        routes::teachers::route::delete_teacher,
        routes::courses::route::create_course,
        routes::courses::route::get_all_courses,
        routes::courses::route::get_course,
        routes::courses::route::update_course,
        routes::courses::route::delete_course,
        routes::students::route::create_student,
        routes::students::route::get_all_students,
        routes::students::route::get_student,
        routes::students::route::update_student,
        routes::students::route::delete_student,
        routes::activities::route::create_activity,
        routes::activities::route::get_all_activities,
        routes::activities::route::get_activity,
        routes::activities::route::update_activity,
        routes::activities::route::delete_activity,
        routes::reports::route::get_report,
        routes::export::route::export_excel,
        routes::predictions::route::predict_grade,
        routes::predictions::route::get_predictions,
    ),
    components(schemas(
        CourseStatus,
        ActivityStatus,
        ActivityType,
        StudentStatus,
        routes::teachers::dto::CreateTeacherRequest,
        routes::teachers::dto::UpdateTeacherRequest,
        routes::teachers::dto::TeacherResponse,
        routes::teachers::dto::TeacherListResponse,
        routes::courses::dto::CreateCourseRequest,
        routes::courses::dto::UpdateCourseRequest,
        routes::courses::dto::CourseResponse,
        routes::courses::dto::CourseListResponse,
        routes::students::dto::CreateStudentRequest,
        routes::students::dto::UpdateStudentRequest,
        routes::students::dto::StudentResponse,
        routes::students::dto::StudentListResponse,
        routes::activities::dto::CreateActivityRequest,
        routes::activities::dto::UpdateActivityRequest,
        routes::activities::dto::ActivityResponse,
        routes::activities::dto::ActivityListResponse,
        routes::reports::dto::GeneralReport,
        routes::reports::dto::CourseStatsRow,
        routes::reports::dto::StudentsPerCourseRow,
        routes::reports::dto::PerformanceRow,
        routes::reports::dto::PendingActivitiesRow,
        routes::reports::dto::TopStudentRow,
        routes::reports::dto::MonthlyAverageRow,
        routes::predictions::dto::PredictRequest,
        routes::predictions::dto::PredictResponse,
        routes::predictions::dto::PredictionResponse,
        routes::predictions::dto::PredictionListResponse,
    )),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Teachers", description = "Teacher management"),
        (name = "Courses", description = "Course management"),
        (name = "Students", description = "Student management"),
        (name = "Activities", description = "Activity management"),
        (name = "Reports", description = "Aggregate reports"),
        (name = "Export", description = "Excel workbook export"),
        (name = "Predictions", description = "Grade prediction")
    )
)]
pub struct ApiDoc;
