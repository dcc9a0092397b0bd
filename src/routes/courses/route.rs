use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use super::dto::{CourseListResponse, CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::repositories::{CourseRepository, CourseUpdate};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/courses", post(create_course))
        .route("/api/courses", get(get_all_courses))
        .route("/api/courses/{course_id}", get(get_course))
        .route("/api/courses/{course_id}", put(update_course))
        .route("/api/courses/{course_id}", delete(delete_course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), (StatusCode, String)> {
    let course_repo = CourseRepository::new();

    let course = course_repo
        .create(
            payload.name,
            payload.code,
            payload.description,
            payload.status,
            payload.teacher_id,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create course: {}", e),
            )
        })?;

    let course_id = course.id;
    let (course, teacher) = course_repo
        .find_by_id_with_teacher(course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get course: {}", e),
            )
        })?
        .unwrap_or((course, None));

    let aggregates = course_repo.load_aggregates().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load course aggregates: {}", e),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CourseResponse::from_model(course, teacher, &aggregates)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses retrieved", body = CourseListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_all_courses()
-> Result<(StatusCode, Json<CourseListResponse>), (StatusCode, String)> {
    let course_repo = CourseRepository::new();

    let courses = course_repo.find_all_with_teacher().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get courses: {}", e),
        )
    })?;

    let aggregates = course_repo.load_aggregates().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load course aggregates: {}", e),
        )
    })?;

    let response = CourseListResponse {
        total: courses.len(),
        courses: courses
            .into_iter()
            .map(|(course, teacher)| CourseResponse::from_model(course, teacher, &aggregates))
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course retrieved", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    Path(course_id): Path<i32>,
) -> Result<(StatusCode, Json<CourseResponse>), (StatusCode, String)> {
    let course_repo = CourseRepository::new();

    let (course, teacher) = course_repo
        .find_by_id_with_teacher(course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get course: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Course not found".to_string()))?;

    let aggregates = course_repo.load_aggregates().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load course aggregates: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(CourseResponse::from_model(course, teacher, &aggregates)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), (StatusCode, String)> {
    let course_repo = CourseRepository::new();

    let updates = CourseUpdate {
        name: payload.name,
        code: payload.code,
        description: payload.description,
        status: payload.status,
        teacher_id: payload.teacher_id,
    };

    let updated = course_repo
        .update(course_id, updates)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update course: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Course not found".to_string()))?;

    let (course, teacher) = course_repo
        .find_by_id_with_teacher(updated.id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get course: {}", e),
            )
        })?
        .unwrap_or((updated, None));

    let aggregates = course_repo.load_aggregates().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load course aggregates: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(CourseResponse::from_model(course, teacher, &aggregates)),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted; enrolled students keep a dangling reference"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    Path(course_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let course_repo = CourseRepository::new();

    let deleted = course_repo.delete(course_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete course: {}", e),
        )
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Course not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
