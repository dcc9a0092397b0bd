use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use super::dto::{
    CreateStudentRequest, StudentListResponse, StudentResponse, UpdateStudentRequest,
};
use crate::repositories::{StudentRepository, StudentUpdate};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/students", post(create_student))
        .route("/api/students", get(get_all_students))
        .route("/api/students/{student_id}", get(get_student))
        .route("/api/students/{student_id}", put(update_student))
        .route("/api/students/{student_id}", delete(delete_student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn create_student(
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    let student_repo = StudentRepository::new();

    let student = student_repo
        .create(payload.name, payload.course_id, payload.final_grade)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create student: {}", e),
            )
        })?;

    let student_id = student.id;
    let (student, course) = student_repo
        .find_by_id_with_course(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get student: {}", e),
            )
        })?
        .unwrap_or((student, None));

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse::from_model(student, course)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_all_students()
-> Result<(StatusCode, Json<StudentListResponse>), (StatusCode, String)> {
    let student_repo = StudentRepository::new();

    let students = student_repo.find_all_with_course(None).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get students: {}", e),
        )
    })?;

    let response = StudentListResponse {
        total: students.len(),
        students: students
            .into_iter()
            .map(|(student, course)| StudentResponse::from_model(student, course))
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student retrieved", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student(
    Path(student_id): Path<i32>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    let student_repo = StudentRepository::new();

    // A dangling course_id (course deleted afterwards) joins to no course and
    // renders relation-absent, not an error.
    let (student, course) = student_repo
        .find_by_id_with_course(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get student: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(StudentResponse::from_model(student, course)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn update_student(
    Path(student_id): Path<i32>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    let student_repo = StudentRepository::new();

    let updates = StudentUpdate {
        name: payload.name,
        course_id: payload.course_id,
        final_grade: payload.final_grade,
    };

    let updated = student_repo
        .update(student_id, updates)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update student: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    let (student, course) = student_repo
        .find_by_id_with_course(updated.id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get student: {}", e),
            )
        })?
        .unwrap_or((updated, None));

    Ok((
        StatusCode::OK,
        Json(StudentResponse::from_model(student, course)),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    Path(student_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let student_repo = StudentRepository::new();

    let deleted = student_repo.delete(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete student: {}", e),
        )
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Student not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
