use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use super::dto::{
    CreateTeacherRequest, TeacherListResponse, TeacherResponse, UpdateTeacherRequest,
};
use crate::repositories::{TeacherRepository, TeacherUpdate};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/teachers", post(create_teacher))
        .route("/api/teachers", get(get_all_teachers))
        .route("/api/teachers/{teacher_id}", get(get_teacher))
        .route("/api/teachers/{teacher_id}", put(update_teacher))
        .route("/api/teachers/{teacher_id}", delete(delete_teacher))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn create_teacher(
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();

    let teacher = teacher_repo
        .create(payload.name, payload.email, payload.phone)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create teacher: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(teacher.into())))
}

#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "Teachers retrieved", body = TeacherListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn get_all_teachers()
-> Result<(StatusCode, Json<TeacherListResponse>), (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();

    let teachers = teacher_repo.find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get teachers: {}", e),
        )
    })?;

    let response = TeacherListResponse {
        total: teachers.len(),
        teachers: teachers.into_iter().map(TeacherResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{teacher_id}",
    params(
        ("teacher_id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher retrieved", body = TeacherResponse),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn get_teacher(
    Path(teacher_id): Path<i32>,
) -> Result<(StatusCode, Json<TeacherResponse>), (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();

    let teacher = teacher_repo
        .find_by_id(teacher_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get teacher: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Teacher not found".to_string()))?;

    Ok((StatusCode::OK, Json(teacher.into())))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{teacher_id}",
    params(
        ("teacher_id" = i32, Path, description = "Teacher ID")
    ),
    request_body = UpdateTeacherRequest,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherResponse),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn update_teacher(
    Path(teacher_id): Path<i32>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();

    let updates = TeacherUpdate {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
    };

    let updated = teacher_repo
        .update(teacher_id, updates)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update teacher: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Teacher not found".to_string()))?;

    Ok((StatusCode::OK, Json(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{teacher_id}",
    params(
        ("teacher_id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    Path(teacher_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();

    let deleted = teacher_repo.delete(teacher_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete teacher: {}", e),
        )
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Teacher not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
