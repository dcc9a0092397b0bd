use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use super::dto::{
    ActivityListQuery, ActivityListResponse, ActivityResponse, CreateActivityRequest,
    UpdateActivityRequest,
};
use crate::repositories::{ActivityRepository, ActivityUpdate};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/activities", post(create_activity))
        .route("/api/activities", get(get_all_activities))
        .route("/api/activities/{activity_id}", get(get_activity))
        .route("/api/activities/{activity_id}", put(update_activity))
        .route("/api/activities/{activity_id}", delete(delete_activity))
}

#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activities"
)]
pub async fn create_activity(
    Json(payload): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>), (StatusCode, String)> {
    let activity_repo = ActivityRepository::new();

    let activity = activity_repo
        .create(
            payload.name,
            payload.activity_type,
            payload.due_date,
            payload.weight_percent,
            payload.status,
            payload.course_id,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create activity: {}", e),
            )
        })?;

    let activity_id = activity.id;
    let (activity, course) = activity_repo
        .find_by_id_with_course(activity_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get activity: {}", e),
            )
        })?
        .unwrap_or((activity, None));

    Ok((
        StatusCode::CREATED,
        Json(ActivityResponse::from_model(activity, course)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/activities",
    params(ActivityListQuery),
    responses(
        (status = 200, description = "Activities retrieved, due date descending", body = ActivityListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activities"
)]
pub async fn get_all_activities(
    Query(query): Query<ActivityListQuery>,
) -> Result<(StatusCode, Json<ActivityListResponse>), (StatusCode, String)> {
    let activity_repo = ActivityRepository::new();

    let activities = activity_repo
        .find_all_with_course(query.course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get activities: {}", e),
            )
        })?;

    let response = ActivityListResponse {
        total: activities.len(),
        activities: activities
            .into_iter()
            .map(|(activity, course)| ActivityResponse::from_model(activity, course))
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = i32, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity retrieved", body = ActivityResponse),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activities"
)]
pub async fn get_activity(
    Path(activity_id): Path<i32>,
) -> Result<(StatusCode, Json<ActivityResponse>), (StatusCode, String)> {
    let activity_repo = ActivityRepository::new();

    let (activity, course) = activity_repo
        .find_by_id_with_course(activity_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get activity: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Activity not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ActivityResponse::from_model(activity, course)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = i32, Path, description = "Activity ID")
    ),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activities"
)]
pub async fn update_activity(
    Path(activity_id): Path<i32>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>), (StatusCode, String)> {
    let activity_repo = ActivityRepository::new();

    let updates = ActivityUpdate {
        name: payload.name,
        activity_type: payload.activity_type,
        due_date: payload.due_date,
        weight_percent: payload.weight_percent,
        status: payload.status,
        course_id: payload.course_id,
    };

    let updated = activity_repo
        .update(activity_id, updates)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update activity: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Activity not found".to_string()))?;

    let (activity, course) = activity_repo
        .find_by_id_with_course(updated.id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get activity: {}", e),
            )
        })?
        .unwrap_or((updated, None));

    Ok((
        StatusCode::OK,
        Json(ActivityResponse::from_model(activity, course)),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = i32, Path, description = "Activity ID")
    ),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activities"
)]
pub async fn delete_activity(
    Path(activity_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let activity_repo = ActivityRepository::new();

    let deleted = activity_repo.delete(activity_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete activity: {}", e),
        )
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Activity not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
