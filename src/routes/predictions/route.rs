use axum::{
    Form, Json, Router,
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{PredictRequest, PredictResponse, PredictionListResponse, PredictionResponse};
use crate::prediction::model::{PREDICTION_MODEL, predict_score};
use crate::repositories::PredictionRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/predict", post(predict_grade))
        .route("/api/predictions", get(get_predictions))
}

#[utoipa::path(
    post,
    path = "/api/predict",
    request_body(
        content = PredictRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Prediction computed and recorded", body = PredictResponse),
        (status = 400, description = "Missing or non-numeric field"),
        (status = 503, description = "Prediction model not loaded"),
        (status = 500, description = "Inference or persistence fault")
    ),
    tag = "Predictions"
)]
pub async fn predict_grade(
    Form(payload): Form<PredictRequest>,
) -> Result<(StatusCode, Json<PredictResponse>), (StatusCode, String)> {
    let name = payload
        .student_name()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let features = payload
        .features()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    if PREDICTION_MODEL.get().is_none() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Prediction model not loaded".to_string(),
        ));
    }

    let predicted_score = predict_score(&features).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to run prediction: {}", e),
        )
    })?;

    // Recorded only after a successful inference; a failed run leaves no row.
    PredictionRepository::new()
        .create(name.clone(), predicted_score)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record prediction: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(PredictResponse {
            name,
            predicted_score,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/predictions",
    responses(
        (status = 200, description = "Prediction history, newest first", body = PredictionListResponse),
        (status = 500, description = "Query fault")
    ),
    tag = "Predictions"
)]
pub async fn get_predictions()
-> Result<(StatusCode, Json<PredictionListResponse>), (StatusCode, String)> {
    let predictions = PredictionRepository::new()
        .find_all_recent_first()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch predictions: {}", e),
            )
        })?;

    let predictions: Vec<PredictionResponse> =
        predictions.into_iter().map(PredictionResponse::from).collect();

    Ok((
        StatusCode::OK,
        Json(PredictionListResponse {
            total: predictions.len(),
            predictions,
        }),
    ))
}
