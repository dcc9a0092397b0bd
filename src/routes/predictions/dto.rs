use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prediction;

/// Submitted as an HTML form; every field arrives as a string and is parsed
/// server-side so a bad value turns into a 400 instead of a rejected body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PredictRequest {
    pub name: Option<String>,
    pub hours_studied: Option<String>,
    pub attendance: Option<String>,
    pub parental_involvement: Option<String>,
    pub access_to_resources: Option<String>,
    pub extracurricular_activities: Option<String>,
    pub sleep_hours: Option<String>,
    pub previous_scores: Option<String>,
    pub motivation_level: Option<String>,
}

impl PredictRequest {
    pub fn student_name(&self) -> Result<String, String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| "Missing field `name`".to_string())
    }

    /// Features in the exact order the model was trained with.
    pub fn features(&self) -> Result<[f64; 8], String> {
        Ok([
            parse_field("hours_studied", self.hours_studied.as_deref())?,
            parse_field("attendance", self.attendance.as_deref())?,
            parse_field("parental_involvement", self.parental_involvement.as_deref())?,
            parse_field("access_to_resources", self.access_to_resources.as_deref())?,
            parse_field(
                "extracurricular_activities",
                self.extracurricular_activities.as_deref(),
            )?,
            parse_field("sleep_hours", self.sleep_hours.as_deref())?,
            parse_field("previous_scores", self.previous_scores.as_deref())?,
            parse_field("motivation_level", self.motivation_level.as_deref())?,
        ])
    }
}

fn parse_field(name: &str, value: Option<&str>) -> Result<f64, String> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("Missing field `{name}`"))?;
    raw.parse::<f64>()
        .map_err(|_| format!("Invalid numeric value for `{name}`"))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    pub name: String,
    pub predicted_score: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub id: i32,
    pub name: String,
    pub predicted_score: f64,
    pub created_at: chrono::NaiveDateTime,
}

impl From<prediction::Model> for PredictionResponse {
    fn from(model: prediction::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            predicted_score: model.predicted_score,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionListResponse {
    pub total: usize,
    pub predictions: Vec<PredictionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> PredictRequest {
        PredictRequest {
            name: Some("Ana Ruiz".to_string()),
            hours_studied: Some("5".to_string()),
            attendance: Some("80".to_string()),
            parental_involvement: Some("2".to_string()),
            access_to_resources: Some("3".to_string()),
            extracurricular_activities: Some("1".to_string()),
            sleep_hours: Some("7.5".to_string()),
            previous_scores: Some("68".to_string()),
            motivation_level: Some("2".to_string()),
        }
    }

    #[test]
    fn features_follow_training_order() {
        let features = full_request().features().unwrap();
        assert_eq!(features, [5.0, 80.0, 2.0, 3.0, 1.0, 7.5, 68.0, 2.0]);
    }

    #[test]
    fn missing_field_is_named_in_the_error() {
        let mut request = full_request();
        request.sleep_hours = None;
        assert_eq!(
            request.features().unwrap_err(),
            "Missing field `sleep_hours`"
        );

        request = full_request();
        request.attendance = Some("   ".to_string());
        assert_eq!(request.features().unwrap_err(), "Missing field `attendance`");
    }

    #[test]
    fn non_numeric_field_is_named_in_the_error() {
        let mut request = full_request();
        request.previous_scores = Some("sixty".to_string());
        assert_eq!(
            request.features().unwrap_err(),
            "Invalid numeric value for `previous_scores`"
        );
    }

    #[test]
    fn student_name_is_trimmed_and_required() {
        assert_eq!(full_request().student_name().unwrap(), "Ana Ruiz");

        let mut request = full_request();
        request.name = Some("  ".to_string());
        assert_eq!(request.student_name().unwrap_err(), "Missing field `name`");
    }
}
