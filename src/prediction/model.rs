//! Pre-trained regression model: loaded once at startup, read-only afterwards.
//! The model file is produced offline by the `train_model` binary.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Feature columns in the exact order the model was trained with.
pub const FEATURE_ORDER: [&str; 8] = [
    "hours_studied",
    "attendance",
    "parental_involvement",
    "access_to_resources",
    "extracurricular_activities",
    "sleep_hours",
    "previous_scores",
    "motivation_level",
];

pub type GradeModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub static PREDICTION_MODEL: OnceCell<GradeModel> = OnceCell::new();

pub fn init_prediction_model(path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open model file {path}"))?;
    let model: GradeModel = bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("Failed to deserialize model from {path}"))?;
    PREDICTION_MODEL.set(model).ok();
    Ok(())
}

pub fn save_model(model: &GradeModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create model file {}", path.display()))?;
    bincode::serialize_into(BufWriter::new(file), model).context("Failed to serialize model")?;
    Ok(())
}

/// Runs a single inference over the eight features, assembled in
/// [`FEATURE_ORDER`] order, and rounds the result to 2 decimals.
pub fn predict_score(features: &[f64; 8]) -> Result<f64> {
    let model = PREDICTION_MODEL
        .get()
        .ok_or_else(|| anyhow::anyhow!("Prediction model not loaded"))?;

    let x = DenseMatrix::from_2d_vec(&vec![features.to_vec()])
        .context("Failed to build feature matrix")?;
    let scores = model.predict(&x).context("Inference failed")?;
    let score = scores
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Model returned no prediction"))?;

    Ok(round2(score))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_truncates_to_two_decimals() {
        assert_eq!(round2(67.4567), 67.46);
        assert_eq!(round2(3.004), 3.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn predict_without_loaded_model_fails() {
        // The model is never loaded in unit tests.
        let features = [5.0, 80.0, 2.0, 2.0, 1.0, 7.0, 70.0, 2.0];
        assert!(predict_score(&features).is_err());
    }
}
