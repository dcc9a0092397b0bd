//! Offline trainer: reads the student performance dataset, fits a random
//! forest regressor and serializes it to the path the service loads at
//! startup.

use anyhow::{Context, Result, bail};
use clap::Parser;
use csv::ReaderBuilder;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;

use academic_service::prediction::model::save_model;

/// Dataset columns feeding the model, in training order.
const CSV_FEATURE_COLUMNS: [&str; 8] = [
    "Hours_Studied",
    "Attendance",
    "Parental_Involvement",
    "Access_to_Resources",
    "Extracurricular_Activities",
    "Sleep_Hours",
    "Previous_Scores",
    "Motivation_Level",
];

const CSV_TARGET_COLUMN: &str = "Exam_Score";

#[derive(Debug, Parser)]
struct TrainArgs {
    #[clap(long, default_value = "StudentPerformanceFactors.csv")]
    dataset_path: String,

    #[clap(long, default_value = "modelo_prediccion.bin")]
    model_path: String,
}

fn main() -> Result<()> {
    let args = TrainArgs::parse();

    let (x, y) = load_dataset(&args.dataset_path)?;
    println!("Loaded {} samples from {}", y.len(), args.dataset_path);

    let matrix = DenseMatrix::from_2d_vec(&x).context("Failed to build feature matrix")?;
    let (x_train, x_test, y_train, y_test) = train_test_split(&matrix, &y, 0.2, true, Some(42));

    let parameters = RandomForestRegressorParameters::default()
        .with_n_trees(100)
        .with_seed(42);
    let model = RandomForestRegressor::fit(&x_train, &y_train, parameters)
        .context("Failed to fit model")?;

    let predictions = model.predict(&x_test).context("Failed to evaluate model")?;
    println!("MAE:  {:.4}", mean_absolute_error(&y_test, &predictions));
    println!("R2:   {:.4}", r2_score(&y_test, &predictions));

    save_model(&model, &args.model_path)?;
    println!("Model saved to {}", args.model_path);

    Ok(())
}

fn load_dataset(path: &str) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("Failed to open dataset {path}"))?;

    let headers = reader.headers()?.clone();
    let feature_indexes: Vec<usize> = CSV_FEATURE_COLUMNS
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h == *column)
                .with_context(|| format!("Dataset is missing column {column}"))
        })
        .collect::<Result<_>>()?;
    let target_index = headers
        .iter()
        .position(|h| h == CSV_TARGET_COLUMN)
        .with_context(|| format!("Dataset is missing column {CSV_TARGET_COLUMN}"))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<f64> = feature_indexes
            .iter()
            .map(|&i| coerce_feature(record.get(i).unwrap_or_default()))
            .collect();
        let target = coerce_feature(record.get(target_index).unwrap_or_default());
        x.push(row);
        y.push(target);
    }

    if y.is_empty() {
        bail!("Dataset {path} contains no samples");
    }

    Ok((x, y))
}

/// Categorical levels map onto the same small integers the prediction form
/// uses; anything unparseable becomes 0.
fn coerce_feature(raw: &str) -> f64 {
    match raw.trim() {
        "Low" => 1.0,
        "Medium" => 2.0,
        "High" => 3.0,
        "Yes" => 1.0,
        "No" => 0.0,
        value => value.parse::<f64>().unwrap_or(0.0),
    }
}

fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_feature_maps_categorical_levels() {
        assert_eq!(coerce_feature("Low"), 1.0);
        assert_eq!(coerce_feature("Medium"), 2.0);
        assert_eq!(coerce_feature("High"), 3.0);
        assert_eq!(coerce_feature("Yes"), 1.0);
        assert_eq!(coerce_feature("No"), 0.0);
        assert_eq!(coerce_feature(" 7.5 "), 7.5);
        assert_eq!(coerce_feature("n/a"), 0.0);
        assert_eq!(coerce_feature(""), 0.0);
    }

    #[test]
    fn mae_is_the_mean_of_absolute_residuals() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [1.0, 3.0, 1.0];
        assert_eq!(mean_absolute_error(&actual, &predicted), 1.0);
        assert_eq!(mean_absolute_error(&[], &[]), 0.0);
    }

    #[test]
    fn r2_is_one_for_a_perfect_fit_and_zero_for_constant_actuals() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(r2_score(&actual, &actual), 1.0);
        assert_eq!(r2_score(&[2.0, 2.0], &[1.0, 3.0]), 0.0);
    }
}
