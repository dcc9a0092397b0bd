use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::prediction;
use crate::static_service::DATABASE_CONNECTION;

pub struct PredictionRepository;

impl PredictionRepository {
    pub fn new() -> Self {
        Self
    }

    fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Append-only: one row per successful inference, never updated.
    pub async fn create(&self, name: String, predicted_score: f64) -> Result<prediction::Model> {
        let db = self.get_connection();
        let prediction_model = prediction::ActiveModel {
            name: Set(name),
            predicted_score: Set(predicted_score),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = prediction_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_all_recent_first(&self) -> Result<Vec<prediction::Model>> {
        let db = self.get_connection();
        let predictions = prediction::Entity::find()
            .order_by_desc(prediction::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(predictions)
    }
}
