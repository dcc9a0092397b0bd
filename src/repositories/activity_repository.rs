use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::sea_orm_active_enums::{ActivityStatus, ActivityType};
use crate::entities::{activity, course};
use crate::static_service::DATABASE_CONNECTION;

pub struct ActivityRepository;

impl ActivityRepository {
    pub fn new() -> Self {
        Self
    }

    fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Optionally filtered by course, always ordered by due date descending.
    pub async fn find_all_with_course(
        &self,
        course_id: Option<i32>,
    ) -> Result<Vec<(activity::Model, Option<course::Model>)>> {
        let db = self.get_connection();
        let mut query = activity::Entity::find()
            .find_also_related(course::Entity)
            .order_by_desc(activity::Column::DueDate);
        if let Some(course_id) = course_id {
            query = query.filter(activity::Column::CourseId.eq(course_id));
        }
        let activities = query.all(db).await?;
        Ok(activities)
    }

    pub async fn find_by_id(&self, activity_id: i32) -> Result<Option<activity::Model>> {
        let db = self.get_connection();
        let activity = activity::Entity::find()
            .filter(activity::Column::Id.eq(activity_id))
            .one(db)
            .await?;
        Ok(activity)
    }

    pub async fn find_by_id_with_course(
        &self,
        activity_id: i32,
    ) -> Result<Option<(activity::Model, Option<course::Model>)>> {
        let db = self.get_connection();
        let activity = activity::Entity::find()
            .filter(activity::Column::Id.eq(activity_id))
            .find_also_related(course::Entity)
            .one(db)
            .await?;
        Ok(activity)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: Option<String>,
        activity_type: Option<ActivityType>,
        due_date: Option<NaiveDate>,
        weight_percent: Option<i32>,
        status: Option<ActivityStatus>,
        course_id: Option<i32>,
    ) -> Result<activity::Model> {
        let db = self.get_connection();
        let activity_model = activity::ActiveModel {
            name: Set(name),
            activity_type: Set(activity_type),
            due_date: Set(due_date),
            weight_percent: Set(weight_percent),
            status: Set(status),
            course_id: Set(course_id),
            ..Default::default()
        };

        let result = activity_model.insert(db).await?;
        Ok(result)
    }

    /// Full update: every column is overwritten, last write wins.
    pub async fn update(
        &self,
        activity_id: i32,
        updates: ActivityUpdate,
    ) -> Result<Option<activity::Model>> {
        let Some(activity) = self.find_by_id(activity_id).await? else {
            return Ok(None);
        };
        let db = self.get_connection();

        let mut active_model: activity::ActiveModel = activity.into();
        active_model.name = Set(updates.name);
        active_model.activity_type = Set(updates.activity_type);
        active_model.due_date = Set(updates.due_date);
        active_model.weight_percent = Set(updates.weight_percent);
        active_model.status = Set(updates.status);
        active_model.course_id = Set(updates.course_id);

        let result = active_model.update(db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, activity_id: i32) -> Result<bool> {
        let Some(activity) = self.find_by_id(activity_id).await? else {
            return Ok(false);
        };
        let db = self.get_connection();

        let active_model: activity::ActiveModel = activity.into();
        active_model.delete(db).await?;
        Ok(true)
    }
}

pub struct ActivityUpdate {
    pub name: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub due_date: Option<NaiveDate>,
    pub weight_percent: Option<i32>,
    pub status: Option<ActivityStatus>,
    pub course_id: Option<i32>,
}
