use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::teacher;
use crate::static_service::DATABASE_CONNECTION;

pub struct TeacherRepository;

impl TeacherRepository {
    pub fn new() -> Self {
        Self
    }

    fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_all(&self) -> Result<Vec<teacher::Model>> {
        let db = self.get_connection();
        let teachers = teacher::Entity::find().all(db).await?;
        Ok(teachers)
    }

    pub async fn find_by_id(&self, teacher_id: i32) -> Result<Option<teacher::Model>> {
        let db = self.get_connection();
        let teacher = teacher::Entity::find()
            .filter(teacher::Column::Id.eq(teacher_id))
            .one(db)
            .await?;
        Ok(teacher)
    }

    pub async fn create(
        &self,
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<teacher::Model> {
        let db = self.get_connection();
        let teacher_model = teacher::ActiveModel {
            name: Set(name),
            email: Set(email),
            phone: Set(phone),
            ..Default::default()
        };

        let result = teacher_model.insert(db).await?;
        Ok(result)
    }

    /// Full update: every column is overwritten, last write wins.
    pub async fn update(
        &self,
        teacher_id: i32,
        updates: TeacherUpdate,
    ) -> Result<Option<teacher::Model>> {
        let Some(teacher) = self.find_by_id(teacher_id).await? else {
            return Ok(None);
        };
        let db = self.get_connection();

        let mut active_model: teacher::ActiveModel = teacher.into();
        active_model.name = Set(updates.name);
        active_model.email = Set(updates.email);
        active_model.phone = Set(updates.phone);

        let result = active_model.update(db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, teacher_id: i32) -> Result<bool> {
        let Some(teacher) = self.find_by_id(teacher_id).await? else {
            return Ok(false);
        };
        let db = self.get_connection();

        let active_model: teacher::ActiveModel = teacher.into();
        active_model.delete(db).await?;
        Ok(true)
    }
}

pub struct TeacherUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
