use anyhow::Result;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{course, student};
use crate::static_service::DATABASE_CONNECTION;

pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self
    }

    fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_all_with_course(
        &self,
        course_id: Option<i32>,
    ) -> Result<Vec<(student::Model, Option<course::Model>)>> {
        let db = self.get_connection();
        let students = Self::list_with_course_query(course_id).all(db).await?;
        Ok(students)
    }

    fn list_with_course_query(
        course_id: Option<i32>,
    ) -> sea_orm::SelectTwo<student::Entity, course::Entity> {
        let mut query = student::Entity::find().find_also_related(course::Entity);
        if let Some(course_id) = course_id {
            query = query.filter(student::Column::CourseId.eq(course_id));
        }
        query
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let db = self.get_connection();
        let student = student::Entity::find()
            .filter(student::Column::Id.eq(student_id))
            .one(db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_id_with_course(
        &self,
        student_id: i32,
    ) -> Result<Option<(student::Model, Option<course::Model>)>> {
        let db = self.get_connection();
        let student = student::Entity::find()
            .filter(student::Column::Id.eq(student_id))
            .find_also_related(course::Entity)
            .one(db)
            .await?;
        Ok(student)
    }

    pub async fn create(
        &self,
        name: Option<String>,
        course_id: Option<i32>,
        final_grade: Option<Decimal>,
    ) -> Result<student::Model> {
        let db = self.get_connection();
        let student_model = student::ActiveModel {
            name: Set(name),
            course_id: Set(course_id),
            final_grade: Set(final_grade),
            ..Default::default()
        };

        let result = student_model.insert(db).await?;
        Ok(result)
    }

    /// Full update: every column is overwritten, last write wins.
    pub async fn update(
        &self,
        student_id: i32,
        updates: StudentUpdate,
    ) -> Result<Option<student::Model>> {
        let Some(student) = self.find_by_id(student_id).await? else {
            return Ok(None);
        };
        let db = self.get_connection();

        let mut active_model: student::ActiveModel = student.into();
        active_model.name = Set(updates.name);
        active_model.course_id = Set(updates.course_id);
        active_model.final_grade = Set(updates.final_grade);

        let result = active_model.update(db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, student_id: i32) -> Result<bool> {
        let Some(student) = self.find_by_id(student_id).await? else {
            return Ok(false);
        };
        let db = self.get_connection();

        let active_model: student::ActiveModel = student.into();
        active_model.delete(db).await?;
        Ok(true)
    }
}

pub struct StudentUpdate {
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub final_grade: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn course_filter_restricts_the_listing() {
        let sql = StudentRepository::list_with_course_query(Some(7))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""students"."course_id" = 7"#));

        let sql = StudentRepository::list_with_course_query(None)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"));
    }
}
