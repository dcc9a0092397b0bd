use std::collections::HashMap;

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::prelude::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::entities::sea_orm_active_enums::CourseStatus;
use crate::entities::{activity, course, student, teacher};
use crate::static_service::DATABASE_CONNECTION;

pub struct CourseRepository;

impl CourseRepository {
    pub fn new() -> Self {
        Self
    }

    fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_all_with_teacher(
        &self,
    ) -> Result<Vec<(course::Model, Option<teacher::Model>)>> {
        let db = self.get_connection();
        let courses = course::Entity::find()
            .find_also_related(teacher::Entity)
            .all(db)
            .await?;
        Ok(courses)
    }

    pub async fn find_active(&self) -> Result<Vec<course::Model>> {
        let db = self.get_connection();
        let courses = course::Entity::find()
            .filter(course::Column::Status.eq(CourseStatus::Active))
            .all(db)
            .await?;
        Ok(courses)
    }

    pub async fn find_by_id(&self, course_id: i32) -> Result<Option<course::Model>> {
        let db = self.get_connection();
        let course = course::Entity::find()
            .filter(course::Column::Id.eq(course_id))
            .one(db)
            .await?;
        Ok(course)
    }

    pub async fn find_by_id_with_teacher(
        &self,
        course_id: i32,
    ) -> Result<Option<(course::Model, Option<teacher::Model>)>> {
        let db = self.get_connection();
        let course = course::Entity::find()
            .filter(course::Column::Id.eq(course_id))
            .find_also_related(teacher::Entity)
            .one(db)
            .await?;
        Ok(course)
    }

    pub async fn create(
        &self,
        name: Option<String>,
        code: Option<String>,
        description: Option<String>,
        status: Option<CourseStatus>,
        teacher_id: Option<i32>,
    ) -> Result<course::Model> {
        let db = self.get_connection();
        let course_model = course::ActiveModel {
            name: Set(name),
            code: Set(code),
            description: Set(description),
            status: Set(status),
            teacher_id: Set(teacher_id),
            ..Default::default()
        };

        let result = course_model.insert(db).await?;
        Ok(result)
    }

    /// Full update: every column is overwritten, last write wins.
    pub async fn update(
        &self,
        course_id: i32,
        updates: CourseUpdate,
    ) -> Result<Option<course::Model>> {
        let Some(course) = self.find_by_id(course_id).await? else {
            return Ok(None);
        };
        let db = self.get_connection();

        let mut active_model: course::ActiveModel = course.into();
        active_model.name = Set(updates.name);
        active_model.code = Set(updates.code);
        active_model.description = Set(updates.description);
        active_model.status = Set(updates.status);
        active_model.teacher_id = Set(updates.teacher_id);

        let result = active_model.update(db).await?;
        Ok(Some(result))
    }

    /// No cascade: students and activities keep their dangling course_id.
    pub async fn delete(&self, course_id: i32) -> Result<bool> {
        let Some(course) = self.find_by_id(course_id).await? else {
            return Ok(false);
        };
        let db = self.get_connection();

        let active_model: course::ActiveModel = course.into();
        active_model.delete(db).await?;
        Ok(true)
    }

    /// Per-course counts and grade means with one grouped query per aggregate,
    /// instead of a query pair per course.
    pub async fn load_aggregates(&self) -> Result<CourseAggregates> {
        let db = self.get_connection();

        let student_rows: Vec<(Option<i32>, i64)> = student::Entity::find()
            .select_only()
            .column(student::Column::CourseId)
            .column_as(student::Column::Id.count(), "count")
            .group_by(student::Column::CourseId)
            .into_tuple()
            .all(db)
            .await?;

        let activity_rows: Vec<(Option<i32>, i64)> = activity::Entity::find()
            .select_only()
            .column(activity::Column::CourseId)
            .column_as(activity::Column::Id.count(), "count")
            .group_by(activity::Column::CourseId)
            .into_tuple()
            .all(db)
            .await?;

        let avg_expr: SimpleExpr = Func::avg(Expr::col(student::Column::FinalGrade)).into();
        let average_rows: Vec<(Option<i32>, Option<Decimal>)> = student::Entity::find()
            .select_only()
            .column(student::Column::CourseId)
            .column_as(avg_expr, "average")
            .filter(student::Column::FinalGrade.is_not_null())
            .group_by(student::Column::CourseId)
            .into_tuple()
            .all(db)
            .await?;

        Ok(CourseAggregates::from_rows(
            student_rows,
            activity_rows,
            average_rows,
        ))
    }
}

pub struct CourseUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<CourseStatus>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Default)]
pub struct CourseAggregates {
    student_counts: HashMap<i32, i64>,
    activity_counts: HashMap<i32, i64>,
    grade_averages: HashMap<i32, f64>,
}

impl CourseAggregates {
    pub fn from_rows(
        student_rows: Vec<(Option<i32>, i64)>,
        activity_rows: Vec<(Option<i32>, i64)>,
        average_rows: Vec<(Option<i32>, Option<Decimal>)>,
    ) -> Self {
        let mut aggregates = CourseAggregates::default();
        for (course_id, count) in student_rows {
            if let Some(course_id) = course_id {
                aggregates.student_counts.insert(course_id, count);
            }
        }
        for (course_id, count) in activity_rows {
            if let Some(course_id) = course_id {
                aggregates.activity_counts.insert(course_id, count);
            }
        }
        for (course_id, average) in average_rows {
            if let (Some(course_id), Some(average)) = (course_id, average) {
                if let Some(rounded) = average.round_dp(2).to_f64() {
                    aggregates.grade_averages.insert(course_id, rounded);
                }
            }
        }
        aggregates
    }

    pub fn student_count(&self, course_id: i32) -> i64 {
        self.student_counts.get(&course_id).copied().unwrap_or(0)
    }

    pub fn activity_count(&self, course_id: i32) -> i64 {
        self.activity_counts.get(&course_id).copied().unwrap_or(0)
    }

    /// Mean of recorded grades rounded to 2 decimals; `None` when no student
    /// in the course has a grade.
    pub fn average(&self, course_id: i32) -> Option<f64> {
        self.grade_averages.get(&course_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_ignore_orphan_rows_and_round_averages() {
        let aggregates = CourseAggregates::from_rows(
            vec![(Some(1), 3), (None, 5)],
            vec![(Some(1), 2)],
            vec![
                (Some(1), Some(Decimal::new(34567, 4))), // 3.4567
                (Some(2), None),
                (None, Some(Decimal::new(40, 1))),
            ],
        );

        assert_eq!(aggregates.student_count(1), 3);
        assert_eq!(aggregates.student_count(99), 0);
        assert_eq!(aggregates.activity_count(1), 2);
        assert_eq!(aggregates.average(1), Some(3.46));
        assert_eq!(aggregates.average(2), None);
    }
}
