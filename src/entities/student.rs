//! `SeaORM` Entity for the students table (externally owned schema)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: Option<String>,
    pub course_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((3, 1)))", nullable)]
    pub final_grade: Option<Decimal>,
}

/// Derived from `final_grade`, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StudentStatus {
    Unrated,
    Passed,
    Failed,
}

impl StudentStatus {
    /// Grade exactly 3.0 counts as passed.
    pub fn from_grade(final_grade: Option<Decimal>) -> Self {
        match final_grade {
            None => StudentStatus::Unrated,
            Some(grade) if grade >= Decimal::new(30, 1) => StudentStatus::Passed,
            Some(_) => StudentStatus::Failed,
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Unrated => write!(f, "Unrated"),
            StudentStatus::Passed => write!(f, "Passed"),
            StudentStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl Model {
    pub fn status(&self) -> StudentStatus {
        StudentStatus::from_grade(self.final_grade)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_unrated_without_grade() {
        assert_eq!(StudentStatus::from_grade(None), StudentStatus::Unrated);
    }

    #[test]
    fn status_boundary_at_three_is_passed() {
        assert_eq!(
            StudentStatus::from_grade(Some(Decimal::new(30, 1))),
            StudentStatus::Passed
        );
    }

    #[test]
    fn status_below_three_is_failed() {
        assert_eq!(
            StudentStatus::from_grade(Some(Decimal::new(25, 1))),
            StudentStatus::Failed
        );
        assert_eq!(
            StudentStatus::from_grade(Some(Decimal::new(29, 1))),
            StudentStatus::Failed
        );
    }

    #[test]
    fn status_above_three_is_passed() {
        assert_eq!(
            StudentStatus::from_grade(Some(Decimal::new(50, 1))),
            StudentStatus::Passed
        );
    }
}
