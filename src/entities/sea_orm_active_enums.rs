//! Closed enumerations for the status/type columns. The underlying columns are
//! plain text in the externally owned schema, so these are string-backed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CourseStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Pending")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ActivityStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Pending")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ActivityType {
    #[sea_orm(string_value = "Homework")]
    Homework,
    #[sea_orm(string_value = "Workshop")]
    Workshop,
    #[sea_orm(string_value = "Exam")]
    Exam,
    #[sea_orm(string_value = "Project")]
    Project,
    #[sea_orm(string_value = "Quiz")]
    Quiz,
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Active => write!(f, "Active"),
            CourseStatus::Pending => write!(f, "Pending"),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Active => write!(f, "Active"),
            ActivityStatus::Pending => write!(f, "Pending"),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Homework => write!(f, "Homework"),
            ActivityType::Workshop => write!(f, "Workshop"),
            ActivityType::Exam => write!(f, "Exam"),
            ActivityType::Project => write!(f, "Project"),
            ActivityType::Quiz => write!(f, "Quiz"),
        }
    }
}
