use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::sea_orm_active_enums::{ActivityStatus, ActivityType};
use crate::entities::{activity, course};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityListQuery {
    /// Restrict the list to one course.
    pub course_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    pub name: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub due_date: Option<NaiveDate>,
    pub weight_percent: Option<i32>,
    pub status: Option<ActivityStatus>,
    pub course_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub due_date: Option<NaiveDate>,
    pub weight_percent: Option<i32>,
    pub status: Option<ActivityStatus>,
    pub course_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub due_date: Option<NaiveDate>,
    pub weight_percent: Option<i32>,
    pub status: Option<ActivityStatus>,
    pub course_id: Option<i32>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

impl ActivityResponse {
    pub fn from_model(activity: activity::Model, course: Option<course::Model>) -> Self {
        let (course_name, course_code) = match course {
            Some(course) => (course.name, course.code),
            None => (None, None),
        };
        Self {
            id: activity.id,
            name: activity.name,
            activity_type: activity.activity_type,
            due_date: activity.due_date,
            weight_percent: activity.weight_percent,
            status: activity.status,
            course_id: activity.course_id,
            course_name,
            course_code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityListResponse {
    pub total: usize,
    pub activities: Vec<ActivityResponse>,
}
