pub mod activity;
pub mod course;
pub mod prediction;
pub mod sea_orm_active_enums;
pub mod student;
pub mod teacher;
