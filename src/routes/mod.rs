pub mod activities;
pub mod courses;
pub mod export;
pub mod health;
pub mod predictions;
pub mod reports;
pub mod students;
pub mod teachers;
