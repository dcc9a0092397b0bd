pub mod activity_repository;
pub mod course_repository;
pub mod prediction_repository;
pub mod student_repository;
pub mod teacher_repository;

pub use activity_repository::{ActivityRepository, ActivityUpdate};
pub use course_repository::{CourseAggregates, CourseRepository, CourseUpdate};
pub use prediction_repository::PredictionRepository;
pub use student_repository::{StudentRepository, StudentUpdate};
pub use teacher_repository::{TeacherRepository, TeacherUpdate};
