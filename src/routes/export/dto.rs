use serde::Deserialize;
use utoipa::IntoParams;

/// Parameter names are fixed by the existing frontend links.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// One of: students, courses, activities, full_report. Defaults to
    /// students.
    pub tipo: Option<String>,
    /// Restricts students/activities exports to one course.
    pub id_curso: Option<i32>,
}
