use anyhow::Result;
use axum::{
    Router,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::dto::ExportQuery;
use crate::entities::sea_orm_active_enums::CourseStatus;
use crate::entities::{activity, course, student, teacher};
use crate::repositories::{
    ActivityRepository, CourseAggregates, CourseRepository, StudentRepository,
};
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::excel::{CellValue, ExcelTable, XLSX_MIME, export_filename};

pub fn create_route() -> Router {
    Router::new().route("/api/export", get(export_excel))
}

#[utoipa::path(
    get,
    path = "/api/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Workbook attachment", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Unknown export type"),
        (status = 500, description = "Export fault")
    ),
    tag = "Export"
)]
pub async fn export_excel(
    Query(query): Query<ExportQuery>,
) -> Result<Response, (StatusCode, String)> {
    let tipo = query.tipo.as_deref().unwrap_or("students").to_string();

    let table = match tipo.as_str() {
        "students" => students_table(query.id_curso).await,
        "courses" => courses_table().await,
        "activities" => activities_table(query.id_curso).await,
        "full_report" => full_report_table().await,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown export type: {}", tipo),
            ));
        }
    }
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build {} export: {}", tipo, e),
        )
    })?;

    let bytes = table.into_bytes().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render workbook: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&tipo)),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn students_table(course_id: Option<i32>) -> Result<ExcelTable> {
    let students = StudentRepository::new()
        .find_all_with_course(course_id)
        .await?;

    let mut table = ExcelTable::new(
        "Students",
        &[
            "ID",
            "Full Name",
            "Course",
            "Course Code",
            "Final Grade",
            "Status",
        ],
    );
    for (student, course) in students {
        table.push_row(student_row(&student, course.as_ref()));
    }
    Ok(table)
}

async fn courses_table() -> Result<ExcelTable> {
    let course_repo = CourseRepository::new();
    let courses = course_repo.find_all_with_teacher().await?;
    let aggregates = course_repo.load_aggregates().await?;

    let mut table = ExcelTable::new(
        "Courses",
        &[
            "ID",
            "Name",
            "Code",
            "Description",
            "Status",
            "Teacher",
            "Total Students",
            "Total Activities",
            "Average",
        ],
    );
    for (course, teacher) in courses {
        table.push_row(course_row(&course, teacher.as_ref(), &aggregates));
    }
    Ok(table)
}

async fn activities_table(course_id: Option<i32>) -> Result<ExcelTable> {
    let activities = ActivityRepository::new()
        .find_all_with_course(course_id)
        .await?;

    let mut table = ExcelTable::new(
        "Activities",
        &[
            "ID",
            "Name",
            "Type",
            "Course",
            "Course Code",
            "Due Date",
            "Weight (%)",
            "Status",
        ],
    );
    for (activity, course) in activities {
        table.push_row(activity_row(&activity, course.as_ref()));
    }
    Ok(table)
}

/// One row per student enrolled in an active course.
async fn full_report_table() -> Result<ExcelTable> {
    let db = DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set");

    let students = student::Entity::find()
        .find_also_related(course::Entity)
        .filter(course::Column::Status.eq(CourseStatus::Active))
        .all(db)
        .await?;
    let aggregates = CourseRepository::new().load_aggregates().await?;

    let mut table = ExcelTable::new(
        "Full Report",
        &[
            "Course",
            "Code",
            "Student",
            "Final Grade",
            "Status",
            "Course Activities",
        ],
    );
    for (student, course) in students {
        table.push_row(full_report_row(&student, course.as_ref(), &aggregates));
    }
    Ok(table)
}

// Name-like fields render blank when absent; `-` is reserved for missing
// codes, dates and grades.
fn text_or_empty(value: Option<&String>) -> CellValue {
    match value {
        Some(text) => CellValue::from(text.clone()),
        None => CellValue::from(""),
    }
}

fn text_or_dash(value: Option<&String>) -> CellValue {
    match value {
        Some(text) => CellValue::from(text.clone()),
        None => CellValue::from("-"),
    }
}

fn grade_cell(final_grade: Option<sea_orm::prelude::Decimal>) -> CellValue {
    match final_grade.and_then(|grade| grade.to_f64()) {
        Some(grade) => CellValue::Float(grade),
        None => CellValue::from("-"),
    }
}

fn student_row(student: &student::Model, course: Option<&course::Model>) -> Vec<CellValue> {
    vec![
        CellValue::from(student.id),
        text_or_empty(student.name.as_ref()),
        CellValue::from(
            course
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| "No course".to_string()),
        ),
        text_or_dash(course.and_then(|c| c.code.as_ref())),
        grade_cell(student.final_grade),
        CellValue::from(student.status().to_string()),
    ]
}

fn course_row(
    course: &course::Model,
    teacher: Option<&teacher::Model>,
    aggregates: &CourseAggregates,
) -> Vec<CellValue> {
    let average = match aggregates.average(course.id) {
        Some(average) => CellValue::Float(average),
        None => CellValue::from("-"),
    };
    vec![
        CellValue::from(course.id),
        text_or_empty(course.name.as_ref()),
        text_or_dash(course.code.as_ref()),
        text_or_empty(course.description.as_ref()),
        match course.status.as_ref() {
            Some(status) => CellValue::from(status.to_string()),
            None => CellValue::from(""),
        },
        CellValue::from(
            teacher
                .and_then(|t| t.name.clone())
                .unwrap_or_else(|| "No teacher".to_string()),
        ),
        CellValue::from(aggregates.student_count(course.id)),
        CellValue::from(aggregates.activity_count(course.id)),
        average,
    ]
}

fn activity_row(activity: &activity::Model, course: Option<&course::Model>) -> Vec<CellValue> {
    vec![
        CellValue::from(activity.id),
        text_or_empty(activity.name.as_ref()),
        match activity.activity_type.as_ref() {
            Some(kind) => CellValue::from(kind.to_string()),
            None => CellValue::from(""),
        },
        CellValue::from(
            course
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| "No course".to_string()),
        ),
        text_or_dash(course.and_then(|c| c.code.as_ref())),
        match activity.due_date {
            Some(date) => CellValue::from(date.format("%d/%m/%Y").to_string()),
            None => CellValue::from("-"),
        },
        CellValue::from(i64::from(activity.weight_percent.unwrap_or(0))),
        match activity.status.as_ref() {
            Some(status) => CellValue::from(status.to_string()),
            None => CellValue::from(""),
        },
    ]
}

fn full_report_row(
    student: &student::Model,
    course: Option<&course::Model>,
    aggregates: &CourseAggregates,
) -> Vec<CellValue> {
    let activities = course
        .map(|c| aggregates.activity_count(c.id))
        .unwrap_or(0);
    vec![
        CellValue::from(
            course
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| "No course".to_string()),
        ),
        text_or_dash(course.and_then(|c| c.code.as_ref())),
        text_or_empty(student.name.as_ref()),
        grade_cell(student.final_grade),
        CellValue::from(student.status().to_string()),
        CellValue::from(activities),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::prelude::Decimal;

    use super::*;

    fn course_model() -> course::Model {
        course::Model {
            id: 7,
            name: Some("Databases".to_string()),
            code: Some("DB-101".to_string()),
            description: None,
            status: Some(CourseStatus::Active),
            teacher_id: None,
        }
    }

    #[test]
    fn student_row_substitutes_missing_relation_and_grade() {
        let student = student::Model {
            id: 3,
            name: Some("Ana Ruiz".to_string()),
            course_id: None,
            final_grade: None,
        };
        let row = student_row(&student, None);
        assert_eq!(row[2], CellValue::Text("No course".to_string()));
        assert_eq!(row[3], CellValue::Text("-".to_string()));
        assert_eq!(row[4], CellValue::Text("-".to_string()));
        assert_eq!(row[5], CellValue::Text("Unrated".to_string()));
    }

    #[test]
    fn student_row_renders_grade_and_status() {
        let student = student::Model {
            id: 3,
            name: Some("Ana Ruiz".to_string()),
            course_id: Some(7),
            final_grade: Some(Decimal::new(42, 1)),
        };
        let row = student_row(&student, Some(&course_model()));
        assert_eq!(row[2], CellValue::Text("Databases".to_string()));
        assert_eq!(row[4], CellValue::Float(4.2));
        assert_eq!(row[5], CellValue::Text("Passed".to_string()));
    }

    #[test]
    fn activity_row_formats_due_date_and_defaults_weight() {
        let activity = activity::Model {
            id: 1,
            name: Some("Final exam".to_string()),
            activity_type: None,
            due_date: NaiveDate::from_ymd_opt(2026, 7, 3),
            weight_percent: None,
            status: None,
            course_id: Some(7),
        };
        let row = activity_row(&activity, Some(&course_model()));
        assert_eq!(row[2], CellValue::Text("".to_string()));
        assert_eq!(row[5], CellValue::Text("03/07/2026".to_string()));
        assert_eq!(row[6], CellValue::Int(0));
        assert_eq!(row[7], CellValue::Text("".to_string()));
    }

    #[test]
    fn missing_names_render_blank_while_codes_and_grades_render_dash() {
        let student = student::Model {
            id: 9,
            name: None,
            course_id: None,
            final_grade: None,
        };
        let row = student_row(&student, None);
        assert_eq!(row[1], CellValue::Text("".to_string()));
        assert_eq!(row[3], CellValue::Text("-".to_string()));
        assert_eq!(row[4], CellValue::Text("-".to_string()));

        let course = course::Model {
            id: 9,
            name: None,
            code: None,
            description: None,
            status: None,
            teacher_id: None,
        };
        let aggregates = CourseAggregates::from_rows(vec![], vec![], vec![]);
        let row = course_row(&course, None, &aggregates);
        assert_eq!(row[1], CellValue::Text("".to_string()));
        assert_eq!(row[2], CellValue::Text("-".to_string()));
        assert_eq!(row[3], CellValue::Text("".to_string()));
        assert_eq!(row[4], CellValue::Text("".to_string()));
    }

    #[test]
    fn course_row_falls_back_when_teacher_is_missing() {
        let aggregates = CourseAggregates::from_rows(vec![], vec![], vec![]);
        let row = course_row(&course_model(), None, &aggregates);
        assert_eq!(row[5], CellValue::Text("No teacher".to_string()));
        assert_eq!(row[6], CellValue::Int(0));
        assert_eq!(row[8], CellValue::Text("-".to_string()));
    }
}
