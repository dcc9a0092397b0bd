use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use serde_json::Value;

use super::dto::{
    CourseStatsRow, GeneralReport, MonthlyAverageRow, PendingActivitiesRow, PerformanceRow,
    ReportQuery, StudentsPerCourseRow, TopStudentRow,
};
use crate::entities::sea_orm_active_enums::{ActivityStatus, CourseStatus};
use crate::entities::student::StudentStatus;
use crate::entities::{activity, course, student};
use crate::repositories::CourseRepository;
use crate::static_service::DATABASE_CONNECTION;

pub fn create_route() -> Router {
    Router::new().route("/api/reports", get(get_report))
}

/// Every action recomputes live aggregates; there is no caching.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report computed"),
        (status = 400, description = "Unknown report action"),
        (status = 500, description = "Aggregation fault")
    ),
    tag = "Reports"
)]
pub async fn get_report(
    Query(query): Query<ReportQuery>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, String)> {
    let action = query.action.as_deref().unwrap_or("general");

    let result = match action {
        "general" => general_report().await.and_then(to_json),
        "course_stats" => course_stats().await.and_then(to_json),
        "students_per_course" => students_per_course().await.and_then(to_json),
        "performance" => performance().await.and_then(to_json),
        "pending_activities" => pending_activities().await.and_then(to_json),
        "top_students" => top_students().await.and_then(to_json),
        "monthly_averages" => monthly_averages().await.and_then(to_json),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown report action: {}", action),
            ));
        }
    };

    let value = result.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build {} report: {}", action, e),
        )
    })?;

    Ok((StatusCode::OK, Json(value)))
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn get_connection() -> &'static DatabaseConnection {
    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}

async fn general_report() -> Result<GeneralReport> {
    let db = get_connection();

    let active_courses = course::Entity::find()
        .filter(course::Column::Status.eq(CourseStatus::Active))
        .count(db)
        .await? as i64;
    let total_students = student::Entity::find().count(db).await? as i64;
    let total_activities = activity::Entity::find().count(db).await? as i64;
    let grades = recorded_grades(db).await?;

    Ok(GeneralReport {
        active_courses,
        total_students,
        total_activities,
        overall_average: mean_rounded(&grades),
    })
}

async fn course_stats() -> Result<Vec<CourseStatsRow>> {
    let course_repo = CourseRepository::new();
    let courses = course_repo.find_active().await?;
    let aggregates = course_repo.load_aggregates().await?;

    let rows = courses
        .into_iter()
        .map(|course| CourseStatsRow {
            num_students: aggregates.student_count(course.id),
            num_activities: aggregates.activity_count(course.id),
            average: aggregates.average(course.id),
            id: course.id,
            name: course.name,
            code: course.code,
        })
        .collect();

    Ok(sort_by_average(rows))
}

async fn students_per_course() -> Result<Vec<StudentsPerCourseRow>> {
    let course_repo = CourseRepository::new();
    let courses = course_repo.find_active().await?;
    let aggregates = course_repo.load_aggregates().await?;

    let rows = courses
        .into_iter()
        .map(|course| StudentsPerCourseRow {
            count: aggregates.student_count(course.id),
            course: course.name,
        })
        .collect();

    Ok(top_enrollment(rows, 10))
}

async fn performance() -> Result<Vec<PerformanceRow>> {
    let db = get_connection();

    let grades: Vec<Option<Decimal>> = student::Entity::find()
        .select_only()
        .column(student::Column::FinalGrade)
        .into_tuple()
        .all(db)
        .await?;

    Ok(performance_partition(&grades))
}

async fn pending_activities() -> Result<Vec<PendingActivitiesRow>> {
    let db = get_connection();

    let activities = activity::Entity::find()
        .find_also_related(course::Entity)
        .all(db)
        .await?;
    let rows: Vec<(Option<ActivityStatus>, Option<NaiveDate>, Option<String>)> = activities
        .into_iter()
        .map(|(activity, course)| {
            (
                activity.status,
                activity.due_date,
                course.and_then(|c| c.name),
            )
        })
        .collect();

    Ok(pending_by_course(rows, Local::now().date_naive()))
}

async fn top_students() -> Result<Vec<TopStudentRow>> {
    let db = get_connection();

    let students = student::Entity::find()
        .find_also_related(course::Entity)
        .filter(student::Column::FinalGrade.is_not_null())
        .order_by_desc(student::Column::FinalGrade)
        .limit(10)
        .all(db)
        .await?;

    Ok(students
        .into_iter()
        .map(|(student, course)| TopStudentRow {
            student: student.name,
            course: course
                .and_then(|c| c.name)
                .unwrap_or_else(|| "No course".to_string()),
            grade: student
                .final_grade
                .and_then(|grade| grade.to_f64())
                .unwrap_or(0.0),
        })
        .collect())
}

async fn monthly_averages() -> Result<Vec<MonthlyAverageRow>> {
    let db = get_connection();

    let due_dates: Vec<NaiveDate> = activity::Entity::find()
        .select_only()
        .column(activity::Column::DueDate)
        .filter(activity::Column::DueDate.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    let grades = recorded_grades(db).await?;

    Ok(monthly_rows(&due_dates, mean_rounded(&grades)))
}

async fn recorded_grades(db: &DatabaseConnection) -> Result<Vec<Decimal>> {
    let grades = student::Entity::find()
        .select_only()
        .column(student::Column::FinalGrade)
        .filter(student::Column::FinalGrade.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    Ok(grades)
}

fn mean_rounded(grades: &[Decimal]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let sum: Decimal = grades.iter().copied().sum();
    (sum / Decimal::from(grades.len() as u64))
        .round_dp(2)
        .to_f64()
        .unwrap_or(0.0)
}

/// Descending by mean grade; a missing mean orders as 0 but still displays as
/// null.
fn sort_by_average(mut rows: Vec<CourseStatsRow>) -> Vec<CourseStatsRow> {
    rows.sort_by(|a, b| {
        b.average
            .unwrap_or(0.0)
            .total_cmp(&a.average.unwrap_or(0.0))
    });
    rows
}

fn top_enrollment(
    mut rows: Vec<StudentsPerCourseRow>,
    limit: usize,
) -> Vec<StudentsPerCourseRow> {
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(limit);
    rows
}

fn performance_partition(grades: &[Option<Decimal>]) -> Vec<PerformanceRow> {
    let mut passed = 0;
    let mut failed = 0;
    let mut unrated = 0;
    for grade in grades {
        match StudentStatus::from_grade(*grade) {
            StudentStatus::Passed => passed += 1,
            StudentStatus::Failed => failed += 1,
            StudentStatus::Unrated => unrated += 1,
        }
    }

    vec![
        PerformanceRow {
            status: StudentStatus::Passed,
            count: passed,
        },
        PerformanceRow {
            status: StudentStatus::Failed,
            count: failed,
        },
        PerformanceRow {
            status: StudentStatus::Unrated,
            count: unrated,
        },
    ]
}

/// An activity counts as pending when its status says so or its due date is
/// still ahead; the two cases fold into one count per course.
fn pending_by_course(
    rows: Vec<(Option<ActivityStatus>, Option<NaiveDate>, Option<String>)>,
    today: NaiveDate,
) -> Vec<PendingActivitiesRow> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for (status, due_date, course_name) in rows {
        let pending =
            status == Some(ActivityStatus::Pending) || due_date.is_some_and(|d| d > today);
        if pending {
            let course = course_name.unwrap_or_else(|| "No course".to_string());
            *counts.entry(course).or_insert(0) += 1;
        }
    }

    let mut result: Vec<PendingActivitiesRow> = counts
        .into_iter()
        .map(|(course, pending)| PendingActivitiesRow { course, pending })
        .collect();
    result.sort_by(|a, b| b.pending.cmp(&a.pending));
    result
}

// The mean is global, repeated for every month with activity due dates: grades
// are not linked to months in this schema.
fn monthly_rows(dates: &[NaiveDate], overall_average: f64) -> Vec<MonthlyAverageRow> {
    let months: BTreeSet<(i32, u32)> = dates.iter().map(|d| (d.year(), d.month())).collect();
    months
        .into_iter()
        .map(|(year, month)| MonthlyAverageRow {
            month: format!("{year}-{month:02}"),
            average: overall_average,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    #[test]
    fn mean_rounded_handles_empty_and_rounds() {
        assert_eq!(mean_rounded(&[]), 0.0);
        assert_eq!(mean_rounded(&[dec(30, 1), dec(40, 1)]), 3.5);
        // 3.0, 3.5, 4.2 -> 3.5666... -> 3.57
        assert_eq!(mean_rounded(&[dec(30, 1), dec(35, 1), dec(42, 1)]), 3.57);
    }

    #[test]
    fn course_stats_sort_treats_missing_average_as_lowest() {
        let rows = vec![
            CourseStatsRow {
                id: 1,
                name: Some("A".into()),
                code: None,
                num_students: 0,
                num_activities: 0,
                average: None,
            },
            CourseStatsRow {
                id: 2,
                name: Some("B".into()),
                code: None,
                num_students: 0,
                num_activities: 0,
                average: Some(4.2),
            },
            CourseStatsRow {
                id: 3,
                name: Some("C".into()),
                code: None,
                num_students: 0,
                num_activities: 0,
                average: Some(2.1),
            },
        ];
        let sorted = sort_by_average(rows);
        assert_eq!(sorted[0].id, 2);
        assert_eq!(sorted[1].id, 3);
        assert_eq!(sorted[2].id, 1);
        // display value stays null, only the ordering treats it as zero
        assert_eq!(sorted[2].average, None);
    }

    #[test]
    fn performance_partition_counts_sum_to_total() {
        let grades = vec![
            Some(dec(25, 1)), // Failed
            None,             // Unrated
            Some(dec(30, 1)), // Passed (boundary)
            Some(dec(45, 1)), // Passed
        ];
        let rows = performance_partition(&grades);
        let total: i64 = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, grades.len() as i64);
        assert_eq!(rows[0].count, 2); // Passed
        assert_eq!(rows[1].count, 1); // Failed
        assert_eq!(rows[2].count, 1); // Unrated
    }

    #[test]
    fn performance_partition_scenario_one_of_each() {
        let grades = vec![Some(dec(25, 1)), None, Some(dec(30, 1))];
        let rows = performance_partition(&grades);
        assert!(rows.iter().all(|r| r.count == 1));
    }

    #[test]
    fn pending_combines_status_and_future_due_date() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let future = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let rows = vec![
            (Some(ActivityStatus::Pending), Some(past), Some("Math".to_string())),
            (Some(ActivityStatus::Active), Some(future), Some("Math".to_string())),
            (Some(ActivityStatus::Active), Some(past), Some("Math".to_string())),
            (Some(ActivityStatus::Pending), None, None),
        ];

        let result = pending_by_course(rows, today);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].course, "Math");
        assert_eq!(result[0].pending, 2);
        assert_eq!(result[1].course, "No course");
        assert_eq!(result[1].pending, 1);
    }

    #[test]
    fn top_enrollment_sorts_and_truncates() {
        let rows = (0..12)
            .map(|i| StudentsPerCourseRow {
                course: Some(format!("C{i}")),
                count: i,
            })
            .collect();
        let top = top_enrollment(rows, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].count, 11);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn monthly_rows_are_distinct_sorted_and_repeat_the_global_mean() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 22).unwrap(),
        ];
        let rows = monthly_rows(&dates, 3.41);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2026-01");
        assert_eq!(rows[1].month, "2026-03");
        assert!(rows.iter().all(|r| r.average == 3.41));
    }
}
