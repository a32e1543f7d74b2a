use sqlx::PgPool;

use crate::db::models::Assignment;
use crate::repositories::CreateAssignment;

const COLUMNS: &str = "\
    id, course_id, title, description, field_width, field_height, \
    start_x, start_y, created_at";

pub(crate) async fn list_by_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!("SELECT {COLUMNS} FROM assignments WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssignment,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (
            id, course_id, title, description, field_width, field_height,
            start_x, start_y, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
         ON CONFLICT (id) DO NOTHING
         RETURNING {COLUMNS}",
    ))
    .bind(&params.id)
    .bind(&params.course_id)
    .bind(&params.title)
    .bind(params.description.as_deref())
    .bind(params.field_width)
    .bind(params.field_height)
    .bind(params.start_x)
    .bind(params.start_y)
    .bind(params.created_at)
    .fetch_optional(pool)
    .await
}

/// Elements and action links go with the row through `ON DELETE CASCADE`.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "DELETE FROM assignments WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}
