use sqlx::PgPool;

pub(crate) async fn exists(pool: &PgPool, course_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
        .bind(course_id)
        .fetch_one(pool)
        .await
}
