use crate::db::models::Action;

pub(crate) async fn list_for_assignment(
    executor: impl sqlx::PgExecutor<'_>,
    assignment_id: &str,
) -> Result<Vec<Action>, sqlx::Error> {
    sqlx::query_as::<_, Action>(
        "SELECT a.id, a.name, a.description
         FROM actions a
         JOIN assignment_actions aa ON aa.action_id = a.id
         WHERE aa.assignment_id = $1
         ORDER BY a.id",
    )
    .bind(assignment_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn link_to_assignment(
    executor: impl sqlx::PgExecutor<'_>,
    assignment_id: &str,
    action_ids: &[i32],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO assignment_actions (assignment_id, action_id)
         SELECT $1, UNNEST($2::int4[])
         ON CONFLICT DO NOTHING",
    )
    .bind(assignment_id)
    .bind(action_ids)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
