use crate::db::models::GameElement;
use crate::repositories::NewGameElement;

const COLUMNS: &str = "id, assignment_id, kind, pos_x, pos_y";

pub(crate) async fn list_by_assignment(
    executor: impl sqlx::PgExecutor<'_>,
    assignment_id: &str,
) -> Result<Vec<GameElement>, sqlx::Error> {
    sqlx::query_as::<_, GameElement>(&format!(
        "SELECT {COLUMNS} FROM game_elements WHERE assignment_id = $1 ORDER BY id"
    ))
    .bind(assignment_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert(
    executor: impl sqlx::PgExecutor<'_>,
    element: &NewGameElement,
) -> Result<GameElement, sqlx::Error> {
    sqlx::query_as::<_, GameElement>(&format!(
        "INSERT INTO game_elements (assignment_id, kind, pos_x, pos_y)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}"
    ))
    .bind(&element.assignment_id)
    .bind(element.kind)
    .bind(element.pos_x)
    .bind(element.pos_y)
    .fetch_one(executor)
    .await
}

/// Any failure rolls back the elements inserted before it.
pub(crate) async fn insert_batch(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    elements: &[NewGameElement],
) -> Result<Vec<GameElement>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(elements.len());
    for element in elements {
        inserted.push(insert(&mut **tx, element).await?);
    }
    Ok(inserted)
}
