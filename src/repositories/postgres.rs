use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::{Action, Assignment, GameElement, User};
use crate::repositories::{
    actions, assignments, courses, game_elements, users, AssignmentRepo, CreateAssignment,
    NewGameElement,
};

#[derive(Clone)]
pub(crate) struct PgAssignmentRepo {
    pool: PgPool,
}

impl PgAssignmentRepo {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepo for PgAssignmentRepo {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        users::find_by_id(&self.pool, user_id).await
    }

    async fn course_exists(&self, course_id: &str) -> Result<bool, sqlx::Error> {
        courses::exists(&self.pool, course_id).await
    }

    async fn list_course_assignments(
        &self,
        course_id: &str,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        assignments::list_by_course(&self.pool, course_id).await
    }

    async fn create_assignment(
        &self,
        params: CreateAssignment,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        assignments::create(&self.pool, params).await
    }

    async fn find_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        assignments::find_by_id(&self.pool, assignment_id).await
    }

    async fn delete_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        assignments::delete_by_id(&self.pool, assignment_id).await
    }

    async fn list_elements(&self, assignment_id: &str) -> Result<Vec<GameElement>, sqlx::Error> {
        game_elements::list_by_assignment(&self.pool, assignment_id).await
    }

    async fn insert_elements(
        &self,
        elements: &[NewGameElement],
    ) -> Result<Vec<GameElement>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let inserted = game_elements::insert_batch(&mut tx, elements).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn get_assignment_actions(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Action>, sqlx::Error> {
        actions::list_for_assignment(&self.pool, assignment_id).await
    }

    async fn add_actions(
        &self,
        assignment_id: &str,
        action_ids: &[i32],
    ) -> Result<Vec<Action>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let linked = actions::link_to_assignment(&mut *tx, assignment_id, action_ids).await?;
        let current = actions::list_for_assignment(&mut *tx, assignment_id).await?;
        tx.commit().await?;

        tracing::debug!(assignment_id, linked, "Linked actions to assignment");
        Ok(current)
    }
}

#[cfg(test)]
mod tests;
