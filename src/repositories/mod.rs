//! Data access for assignments and the records they hang off.
//!
//! Handlers and services talk to storage through [`AssignmentRepo`]; the
//! Postgres implementation delegates to the per-table query modules below.

pub(crate) mod actions;
pub(crate) mod assignments;
pub(crate) mod courses;
pub(crate) mod game_elements;
pub(crate) mod postgres;
pub(crate) mod users;

use async_trait::async_trait;
use time::PrimitiveDateTime;

use crate::db::models::{Action, Assignment, GameElement, User};
use crate::db::types::ElementKind;

pub(crate) use postgres::PgAssignmentRepo;

#[derive(Debug, Clone)]
pub(crate) struct CreateAssignment {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) field_width: i32,
    pub(crate) field_height: i32,
    pub(crate) start_x: i32,
    pub(crate) start_y: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewGameElement {
    pub(crate) assignment_id: String,
    pub(crate) kind: ElementKind,
    pub(crate) pos_x: i32,
    pub(crate) pos_y: i32,
}

#[async_trait]
pub(crate) trait AssignmentRepo: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, sqlx::Error>;

    async fn course_exists(&self, course_id: &str) -> Result<bool, sqlx::Error>;

    async fn list_course_assignments(
        &self,
        course_id: &str,
    ) -> Result<Vec<Assignment>, sqlx::Error>;

    /// Returns `None` when the row was not written.
    async fn create_assignment(
        &self,
        params: CreateAssignment,
    ) -> Result<Option<Assignment>, sqlx::Error>;

    async fn find_assignment(&self, assignment_id: &str)
        -> Result<Option<Assignment>, sqlx::Error>;

    /// Deletes the assignment with its elements and action links, returning the removed row.
    async fn delete_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, sqlx::Error>;

    async fn list_elements(&self, assignment_id: &str) -> Result<Vec<GameElement>, sqlx::Error>;

    /// Inserts the whole batch or nothing.
    async fn insert_elements(
        &self,
        elements: &[NewGameElement],
    ) -> Result<Vec<GameElement>, sqlx::Error>;

    async fn get_assignment_actions(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Action>, sqlx::Error>;

    /// Links actions to an assignment, ignoring links that already exist.
    async fn add_actions(
        &self,
        assignment_id: &str,
        action_ids: &[i32],
    ) -> Result<Vec<Action>, sqlx::Error>;
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some("23505"))
}

pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some("23503"))
}
