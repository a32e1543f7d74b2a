//! Business rules behind the assignment endpoints.
//!
//! Every operation returns an [`AssignmentError`] instead of speaking HTTP; the
//! API layer owns the translation to status codes.

use thiserror::Error;
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::db::models::{Assignment, GameElement};
use crate::repositories::{
    is_foreign_key_violation, is_unique_violation, AssignmentRepo, CreateAssignment,
    NewGameElement,
};
use crate::schemas::assignment::AssignmentCreate;
use crate::services::placement;
use crate::services::uuid_format::{validate_uuid, UuidFormatError};

#[derive(Debug, Error)]
pub(crate) enum AssignmentError {
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("invalid uuid: {0}")]
    InvalidUuid(String),
    #[error("course {0} not found")]
    CourseNotFound(String),
    #[error("{0}")]
    GameField(String),
    #[error("{0}")]
    Position(String),
    #[error("assignment {0} not found")]
    NotFound(String),
    #[error("element placement rejected: {0}")]
    ElementPlacement(String),
    #[error("{0}")]
    Internal(String),
}

impl From<UuidFormatError> for AssignmentError {
    fn from(error: UuidFormatError) -> Self {
        Self::InvalidUuid(error.0)
    }
}

pub(crate) type AssignmentResult<T> = Result<T, AssignmentError>;

/// An assignment together with its placed elements; `None` when the field is empty.
pub(crate) type FullAssignment = (Assignment, Option<Vec<GameElement>>);

pub(crate) async fn get_course_assignments(
    repo: &dyn AssignmentRepo,
    course_uuid: &str,
) -> AssignmentResult<Vec<Assignment>> {
    validate_uuid(course_uuid)?;
    Ok(repo.list_course_assignments(course_uuid).await?)
}

pub(crate) async fn create_assignment(
    repo: &dyn AssignmentRepo,
    payload: &AssignmentCreate,
) -> AssignmentResult<Option<Assignment>> {
    validate_uuid(&payload.course_id)?;

    if !repo.course_exists(&payload.course_id).await? {
        return Err(AssignmentError::CourseNotFound(payload.course_id.clone()));
    }

    let field = placement::validate_field(payload.field_width, payload.field_height)
        .map_err(AssignmentError::GameField)?;
    placement::validate_start(field, payload.start_x, payload.start_y)
        .map_err(AssignmentError::Position)?;

    let created = repo
        .create_assignment(CreateAssignment {
            id: Uuid::new_v4().to_string(),
            course_id: payload.course_id.clone(),
            title: payload.title.trim().to_string(),
            description: payload.description.clone(),
            field_width: field.width,
            field_height: field.height,
            start_x: payload.start_x,
            start_y: payload.start_y,
            created_at: primitive_now_utc(),
        })
        .await?;

    Ok(created)
}

pub(crate) async fn delete_assignment(
    repo: &dyn AssignmentRepo,
    assignment_uuid: &str,
) -> AssignmentResult<Assignment> {
    validate_uuid(assignment_uuid)?;

    repo.delete_assignment(assignment_uuid)
        .await?
        .ok_or_else(|| AssignmentError::NotFound(assignment_uuid.to_string()))
}

pub(crate) async fn total_info_about_assignment(
    repo: &dyn AssignmentRepo,
    assignment_uuid: &str,
) -> AssignmentResult<FullAssignment> {
    validate_uuid(assignment_uuid)?;

    let assignment = repo
        .find_assignment(assignment_uuid)
        .await?
        .ok_or_else(|| AssignmentError::NotFound(assignment_uuid.to_string()))?;

    let elements = repo.list_elements(&assignment.id).await?;
    let elements = if elements.is_empty() { None } else { Some(elements) };

    Ok((assignment, elements))
}

/// Validates the whole batch up front and inserts it in one transaction.
///
/// A batch may target several assignments; each group is checked against the
/// elements already placed on its own field.
pub(crate) async fn add_elements(
    repo: &dyn AssignmentRepo,
    batch: Vec<NewGameElement>,
) -> AssignmentResult<Vec<GameElement>> {
    if batch.is_empty() {
        return Ok(Vec::new());
    }

    for (assignment_id, group) in group_by_assignment(&batch) {
        if validate_uuid(assignment_id).is_err() {
            return Err(AssignmentError::ElementPlacement(format!(
                "invalid assignment uuid {assignment_id}"
            )));
        }

        let Some(assignment) = repo.find_assignment(assignment_id).await? else {
            return Err(AssignmentError::ElementPlacement(format!(
                "assignment {assignment_id} does not exist"
            )));
        };

        let existing = repo.list_elements(assignment_id).await?;
        placement::validate_batch(&assignment, &existing, &group)
            .map_err(|e| AssignmentError::ElementPlacement(e.to_string()))?;
    }

    let inserted = repo.insert_elements(&batch).await.map_err(|e| {
        // A concurrent batch took a cell or removed the assignment after validation.
        if is_unique_violation(&e) || is_foreign_key_violation(&e) {
            AssignmentError::ElementPlacement(e.to_string())
        } else {
            AssignmentError::Storage(e)
        }
    })?;

    if inserted.len() != batch.len() {
        return Err(AssignmentError::Internal(format!(
            "inserted {} of {} elements",
            inserted.len(),
            batch.len()
        )));
    }

    Ok(inserted)
}

fn group_by_assignment(batch: &[NewGameElement]) -> Vec<(&str, Vec<NewGameElement>)> {
    let mut groups: Vec<(&str, Vec<NewGameElement>)> = Vec::new();
    for element in batch {
        match groups.iter_mut().find(|(id, _)| *id == element.assignment_id) {
            Some((_, group)) => group.push(element.clone()),
            None => groups.push((element.assignment_id.as_str(), vec![element.clone()])),
        }
    }
    groups
}
