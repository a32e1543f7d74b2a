use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::{ApiError, INTERNAL_ERROR_DETAIL};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::guards::{require_teacher, CurrentUser};
use crate::core::state::AppState;
use crate::repositories::NewGameElement;
use crate::schemas::action::{ActionResponse, AddActionsRequest};
use crate::schemas::assignment::{AssignmentCreate, AssignmentResponse, CourseAssignmentsQuery};
use crate::schemas::game_element::{GameElementCreate, GameElementResponse};
use crate::schemas::DetailResponse;
use crate::services::assignments;

type FullAssignmentResponse = (AssignmentResponse, Option<Vec<GameElementResponse>>);

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(list_assignments))
        .route("/assignment", post(create_assignment))
        .route("/assignment/delete/:assignment_id", post(delete_assignment))
        .route("/full_assignment/:assignment_uuid", get(full_assignment))
        .route("/add_elements", post(add_elements))
        .route("/actions/:assignment_uuid", get(get_actions))
        .route("/add_actions", post(add_actions))
}

/// Lists a course's assignments. Success answers 201 and an empty course 404.
async fn list_assignments(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CourseAssignmentsQuery>,
) -> Result<(StatusCode, Json<Vec<AssignmentResponse>>), ApiError> {
    let course_id = query.course_uuid;
    tracing::info!(course_id = %course_id, "Listing assignments of course");

    let found = assignments::get_course_assignments(state.repo(), &course_id).await?;

    if found.is_empty() {
        tracing::info!(course_id = %course_id, "Course has no assignments");
        return Err(ApiError::NotFound("Assignment not found".to_string()));
    }

    tracing::info!(course_id = %course_id, count = found.len(), "Found assignments of course");
    let response = found.into_iter().map(AssignmentResponse::from_db).collect();
    Ok((StatusCode::CREATED, Json(response)))
}

async fn create_assignment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AssignmentCreate>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    require_teacher(&user)?;

    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Assignment title must not be empty".to_string()));
    }

    tracing::info!(
        user_id = %user.id,
        course_id = %payload.course_id,
        title = %payload.title,
        "Creating assignment"
    );

    let Some(assignment) = assignments::create_assignment(state.repo(), &payload).await? else {
        tracing::error!(course_id = %payload.course_id, "Assignment was not created");
        return Err(ApiError::Internal(INTERNAL_ERROR_DETAIL.to_string()));
    };

    tracing::info!(
        assignment_id = %assignment.id,
        course_id = %assignment.course_id,
        action = "assignment_create",
        "Assignment created"
    );
    Ok(Json(AssignmentResponse::from_db(assignment)))
}

async fn delete_assignment(
    ApiPath(assignment_id): ApiPath<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DetailResponse>), ApiError> {
    require_teacher(&user)?;

    tracing::info!(user_id = %user.id, assignment_id = %assignment_id, "Deleting assignment");
    let deleted = assignments::delete_assignment(state.repo(), &assignment_id).await?;

    tracing::info!(
        assignment_id = %deleted.id,
        action = "assignment_delete",
        "Assignment deleted"
    );
    Ok((
        StatusCode::CREATED,
        Json(DetailResponse {
            detail: format!("Assignment with id {} successfully deleted", deleted.id),
        }),
    ))
}

async fn full_assignment(
    ApiPath(assignment_uuid): ApiPath<String>,
    State(state): State<AppState>,
) -> Result<Json<FullAssignmentResponse>, ApiError> {
    let (assignment, elements) =
        assignments::total_info_about_assignment(state.repo(), &assignment_uuid).await?;

    tracing::debug!(
        assignment_id = %assignment.id,
        elements = elements.as_ref().map_or(0, Vec::len),
        "Loaded full assignment"
    );
    let elements =
        elements.map(|items| items.into_iter().map(GameElementResponse::from_db).collect());
    Ok(Json((AssignmentResponse::from_db(assignment), elements)))
}

async fn add_elements(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Vec<GameElementCreate>>,
) -> Result<Json<Vec<GameElementResponse>>, ApiError> {
    let batch: Vec<NewGameElement> = payload.into_iter().map(NewGameElement::from).collect();
    tracing::info!(count = batch.len(), "Adding game elements");

    let inserted = assignments::add_elements(state.repo(), batch).await?;

    tracing::info!(count = inserted.len(), "Game elements added");
    Ok(Json(inserted.into_iter().map(GameElementResponse::from_db).collect()))
}

// TODO: route through a service with uuid validation and typed errors once the
// actions catalogue has its own rules; until then storage errors are a bare 500.
async fn get_actions(
    ApiPath(assignment_uuid): ApiPath<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActionResponse>>, ApiError> {
    let actions = state
        .repo()
        .get_assignment_actions(&assignment_uuid)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignment actions"))?;

    Ok(Json(actions.into_iter().map(ActionResponse::from_db).collect()))
}

async fn add_actions(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AddActionsRequest>,
) -> Result<Json<Vec<ActionResponse>>, ApiError> {
    let actions = state
        .repo()
        .add_actions(&payload.assignment_uuid, &payload.actions_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to add assignment actions"))?;

    Ok(Json(actions.into_iter().map(ActionResponse::from_db).collect()))
}
