use serde::{Deserialize, Serialize};

use crate::db::models::Action;

#[derive(Debug, Deserialize)]
pub(crate) struct AddActionsRequest {
    pub(crate) actions_id: Vec<i32>,
    pub(crate) assignment_uuid: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ActionResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
}

impl ActionResponse {
    pub(crate) fn from_db(action: Action) -> Self {
        Self { id: action.id, name: action.name, description: action.description }
    }
}
