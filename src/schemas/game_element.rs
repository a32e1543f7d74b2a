use serde::{Deserialize, Serialize};

use crate::db::models::GameElement;
use crate::db::types::ElementKind;
use crate::repositories::NewGameElement;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GameElementCreate {
    pub(crate) assignment_id: String,
    pub(crate) kind: ElementKind,
    pub(crate) pos_x: i32,
    pub(crate) pos_y: i32,
}

impl From<GameElementCreate> for NewGameElement {
    fn from(value: GameElementCreate) -> Self {
        Self {
            assignment_id: value.assignment_id,
            kind: value.kind,
            pos_x: value.pos_x,
            pos_y: value.pos_y,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GameElementResponse {
    pub(crate) id: i64,
    pub(crate) assignment_id: String,
    pub(crate) kind: ElementKind,
    pub(crate) pos_x: i32,
    pub(crate) pos_y: i32,
}

impl GameElementResponse {
    pub(crate) fn from_db(element: GameElement) -> Self {
        Self {
            id: element.id,
            assignment_id: element.assignment_id,
            kind: element.kind,
            pos_x: element.pos_x,
            pos_y: element.pos_y,
        }
    }
}
