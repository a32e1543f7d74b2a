use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Assignment;

#[derive(Debug, Clone, Deserialize, Validate)]
pub(crate) struct AssignmentCreate {
    pub(crate) course_id: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub(crate) description: Option<String>,
    pub(crate) field_width: i32,
    pub(crate) field_height: i32,
    #[serde(default)]
    pub(crate) start_x: i32,
    #[serde(default)]
    pub(crate) start_y: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseAssignmentsQuery {
    pub(crate) course_uuid: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) field_width: i32,
    pub(crate) field_height: i32,
    pub(crate) start_x: i32,
    pub(crate) start_y: i32,
    pub(crate) created_at: String,
}

impl AssignmentResponse {
    pub(crate) fn from_db(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            field_width: assignment.field_width,
            field_height: assignment.field_height,
            start_x: assignment.start_x,
            start_y: assignment.start_y,
            created_at: format_primitive(assignment.created_at),
        }
    }
}
