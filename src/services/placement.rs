//! Game field rules: field size, the player's start cell, and element placement.

use std::collections::HashSet;

use thiserror::Error;

use crate::db::models::{Assignment, GameElement};
use crate::repositories::NewGameElement;

pub(crate) const FIELD_MIN_SIZE: i32 = 1;
pub(crate) const FIELD_MAX_SIZE: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GameField {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PlacementError {
    #[error("element at ({x}, {y}) is outside the {width}x{height} field")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is the start position")]
    StartCell { x: i32, y: i32 },
    #[error("element targets assignment {0} outside this batch")]
    ForeignAssignment(String),
}

impl GameField {
    pub(crate) fn of(assignment: &Assignment) -> Self {
        Self { width: assignment.field_width, height: assignment.field_height }
    }

    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

/// Checks the requested field dimensions and returns a message fit for the client.
pub(crate) fn validate_field(width: i32, height: i32) -> Result<GameField, String> {
    let allowed = FIELD_MIN_SIZE..=FIELD_MAX_SIZE;
    if !allowed.contains(&width) || !allowed.contains(&height) {
        return Err(format!(
            "Game field {width}x{height} is invalid. Width and height must be between \
             {FIELD_MIN_SIZE} and {FIELD_MAX_SIZE}."
        ));
    }
    Ok(GameField { width, height })
}

pub(crate) fn validate_start(field: GameField, x: i32, y: i32) -> Result<(), String> {
    if field.contains(x, y) {
        Ok(())
    } else {
        Err(format!(
            "Start position ({x}, {y}) is outside the {}x{} game field.",
            field.width, field.height
        ))
    }
}

/// Validates a batch destined for one assignment against what is already on its field.
///
/// Every element of `batch` must reference `assignment`, sit inside the field,
/// avoid the start cell, and not share a cell with an existing element or with
/// another element of the batch.
pub(crate) fn validate_batch(
    assignment: &Assignment,
    existing: &[GameElement],
    batch: &[NewGameElement],
) -> Result<(), PlacementError> {
    let field = GameField::of(assignment);
    let mut occupied: HashSet<(i32, i32)> =
        existing.iter().map(|element| (element.pos_x, element.pos_y)).collect();

    for element in batch {
        if element.assignment_id != assignment.id {
            return Err(PlacementError::ForeignAssignment(element.assignment_id.clone()));
        }

        let (x, y) = (element.pos_x, element.pos_y);
        if !field.contains(x, y) {
            return Err(PlacementError::OutOfBounds {
                x,
                y,
                width: field.width,
                height: field.height,
            });
        }
        if (x, y) == (assignment.start_x, assignment.start_y) {
            return Err(PlacementError::StartCell { x, y });
        }
        if !occupied.insert((x, y)) {
            return Err(PlacementError::Occupied { x, y });
        }
    }

    Ok(())
}
