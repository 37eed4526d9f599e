//! Grid layout calculation
//!
//! This module handles the geometry of the zone grid on a sheet and the
//! transforms that turn each zone's content into place.

use crate::types::{FoldTopology, Rotation};

use super::{GridLayout, GridPosition, Rect};

/// PDF transformation matrix `[a b c d e f]`
pub type Matrix = [f32; 6];

/// Create the zone grid covering a whole sheet
pub fn create_grid_layout(
    topology: FoldTopology,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
) -> GridLayout {
    let (rows, cols) = topology.grid_dimensions();
    GridLayout {
        rows,
        cols,
        zone_width_pt: sheet_width_pt / cols as f32,
        zone_height_pt: sheet_height_pt / rows as f32,
    }
}

/// Calculate the bounds of a zone at the given grid position.
pub fn zone_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    // Row 0 is at the top, so we need to invert the y calculation
    let x = pos.col as f32 * grid.zone_width_pt;
    let y = (grid.rows - pos.row - 1) as f32 * grid.zone_height_pt;

    Rect::new(x, y, grid.zone_width_pt, grid.zone_height_pt)
}

/// Size of the upright reading frame of a zone turned by `rotation`
pub fn frame_size(grid: &GridLayout, rotation: Rotation) -> (f32, f32) {
    if rotation.is_quarter_turn() {
        (grid.zone_height_pt, grid.zone_width_pt)
    } else {
        (grid.zone_width_pt, grid.zone_height_pt)
    }
}

/// Matrix mapping the reading frame (origin bottom-left) onto the zone
pub fn zone_transform(rect: &Rect, rotation: Rotation) -> Matrix {
    match rotation {
        Rotation::Upright => [1.0, 0.0, 0.0, 1.0, rect.x, rect.y],
        Rotation::UpsideDown => [-1.0, 0.0, 0.0, -1.0, rect.right(), rect.top()],
        Rotation::CounterClockwise90 => [0.0, 1.0, -1.0, 0.0, rect.right(), rect.y],
        Rotation::Clockwise90 => [0.0, -1.0, 1.0, 0.0, rect.x, rect.top()],
    }
}

/// Apply a matrix to a point
pub fn transform_point(m: &Matrix, x: f32, y: f32) -> (f32, f32) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

// =============================================================================
// Tests
// =============================================================================
