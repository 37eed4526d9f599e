//! Fold guides for imposed sheets
//!
//! Dashed grey lines along every interior zone boundary, drawn across the
//! whole sheet in sheet coordinates after all zone content.

use crate::constants::{FOLD_LINE_GRAY, FOLD_LINE_WIDTH};
use crate::layout::GridLayout;
use crate::render::{LineStyle, PaintCommand};

/// Line style for fold guides with the given dash pattern
pub fn fold_style(dash: [f32; 2]) -> LineStyle {
    LineStyle {
        width: FOLD_LINE_WIDTH,
        gray: FOLD_LINE_GRAY,
        dash: Some(dash),
    }
}

/// Generate fold guides for one sheet side
pub fn fold_guides(grid: &GridLayout, dash: [f32; 2]) -> Vec<PaintCommand> {
    let style = fold_style(dash);
    let width = grid.sheet_width_pt();
    let height = grid.sheet_height_pt();

    // Vertical lines between columns
    let verticals = (1..grid.cols).map(|col| {
        let x = col as f32 * grid.zone_width_pt;
        PaintCommand::Line {
            from: (x, 0.0),
            to: (x, height),
            style,
        }
    });

    // Horizontal lines between rows
    let horizontals = (1..grid.rows).map(|row| {
        let y = row as f32 * grid.zone_height_pt;
        PaintCommand::Line {
            from: (0.0, y),
            to: (width, y),
            style,
        }
    });

    verticals.chain(horizontals).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::create_grid_layout;
    use crate::types::FoldTopology;

    #[test]
    fn test_guide_counts() {
        let cases = [
            (FoldTopology::TwoPanel, 1),
            (FoldTopology::FourPanel, 2),
            (FoldTopology::EightPanel, 4),
        ];
        for (topology, expected) in cases {
            let grid = create_grid_layout(topology, 800.0, 600.0);
            assert_eq!(fold_guides(&grid, [3.0, 3.0]).len(), expected, "{:?}", topology);
        }
    }

    #[test]
    fn test_guides_span_sheet() {
        let grid = create_grid_layout(FoldTopology::FourPanel, 800.0, 600.0);
        let guides = fold_guides(&grid, [2.0, 2.0]);
        assert_eq!(
            guides[0],
            PaintCommand::Line {
                from: (400.0, 0.0),
                to: (400.0, 600.0),
                style: fold_style([2.0, 2.0]),
            }
        );
        assert_eq!(
            guides[1],
            PaintCommand::Line {
                from: (0.0, 300.0),
                to: (800.0, 300.0),
                style: fold_style([2.0, 2.0]),
            }
        );
    }
}
