//! Layout data types for booklet imposition
//!
//! These types describe the plan handed from the planner to the renderer:
//! which zone of which sheet side carries which booklet page, and how it
//! is turned.

use crate::types::{DuplexFlip, FoldTopology, Rotation};

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Where this position lands on the other side of the sheet
    pub fn mirrored(self, flip: DuplexFlip, rows: usize, cols: usize) -> Self {
        match flip {
            DuplexFlip::LeftRight => Self::new(self.row, cols - 1 - self.col),
            DuplexFlip::TopBottom => Self::new(rows - 1 - self.row, self.col),
        }
    }
}

/// Grid layout of one sheet side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of rows of zones
    pub rows: usize,
    /// Number of columns of zones
    pub cols: usize,
    /// Width of each zone in points
    pub zone_width_pt: f32,
    /// Height of each zone in points
    pub zone_height_pt: f32,
}

impl GridLayout {
    /// Zones on one side of a sheet
    pub fn zone_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn sheet_width_pt(&self) -> f32 {
        self.cols as f32 * self.zone_width_pt
    }

    pub fn sheet_height_pt(&self) -> f32 {
        self.rows as f32 * self.zone_height_pt
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// What a zone carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneContent {
    /// Nothing is drawn
    Blank,
    /// A half-page of listings (1-based)
    HalfPage(usize),
    Cover,
    BackCover,
}

/// One placed booklet page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub position: GridPosition,
    pub rotation: Rotation,
    pub content: ZoneContent,
    /// Booklet page number, absent on the dedicated two-panel cover sheet
    pub page: Option<usize>,
}

/// Zones printed on one side of a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SidePlan {
    pub sheet_index: usize,
    pub side: SheetSide,
    /// Zones in row-major order
    pub zones: Vec<Zone>,
}

impl SidePlan {
    pub fn zone_at(&self, position: GridPosition) -> Option<&Zone> {
        self.zones.iter().find(|z| z.position == position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Two-panel sheet carrying only the cover and back cover
    Cover,
    /// Every zone in use
    Full,
    /// Only some four-page folio strips in use
    Partial { folios: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub kind: SheetKind,
    pub front: SidePlan,
    pub back: SidePlan,
}

/// Complete page-to-zone assignment for one booklet
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionPlan {
    pub topology: FoldTopology,
    /// Number of half-pages of listings
    pub half_pages: usize,
    /// Pages of the folded booklet, blanks included
    pub booklet_pages: usize,
    pub sheets: Vec<SheetPlan>,
}

impl ImpositionPlan {
    /// Sheet sides in print order
    pub fn sides(&self) -> impl Iterator<Item = &SidePlan> {
        self.sheets.iter().flat_map(|s| [&s.front, &s.back])
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.sides().flat_map(|side| side.zones.iter())
    }

    pub fn total_zones(&self) -> usize {
        self.zones().count()
    }

    pub fn physical_sheets(&self) -> usize {
        self.sheets.len()
    }

    /// Zone count expressed in whole sheets
    pub fn sheet_equivalent(&self) -> f32 {
        let (rows, cols) = self.topology.grid_dimensions();
        self.total_zones() as f32 / (2 * rows * cols) as f32
    }

    pub fn blank_zones(&self) -> usize {
        self.zones()
            .filter(|z| z.content == ZoneContent::Blank)
            .count()
    }

    /// Two-panel content sides as (left, right) half-page indices,
    /// 0 meaning blank. Empty for other topologies.
    pub fn spreads(&self) -> Vec<(usize, usize)> {
        if self.topology != FoldTopology::TwoPanel {
            return Vec::new();
        }
        let index = |side: &SidePlan, col| match side.zone_at(GridPosition::new(0, col)) {
            Some(Zone {
                content: ZoneContent::HalfPage(i),
                ..
            }) => *i,
            _ => 0,
        };
        self.sheets
            .iter()
            .filter(|s| s.kind != SheetKind::Cover)
            .flat_map(|s| [&s.front, &s.back])
            .map(|side| (index(side, 0), index(side, 1)))
            .collect()
    }
}
