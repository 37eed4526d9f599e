//! Per-topology imposition tables
//!
//! Only front sides are tabulated. A window of consecutive booklet pages
//! is laid over the slots; the back of each zone is derived by turning the
//! sheet over (see `DuplexFlip`), which puts the other page of the same
//! leaf (`slot ^ 1`) behind it.
//!
//! Window layout for a sheet of `2k` pages is `[1..=k]` followed by the
//! last `k` pages, so slots `2j` and `2j + 1` always share a leaf.
//!
//! **Two panels (folio, 4 pages):** front [4, 1]
//!
//! **Four panels (quarto, 8 pages):** front [4↻, 1↺] over [5↻, 8↺]
//! - left column turned clockwise, right column counter-clockwise
//!
//! **Eight panels (octavo, 16 pages):** front [5↓, 12↓, 9↓, 8↓] over
//! [4, 13, 16, 1]
//! - top row upside down

use super::GridPosition;
use crate::types::{DuplexFlip, FoldTopology, Rotation};

use crate::types::Rotation::{
    Clockwise90 as CW, CounterClockwise90 as CCW, UpsideDown as DOWN, Upright as UP,
};

/// One front-side zone and the window slot it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTemplate {
    pub position: GridPosition,
    pub slot: usize,
    pub rotation: Rotation,
}

const fn zone(row: usize, col: usize, slot: usize, rotation: Rotation) -> ZoneTemplate {
    ZoneTemplate {
        position: GridPosition::new(row, col),
        slot,
        rotation,
    }
}

/// Everything the planner needs to know about a fold topology
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologySpec {
    pub topology: FoldTopology,
    pub rows: usize,
    pub cols: usize,
    /// Front side of a fully used sheet
    pub signature: &'static [ZoneTemplate],
    /// Front side of each four-page strip, in fill order
    pub folio_strips: &'static [[ZoneTemplate; 2]],
    /// Pages carried by a full sheet (both sides)
    pub pages_per_sheet: usize,
    /// Pages of the first sheet taken by the cover and back cover
    pub reserved_cover_pages: usize,
    pub default_duplex: DuplexFlip,
}

// =============================================================================
// Tables
// =============================================================================

const TWO_PANEL: TopologySpec = TopologySpec {
    topology: FoldTopology::TwoPanel,
    rows: 1,
    cols: 2,
    signature: &[zone(0, 0, 3, UP), zone(0, 1, 0, UP)],
    folio_strips: &[],
    pages_per_sheet: 4,
    reserved_cover_pages: 0,
    default_duplex: DuplexFlip::LeftRight,
};

const FOUR_PANEL: TopologySpec = TopologySpec {
    topology: FoldTopology::FourPanel,
    rows: 2,
    cols: 2,
    signature: &[
        zone(0, 0, 3, CW),
        zone(0, 1, 0, CCW),
        zone(1, 0, 4, CW),
        zone(1, 1, 7, CCW),
    ],
    // Half sheet: left column only
    folio_strips: &[[zone(0, 0, 3, CW), zone(1, 0, 0, CW)]],
    pages_per_sheet: 8,
    reserved_cover_pages: 2,
    default_duplex: DuplexFlip::TopBottom,
};

const EIGHT_PANEL: TopologySpec = TopologySpec {
    topology: FoldTopology::EightPanel,
    rows: 2,
    cols: 4,
    signature: &[
        zone(0, 0, 4, DOWN),
        zone(0, 1, 11, DOWN),
        zone(0, 2, 8, DOWN),
        zone(0, 3, 7, DOWN),
        zone(1, 0, 3, UP),
        zone(1, 1, 12, UP),
        zone(1, 2, 15, UP),
        zone(1, 3, 0, UP),
    ],
    folio_strips: &[
        [zone(1, 2, 3, UP), zone(1, 3, 0, UP)],
        [zone(1, 0, 3, UP), zone(1, 1, 0, UP)],
        [zone(0, 2, 0, DOWN), zone(0, 3, 3, DOWN)],
        [zone(0, 0, 0, DOWN), zone(0, 1, 3, DOWN)],
    ],
    pages_per_sheet: 16,
    reserved_cover_pages: 2,
    default_duplex: DuplexFlip::LeftRight,
};

impl TopologySpec {
    pub fn for_topology(topology: FoldTopology) -> &'static TopologySpec {
        match topology {
            FoldTopology::TwoPanel => &TWO_PANEL,
            FoldTopology::FourPanel => &FOUR_PANEL,
            FoldTopology::EightPanel => &EIGHT_PANEL,
        }
    }

    pub fn zones_per_side(&self) -> usize {
        self.rows * self.cols
    }

    /// Half-pages that fit on the first sheet next to the covers
    pub fn first_sheet_capacity(&self) -> usize {
        self.pages_per_sheet - self.reserved_cover_pages
    }

    /// Rotation applied to listing pages; every signature zone of a
    /// topology is either sideways or not.
    pub fn content_rotation(&self) -> Rotation {
        self.signature
            .first()
            .map(|t| t.rotation)
            .unwrap_or(Rotation::Upright)
    }
}
